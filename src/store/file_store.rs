use anyhow::{Context, Result};
use std::fs;

use crate::config::StorageConfig;
use crate::model::{Annotation, Example};
use crate::store::traits::{AnnotationStore, ExampleStore};
use crate::store::{CsvAnnotationStore, JsonlExampleStore};

/// Both stores rooted in one data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    examples: JsonlExampleStore,
    annotations: CsvAnnotationStore,
}

impl FileStore {
    pub fn new(storage: &StorageConfig) -> Self {
        Self {
            examples: JsonlExampleStore::new(storage.examples_path()),
            annotations: CsvAnnotationStore::new(storage.annotations_path()),
        }
    }

    /// Prepare the data directory for serving.
    ///
    /// The directory must exist or be creatable; that is the only fatal
    /// condition. Examples left from an earlier run are always cleared, and
    /// a failure to clear them is only logged.
    pub fn open(storage: &StorageConfig) -> Result<Self> {
        fs::create_dir_all(&storage.data_dir).with_context(|| {
            format!(
                "Failed to create data directory {}",
                storage.data_dir.display()
            )
        })?;

        let store = Self::new(storage);
        if let Err(e) = store.examples.reset() {
            log::error!("Failed to clear examples file: {:#}", e);
        }

        Ok(store)
    }

    pub fn examples(&self) -> &JsonlExampleStore {
        &self.examples
    }

    pub fn annotations(&self) -> &CsvAnnotationStore {
        &self.annotations
    }
}

#[async_trait::async_trait]
impl ExampleStore for FileStore {
    async fn list_examples(&self) -> Result<Vec<Example>> {
        self.examples.list_examples().await
    }

    async fn replace_examples(&self, examples: Vec<Example>) -> Result<()> {
        self.examples.replace_examples(examples).await
    }
}

#[async_trait::async_trait]
impl AnnotationStore for FileStore {
    async fn append_annotation(&self, annotation: &Annotation) -> Result<()> {
        self.annotations.append_annotation(annotation).await
    }

    async fn export_annotations(&self) -> Result<Option<Vec<u8>>> {
        self.annotations.export_annotations().await
    }
}
