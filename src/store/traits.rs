use crate::model::{Annotation, Example};
use anyhow::Result;

#[async_trait::async_trait]
pub trait ExampleStore: Send + Sync {
    /// All examples in storage order. A missing backing file is an empty list.
    async fn list_examples(&self) -> Result<Vec<Example>>;
    /// Replace every stored example with the given ones
    async fn replace_examples(&self, examples: Vec<Example>) -> Result<()>;
}

#[async_trait::async_trait]
pub trait AnnotationStore: Send + Sync {
    /// Durably append one annotation record. Returns only once the record is written.
    async fn append_annotation(&self, annotation: &Annotation) -> Result<()>;
    /// Raw annotation records, `None` if nothing has been recorded yet
    async fn export_annotations(&self) -> Result<Option<Vec<u8>>>;
}

pub trait Store: ExampleStore + AnnotationStore + Send + Sync {}

impl<T: ExampleStore + AnnotationStore> Store for T {}
