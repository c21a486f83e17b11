use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::model::{Annotation, ANNOTATION_HEADER};
use crate::store::traits::AnnotationStore;

/// Append-only CSV file of annotations.
///
/// Every append and export holds `write_lock`, so at most one writer touches
/// the file at a time and readers never see a half-written record.
#[derive(Debug, Clone)]
pub struct CsvAnnotationStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl CsvAnnotationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, annotation: &Annotation) -> Result<()> {
        for label in annotation.ambiguous_labels() {
            log::warn!(
                "Label '{}' on annotation {} contains a comma and cannot be split back out",
                label,
                annotation.id
            );
        }

        let _guard = self.write_lock.lock();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open annotations file {}", self.path.display()))?;

        // A fresh (or still empty) file gets the header first
        let needs_header = file
            .metadata()
            .context("Failed to stat annotations file")?
            .len()
            == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer
                .write_record(ANNOTATION_HEADER)
                .context("Failed to write CSV headers")?;
        }

        writer
            .write_record(annotation.to_record())
            .with_context(|| format!("Failed to write annotation {}", annotation.id))?;

        let mut file = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush annotations file: {}", e.error()))?;
        file.flush().context("Failed to flush annotations file")?;

        Ok(())
    }

    pub fn read_all(&self) -> Result<Option<Vec<u8>>> {
        let _guard = self.write_lock.lock();

        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| {
                format!("Failed to read annotations file {}", self.path.display())
            }),
        }
    }
}

#[async_trait::async_trait]
impl AnnotationStore for CsvAnnotationStore {
    async fn append_annotation(&self, annotation: &Annotation) -> Result<()> {
        let store = self.clone();
        let annotation = annotation.clone();
        tokio::task::spawn_blocking(move || store.append(&annotation)).await?
    }

    async fn export_annotations(&self) -> Result<Option<Vec<u8>>> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.read_all()).await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewAnnotation;
    use chrono::{DateTime, Utc};
    use tempfile::TempDir;

    fn annotation(id: &str, labels: &[&str], notes: &str) -> Annotation {
        NewAnnotation {
            id: id.to_string(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            notes: Some(notes.to_string()),
        }
        .into_annotation(Utc::now())
    }

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap()
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_header_written_once() {
        let dir = TempDir::new().unwrap();
        let store = CsvAnnotationStore::new(dir.path().join("annotations.csv"));

        store.append(&annotation("1", &["clarity"], "")).unwrap();
        let rows = read_rows(store.path());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ANNOTATION_HEADER.to_vec());

        store.append(&annotation("2", &["tone"], "meh")).unwrap();
        let rows = read_rows(store.path());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.iter().filter(|r| r[0] == "id").count(), 1);
        assert!(rows.iter().all(|r| r.len() == 4));
        assert_eq!(rows[2][0], "2");
        assert_eq!(rows[2][2], "meh");
    }

    #[test]
    fn test_labels_and_timestamp_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = CsvAnnotationStore::new(dir.path().join("annotations.csv"));
        let before = Utc::now();

        store.append(&annotation("42", &["a", "b"], "hi")).unwrap();

        let rows = read_rows(store.path());
        let row = &rows[1];
        assert_eq!(row[0], "42");
        assert_eq!(row[1].split(',').collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(row[2], "hi");

        let stamped = DateTime::parse_from_rfc3339(&row[3])
            .unwrap()
            .with_timezone(&Utc);
        assert!(row[3].ends_with('Z'));
        assert!((stamped - before).num_seconds().abs() <= 5);
    }

    #[test]
    fn test_plain_row_layout() {
        let dir = TempDir::new().unwrap();
        let store = CsvAnnotationStore::new(dir.path().join("annotations.csv"));
        let annotation = annotation("7", &["clarity"], "");

        store.append(&annotation).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        let expected = format!(
            "id,labels,notes,timestamp\n7,clarity,,{}\n",
            annotation.formatted_timestamp()
        );
        assert_eq!(contents, expected);
    }

    #[test]
    fn test_notes_with_delimiters_stay_one_field() {
        let dir = TempDir::new().unwrap();
        let store = CsvAnnotationStore::new(dir.path().join("annotations.csv"));

        store
            .append(&annotation("3", &["x"], "said \"no\", then\nleft"))
            .unwrap();

        let rows = read_rows(store.path());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][2], "said \"no\", then\nleft");
    }

    #[test]
    fn test_empty_existing_file_gets_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("annotations.csv");
        fs::write(&path, b"").unwrap();
        let store = CsvAnnotationStore::new(&path);

        store.append(&annotation("1", &["a"], "")).unwrap();
        assert_eq!(read_rows(&path)[0], ANNOTATION_HEADER.to_vec());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = CsvAnnotationStore::new(dir.path().join("missing/annotations.csv"));
        assert!(store.append(&annotation("1", &["a"], "")).is_err());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_read_all() {
        let dir = TempDir::new().unwrap();
        let store = CsvAnnotationStore::new(dir.path().join("annotations.csv"));
        assert!(store.read_all().unwrap().is_none());

        store.append(&annotation("1", &["a"], "")).unwrap();
        let bytes = store.read_all().unwrap().unwrap();
        assert!(bytes.starts_with(b"id,labels,notes,timestamp\n"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_do_not_interleave() {
        let dir = TempDir::new().unwrap();
        let store = CsvAnnotationStore::new(dir.path().join("annotations.csv"));
        let long_notes = "n".repeat(16 * 1024);

        let mut handles = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            let annotation = annotation(&i.to_string(), &["load"], &long_notes);
            handles.push(tokio::spawn(async move {
                store.append_annotation(&annotation).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let rows = read_rows(store.path());
        assert_eq!(rows.len(), 33);
        assert!(rows[1..].iter().all(|r| r.len() == 4 && r[2] == long_notes));
    }
}
