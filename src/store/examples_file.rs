use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::model::Example;
use crate::store::traits::ExampleStore;

/// Examples kept as line-delimited JSON, one object per line.
#[derive(Debug, Clone)]
pub struct JsonlExampleStore {
    path: PathBuf,
}

impl JsonlExampleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<Example>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to open examples file {}", self.path.display())
                })
            }
        };

        parse_examples(BufReader::new(file))
            .with_context(|| format!("Error reading examples file {}", self.path.display()))
    }

    pub fn reset(&self) -> Result<()> {
        File::create(&self.path)
            .with_context(|| format!("Failed to clear examples file {}", self.path.display()))?;
        Ok(())
    }

    pub fn replace_all(&self, examples: &[Example]) -> Result<()> {
        let file = File::create(&self.path)
            .with_context(|| format!("Failed to create examples file {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);

        for example in examples {
            serde_json::to_writer(&mut writer, example)
                .with_context(|| format!("Failed to write example {}", example.id))?;
            writer.write_all(b"\n")?;
        }

        writer.flush().context("Failed to flush examples file")?;
        Ok(())
    }

    /// Create the directory holding the examples file if it is missing
    pub fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
        }
        Ok(())
    }
}

/// Parse line-delimited examples. Blank lines are skipped and a line that is
/// not a valid example is logged and dropped; only I/O failures are errors.
pub fn parse_examples<R: BufRead>(mut reader: R) -> Result<Vec<Example>> {
    let mut examples = Vec::new();
    let mut buf = Vec::new();
    let mut line_num = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_num += 1;

        let line = buf.trim_ascii();
        if line.is_empty() {
            continue;
        }

        // A bare `null` decodes as an empty example
        match serde_json::from_slice::<Option<Example>>(line) {
            Ok(example) => examples.push(example.unwrap_or_default()),
            Err(e) => log::warn!("Failed to parse examples line {}: {}", line_num, e),
        }
    }

    Ok(examples)
}

#[async_trait::async_trait]
impl ExampleStore for JsonlExampleStore {
    async fn list_examples(&self) -> Result<Vec<Example>> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.load()).await?
    }

    async fn replace_examples(&self, examples: Vec<Example>) -> Result<()> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.replace_all(&examples)).await?
    }
}
