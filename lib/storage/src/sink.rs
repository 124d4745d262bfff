//! Result sinks
//!
//! Qualification results can be emitted beyond the HTTP response, one
//! JSON object per line so downstream tooling can stream them. The
//! server binary does not write result files; sinks are a library
//! surface for embedders that run qualification batches and want the
//! ranked output on disk.

use atomicwrites::{AtomicFile, OverwriteBehavior};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use vendx_core::{Error, Result};

/// Destination for a finished qualification run.
pub trait ResultSink: Send + Sync {
    /// Write one batch of ranked results.
    fn write_batch<T: Serialize>(&self, results: &[T]) -> Result<()>;
}

/// JSONL file sink, written atomically.
#[derive(Debug)]
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for JsonlSink {
    fn write_batch<T: Serialize>(&self, results: &[T]) -> Result<()> {
        let mut lines = Vec::with_capacity(results.len());
        for result in results {
            lines.push(
                serde_json::to_string(result)
                    .map_err(|e| Error::Serialization(e.to_string()))?,
            );
        }

        let file = AtomicFile::new(&self.path, OverwriteBehavior::AllowOverwrite);
        file.write(|f| {
            for line in &lines {
                f.write_all(line.as_bytes())?;
                f.write_all(b"\n")?;
            }
            Ok::<_, std::io::Error>(())
        })
        .map_err(|e| Error::Storage(format!("failed to write results: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Row {
        name: &'static str,
        score: f32,
    }

    #[test]
    fn test_writes_one_json_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.jsonl");
        let sink = JsonlSink::new(&path);

        let rows = vec![
            Row { name: "Acme", score: 0.91 },
            Row { name: "Beta", score: 0.44 },
        ];
        sink.write_batch(&rows).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["name"], "Acme");
    }

    #[test]
    fn test_overwrite_replaces_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.jsonl");
        let sink = JsonlSink::new(&path);

        sink.write_batch(&[Row { name: "Acme", score: 0.9 }]).unwrap();
        sink.write_batch(&[Row { name: "Beta", score: 0.5 }]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("Beta"));
    }

    #[test]
    fn test_empty_batch_produces_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.jsonl");
        let sink = JsonlSink::new(&path);

        sink.write_batch::<Row>(&[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
