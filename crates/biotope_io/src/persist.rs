//! Result files written at the end of a run.
//!
//! Paths ending in `.gz` are gzip-compressed; everything else is written as
//! pretty-printed JSON.

use crate::aggregate::PopulationSummary;
use crate::error::{IoError, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResults {
    /// RFC 3339 timestamp of when the results were produced.
    pub generated_at: String,
    pub config_fingerprint: String,
    pub seed: Option<u64>,
    pub summary: PopulationSummary,
}

impl SimulationResults {
    #[must_use]
    pub fn new(summary: PopulationSummary, config_fingerprint: String, seed: Option<u64>) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            config_fingerprint,
            seed,
            summary,
        }
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

pub fn persist(results: &SimulationResults, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            return Err(IoError::validation(format!(
                "Output directory {} does not exist",
                parent.display()
            )));
        }
    }

    let json = serde_json::to_vec_pretty(results)?;
    let file = BufWriter::new(File::create(path)?);
    if is_gzip(path) {
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(&json)?;
        encoder.finish()?.flush()?;
    } else {
        let mut file = file;
        file.write_all(&json)?;
        file.flush()?;
    }

    tracing::info!(path = %path.display(), bytes = json.len(), "Results persisted");
    Ok(())
}

pub fn read_results(path: impl AsRef<Path>) -> Result<SimulationResults> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);
    let mut json = String::new();
    if is_gzip(path) {
        GzDecoder::new(reader).read_to_string(&mut json)?;
    } else {
        reader.read_to_string(&mut json)?;
    }
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("biotope_persist_{}_{name}", std::process::id()))
    }

    fn results() -> SimulationResults {
        let mut summary = PopulationSummary {
            day: 400,
            alive_total: 3,
            dead_total: 7,
            ..PopulationSummary::default()
        };
        summary.organisms.insert("Rabbit".to_string(), 3);
        summary.dead.insert("Rabbit".to_string(), 7);
        SimulationResults::new(summary, "abc123".to_string(), Some(42))
    }

    #[test]
    fn test_plain_json_file() {
        let path = scratch("plain.json");
        let results = results();
        persist(&results, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"config_fingerprint\": \"abc123\""));
        assert_eq!(read_results(&path).unwrap(), results);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_gzip_file() {
        let path = scratch("results.json.gz");
        let results = results();
        persist(&results, &path).unwrap();

        let raw = std::fs::read(&path).unwrap();
        assert_eq!(&raw[..2], &[0x1f, 0x8b]);
        assert_eq!(read_results(&path).unwrap(), results);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_directory_rejected() {
        let path = scratch("missing_dir").join("out.json");
        assert!(matches!(
            persist(&results(), path),
            Err(IoError::Validation(_))
        ));
    }

    #[test]
    fn test_timestamp_is_rfc3339() {
        let results = results();
        assert!(chrono::DateTime::parse_from_rfc3339(&results.generated_at).is_ok());
    }
}
