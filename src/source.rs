//! Per-country trade sources.
//!
//! A source fetches the raw CSV payload for one country code. The pipeline
//! only depends on the [`TradeSource`] trait; [`FileSource`] reads extracts
//! from a directory and [`MemorySource`] serves payloads held in memory.

use crate::config::PipelineConfig;
use crate::constants::CODE_PLACEHOLDER;
use crate::error::{Result, WitsError};
use async_trait::async_trait;
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::fs;
use tracing::debug;

/// Fetches one country's raw CSV payload
#[async_trait]
pub trait TradeSource: Send + Sync {
    async fn fetch(&self, code: &str) -> Result<String>;

    /// Location of a country's payload, for log messages
    fn describe(&self, code: &str) -> String;
}

/// Reads `<data_dir>/<file_pattern>` for each country
#[derive(Debug, Clone)]
pub struct FileSource {
    data_dir: PathBuf,
    file_pattern: String,
}

impl FileSource {
    pub fn new(data_dir: impl Into<PathBuf>, file_pattern: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            file_pattern: file_pattern.into(),
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.data_dir.clone(), config.file_pattern.clone())
    }

    pub fn path_for(&self, code: &str) -> PathBuf {
        self.data_dir
            .join(self.file_pattern.replace(CODE_PLACEHOLDER, code))
    }
}

#[async_trait]
impl TradeSource for FileSource {
    async fn fetch(&self, code: &str) -> Result<String> {
        let path = self.path_for(code);

        let bytes = fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => WitsError::SourceNotFound {
                code: code.to_string(),
                path: path.clone(),
            },
            _ => WitsError::Io(e),
        })?;

        // WITS extracts are not always valid UTF-8
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn describe(&self, code: &str) -> String {
        self.path_for(code).display().to_string()
    }
}

/// In-memory payloads keyed by country code, counting every fetch
#[derive(Debug, Default)]
pub struct MemorySource {
    payloads: HashMap<String, String>,
    fetches: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(mut self, code: impl Into<String>, payload: impl Into<String>) -> Self {
        self.payloads.insert(code.into(), payload.into());
        self
    }

    /// Number of fetches served or attempted so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TradeSource for MemorySource {
    async fn fetch(&self, code: &str) -> Result<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        // Yield so concurrent fetches interleave like real I/O
        tokio::task::yield_now().await;

        self.payloads
            .get(code)
            .cloned()
            .ok_or_else(|| WitsError::SourceNotFound {
                code: code.to_string(),
                path: PathBuf::from(self.describe(code)),
            })
    }

    fn describe(&self, code: &str) -> String {
        format!("memory://{}", code)
    }
}

/// Discover country codes from the extracts present in `data_dir`.
///
/// File names are matched against `file_pattern`; the text standing in for
/// `{code}` is returned uppercased, sorted and deduplicated.
pub async fn discover_country_codes(data_dir: &Path, file_pattern: &str) -> Result<Vec<String>> {
    let matcher = pattern_regex(file_pattern)?;

    if !data_dir.exists() {
        return Err(WitsError::Configuration {
            message: format!("data directory not found: {}", data_dir.display()),
        });
    }

    let mut codes = Vec::new();
    let mut dir = fs::read_dir(data_dir).await?;

    while let Some(entry) = dir.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };

        if let Some(code) = matcher.captures(name).and_then(|c| c.name("code")) {
            codes.push(code.as_str().to_uppercase());
        }
    }

    codes.sort();
    codes.dedup();

    debug!(
        "Discovered {} country extracts in {}",
        codes.len(),
        data_dir.display()
    );

    Ok(codes)
}

fn pattern_regex(file_pattern: &str) -> Result<Regex> {
    let Some((prefix, suffix)) = file_pattern.split_once(CODE_PLACEHOLDER) else {
        return Err(WitsError::Configuration {
            message: format!(
                "file pattern '{}' must contain {}",
                file_pattern, CODE_PLACEHOLDER
            ),
        });
    };

    let expression = format!(
        "^{}(?P<code>[A-Za-z0-9]+){}$",
        regex::escape(prefix),
        regex::escape(suffix)
    );

    Regex::new(&expression).map_err(|e| WitsError::Configuration {
        message: format!("invalid file pattern '{}': {}", file_pattern, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_source_reads_extract() {
        let temp_dir = TempDir::new().unwrap();
        std_fs::write(temp_dir.path().join("en_DEU_At-a-Glance.csv"), "Reporter\n").unwrap();

        let source = FileSource::new(temp_dir.path(), "en_{code}_At-a-Glance.csv");
        let payload = source.fetch("DEU").await.unwrap();
        assert_eq!(payload, "Reporter\n");
        assert!(source.describe("DEU").ends_with("en_DEU_At-a-Glance.csv"));
    }

    #[test]
    fn test_path_from_config_substitutes_code() {
        let config = PipelineConfig::default()
            .with_data_dir("/tmp/wits")
            .with_file_pattern("en_{code}_At-a-Glance.csv");

        let source = FileSource::from_config(&config);
        assert_eq!(
            source.path_for("DEU"),
            PathBuf::from("/tmp/wits/en_DEU_At-a-Glance.csv")
        );
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = FileSource::new(temp_dir.path(), "{code}.csv");

        match source.fetch("FRA").await {
            Err(WitsError::SourceNotFound { code, path }) => {
                assert_eq!(code, "FRA");
                assert_eq!(path, temp_dir.path().join("FRA.csv"));
            }
            other => panic!("Expected SourceNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_memory_source_counts_fetches() {
        let source = MemorySource::new().with_payload("CHN", "payload");

        assert_eq!(source.fetch("CHN").await.unwrap(), "payload");
        assert!(source.fetch("JPN").await.is_err());
        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_discover_country_codes() {
        let temp_dir = TempDir::new().unwrap();
        for name in [
            "en_DEU_At-a-Glance.csv",
            "en_fra_At-a-Glance.csv",
            "en_840_At-a-Glance.csv",
            "notes.txt",
            "en_At-a-Glance.csv",
        ] {
            std_fs::write(temp_dir.path().join(name), "").unwrap();
        }
        std_fs::create_dir(temp_dir.path().join("en_DIR_At-a-Glance.csv")).unwrap();

        let codes = discover_country_codes(temp_dir.path(), "en_{code}_At-a-Glance.csv")
            .await
            .unwrap();
        assert_eq!(codes, vec!["840", "DEU", "FRA"]);
    }

    #[tokio::test]
    async fn test_discover_rejects_pattern_without_placeholder() {
        let temp_dir = TempDir::new().unwrap();
        let result = discover_country_codes(temp_dir.path(), "data.csv").await;
        assert!(matches!(result, Err(WitsError::Configuration { .. })));
    }
}
