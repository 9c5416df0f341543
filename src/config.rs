// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::classifier::LegacyOptions;
use crate::error::{IngestError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngestConfig {
    pub scan: ScanConfig,
    #[serde(default)]
    pub legacy: LegacyOptions,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanConfig {
    pub manifest_patterns: Vec<String>,
    #[serde(default)]
    pub skip_patterns: Vec<String>,
    #[serde(default)]
    pub follow_links: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub pretty: bool,
}

impl IngestConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("BPA_INGEST")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| IngestError::Config(e.to_string()))?;

        let config: IngestConfig = settings
            .try_deserialize()
            .map_err(|e| IngestError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            scan: ScanConfig {
                manifest_patterns: vec!["*.md5".to_string(), "*_checksums.txt".to_string()],
                skip_patterns: vec![".git/*".to_string(), "*.tmp".to_string()],
                follow_links: false,
            },
            legacy: LegacyOptions::default(),
            output: OutputConfig {
                directory: PathBuf::from("./exports"),
                pretty: true,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.scan.manifest_patterns.is_empty() {
            return Err(IngestError::Config(
                "scan.manifest_patterns must not be empty".to_string(),
            ));
        }

        if self
            .scan
            .manifest_patterns
            .iter()
            .chain(&self.scan.skip_patterns)
            .any(|p| p.trim().is_empty())
        {
            return Err(IngestError::Config(
                "scan patterns must not be blank".to_string(),
            ));
        }

        Ok(())
    }
}
