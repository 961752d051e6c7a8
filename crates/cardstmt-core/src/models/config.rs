//! Configuration structures for the statement parsing pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, StatementError};
use crate::statement::IssuerRegistry;

/// Main configuration for the cardstmt pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Batch processing configuration.
    pub batch: BatchConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Issuer registry configuration.
    pub registry: RegistryConfig,
}

/// Batch processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Number of parallel workers (1 = sequential).
    pub jobs: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { jobs: 4 }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum extracted text length; shorter text is an extraction error (0 = disabled).
    pub min_text_length: usize,

    /// Try an empty password on encrypted PDFs.
    pub decrypt_empty_password: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 0,
            decrypt_empty_password: true,
        }
    }
}

/// Issuer registry configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// JSON file with additional issuer profiles. These take priority over built-ins.
    pub profiles: Option<PathBuf>,

    /// Include the built-in issuer profiles.
    pub include_builtin: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            profiles: None,
            include_builtin: true,
        }
    }
}

impl ParserConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build the issuer registry described by this configuration.
    pub fn build_registry(&self) -> Result<IssuerRegistry> {
        let mut definitions = match &self.registry.profiles {
            Some(path) => IssuerRegistry::load_definitions(path)?,
            None => Vec::new(),
        };

        if self.registry.include_builtin {
            definitions.extend(IssuerRegistry::builtin_definitions());
        }

        if definitions.is_empty() {
            return Err(StatementError::Config(
                "no issuer profiles configured".to_string(),
            ));
        }

        Ok(IssuerRegistry::from_definitions(definitions)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ParserConfig = serde_json::from_str(r#"{"batch": {"jobs": 2}}"#).unwrap();
        assert_eq!(config.batch.jobs, 2);
        assert_eq!(config.pdf, PdfConfig::default());
        assert!(config.registry.include_builtin);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = ParserConfig::default();
        config.pdf.min_text_length = 20;
        config.save(&path).unwrap();

        assert_eq!(ParserConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_custom_profiles_take_priority() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Test Bank", "identifiers": ["Bank"], "fields": {{"card_number": ["(\\d{{16}})"]}}}}]"#
        )
        .unwrap();

        let mut config = ParserConfig::default();
        config.registry.profiles = Some(file.path().to_path_buf());

        let registry = config.build_registry().unwrap();
        let names: Vec<&str> = registry.iter().map(|p| p.name()).collect();
        assert_eq!(names[0], "Test Bank");
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn test_empty_registry_is_rejected() {
        let mut config = ParserConfig::default();
        config.registry.include_builtin = false;
        assert!(matches!(config.build_registry(), Err(StatementError::Config(_))));
    }
}
