use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::Result;
use crate::pattern::{CutPattern, PatternName};
use crate::provider::{ProviderRule, ProviderTable};

/// Normalizer configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NormalizerConfig {
    /// Apply `custom_pattern` to domains missing from the provider table
    #[serde(default)]
    pub custom: bool,

    /// Regex for unknown domains. Default: the dot and plus pattern.
    #[serde(default)]
    pub custom_pattern: Option<String>,

    /// Map of domain to provider rule. When absent, the built-in table is used.
    #[serde(default)]
    pub providers: Option<HashMap<String, ProviderConfig>>,
}

/// Provider rule as written in configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Named cut pattern
    #[serde(default = "default_cut")]
    pub cut: PatternName,

    /// Canonical domain for this provider
    #[serde(default)]
    pub alias: Option<String>,
}

fn default_cut() -> PatternName {
    PatternName::PlusAndDot
}

impl NormalizerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading normalizer config from {}", path.display());
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded normalizer config from {}", path.display());
        Ok(config)
    }

    /// Provider table described by this configuration.
    pub fn provider_table(&self) -> Result<ProviderTable> {
        match &self.providers {
            None => Ok(ProviderTable::default()),
            Some(providers) => ProviderTable::from_rules(providers.iter().map(|(domain, p)| {
                let rule = ProviderRule {
                    cut: p.cut.into(),
                    alias: p.alias.clone(),
                };
                (domain.clone(), rule)
            })),
        }
    }

    /// Pattern applied to unknown domains.
    pub fn custom_cut(&self) -> Result<CutPattern> {
        match &self.custom_pattern {
            Some(pattern) => CutPattern::custom(pattern),
            None => Ok(CutPattern::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EmailNormalizer, Error};

    const SHIPPED: &str = r#"
[providers."gmail.com"]
cut = "plus_and_dot"

[providers."googlemail.com"]
cut = "plus_and_dot"
alias = "gmail.com"

[providers."live.com"]
cut = "plus_and_dot"

[providers."hotmail.com"]
cut = "plus"

[providers."outlook.com"]
cut = "plus"
"#;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = NormalizerConfig::from_toml_str("").unwrap();
        assert!(!config.custom);
        assert_eq!(config.custom_cut().unwrap(), CutPattern::PlusAndDot);
        assert_eq!(&config.provider_table().unwrap(), ProviderTable::default_table());
    }

    #[test]
    fn test_shipped_table_from_toml() {
        let config = NormalizerConfig::from_toml_str(SHIPPED).unwrap();
        assert_eq!(&config.provider_table().unwrap(), ProviderTable::default_table());
    }

    #[test]
    fn test_cut_defaults_to_plus_and_dot() {
        let config = NormalizerConfig::from_toml_str("[providers.\"example.com\"]\n").unwrap();
        let table = config.provider_table().unwrap();
        assert_eq!(table.get("example.com").unwrap().cut, CutPattern::PlusAndDot);
    }

    #[test]
    fn test_custom_pattern() {
        let config = NormalizerConfig::from_toml_str("custom = true\ncustom_pattern = '\\.'\n").unwrap();
        assert!(config.custom);
        assert_eq!(config.custom_cut().unwrap(), CutPattern::custom(r"\.").unwrap());
    }

    #[test]
    fn test_unknown_cut_name() {
        let result = NormalizerConfig::from_toml_str("[providers.\"a.com\"]\ncut = \"tilde\"\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_dangling_alias() {
        let config = NormalizerConfig::from_toml_str("[providers.\"a.com\"]\nalias = \"b.com\"\n").unwrap();
        assert!(matches!(config.provider_table(), Err(Error::Config(_))));
    }

    #[test]
    fn test_case_colliding_domains() {
        let content = r#"
[providers."gmail.com"]
cut = "plus"

[providers."GMAIL.com"]
cut = "plus_and_dot"
"#;
        let config = NormalizerConfig::from_toml_str(content).unwrap();
        for _ in 0..20 {
            assert_eq!(
                config.provider_table().unwrap_err(),
                Error::Config("duplicate provider domain 'gmail.com'".into())
            );
        }
        assert!(EmailNormalizer::from_config(&config).is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = NormalizerConfig::from_file("/nonexistent/email_normalizer.toml");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
