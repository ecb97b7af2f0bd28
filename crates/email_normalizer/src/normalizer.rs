use serde_json::Value;
use tracing::trace;

use crate::config::NormalizerConfig;
use crate::error::{Error, Result};
use crate::pattern::CutPattern;
use crate::provider::ProviderTable;

/// Handling of domains missing from the provider table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizeOptions {
    /// Apply `pattern` to unknown domains. Off by default.
    pub custom: bool,
    pub pattern: CutPattern,
}

impl NormalizeOptions {
    pub fn custom() -> Self {
        Self {
            custom: true,
            pattern: CutPattern::default(),
        }
    }

    pub fn custom_with(pattern: impl Into<CutPattern>) -> Self {
        Self {
            custom: true,
            pattern: pattern.into(),
        }
    }
}

/// Normalizes addresses against a provider table.
#[derive(Debug, Clone, Default)]
pub struct EmailNormalizer {
    providers: ProviderTable,
    options: NormalizeOptions,
}

impl EmailNormalizer {
    pub fn new(providers: ProviderTable) -> Self {
        Self {
            providers,
            options: NormalizeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: NormalizeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn from_config(config: &NormalizerConfig) -> Result<Self> {
        let options = NormalizeOptions {
            custom: config.custom,
            pattern: config.custom_cut()?,
        };
        Ok(Self::new(config.provider_table()?).with_options(options))
    }

    pub fn providers(&self) -> &ProviderTable {
        &self.providers
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize with this normalizer's own options.
    pub fn normalize(&self, email: &str) -> Result<String> {
        normalize_with_table(&self.providers, email, &self.options)
    }

    /// Normalize a dynamically-typed value, rejecting anything but a string.
    pub fn normalize_value(&self, value: &Value) -> Result<String> {
        match value {
            Value::String(email) => self.normalize(email),
            other => Err(Error::TypeValidation(json_type_name(other).to_string())),
        }
    }

    /// True when both addresses normalize to the same string.
    pub fn same_address(&self, a: &str, b: &str) -> Result<bool> {
        Ok(self.normalize(a)? == self.normalize(b)?)
    }
}

/// Normalize against the built-in providers, leaving unknown domains as-is.
pub fn normalize_email(email: &str) -> Result<String> {
    normalize_email_with(email, &NormalizeOptions::default())
}

/// Normalize against the built-in providers.
pub fn normalize_email_with(email: &str, options: &NormalizeOptions) -> Result<String> {
    normalize_with_table(ProviderTable::default_table(), email, options)
}

/// Dynamic-boundary variant of [`normalize_email_with`].
pub fn normalize_value(value: &Value, options: &NormalizeOptions) -> Result<String> {
    match value {
        Value::String(email) => normalize_email_with(email, options),
        other => Err(Error::TypeValidation(json_type_name(other).to_string())),
    }
}

fn normalize_with_table(
    providers: &ProviderTable,
    email: &str,
    options: &NormalizeOptions,
) -> Result<String> {
    let email = email.to_lowercase();

    let parts: Vec<&str> = email.split('@').collect();
    let &[local, domain] = parts.as_slice() else {
        return Err(Error::EmailFormat(format!(
            "expected exactly one '@' in '{}'",
            email
        )));
    };

    let (local, domain) = match providers.get(domain) {
        Some(rule) => {
            trace!("Domain {} matched provider rule", domain);
            (rule.cut.cut(local), rule.alias.as_deref().unwrap_or(domain))
        }
        None if options.custom => (options.pattern.cut(local), domain),
        None => (local.into(), domain),
    };

    Ok(format!("{}@{}", local, domain))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
