//! Known email provider rules
//!
//! Maps a lowercase domain to the cut pattern its mail server ignores when
//! delivering, and optionally to the canonical domain its addresses are
//! rewritten to.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::{Error, Result};
use crate::pattern::CutPattern;

/// Rule applied to addresses at one domain
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRule {
    pub cut: CutPattern,
    /// Domain this one is rewritten to. Must be a key of the same table.
    pub alias: Option<String>,
}

impl ProviderRule {
    pub fn new(cut: CutPattern) -> Self {
        Self { cut, alias: None }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// Immutable domain -> rule mapping
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderTable {
    rules: HashMap<String, ProviderRule>,
}

static DEFAULT_TABLE: Lazy<ProviderTable> = Lazy::new(ProviderTable::shipped);

impl ProviderTable {
    /// Build a table, lowercasing domains and checking that every alias
    /// names a domain of the table.
    pub fn from_rules<I, S>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, ProviderRule)>,
        S: Into<String>,
    {
        let mut table: HashMap<String, ProviderRule> = HashMap::new();
        for (domain, mut rule) in rules {
            let domain: String = domain.into();
            let domain = domain.to_lowercase();
            if table.contains_key(&domain) {
                return Err(Error::Config(format!("duplicate provider domain '{}'", domain)));
            }
            rule.alias = rule.alias.map(|alias| alias.to_lowercase());
            table.insert(domain, rule);
        }

        for (domain, rule) in &table {
            if let Some(alias) = &rule.alias {
                if !table.contains_key(alias) {
                    return Err(Error::Config(format!(
                        "alias '{}' of domain '{}' is not a known provider",
                        alias, domain
                    )));
                }
            }
        }

        debug!("Built provider table with {} domains", table.len());
        Ok(Self { rules: table })
    }

    /// Process-wide table of the built-in providers.
    pub fn default_table() -> &'static ProviderTable {
        &DEFAULT_TABLE
    }

    fn shipped() -> Self {
        let rules = [
            ("gmail.com", ProviderRule::new(CutPattern::PlusAndDot)),
            (
                "googlemail.com",
                ProviderRule::new(CutPattern::PlusAndDot).with_alias("gmail.com"),
            ),
            ("live.com", ProviderRule::new(CutPattern::PlusAndDot)),
            ("hotmail.com", ProviderRule::new(CutPattern::Plus)),
            ("outlook.com", ProviderRule::new(CutPattern::Plus)),
        ];

        Self::from_rules(rules).expect("shipped provider table is valid")
    }

    /// Rule for an already-lowercased domain.
    pub fn get(&self, domain: &str) -> Option<&ProviderRule> {
        self.rules.get(domain)
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.rules.contains_key(domain)
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for ProviderTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}
