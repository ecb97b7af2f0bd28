//! Cut patterns applied to the local part of an address.
//!
//! The two named patterns are compiled once per process and shared by every
//! provider rule that references them.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// A `+` and everything after it.
pub static PLUS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+.*$").expect("PLUS pattern compiles"));

/// Any `.`, or a `+` and everything after it.
pub static PLUS_AND_DOT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.|\+.*$").expect("PLUS_AND_DOT pattern compiles"));

/// Pattern used to strip characters from a local part.
#[derive(Debug, Clone, Default)]
pub enum CutPattern {
    /// Strip `+suffix` only
    Plus,
    /// Strip dots and `+suffix`
    #[default]
    PlusAndDot,
    /// Caller-supplied expression
    Custom(Regex),
}

impl CutPattern {
    /// Compile a caller-supplied pattern.
    pub fn custom(pattern: &str) -> crate::Result<Self> {
        Ok(CutPattern::Custom(Regex::new(pattern)?))
    }

    pub fn regex(&self) -> &Regex {
        match self {
            CutPattern::Plus => &*PLUS,
            CutPattern::PlusAndDot => &*PLUS_AND_DOT,
            CutPattern::Custom(re) => re,
        }
    }

    /// Remove every match from `local`.
    pub fn cut<'a>(&self, local: &'a str) -> Cow<'a, str> {
        self.regex().replace_all(local, "")
    }
}

// Regex has no PartialEq; custom patterns compare by source text.
impl PartialEq for CutPattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CutPattern::Plus, CutPattern::Plus) => true,
            (CutPattern::PlusAndDot, CutPattern::PlusAndDot) => true,
            (CutPattern::Custom(a), CutPattern::Custom(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl From<Regex> for CutPattern {
    fn from(re: Regex) -> Self {
        CutPattern::Custom(re)
    }
}

/// Named pattern as written in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternName {
    Plus,
    PlusAndDot,
}

impl From<PatternName> for CutPattern {
    fn from(name: PatternName) -> Self {
        match name {
            PatternName::Plus => CutPattern::Plus,
            PatternName::PlusAndDot => CutPattern::PlusAndDot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plus_strips_suffix_only() {
        assert_eq!(CutPattern::Plus.cut("j.doe+news+more"), "j.doe");
    }

    #[test]
    fn test_plus_and_dot_strips_every_dot() {
        assert_eq!(CutPattern::PlusAndDot.cut("a.b.c+x.y"), "abc");
    }

    #[test]
    fn test_no_match_borrows() {
        assert!(matches!(CutPattern::PlusAndDot.cut("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_custom_pattern() {
        let pattern = CutPattern::custom(r"\.").unwrap();
        assert_eq!(pattern.cut("a..b+c"), "ab+c");
    }

    #[test]
    fn test_invalid_custom_pattern() {
        assert!(matches!(CutPattern::custom("("), Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_default_is_plus_and_dot() {
        assert_eq!(CutPattern::default(), CutPattern::PlusAndDot);
    }
}
