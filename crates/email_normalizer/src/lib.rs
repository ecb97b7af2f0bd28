//! Provider-aware email address normalization
//!
//! Lowercases an address and strips the local-part characters a provider
//! ignores on delivery (dots, `+tag` subaddressing), so that addresses
//! reaching the same mailbox compare equal:
//!
//! ```
//! use email_normalizer::normalize_email;
//!
//! assert_eq!(normalize_email("J.Doe+news@GoogleMail.com").unwrap(), "jdoe@gmail.com");
//! assert_eq!(normalize_email("j.doe+news@hotmail.com").unwrap(), "j.doe@hotmail.com");
//! ```

pub mod config;
pub mod error;
pub mod normalizer;
pub mod pattern;
pub mod provider;

pub use config::{NormalizerConfig, ProviderConfig};
pub use error::{Error, Result};
pub use normalizer::{
    normalize_email, normalize_email_with, normalize_value, EmailNormalizer, NormalizeOptions,
};
pub use pattern::{CutPattern, PatternName};
pub use provider::{ProviderRule, ProviderTable};
