//! Pseudonym label generation.
//!
//! A [`NamingScheme`] turns a zero-based position in the (possibly shuffled)
//! name list into a label. The built-in schemes never produce the same label
//! for two positions; custom schemes are checked by the map builder.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

pub const DEFAULT_TEMPLATE: &str = "Pupil-###";

/// Pad width used when a template has no `#` run.
const DEFAULT_PAD: usize = 3;

/// The cyclical alphabet used by [`NamingScheme::Greek`].
pub const GREEK_ALPHABET: [&str; 24] = [
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta", "Iota", "Kappa",
    "Lambda", "Mu", "Nu", "Xi", "Omicron", "Pi", "Rho", "Sigma", "Tau", "Upsilon", "Phi", "Chi",
    "Psi", "Omega",
];

/// Caller-supplied label function: `(start_at + index, index) -> label`.
pub type CustomScheme = Arc<dyn Fn(u64, usize) -> String + Send + Sync>;

#[derive(Clone)]
pub enum NamingScheme {
    /// A template whose first `#` run is replaced by the zero-padded number
    /// (`"Pupil-###"` → `Pupil-007`, `"Anon-##"` → `Anon-07`).
    Numbered(String),
    /// `Alpha-1` … `Omega-1`, then `Alpha-2`, and so on.
    Greek,
    Custom(CustomScheme),
}

impl NamingScheme {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(u64, usize) -> String + Send + Sync + 'static,
    {
        NamingScheme::Custom(Arc::new(f))
    }

    /// Label for the name at zero-based `index`.
    pub fn generate(&self, start_at: u32, index: usize) -> String {
        let number = u64::from(start_at) + index as u64;
        match self {
            NamingScheme::Numbered(template) => fill_template(template, number),
            NamingScheme::Greek => {
                let letter = GREEK_ALPHABET[index % GREEK_ALPHABET.len()];
                let cycle = index / GREEK_ALPHABET.len() + 1;
                format!("{letter}-{cycle}")
            }
            NamingScheme::Custom(f) => f(number, index),
        }
    }

    /// Whether labels are unique by construction.
    pub fn is_builtin(&self) -> bool {
        !matches!(self, NamingScheme::Custom(_))
    }
}

fn fill_template(template: &str, number: u64) -> String {
    match template.find('#') {
        Some(start) => {
            let width = template[start..].chars().take_while(|&c| c == '#').count();
            let end = start + width;
            format!("{}{number:0width$}{}", &template[..start], &template[end..])
        }
        None => {
            let width = DEFAULT_PAD;
            format!("{template}{number:0width$}")
        }
    }
}

impl Default for NamingScheme {
    fn default() -> Self {
        NamingScheme::Numbered(DEFAULT_TEMPLATE.to_string())
    }
}

impl fmt::Debug for NamingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingScheme::Numbered(template) => f.debug_tuple("Numbered").field(template).finish(),
            NamingScheme::Greek => f.write_str("Greek"),
            NamingScheme::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl fmt::Display for NamingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingScheme::Numbered(template) => f.write_str(template),
            NamingScheme::Greek => f.write_str("Greek"),
            NamingScheme::Custom(_) => f.write_str("custom"),
        }
    }
}

impl FromStr for NamingScheme {
    type Err = std::convert::Infallible;

    /// `"greek"` in any case selects the Greek cycle; blank selects the
    /// default template; anything else is taken as a numbered template.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            Ok(NamingScheme::default())
        } else if trimmed.eq_ignore_ascii_case("greek") {
            Ok(NamingScheme::Greek)
        } else {
            Ok(NamingScheme::Numbered(trimmed.to_string()))
        }
    }
}

impl Serialize for NamingScheme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NamingScheme::Custom(_) => Err(serde::ser::Error::custom(
                CoreError::CustomSchemeNotSerializable,
            )),
            other => serializer.collect_str(other),
        }
    }
}

impl<'de> Deserialize<'de> for NamingScheme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse::<NamingScheme>().unwrap_or_default())
    }
}
