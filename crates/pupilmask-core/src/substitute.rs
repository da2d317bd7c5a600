//! Whole-word name substitution in both directions.
//!
//! Every mapping is compiled into one [`Substituter`]: a single alternation
//! of all keys, longest first, applied in one left-to-right pass. One pass
//! means replacement text is never scanned again, so a pseudonym that
//! happens to contain a shorter real name (or vice versa) cannot be
//! corrupted, and `reidentify(anonymise(t))` restores `t` up to whitespace
//! inside names, which comes back as single spaces.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::{Captures, Regex, RegexBuilder};
use tracing::debug;

use crate::error::CoreError;
use crate::models::value::Value;
use crate::normalize::{collapse_whitespace, normalize};

/// Compiled size limit for the combined pattern. Generous enough for a
/// whole school's roll.
const PATTERN_SIZE_LIMIT: usize = 64 * (1 << 20);

/// Options shared by [`anonymise`] and [`reidentify`].
#[derive(Debug, Clone, Default)]
pub struct SubstituteOptions {
    /// Record fields to substitute. Other fields pass through unchanged.
    pub fields: Vec<String>,
    /// Extra names to target when anonymising. Normalized first; names with
    /// no mapping entry are skipped.
    pub extra_names: Vec<String>,
    /// Also replace stand-alone given names that belong to exactly one
    /// pupil. Only honoured by [`crate::map::PseudonymMap::anonymise`].
    pub alias_given_names: bool,
}

impl SubstituteOptions {
    pub fn with_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// A mapping compiled for repeated whole-word replacement.
#[derive(Debug, Clone)]
pub struct Substituter {
    pattern: Option<Regex>,
    /// Keyed on the whitespace-collapsed key.
    lookup: HashMap<String, String>,
}

impl Substituter {
    /// Compile `(key, replacement)` entries. Blank keys are ignored; when two
    /// keys collapse to the same text the first one wins.
    pub fn new<'a, I>(entries: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut lookup: HashMap<String, String> = HashMap::new();
        for (key, replacement) in entries {
            let key = collapse_whitespace(key);
            if key.is_empty() {
                continue;
            }
            lookup
                .entry(key)
                .or_insert_with(|| replacement.to_string());
        }

        if lookup.is_empty() {
            return Ok(Self {
                pattern: None,
                lookup,
            });
        }

        let mut keys: Vec<&str> = lookup.keys().map(String::as_str).collect();
        // Longest first: a longer name must never be shadowed by a shorter
        // one sharing its prefix ("Anna" before "Ann").
        keys.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });

        let alternation = keys
            .iter()
            .map(|key| whole_word_pattern(key))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = RegexBuilder::new(&alternation)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()?;

        debug!(keys = lookup.len(), "compiled substitution pattern");

        Ok(Self {
            pattern: Some(pattern),
            lookup,
        })
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Replace every whole-word occurrence of every key in `text`.
    pub fn replace_text(&self, text: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return text.to_string();
        };
        pattern
            .replace_all(text, |caps: &Captures<'_>| {
                let found = &caps[0];
                self.lookup
                    .get(&collapse_whitespace(found))
                    .cloned()
                    .unwrap_or_else(|| found.to_string())
            })
            .into_owned()
    }

    /// Apply to a value: text is replaced, sequences recurse element-wise,
    /// records have only the listed `fields` replaced, anything else is
    /// returned as is. A listed field holding a sequence or record is
    /// replaced throughout.
    pub fn apply(&self, input: &Value, fields: &[String]) -> Value {
        match input {
            Value::Text(text) => Value::Text(self.replace_text(text)),
            Value::Sequence(items) => {
                Value::Sequence(items.iter().map(|item| self.apply(item, fields)).collect())
            }
            Value::Record(record) => {
                let mut copy = record.clone();
                for field in fields {
                    if let Some(value) = copy.get_mut(field) {
                        *value = self.apply_all(value);
                    }
                }
                Value::Record(copy)
            }
            Value::Other(_) => input.clone(),
        }
    }

    /// Replace in every text value at any depth.
    fn apply_all(&self, input: &Value) -> Value {
        match input {
            Value::Text(text) => Value::Text(self.replace_text(text)),
            Value::Sequence(items) => {
                Value::Sequence(items.iter().map(|item| self.apply_all(item)).collect())
            }
            Value::Record(record) => Value::Record(
                record
                    .iter()
                    .map(|(key, value)| (key.clone(), self.apply_all(value)))
                    .collect(),
            ),
            Value::Other(_) => input.clone(),
        }
    }
}

/// Regex for one name: escaped, internal whitespace matching any whitespace
/// run, and `\b` on each edge that is a word character.
pub fn whole_word_pattern(key: &str) -> String {
    let body = key
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");

    let starts_word = key.chars().next().is_some_and(is_word_char);
    let ends_word = key.chars().next_back().is_some_and(is_word_char);

    format!(
        "(?:{}{body}{})",
        if starts_word { r"\b" } else { "" },
        if ends_word { r"\b" } else { "" },
    )
}

/// Word characters as the regex engine sees them, so `\b` is only placed
/// where it can match. Includes combining marks (decomposed "José").
static WORD_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w$").expect("static pattern compiles"));

fn is_word_char(c: char) -> bool {
    WORD_CHAR.is_match(c.encode_utf8(&mut [0; 4]))
}

/// Replace real names with pseudonyms.
///
/// `real_to_pseudo` is keyed on normalized names. Matching is case-sensitive
/// and whole-word; longer names take precedence over shorter ones.
pub fn anonymise(
    input: &Value,
    real_to_pseudo: &BTreeMap<String, String>,
    options: &SubstituteOptions,
) -> Result<Value, CoreError> {
    let extra: Vec<String> = options
        .extra_names
        .iter()
        .map(|name| normalize(name))
        .filter(|name| real_to_pseudo.contains_key(name))
        .collect();

    let entries = real_to_pseudo
        .iter()
        .map(|(real, pseudo)| (real.as_str(), pseudo.as_str()))
        .chain(extra.iter().filter_map(|name| {
            real_to_pseudo
                .get(name)
                .map(|pseudo| (name.as_str(), pseudo.as_str()))
        }));

    let substituter = Substituter::new(entries)?;
    Ok(substituter.apply(input, &options.fields))
}

/// Replace pseudonyms with real names. The exact mirror of [`anonymise`].
pub fn reidentify(
    input: &Value,
    pseudo_to_real: &BTreeMap<String, String>,
    options: &SubstituteOptions,
) -> Result<Value, CoreError> {
    let substituter = Substituter::new(
        pseudo_to_real
            .iter()
            .map(|(pseudo, real)| (pseudo.as_str(), real.as_str())),
    )?;
    Ok(substituter.apply(input, &options.fields))
}

pub fn anonymise_text(
    text: &str,
    real_to_pseudo: &BTreeMap<String, String>,
) -> Result<String, CoreError> {
    let substituter = Substituter::new(
        real_to_pseudo
            .iter()
            .map(|(real, pseudo)| (real.as_str(), pseudo.as_str())),
    )?;
    Ok(substituter.replace_text(text))
}

pub fn reidentify_text(
    text: &str,
    pseudo_to_real: &BTreeMap<String, String>,
) -> Result<String, CoreError> {
    let substituter = Substituter::new(
        pseudo_to_real
            .iter()
            .map(|(pseudo, real)| (pseudo.as_str(), real.as_str())),
    )?;
    Ok(substituter.replace_text(text))
}
