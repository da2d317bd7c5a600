//! Pre-flight check for real names outside the name column.
//!
//! This is a heuristic. Common words that double as first names give false
//! positives; misspelled or unusual names give false negatives. It gates
//! anonymisation; it is not itself the privacy guarantee.

use std::collections::{BTreeSet, HashSet};

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use pupilmask_core::normalize::normalize;
use pupilmask_core::substitute::whole_word_pattern;
use pupilmask_core::{Record, Value};

use crate::error::ScanError;

/// Words that mark a name-column value as a programme or group label rather
/// than a pupil ("Reading Group 2", "PLP", "HAST test").
const NON_NAME_KEYWORDS: [&str; 6] = ["group", "test", "spelling", "inc", "plp", "hast"];

/// Name-column values longer than this are not treated as names.
const MAX_NAME_CHARS: usize = 60;

/// A cell outside the name column that appears to contain a real name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FlaggedCell {
    /// Zero-based data row index.
    pub row: usize,
    pub column: String,
}

/// One name found in one cell, as written in the cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeakHit {
    pub row: usize,
    pub column: String,
    pub matched: String,
}

impl LeakHit {
    pub fn cell(&self) -> FlaggedCell {
        FlaggedCell {
            row: self.row,
            column: self.column.clone(),
        }
    }
}

/// Whether a name-column value looks like a pupil name rather than a label.
pub fn is_plausible_name(value: &str) -> bool {
    let normalized = normalize(value);
    let len = normalized.chars().count();
    if !(2..=MAX_NAME_CHARS).contains(&len) {
        return false;
    }
    !normalized
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| NON_NAME_KEYWORDS.contains(&word))
}

/// Cells outside `name_column` that contain a pupil name (the full name or
/// any word of it) or a common first name, as whole words, ignoring case.
pub fn scan(
    rows: &[Record],
    name_column: &str,
    common_names: &[&str],
) -> Result<BTreeSet<FlaggedCell>, ScanError> {
    Ok(scan_detailed(rows, name_column, common_names)?
        .iter()
        .map(LeakHit::cell)
        .collect())
}

/// Like [`scan`], but reports each distinct name found per cell.
pub fn scan_detailed(
    rows: &[Record],
    name_column: &str,
    common_names: &[&str],
) -> Result<Vec<LeakHit>, ScanError> {
    let targets = leak_targets(rows, name_column, common_names);
    debug!(targets = targets.len(), rows = rows.len(), "scanning for name leaks");

    let Some(pattern) = compile_names(targets.iter().map(String::as_str))? else {
        return Ok(Vec::new());
    };

    let mut hits = Vec::new();
    for (row, record) in rows.iter().enumerate() {
        for (column, cell) in record {
            if column == name_column {
                continue;
            }
            let mut texts = Vec::new();
            collect_texts(cell, &mut texts);

            let mut seen = HashSet::new();
            for text in texts {
                for found in pattern.find_iter(text) {
                    let matched = found.as_str();
                    if seen.insert(matched.to_lowercase()) {
                        hits.push(LeakHit {
                            row,
                            column: column.clone(),
                            matched: matched.to_string(),
                        });
                    }
                }
            }
        }
    }

    info!(hits = hits.len(), "name leak scan complete");
    Ok(hits)
}

/// Every text value in `value`, at any depth.
fn collect_texts<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::Text(text) => out.push(text),
        Value::Sequence(items) => items.iter().for_each(|item| collect_texts(item, out)),
        Value::Record(record) => record.values().for_each(|item| collect_texts(item, out)),
        Value::Other(_) => {}
    }
}

/// Full names and their words from the name column, plus `common_names`.
fn leak_targets(rows: &[Record], name_column: &str, common_names: &[&str]) -> BTreeSet<String> {
    let mut targets = BTreeSet::new();

    let names = rows
        .iter()
        .filter_map(|row| row.get(name_column))
        .filter_map(Value::as_text)
        .filter(|value| is_plausible_name(value))
        .map(normalize);

    for name in names {
        for word in name.split(' ') {
            if word.chars().count() >= 2 {
                targets.insert(word.to_string());
            }
        }
        targets.insert(name);
    }

    targets.extend(
        common_names
            .iter()
            .map(|name| normalize(name))
            .filter(|name| !name.is_empty()),
    );
    targets
}

/// One case-insensitive whole-word alternation over `names`, longest first.
/// `None` when there is nothing to look for.
pub(crate) fn compile_names<'a, I>(names: I) -> Result<Option<Regex>, ScanError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut names: Vec<&str> = names.into_iter().filter(|n| !n.trim().is_empty()).collect();
    if names.is_empty() {
        return Ok(None);
    }
    names.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));
    names.dedup();

    let alternation = names
        .iter()
        .map(|name| whole_word_pattern(name))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .size_limit(64 * (1 << 20))
        .build()
        .map_err(pupilmask_core::CoreError::from)?;
    Ok(Some(pattern))
}
