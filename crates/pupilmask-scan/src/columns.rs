//! Finding the name column in an uploaded row set.

use std::collections::HashSet;

use tracing::debug;

use pupilmask_core::{Record, Value};

use crate::common_names::COMMON_FIRST_NAMES;
use crate::error::ScanError;
use crate::leak::compile_names;

/// Headers accepted as the name column, in priority order.
pub const NAME_COLUMN_CANDIDATES: [&str; 6] =
    ["name", "pupil", "pupil name", "student", "child", "full name"];

/// Pick the name column.
///
/// Tries an exact header match against [`NAME_COLUMN_CANDIDATES`], then the
/// first header containing "name", then the column whose cells hit the
/// common first-name list most often.
pub fn detect_name_column(headers: &[String], rows: &[Record]) -> Result<String, ScanError> {
    let folded: Vec<String> = headers
        .iter()
        .map(|header| header.trim().to_lowercase())
        .collect();

    for candidate in NAME_COLUMN_CANDIDATES {
        if let Some(position) = folded.iter().position(|header| header == candidate) {
            debug!(column = %headers[position], "name column matched by header");
            return Ok(headers[position].clone());
        }
    }

    if let Some(position) = folded.iter().position(|header| header.contains("name")) {
        debug!(column = %headers[position], "name column matched by partial header");
        return Ok(headers[position].clone());
    }

    let Some(pattern) = compile_names(COMMON_FIRST_NAMES.iter().copied())? else {
        return Err(ScanError::MissingNameColumn);
    };

    let mut best: Option<(&String, usize)> = None;
    for header in headers {
        let score = rows
            .iter()
            .filter_map(|row| row.get(header))
            .filter_map(Value::as_text)
            .filter(|text| pattern.is_match(text))
            .count();
        if score > 0 && best.is_none_or(|(_, top)| score > top) {
            best = Some((header, score));
        }
    }

    match best {
        Some((header, score)) => {
            debug!(column = %header, score, "name column inferred from cell contents");
            Ok(header.clone())
        }
        None => Err(ScanError::MissingNameColumn),
    }
}

/// Column names in first-seen order across `rows`.
pub fn headers_of(rows: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut headers = Vec::new();
    for row in rows {
        for key in row.keys() {
            if seen.insert(key.as_str()) {
                headers.push(key.clone());
            }
        }
    }
    headers
}
