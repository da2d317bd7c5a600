//! Canonical form for free-text pupil names.
//!
//! Two names refer to the same pupil iff their normalized forms are equal.
//! The normalized form is what every lookup table in this crate is keyed on.

/// Normalize a raw name: trim, collapse any whitespace run to one space,
/// and title-case each word (`"  aLICE   smith "` → `"Alice Smith"`).
///
/// Blank input yields an empty string. `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

/// First word of an already-normalized name.
pub fn given_name(normalized: &str) -> Option<&str> {
    normalized.split(' ').next().filter(|word| !word.is_empty())
}

/// Collapse whitespace runs to single spaces without touching case.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn title_case(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut upper = first.to_uppercase();
    let mut out = String::with_capacity(lower.len());
    // Characters whose upper case expands (e.g. 'ß' → "SS") stay lower case,
    // otherwise a second pass would lower-case the expansion.
    if upper.len() == 1 {
        out.extend(upper.next());
    } else {
        out.push(first);
    }
    out.extend(chars);
    out
}
