use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One row of a pseudonym map, in assignment order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PseudonymPair {
    /// Normalized real name.
    pub real: String,
    pub pseudo: String,
}

/// Human-readable form, e.g. `Pupil-003 ⟷ Alice Smith`.
impl fmt::Display for PseudonymPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ⟷ {}", self.pseudo, self.real)
    }
}
