use thiserror::Error;

use pupilmask_core::CoreError;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("no name column found; expected a header such as 'Name', 'Pupil' or 'Pupil Name'")]
    MissingNameColumn,

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("{flagged} cell(s) outside the name column look like pupil names; resolve them before anonymising")]
    UnresolvedNameLeak { flagged: usize },

    #[error("names have not been checked yet")]
    NotScanned,

    #[error("nothing has been anonymised in this session")]
    NotAnonymised,

    #[error(transparent)]
    Core(#[from] CoreError),
}
