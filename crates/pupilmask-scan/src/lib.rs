//! pupilmask-scan
//!
//! Everything that happens around the engine for one uploaded row set:
//! finding the name column, the pre-flight leak scan that gates
//! anonymisation, and the [`Session`] that ties the steps together.

pub mod common_names;
pub mod columns;
pub mod error;
pub mod leak;
pub mod session;

pub use columns::{detect_name_column, headers_of};
pub use common_names::COMMON_FIRST_NAMES;
pub use error::ScanError;
pub use leak::{FlaggedCell, LeakHit, scan, scan_detailed};
pub use session::{Session, Stage};
