//! pupilmask-core
//!
//! The anonymisation engine: name normalization, pseudonym generation, the
//! name ↔ pseudonym map, and whole-word substitution in both directions.
//! Pure data in, pure data out; no I/O and no shared mutable state.

pub mod config;
pub mod error;
pub mod map;
pub mod models;
pub mod normalize;
pub mod scheme;
mod shuffle;
pub mod substitute;

pub use config::NamingConfig;
pub use error::CoreError;
pub use map::PseudonymMap;
pub use models::pair::PseudonymPair;
pub use models::value::{Record, Value};
pub use normalize::normalize;
pub use scheme::NamingScheme;
pub use substitute::{SubstituteOptions, anonymise, reidentify};
