use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to compile name pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("custom naming schemes cannot be serialized")]
    CustomSchemeNotSerializable,
}
