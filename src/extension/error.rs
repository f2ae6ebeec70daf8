use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtensionError>;

#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("extension not found: `{module}`: {reason}")]
    NotFound { module: String, reason: String },

    #[error("entry point `{symbol}` missing from `{module}`")]
    EntryPointMissing { module: String, symbol: String },

    #[error("extension `{module}` panicked: {message}")]
    Panicked { module: String, message: String },
}
