use thiserror::Error;

/// Why a conversion produced no output.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input text is not valid JSON.
    #[error("json is invalid")]
    Parse(#[from] serde_json::Error),

    /// Input parsed, but the top-level value is not an object.
    #[error("top-level JSON value must be an object, found {found}")]
    Shape { found: &'static str },

    #[error("nesting at {path} exceeds the depth limit of {limit}")]
    DepthLimit { limit: usize, path: String },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
