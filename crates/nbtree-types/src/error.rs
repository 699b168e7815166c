use thiserror::Error;

/// Errors produced while building tags from their wire form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown tag type: {0}")]
    UnknownType(String),

    #[error("invalid value for {tag_type} tag: {reason}")]
    InvalidValue { tag_type: String, reason: String },

    #[error("value {value} out of range for {tag_type}")]
    OutOfRange { tag_type: String, value: String },

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl TypeError {
    pub(crate) fn invalid(tag_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            tag_type: tag_type.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias for type results.
pub type TypeResult<T> = Result<T, TypeError>;
