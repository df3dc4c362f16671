/// Errors shared by the store, repositories and pricing engine.
///
/// Nothing below the HTTP boundary swallows these: every failure
/// propagates to the caller, which decides how to surface it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("timed out waiting for lock on collection '{0}'")]
    LockTimeout(String),

    #[error("validation failed at '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("no base price for sport '{sport}' at {nights} nights")]
    PricingDataMissing { sport: String, nights: u8 },

    #[error("store I/O failure while {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed collection document: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl Error {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Per-entity invariant checks, applied on every read and every write.
///
/// Serde already rejects wrong shapes and unknown enum values while
/// decoding; implementations add the numeric and required-field rules a
/// plain shape check cannot express. A failure here means either
/// corrupted persisted data or a caller bug, so it must propagate.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
