use thiserror::Error;

/// A `Course` field violated a domain rule at construction time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidCourse {
    #[error("course id must not be blank")]
    BlankId,

    #[error("course name must not be blank")]
    BlankName,

    #[error("course url must not be blank")]
    BlankUrl,

    #[error("course length must be positive, got {0}")]
    NonPositiveLength(i64),

    #[error("course notes must not be blank when present")]
    BlankNotes,
}

/// The catalog reported a duration this tool cannot parse, which usually
/// means the upstream contract changed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed duration {0:?}, expected HH:MM:SS with an optional fraction")]
pub struct MalformedDuration(pub String);

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("invalid course catalog base url: {0}")]
    BaseUrl(String),

    #[error("course catalog request failed")]
    Transport(#[source] reqwest::Error),

    #[error("course catalog responded with status {0}")]
    Status(u16),

    #[error("failed to decode course catalog response")]
    Decode(#[source] serde_json::Error),
}

/// Opaque wrapper around any backing-store failure. The original cause is
/// kept for diagnostics but callers never see store-specific error types.
#[derive(Debug, Error)]
#[error("course repository failure: {context}")]
pub struct RepositoryError {
    context: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl RepositoryError {
    pub fn new(
        context: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            context: context.into(),
            source: source.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    InvalidCourse(#[from] InvalidCourse),

    #[error(transparent)]
    MalformedDuration(#[from] MalformedDuration),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
