use thiserror::Error;

/// Reasons a post draft or a tag is rejected before it reaches the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title is required")]
    TitleRequired,
    #[error("body is required")]
    BodyRequired,
    #[error("{field} contains forbidden word: \"{word}\"")]
    ForbiddenWord { field: &'static str, word: String },
    #[error("tag must be {max} characters or less")]
    TagTooLong { max: usize },
    #[error("maximum {max} tags allowed")]
    TooManyTags { max: usize },
    #[error("duplicate tag: {0}")]
    DuplicateTag(String),
    #[error("tag is empty")]
    EmptyTag,
}

/// Failures decoding an auth token into session claims.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("token is not a JWT (expected three dot-separated segments)")]
    Malformed,
    #[error("token payload is not base64url: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("token payload is not a JSON object: {0}")]
    Claims(#[from] serde_json::Error),
}
