use thiserror::Error;

/// All failure kinds the tool can hit. The variant *is* the kind: tests and
/// the dispatcher match on it rather than on message text.
#[derive(Error, Debug)]
pub enum CmsError {
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    Subprocess(String),

    #[error("{0}")]
    Configuration(String),

    #[error("Usage: cmsctl {0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, CmsError>;
