use thiserror::Error;

/// Main error type for caption and stream extraction
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Not a valid YouTube URL: {0}")]
    InvalidUrl(String),

    #[error("Caption not found: {0}")]
    CaptionNotFound(String),

    #[error("Unsupported caption format: {0}")]
    UnsupportedFormat(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Upstream returned status {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Video is not playable ({status}): {reason}")]
    Unplayable { status: String, reason: String },

    #[error("Player script error: {0}")]
    Player(String),

    #[error("Signature decipher failed: {0}")]
    Decipher(String),

    #[error("Session credentials error: {0}")]
    Session(String),

    #[error("Invalid base64 data: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ExtractError>;
