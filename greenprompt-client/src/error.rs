use thiserror::Error;

/// Text shown when a response body cannot be decoded.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON from server";

/// Text shown for a non-2xx response that carries no `error` field.
pub const REQUEST_FAILED_MESSAGE: &str = "Request failed";

/// Text shown when a scheduled submission has no schedule selected.
pub const SELECT_SCHEDULE_MESSAGE: &str = "Please select a schedule";

/// Result of a single fetch against the GreenPrompt API.
///
/// Callers always get one of the two arms back, a failing fetch never panics
/// and never surfaces a raw decoding error.
pub type FetchOutcome<T> = Result<T, FetchError>;

/// Everything that can go wrong with a single request.
///
/// The `Display` implementation is the user-facing text for the display region
/// the request was meant to fill.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The request could not be sent, or the response body could not be read.
    #[error("Error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("{}", .message.as_deref().unwrap_or(REQUEST_FAILED_MESSAGE))]
    Status {
        /// The HTTP status code
        status: u16,
        /// The server-provided `error` text, if any
        message: Option<String>,
    },

    /// The response body was not JSON, or not the JSON shape expected.
    #[error("{}", INVALID_JSON_MESSAGE)]
    InvalidJson,

    /// The request was rejected locally before any network call.
    #[error("{0}")]
    Validation(String),
}

impl FetchError {
    /// Returns a machine-readable code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "TRANSPORT",
            Self::Status { .. } => "HTTP_STATUS",
            Self::InvalidJson => "INVALID_JSON",
            Self::Validation(_) => "VALIDATION",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.without_url().to_string())
    }
}

/// Errors raised while building a [`crate::GreenPromptClient`].
#[derive(Debug, Error)]
pub enum GreenPromptClientError {
    #[error("Failed to parse base URL: `{0}`")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("Failed to build HTTP client: `{0}`")]
    HttpClientBuild(#[from] reqwest::Error),
}
