//! Error types with fix suggestions
//!
//! Error code ranges:
//! - TB-001-009: Fetch/polling errors
//! - TB-010-019: Configuration errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TidbitsError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// All error variants are part of the public API.
/// `Rejected` and `Io` are only constructed by the CLI.
#[derive(Error, Debug)]
pub enum TidbitsError {
    // ─────────────────────────────────────────────────────────────
    // Fetch errors (TB-001 to TB-005)
    // ─────────────────────────────────────────────────────────────
    #[error("TB-001: Invalid URL '{url}': {details}")]
    InvalidUrl { url: String, details: String },

    #[error("TB-002: HTTP request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("TB-003: Failed to decode response as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TB-004: '{url}' still processing after {attempts} attempts")]
    PollExhausted { url: String, attempts: u32 },

    #[error("TB-005: '{url}' answered {status}: {body}")]
    Rejected {
        url: String,
        status: u16,
        body: String,
    },

    // ─────────────────────────────────────────────────────────────
    // Configuration errors (TB-010 to TB-011)
    // ─────────────────────────────────────────────────────────────
    #[error("TB-010: Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("TB-011: Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TidbitsError {
    /// Stable error code, e.g. `TB-004`
    pub fn code(&self) -> Option<&'static str> {
        match self {
            TidbitsError::InvalidUrl { .. } => Some("TB-001"),
            TidbitsError::Transport { .. } => Some("TB-002"),
            TidbitsError::Json(_) => Some("TB-003"),
            TidbitsError::PollExhausted { .. } => Some("TB-004"),
            TidbitsError::Rejected { .. } => Some("TB-005"),
            TidbitsError::InvalidConfig { .. } => Some("TB-010"),
            TidbitsError::Client(_) => Some("TB-011"),
            TidbitsError::Io(_) => None,
        }
    }
}

impl FixSuggestion for TidbitsError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            TidbitsError::InvalidUrl { .. } => Some("Use an absolute http:// or https:// URL"),
            TidbitsError::Transport { .. } => Some("Check the server is reachable"),
            TidbitsError::Json(_) => Some("Drop --json to see the raw response body"),
            TidbitsError::PollExhausted { .. } => {
                Some("Raise --max-attempts or unset TIDBITS_MAX_ATTEMPTS")
            }
            TidbitsError::Rejected { .. } => Some("Check the URL and the server logs"),
            TidbitsError::InvalidConfig { .. } => {
                Some("Check TIDBITS_* environment variables and CLI flags")
            }
            TidbitsError::Client(_) => Some("Check TIDBITS_USER_AGENT is a valid header value"),
            TidbitsError::Io(_) => Some("Check file path and permissions"),
        }
    }
}
