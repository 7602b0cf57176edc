//! Extraction error taxonomy
//!
//! A single error enum covers every failure the framework can surface. The
//! variants fall into a handful of kinds (see [`ErrorKind`]) that decide how
//! far a failure travels: identity and transport failures abort the current
//! operation, parsing failures are recorded at the smallest enclosing scope,
//! and the ad marker silently drops a list entry.

use std::fmt;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Why an account is no longer reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    Unknown,
    Violation,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Violation => write!(f, "violation"),
        }
    }
}

/// Reasons content can never be shown, independent of extraction logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    Generic,
    AccountTerminated { reason: TerminationReason },
    AgeRestricted,
    GeoRestricted,
    Private,
    /// Content behind a paid tier of the named service.
    PaidContent { service: String },
    CommentsDisabled,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => write!(f, "unavailable"),
            Self::AccountTerminated { reason } => write!(f, "account terminated ({reason})"),
            Self::AgeRestricted => write!(f, "age restricted"),
            Self::GeoRestricted => write!(f, "not available in this region"),
            Self::Private => write!(f, "private"),
            Self::PaidContent { service } => write!(f, "paid {service} content"),
            Self::CommentsDisabled => write!(f, "comments disabled"),
        }
    }
}

/// Coarse classification of an [`ExtractionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// URL to service/extractor resolution failed. Always fatal.
    Identity,
    /// Downloader failure. Propagated unmodified.
    Transport,
    /// A field was missing or malformed (content unavailability included).
    Parsing,
    /// Entry is an advertisement; not an error for callers.
    Ad,
    Other,
}

#[derive(Debug, Clone, Error)]
pub enum ExtractionError {
    // ========== Identity ==========
    #[error("No service can handle the url = \"{0}\"")]
    NoService(String),

    #[error("URL not accepted: {0}")]
    UrlNotAccepted(String),

    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    #[error("Unsupported tab: {0}")]
    UnsupportedTab(String),

    #[error("Localization not supported: {0}")]
    UnsupportedLocalization(String),

    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    // ========== Transport ==========
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {status} for {url}")]
    Http { status: u16, url: String },

    #[error("reCAPTCHA challenge requested for {url}")]
    ReCaptcha { url: String },

    #[error("Response too large ({size} bytes, max {max})")]
    ResponseTooLarge { size: u64, max: usize },

    // ========== Parsing ==========
    #[error("Parse error: {0}")]
    Parsing(String),

    #[error("Content not available ({reason}): {message}")]
    ContentNotAvailable {
        reason: UnavailableReason,
        message: String,
    },

    #[error("Content not supported: {0}")]
    ContentNotSupported(String),

    // ========== Ad marker ==========
    #[error("Found advertisement")]
    FoundAd,

    // ========== Other ==========
    #[error("Not supported: {0}")]
    Unsupported(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Nothing found: {0}")]
    NothingFound(String),

    #[error("Extraction error: {0}")]
    Extraction(String),
}

impl ExtractionError {
    pub fn parsing(message: impl Into<String>) -> Self {
        Self::Parsing(message.into())
    }

    pub fn unavailable(reason: UnavailableReason, message: impl Into<String>) -> Self {
        Self::ContentNotAvailable {
            reason,
            message: message.into(),
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoService(_)
            | Self::UrlNotAccepted(_)
            | Self::MalformedUrl(_)
            | Self::UnsupportedTab(_)
            | Self::UnsupportedLocalization(_)
            | Self::ServiceNotFound(_) => ErrorKind::Identity,
            Self::Network(_)
            | Self::Http { .. }
            | Self::ReCaptcha { .. }
            | Self::ResponseTooLarge { .. } => ErrorKind::Transport,
            Self::Parsing(_) | Self::ContentNotAvailable { .. } | Self::ContentNotSupported(_) => {
                ErrorKind::Parsing
            }
            Self::FoundAd => ErrorKind::Ad,
            Self::Unsupported(_)
            | Self::InvalidArgument(_)
            | Self::NothingFound(_)
            | Self::Extraction(_) => ErrorKind::Other,
        }
    }

    #[must_use]
    pub const fn is_parsing(&self) -> bool {
        matches!(self.kind(), ErrorKind::Parsing)
    }

    /// Content that cannot ever be shown, as opposed to broken extraction.
    #[must_use]
    pub const fn is_content_unavailable(&self) -> bool {
        matches!(self, Self::ContentNotAvailable { .. })
    }

    #[must_use]
    pub const fn is_ad(&self) -> bool {
        matches!(self, Self::FoundAd)
    }

    #[must_use]
    pub const fn is_identity(&self) -> bool {
        matches!(self.kind(), ErrorKind::Identity)
    }

    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self.kind(), ErrorKind::Transport)
    }
}

impl From<reqwest::Error> for ExtractionError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ExtractionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parsing(err.to_string())
    }
}

impl From<url::ParseError> for ExtractionError {
    fn from(err: url::ParseError) -> Self {
        Self::MalformedUrl(err.to_string())
    }
}
