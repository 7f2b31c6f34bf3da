use std::fmt;

/// Status carried by every failure [`crate::Response`].
pub const FAILURE_STATUS: i32 = -1;
/// Status carried by every success [`crate::Response`].
pub const SUCCESS_STATUS: i32 = 200;

pub(crate) const INVALID_OUTPUT_TYPE: &str = "Invalid output type";
pub(crate) const XML_VALUE_NOT_FOUND: &str = "Failed to get XML value";
pub(crate) const REGEX_NO_MATCH: &str = "Failed to match regex";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailureKind {
    /// The configured URL could not be parsed.
    InvalidUrl,
    /// The request could not be built (bad method, header name or value).
    InvalidRequest,
    Timeout,
    Network,
    /// The HTTP client or async runtime could not be created.
    Init,
}

impl fmt::Display for TransportFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailureKind::InvalidUrl => write!(f, "invalid url"),
            TransportFailureKind::InvalidRequest => write!(f, "invalid request"),
            TransportFailureKind::Timeout => write!(f, "timeout"),
            TransportFailureKind::Network => write!(f, "network error"),
            TransportFailureKind::Init => write!(f, "initialization failure"),
        }
    }
}

/// The request could not be sent or did not complete.
///
/// `message` is the HTTP stack's own description and is what ends up in the
/// failure response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportFailureKind,
    pub message: String,
}

impl TransportError {
    pub(crate) fn new(kind: TransportFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// The body could not be turned into an output value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid output type")]
    InvalidOutputType(String),
    #[error("{0}")]
    BodyMalformed(String),
    #[error("{0}")]
    InvalidSelector(String),
    #[error("{0}")]
    SelectorNotFound(String),
    #[error("Failed to match regex")]
    NoRegexMatch,
}

/// Any failure of a single pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl PipelineError {
    pub fn status_code(&self) -> i32 {
        FAILURE_STATUS
    }
}
