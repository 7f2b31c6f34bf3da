use serde::Serialize;

use crate::error::{PipelineError, SUCCESS_STATUS};

/// A successfully extracted value together with the text it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub body: String,
    pub body_parsed: String,
}

/// Outcome of one pipeline run, handed to the host as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Response {
    Success {
        body: String,
        body_parsed: String,
    },
    Failure {
        error_message: String,
        status_code: i32,
    },
}

impl Response {
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success { .. })
    }

    pub fn status_code(&self) -> i32 {
        match self {
            Response::Success { .. } => SUCCESS_STATUS,
            Response::Failure { status_code, .. } => *status_code,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            Response::Success { body, .. } => Some(body),
            Response::Failure { .. } => None,
        }
    }

    pub fn body_parsed(&self) -> Option<&str> {
        match self {
            Response::Success { body_parsed, .. } => Some(body_parsed),
            Response::Failure { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Response::Success { .. } => None,
            Response::Failure { error_message, .. } => Some(error_message),
        }
    }
}

impl From<Result<Extraction, PipelineError>> for Response {
    fn from(result: Result<Extraction, PipelineError>) -> Self {
        match result {
            Ok(Extraction { body, body_parsed }) => Response::Success { body, body_parsed },
            Err(err) => Response::Failure {
                error_message: err.to_string(),
                status_code: err.status_code(),
            },
        }
    }
}
