//! Error types shared across the crate.
//!
//! Each layer has its own enum so callers can tell a malformed draft from a
//! failed request. The web layer folds them into [`AppError`], which knows how
//! to turn itself into an HTTP response.

use thiserror::Error;

use crate::question::ChoiceId;

/// Errors raised while editing a question draft.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("subjective questions have no choices")]
    NoChoices,

    #[error("no choice with id {0}")]
    UnknownChoice(ChoiceId),
}

/// Errors raised while editing a survey draft.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("invalid color {0:?}, expected #RRGGBB or #RGB")]
    InvalidColor(String),

    #[error("no question at index {0}")]
    NoSuchQuestion(usize),

    #[error(transparent)]
    Question(#[from] QuestionError),
}

/// A submitted survey form that cannot become a survey.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("missing field {0}")]
    Missing(&'static str),

    #[error("invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl FormError {
    pub(crate) fn invalid(field: &'static str, message: impl std::fmt::Display) -> Self {
        FormError::Invalid {
            field,
            message: message.to_string(),
        }
    }
}

/// Errors raised by an interactive question input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no choice with id {0}")]
    UnknownChoice(u64),

    #[error("option value {0:?} is not a choice id")]
    InvalidOption(String),

    #[error("this question does not accept that kind of input")]
    WrongKind,
}

/// Errors raised while projecting a result set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResultError {
    #[error("row {row} has {found} responses but the header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Failures talking to the survey backend.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Error response ({status}): {body}")]
    Http { status: u16, body: String },

    #[error("Survey payload rejected: {0}")]
    Form(#[from] FormError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Workbook rendering failed: {0}")]
    Workbook(String),

    #[error("Failed to encode the payload: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failures of the on-disk survey store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode or decode the survey index: {0}")]
    Index(#[from] serde_json::Error),

    #[error("Failed to encode or decode responses: {0}")]
    Responses(#[from] bincode::Error),

    #[error("Survey {0} not found")]
    NotFound(u64),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Failures of the client-side export flow.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Failed to stage the workbook: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration problems found at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

#[cfg(feature = "web")]
pub use web::AppError;

#[cfg(feature = "web")]
mod web {
    use axum::{
        http::StatusCode,
        response::{IntoResponse, Response},
    };
    use thiserror::Error;

    use super::{FormError, ResultError, StoreError};

    #[derive(Error, Debug)]
    pub enum AppError {
        #[error("Malformed payload: {0}")]
        MalformedPayload(String),

        #[error("Not found")]
        NotFound,

        #[error("Internal error: {0}")]
        InternalError(#[from] Box<dyn std::error::Error + Send + Sync>),
    }

    impl From<StoreError> for AppError {
        fn from(err: StoreError) -> Self {
            match err {
                StoreError::NotFound(_) => AppError::NotFound,
                StoreError::InvalidResponse(message) => AppError::MalformedPayload(message),
                other => AppError::InternalError(Box::new(other)),
            }
        }
    }

    impl From<FormError> for AppError {
        fn from(err: FormError) -> Self {
            AppError::MalformedPayload(err.to_string())
        }
    }

    impl From<ResultError> for AppError {
        fn from(err: ResultError) -> Self {
            AppError::InternalError(Box::new(err))
        }
    }

    impl From<axum::extract::multipart::MultipartError> for AppError {
        fn from(err: axum::extract::multipart::MultipartError) -> Self {
            AppError::MalformedPayload(err.to_string())
        }
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = match self {
                AppError::MalformedPayload { .. } => StatusCode::BAD_REQUEST,
                AppError::NotFound => StatusCode::NOT_FOUND,
                AppError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            };

            if status.is_server_error() {
                log::error!("{self}");
            }

            (status, self.to_string()).into_response()
        }
    }
}
