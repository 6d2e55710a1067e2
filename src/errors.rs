use axum::http::StatusCode;
use thiserror::Error;

/// Failure of a single analysis. None of these reach the user as anything
/// more than a transient notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("no text to analyze")]
    EmptyInput,
    #[error("connection to analysis endpoint failed: {0}")]
    ConnectionError(String),
    #[error("analysis endpoint reported: {0}")]
    ServerError(String),
    #[error("malformed analysis response: {0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    pub fn is_server_class(&self) -> bool {
        matches!(
            self,
            AnalysisError::ServerError(_) | AnalysisError::MalformedResponse(_)
        )
    }

    /// Text shown in the transient notice.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::EmptyInput => "Please enter some text first".to_string(),
            AnalysisError::ConnectionError(_) => "Failed to connect to server".to_string(),
            AnalysisError::ServerError(message) => message.clone(),
            AnalysisError::MalformedResponse(_) => "Unexpected response from server".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("request failed: {0}")]
    Request(String),
}

impl From<TransportError> for AnalysisError {
    fn from(err: TransportError) -> Self {
        AnalysisError::ConnectionError(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        let message = err.user_message();
        match err {
            AnalysisError::EmptyInput => Self::bad_request(message),
            AnalysisError::ConnectionError(_) => Self {
                status: StatusCode::GATEWAY_TIMEOUT,
                message,
            },
            AnalysisError::ServerError(_) | AnalysisError::MalformedResponse(_) => {
                Self::bad_gateway(message)
            }
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
