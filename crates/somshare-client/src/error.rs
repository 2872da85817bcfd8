use reqwest::Response;
use serde::Deserialize;
use thiserror::Error;

/// Spoken when JSON parsing of an error body fails and the body is empty.
pub const GENERIC_ERROR: &str = "요청 처리 중 오류가 발생했어요.";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected client-side before any request was issued.
    #[error("{0}")]
    Validation(String),

    /// Network-level failure (unreachable backend, TLS, timeout).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP response with the best message we could extract.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("파일 저장에 실패했어요: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// The string the UI layer shows inline.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Build an `ApiError::Status` from a non-success response: prefer the
/// JSON `message` field, fall back to raw body text, fall back to a
/// generic localized string.
pub(crate) async fn status_error(resp: Response) -> ApiError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => parsed.message,
        Err(_) if !body.trim().is_empty() => body,
        Err(_) => GENERIC_ERROR.to_string(),
    };
    ApiError::Status { status, message }
}

/// Pass through a success response, turn anything else into `ApiError`.
pub(crate) async fn expect_success(resp: Response) -> Result<Response, ApiError> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        Err(status_error(resp).await)
    }
}
