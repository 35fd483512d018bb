use actix_web::http::StatusCode;
use thiserror::Error;

use crate::model::UpstreamError;

/// Per-request failures, converted to a JSON error body at the handler boundary.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Failed to read request body: {0}")]
    Payload(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl HandlerError {
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerError::Validation(_) => StatusCode::BAD_REQUEST,
            HandlerError::InvalidJson(_)
            | HandlerError::PayloadTooLarge { .. }
            | HandlerError::Payload(_)
            | HandlerError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            HandlerError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            HandlerError::Upstream(UpstreamError::MissingContent).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            HandlerError::from(json_err).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            HandlerError::PayloadTooLarge { limit: 1024 }.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_message_is_transparent() {
        let err = HandlerError::from(UpstreamError::Status {
            status: 502,
            body: "bad gateway".into(),
        });
        assert_eq!(err.to_string(), "API request failed with status 502: bad gateway");
    }
}
