//! Error types for the OpenAI-compatible adapter

use thiserror::Error;
use triad_application::ports::llm_gateway::GatewayError;

/// Result type alias for chat-completion operations
pub type Result<T> = std::result::Result<T, OpenAiError>;

/// Errors that can occur when talking to a chat-completion endpoint
#[derive(Error, Debug)]
pub enum OpenAiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Response contained no choices")]
    EmptyResponse,

    #[error("Stream ended before [DONE]")]
    StreamInterrupted,
}

impl From<OpenAiError> for GatewayError {
    fn from(e: OpenAiError) -> Self {
        match e {
            OpenAiError::Http(e) if e.is_timeout() => GatewayError::Timeout,
            OpenAiError::Http(e) if e.is_connect() => GatewayError::ConnectionError(e.to_string()),
            OpenAiError::Api { status: 404, body } => GatewayError::ModelNotAvailable(body),
            OpenAiError::SerializationError(e) => GatewayError::InvalidResponse(e.to_string()),
            OpenAiError::EmptyResponse => {
                GatewayError::InvalidResponse("response contained no choices".to_string())
            }
            OpenAiError::StreamInterrupted => GatewayError::TransportClosed,
            other => GatewayError::RequestFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_mapping() {
        let not_found = OpenAiError::Api {
            status: 404,
            body: "model `nope` does not exist".to_string(),
        };
        assert!(matches!(
            GatewayError::from(not_found),
            GatewayError::ModelNotAvailable(_)
        ));

        let server = OpenAiError::Api {
            status: 500,
            body: "boom".to_string(),
        };
        match GatewayError::from(server) {
            GatewayError::RequestFailed(msg) => assert_eq!(msg, "API error (500): boom"),
            other => panic!("unexpected mapping: {other:?}"),
        }

        assert!(matches!(
            GatewayError::from(OpenAiError::StreamInterrupted),
            GatewayError::TransportClosed
        ));
    }
}
