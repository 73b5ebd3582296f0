use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    /// The event's method, target, headers or body cannot form a request.
    #[error("Failed to construct request: {0}")]
    RequestConstruction(String),

    #[error("Invalid adapter configuration: {0}")]
    Config(String),
}

impl From<http::Error> for AdapterError {
    fn from(error: http::Error) -> Self {
        AdapterError::RequestConstruction(error.to_string())
    }
}

impl From<http::method::InvalidMethod> for AdapterError {
    fn from(error: http::method::InvalidMethod) -> Self {
        AdapterError::RequestConstruction(format!("invalid method: {}", error))
    }
}

impl From<http::uri::InvalidUri> for AdapterError {
    fn from(error: http::uri::InvalidUri) -> Self {
        AdapterError::RequestConstruction(format!("invalid request target: {}", error))
    }
}

impl From<base64::DecodeError> for AdapterError {
    fn from(error: base64::DecodeError) -> Self {
        AdapterError::RequestConstruction(format!("invalid base64 body: {}", error))
    }
}
