/// Error type for gateway operations
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network failure, timeout, or other transport-level problem
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-2xx response; `message` is the server's message field when it
    /// sent one, otherwise the HTTP status text
    #[error("server error ({status}): {message}")]
    Status { status: u16, message: String },
    /// The response body did not match any shape this client understands
    #[error("unexpected response shape: {0}")]
    Shape(String),
}

impl ApiError {
    /// Short message suitable for direct display to the user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) => "Could not reach the server".to_string(),
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Shape(_) => "The server sent an unexpected response".to_string(),
        }
    }
}
