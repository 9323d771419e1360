/// Errors from the API client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the JSON body, or the raw body text.
        message: String,
    },
}

impl ClientError {
    /// The text shown after `Failed to ...: ` in a view's error banner:
    /// the server's own message when there is one, otherwise the transport
    /// error.
    pub fn detail(&self) -> String {
        match self {
            ClientError::Request(e) => e.to_string(),
            ClientError::Api { message, .. } => message.clone(),
        }
    }
}
