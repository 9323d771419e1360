/// Where the API lives and which bearer token to send.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL without a trailing slash (default: `http://localhost:5000`).
    pub base_url: String,
    /// Stored access token; requests go out unauthenticated without one.
    pub token: Option<String>,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var        | Default                 |
    /// |----------------|-------------------------|
    /// | `API_BASE_URL` | `http://localhost:5000` |
    /// | `API_TOKEN`    | none                    |
    pub fn from_env() -> Self {
        let base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5000".into())
            .trim_end_matches('/')
            .to_string();

        let token = std::env::var("API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        Self { base_url, token }
    }
}
