//! REST client for the `/api/{collection}` endpoints.

use bizdesk_core::types::DbId;
use bizdesk_db::models::Resource;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// HTTP client for one bizdesk API server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

/// One option of a selection input (a supplier, client or product).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Choice {
    pub id: DbId,
    pub name: String,
}

#[derive(Deserialize)]
struct CreatedBody {
    id: DbId,
}

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Self {
        Self {
            client,
            base_url: config.base_url,
            token: config.token,
        }
    }

    /// `GET /api/{collection}`.
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, R::COLLECTION, None)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `POST /api/{collection}`. Returns the new row's identity.
    pub async fn create<R: Resource>(&self, body: &impl Serialize) -> Result<DbId, ClientError> {
        let response = self
            .request(reqwest::Method::POST, R::COLLECTION, None)
            .json(body)
            .send()
            .await?;
        let created: CreatedBody = Self::parse_response(response).await?;
        Ok(created.id)
    }

    /// `PUT /api/{collection}/{id}`. Returns the server's confirmation.
    pub async fn update<R: Resource>(
        &self,
        id: DbId,
        body: &impl Serialize,
    ) -> Result<String, ClientError> {
        let response = self
            .request(reqwest::Method::PUT, R::COLLECTION, Some(id))
            .json(body)
            .send()
            .await?;
        let confirmed: MessageBody = Self::parse_response(response).await?;
        Ok(confirmed.message)
    }

    /// `DELETE /api/{collection}/{id}`. Returns the server's confirmation.
    pub async fn delete<R: Resource>(&self, id: DbId) -> Result<String, ClientError> {
        let response = self
            .request(reqwest::Method::DELETE, R::COLLECTION, Some(id))
            .send()
            .await?;
        let confirmed: MessageBody = Self::parse_response(response).await?;
        Ok(confirmed.message)
    }

    /// `GET /api/{collection}` reduced to `id` and `name`, for populating
    /// selection inputs.
    pub async fn choices(&self, collection: &str) -> Result<Vec<Choice>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, collection, None)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    fn request(
        &self,
        method: reqwest::Method,
        collection: &str,
        id: Option<DbId>,
    ) -> reqwest::RequestBuilder {
        let url = match id {
            Some(id) => format!("{}/api/{collection}/{id}", self.base_url),
            None => format!("{}/api/{collection}", self.base_url),
        };
        tracing::debug!(%method, %url, "API request");

        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Return the response unchanged on success, or a
    /// [`ClientError::Api`] carrying the server's `error` message.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => parsed.error,
            Err(_) if body.is_empty() => status.to_string(),
            Err(_) => body,
        };
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
