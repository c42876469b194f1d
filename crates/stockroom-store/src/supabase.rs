//! Low-level PostgREST client
//!
//! Speaks the wire protocol of a hosted Supabase project: every request goes
//! to `{project_url}/rest/v1/{table}` and carries the anonymous-tier key in
//! both the `apikey` header and as a bearer token. Non-2xx responses carry a
//! JSON error body whose `message` field is extracted into [`StoreError`].

use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Operation, Result, StoreError};

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Shape of a PostgREST error body.
#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    message: String,
}

/// HTTP client for a hosted PostgREST backend
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    client: Client,
    rest_url: Url,
    anon_key: String,
}

impl SupabaseClient {
    /// Create a new client from the project URL and the anonymous-tier key.
    ///
    /// # Errors
    /// Returns an error if the project URL is invalid.
    pub fn new(project_url: impl AsRef<str>, anon_key: impl Into<String>) -> Result<Self> {
        Self::with_client(project_url, anon_key, Client::new())
    }

    /// Create a new client with a custom `reqwest::Client`
    ///
    /// # Errors
    /// Returns an error if the project URL is invalid.
    pub fn with_client(
        project_url: impl AsRef<str>,
        anon_key: impl Into<String>,
        client: Client,
    ) -> Result<Self> {
        let rest_url = Url::parse(project_url.as_ref())?.join("rest/v1/")?;
        Ok(Self {
            client,
            rest_url,
            anon_key: anon_key.into(),
        })
    }

    /// Build the base URL for a table
    pub fn table_url(&self, table: &str) -> Result<Url> {
        self.rest_url.join(table).map_err(StoreError::Url)
    }

    /// Start a request with the auth headers applied
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    /// Send a request, normalizing non-2xx responses into `StoreError`
    async fn send(&self, op: Operation, request: RequestBuilder) -> Result<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|source| StoreError::Http { op, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Backend {
                op,
                status: status.as_u16(),
                message: backend_message(&body),
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(op: Operation, response: reqwest::Response) -> Result<T> {
        response
            .json()
            .await
            .map_err(|source| StoreError::Http { op, source })
    }

    /// GET a set of rows
    pub(crate) async fn rows<T: DeserializeOwned>(&self, op: Operation, url: Url) -> Result<Vec<T>> {
        let response = self.send(op, self.request(Method::GET, url)).await?;
        Self::decode(op, response).await
    }

    /// GET exactly one row; the backend errors unless precisely one matches
    pub(crate) async fn single<T: DeserializeOwned>(&self, op: Operation, url: Url) -> Result<T> {
        let request = self
            .request(Method::GET, url)
            .header(reqwest::header::ACCEPT, SINGLE_OBJECT);
        let response = self.send(op, request).await?;
        Self::decode(op, response).await
    }

    /// POST a row, returning the created representation(s)
    pub(crate) async fn create<T: DeserializeOwned>(
        &self,
        op: Operation,
        url: Url,
        body: &impl serde::Serialize,
    ) -> Result<Vec<T>> {
        let request = self
            .request(Method::POST, url)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(body);
        let response = self.send(op, request).await?;
        Self::decode(op, response).await
    }

    /// PATCH matching rows, returning the updated representation(s)
    pub(crate) async fn modify<T: DeserializeOwned>(
        &self,
        op: Operation,
        url: Url,
        body: &impl serde::Serialize,
    ) -> Result<Vec<T>> {
        let request = self
            .request(Method::PATCH, url)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(body);
        let response = self.send(op, request).await?;
        Self::decode(op, response).await
    }

    /// DELETE matching rows, returning the deleted representation(s)
    pub(crate) async fn remove<T: DeserializeOwned>(&self, op: Operation, url: Url) -> Result<Vec<T>> {
        let request = self
            .request(Method::DELETE, url)
            .header("Prefer", RETURN_REPRESENTATION);
        let response = self.send(op, request).await?;
        Self::decode(op, response).await
    }
}

/// Pull the `message` field out of a PostgREST error body, falling back to
/// the raw text.
fn backend_message(body: &str) -> String {
    match serde_json::from_str::<BackendErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = SupabaseClient::new("https://example.supabase.co", "anon-key");
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let client = SupabaseClient::new("not a url", "anon-key");
        assert!(client.is_err());
    }

    #[test]
    fn test_table_url_building() {
        let client = SupabaseClient::new("https://example.supabase.co", "anon-key").unwrap();
        let url = client.table_url("inventory").unwrap();
        assert_eq!(url.as_str(), "https://example.supabase.co/rest/v1/inventory");
    }

    #[test]
    fn test_backend_message_extraction() {
        let body = r#"{"code":"PGRST116","message":"JSON object requested, multiple (or no) rows returned","details":null,"hint":null}"#;
        assert_eq!(
            backend_message(body),
            "JSON object requested, multiple (or no) rows returned"
        );
    }

    #[test]
    fn test_backend_message_fallback_on_plain_text() {
        assert_eq!(backend_message("upstream unavailable"), "upstream unavailable");
    }
}
