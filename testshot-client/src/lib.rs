//! Testshot HTTP Client
//!
//! A typed client for the subset of the Azure DevOps Test REST API the
//! screenshot task needs: querying test runs, listing failed results,
//! and creating test result attachments.
//!
//! The [`TestApi`] trait is the seam the task programs against; the
//! resolver and uploader take `&dyn TestApi` so tests can inject a
//! fake without any network.
//!
//! # Example
//!
//! ```no_run
//! use testshot_client::TestClient;
//! use testshot_core::domain::RunId;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), testshot_client::ClientError> {
//!     let client = TestClient::new("my-org", "my-pat");
//!     let failed = client.get_failed_results("my-project", RunId(9)).await?;
//!     println!("{} failed cases", failed.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod api;
mod results;
mod runs;

pub use api::TestApi;
pub use error::{ClientError, Result};
pub use results::AttachmentRequest;

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// REST API version sent with every request.
const API_VERSION: &str = "7.1";

/// HTTP client for the Azure DevOps Test API
///
/// Holds the organization base URL and the personal access token the
/// pipeline agent hands out for the job. One instance is constructed at
/// task entry and shared by the resolver and the uploader.
#[derive(Debug, Clone)]
pub struct TestClient {
    /// Organization base URL, e.g. "https://dev.azure.com/contoso"
    base_url: String,
    /// Personal access token, sent as HTTP basic auth
    token: String,
    /// HTTP client instance
    client: Client,
}

/// Wire shape of every Azure DevOps list response.
#[derive(Debug, Deserialize)]
struct ValueList<T> {
    value: Vec<T>,
}

impl TestClient {
    /// Create a new client for an organization
    ///
    /// # Arguments
    /// * `organization` - The Azure DevOps organization name
    /// * `token` - The access token to authenticate with
    pub fn new(organization: impl AsRef<str>, token: impl Into<String>) -> Self {
        Self {
            base_url: format!("https://dev.azure.com/{}", organization.as_ref()),
            token: token.into(),
            client: Client::new(),
        }
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        organization: impl AsRef<str>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            base_url: format!("https://dev.azure.com/{}", organization.as_ref()),
            token: token.into(),
            client,
        }
    }

    /// Get the organization base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a GET request against a project-scoped API route
    fn get(&self, project: &str, route: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}/_apis/test/{}", self.base_url, project, route);
        self.client
            .get(&url)
            .basic_auth("", Some(&self.token))
            .query(&[("api-version", API_VERSION)])
    }

    /// Start a POST request against a project-scoped API route
    fn post(&self, project: &str, route: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}/_apis/test/{}", self.base_url, project, route);
        self.client
            .post(&url)
            .basic_auth("", Some(&self.token))
            .query(&[("api-version", API_VERSION)])
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the
    /// request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
