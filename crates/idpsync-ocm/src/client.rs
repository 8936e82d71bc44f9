//! HTTP client for the clusters management API
//!
//! Resources are addressed through a chain of small clients, one per path
//! segment:
//!
//! ```text
//! connection.clusters_mgmt()
//!     .cluster(&cluster_id)
//!     .identity_providers()
//!     .identity_provider(&idp_id)
//!     .htpasswd_users()
//!     .import()
//! ```
//!
//! No retries happen here. Timeouts come from the underlying `reqwest::Client`.

use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

use idpsync_core::{ApiError, ClusterId, IdentityProviderId, IdpSyncError, Result};

use crate::htpasswd::{HtpasswdUser, HtpasswdUserRecord};

pub const DEFAULT_URL: &str = "https://api.openshift.com";
const CLUSTERS_MGMT_PATH: &str = "/api/clusters_mgmt/v1";

/// Connection settings for the clusters management API
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// API base URL (e.g., "https://api.openshift.com")
    pub url: String,
    /// Bearer access token
    pub token: SecretString,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            token: SecretString::from(String::new()),
            timeout_secs: 30,
            user_agent: concat!("idpsync/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Authenticated connection shared by all resource clients
#[derive(Clone)]
pub struct Connection {
    http: Client,
    base_url: Arc<str>,
    token: Arc<SecretString>,
}

impl Connection {
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| {
                IdpSyncError::config_error(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self::with_http_client(config.url, config.token, http))
    }

    /// Create a connection over a pre-built `reqwest::Client`
    pub fn with_http_client(base_url: impl Into<String>, token: SecretString, http: Client) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            token: Arc::new(token),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn clusters_mgmt(&self) -> ClustersMgmtClient {
        ClustersMgmtClient {
            conn: self.clone(),
            path: CLUSTERS_MGMT_PATH.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let token = self.token.expose_secret();
        if token.is_empty() {
            builder
        } else {
            builder.bearer_auth(token)
        }
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

/// `/api/clusters_mgmt/v1`
#[derive(Debug, Clone)]
pub struct ClustersMgmtClient {
    conn: Connection,
    path: String,
}

impl ClustersMgmtClient {
    pub fn cluster(&self, cluster_id: &ClusterId) -> ClusterClient {
        ClusterClient {
            conn: self.conn.clone(),
            path: format!("{}/clusters/{}", self.path, segment(cluster_id.as_str())),
        }
    }
}

/// `/api/clusters_mgmt/v1/clusters/{cluster_id}`
#[derive(Debug, Clone)]
pub struct ClusterClient {
    conn: Connection,
    path: String,
}

impl ClusterClient {
    pub fn identity_providers(&self) -> IdentityProvidersClient {
        IdentityProvidersClient {
            conn: self.conn.clone(),
            path: format!("{}/identity_providers", self.path),
        }
    }
}

/// Identity providers of one cluster
#[derive(Debug, Clone)]
pub struct IdentityProvidersClient {
    conn: Connection,
    path: String,
}

impl IdentityProvidersClient {
    pub fn identity_provider(&self, idp_id: &IdentityProviderId) -> IdentityProviderClient {
        IdentityProviderClient {
            conn: self.conn.clone(),
            path: format!("{}/{}", self.path, segment(idp_id.as_str())),
        }
    }
}

/// A single identity provider
#[derive(Debug, Clone)]
pub struct IdentityProviderClient {
    conn: Connection,
    path: String,
}

impl IdentityProviderClient {
    pub fn htpasswd_users(&self) -> HtpasswdUsersClient {
        HtpasswdUsersClient {
            conn: self.conn.clone(),
            path: format!("{}/htpasswd_users", self.path),
        }
    }
}

/// The htpasswd user collection of an identity provider
#[derive(Debug, Clone)]
pub struct HtpasswdUsersClient {
    conn: Connection,
    path: String,
}

impl HtpasswdUsersClient {
    /// Full replacement of the collection
    pub fn import(&self) -> HtpasswdUsersImportRequest {
        HtpasswdUsersImportRequest {
            conn: self.conn.clone(),
            path: format!("{}/import", self.path),
            items: Vec::new(),
        }
    }

    pub fn list(&self) -> HtpasswdUsersListRequest {
        HtpasswdUsersListRequest {
            conn: self.conn.clone(),
            path: self.path.clone(),
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Fetch every page of the collection
    #[instrument(skip(self), fields(path = %self.path))]
    pub async fn list_all(&self) -> std::result::Result<Vec<HtpasswdUserRecord>, SendError> {
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            let response = self.list().page(page).size(DEFAULT_PAGE_SIZE).send().await?;
            let received = response.items.len();
            all_items.extend(response.items);

            // `size` in the response is the item count of this page, and the
            // server may cap it below the requested size
            let exhausted = match response.total {
                _ if received == 0 => true,
                Some(total) if total > 0 => all_items.len() >= total as usize,
                _ => received < DEFAULT_PAGE_SIZE as usize,
            };
            if exhausted {
                break;
            }
            page += 1;
        }

        debug!("Listed {} htpasswd users", all_items.len());
        Ok(all_items)
    }
}

#[derive(Serialize)]
struct ImportBody<'a> {
    items: &'a [HtpasswdUser],
}

/// `POST .../htpasswd_users/import`
#[derive(Debug)]
pub struct HtpasswdUsersImportRequest {
    conn: Connection,
    path: String,
    items: Vec<HtpasswdUser>,
}

impl HtpasswdUsersImportRequest {
    /// Replace the items to import
    pub fn items(mut self, items: impl IntoIterator<Item = HtpasswdUser>) -> Self {
        self.items = items.into_iter().collect();
        self
    }

    pub async fn send(self) -> std::result::Result<HtpasswdUsersImportResponse, SendError> {
        let url = self.conn.url(&self.path);
        debug!(url = %url, items = self.items.len(), "Sending htpasswd users import");

        let response = self
            .conn
            .authorize(self.conn.http.post(&url))
            .json(&ImportBody { items: &self.items })
            .send()
            .await
            .map_err(SendError::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SendError::from_response(response).await);
        }

        Ok(HtpasswdUsersImportResponse {
            status: status.as_u16(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtpasswdUsersImportResponse {
    pub status: u16,
}

const DEFAULT_PAGE_SIZE: u32 = 100;

/// `GET .../htpasswd_users`
#[derive(Debug)]
pub struct HtpasswdUsersListRequest {
    conn: Connection,
    path: String,
    page: u32,
    size: u32,
}

impl HtpasswdUsersListRequest {
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub async fn send(self) -> std::result::Result<HtpasswdUsersListResponse, SendError> {
        let url = self.conn.url(&self.path);
        let response = self
            .conn
            .authorize(self.conn.http.get(&url))
            .query(&[("page", self.page), ("size", self.size)])
            .send()
            .await
            .map_err(SendError::transport)?;

        if !response.status().is_success() {
            return Err(SendError::from_response(response).await);
        }

        response.json().await.map_err(SendError::transport)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtpasswdUsersListResponse {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub items: Vec<HtpasswdUserRecord>,
}

/// Failure of a single API request.
///
/// Carries the transport-level description, the HTTP status when one was
/// received, and the decoded error body when the service sent one.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct SendError {
    pub status: Option<u16>,
    pub api_error: Option<ApiError>,
    pub message: String,
}

impl SendError {
    fn transport(err: reqwest::Error) -> Self {
        Self {
            status: err.status().map(|s| s.as_u16()),
            api_error: None,
            message: format!("request failed: {}", err),
        }
    }

    async fn from_response(response: Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let api_error = serde_json::from_str::<ApiError>(&body)
            .ok()
            .filter(ApiError::is_meaningful);

        let message = if api_error.is_some() || body.trim().is_empty() {
            format!("HTTP {}", status)
        } else {
            format!("HTTP {} - {}", status, body.trim())
        };

        Self {
            status: Some(status.as_u16()),
            api_error,
            message,
        }
    }
}

impl From<SendError> for IdpSyncError {
    fn from(err: SendError) -> Self {
        IdpSyncError::from_remote(err.api_error, err.message)
    }
}
