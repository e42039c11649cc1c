use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::path::Path;
use std::sync::Arc;

use super::types::{
    CreateRequest, CreateResponse, GfyItem, GfyItemResponse, UploadOptions, UploadStatus,
};
use crate::auth::{Credentials, TokenManager, ERROR_KEY};
use crate::config::{ClientConfig, Endpoints};
use crate::error::{GfycatError, Result};
use crate::http::{HttpClient, MultipartUpload, ReqwestClient};
use crate::time::{Clock, SystemClock};

/// Gfycat API client
///
/// Generic over the HTTP client implementation for testability.
pub struct GfycatClient<H: HttpClient = ReqwestClient> {
    http: H,
    endpoints: Endpoints,
    tokens: TokenManager,
}

impl GfycatClient<ReqwestClient> {
    /// Creates a client against the default endpoints
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, &ClientConfig::default())
    }

    /// Creates a client from a loaded configuration that carries credentials
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let credentials = config
            .credentials
            .clone()
            .ok_or_else(|| GfycatError::Config("No credentials configured".to_string()))?;
        Self::with_config(credentials, config)
    }

    /// Creates a client with explicit credentials and configuration
    pub fn with_config(credentials: Credentials, config: &ClientConfig) -> Result<Self> {
        let http = ReqwestClient::with_timeout(config.request_timeout())?;
        Ok(GfycatClient::with_http_client(credentials, config, http))
    }
}

impl<H: HttpClient> GfycatClient<H> {
    /// Creates a client over a custom HTTP implementation
    pub fn with_http_client(credentials: Credentials, config: &ClientConfig, http: H) -> Self {
        Self::with_clock(credentials, config, http, Arc::new(SystemClock))
    }

    pub(crate) fn with_clock(
        credentials: Credentials,
        config: &ClientConfig,
        http: H,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let tokens = TokenManager::new(credentials, config.endpoints.oauth_token.clone(), clock);
        Self {
            http,
            endpoints: config.endpoints.clone(),
            tokens,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn credentials(&self) -> &Credentials {
        self.tokens.credentials()
    }

    /// Makes sure an unexpired access token is held, fetching or refreshing one if needed
    pub async fn ensure_valid_token(&self) -> Result<()> {
        self.tokens.ensure_valid_token(&self.http).await.map(drop)
    }

    /// Builds the headers for an authenticated request
    async fn auth_headers(&self) -> Result<HeaderMap> {
        let authorization = self.tokens.ensure_valid_token(&self.http).await?;
        let value = HeaderValue::from_str(&authorization)
            .context("Access token is not a valid header value")?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    fn gfy_url(&self, gfyname: &str) -> String {
        format!("{}/{}", self.endpoints.gfycats, urlencoding::encode(gfyname))
    }

    fn status_url(&self, gfyname: &str) -> String {
        format!("{}{}", self.endpoints.upload_status, urlencoding::encode(gfyname))
    }
}

// Upload methods
impl<H: HttpClient> GfycatClient<H> {
    /// Asks the service to fetch and encode the media at `url`
    ///
    /// Returns the gfyname of the new gfy. Encoding continues on the service
    /// side; poll [`check_upload`](Self::check_upload) to follow it.
    pub async fn upload_from_url(&self, url: &str, options: &UploadOptions) -> Result<String> {
        let headers = self.auth_headers().await?;
        let body = serde_json::to_value(CreateRequest::new(Some(url), options))
            .context("Failed to serialize upload request")?;

        tracing::debug!("Creating gfy from {}", url);
        let endpoint = &self.endpoints.gfycats;
        let response = self.http.post_json(endpoint, &headers, &body).await?;

        if !response.is_ok() {
            tracing::warn!("Gfy creation returned {}", response.status);
            return Err(GfycatError::api("Error fetching the URL", endpoint, &response));
        }

        let body: serde_json::Value = response.json()?;
        if let Some(error) = body.get("error") {
            let message = error.as_str().map_or_else(|| error.to_string(), str::to_string);
            tracing::warn!("Gfy creation failed: {}", message);
            return Err(GfycatError::api_without_status(message, endpoint, &response));
        }

        let created: CreateResponse = serde_json::from_value(body)
            .context("Failed to parse gfy creation response")?;
        tracing::info!("Created gfy {} from {}", created.gfyname, url);
        Ok(created.gfyname)
    }

    /// Uploads a local file
    ///
    /// Reserves an upload key with a creation request, then posts the file to
    /// the file-drop endpoint under that key. Returns the key, which is the
    /// gfyname the service will encode the file under.
    pub async fn upload_from_file(
        &self,
        path: impl AsRef<Path>,
        options: &UploadOptions,
    ) -> Result<String> {
        let path = path.as_ref();
        let headers = self.auth_headers().await?;
        let content = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());

        let body = serde_json::to_value(CreateRequest::new(None, options))
            .context("Failed to serialize upload request")?;
        let response = self
            .http
            .post_json(&self.endpoints.gfycats, &headers, &body)
            .await?;
        // The creation status is not checked; a body without a key fails to parse
        let created: CreateResponse = response.json()?;
        let gfyname = created.gfyname;

        tracing::debug!(
            "Uploading {} ({} bytes) as {}",
            path.display(),
            content.len(),
            gfyname
        );
        let endpoint = &self.endpoints.file_drop;
        let upload = MultipartUpload {
            key: gfyname.clone(),
            file_name,
            content,
        };
        let response = self.http.post_multipart(endpoint, upload).await?;

        if !(200..=209).contains(&response.status) {
            tracing::warn!("File drop returned {}", response.status);
            return Err(GfycatError::api("Error uploading the file", endpoint, &response));
        }

        tracing::info!("Uploaded {} as {}", path.display(), gfyname);
        Ok(gfyname)
    }

    /// Fetches the encode status of an upload
    ///
    /// Unauthenticated. Returns the status body unchanged; see
    /// [`UploadStatus::from_value`] for a typed reading.
    pub async fn check_upload(&self, gfyname: &str) -> Result<serde_json::Value> {
        let url = self.status_url(gfyname);
        let response = self.http.get(&url, &HeaderMap::new()).await?;

        if !response.is_ok() {
            tracing::warn!("Status check for {} returned {}", gfyname, response.status);
            return Err(GfycatError::api("Unable to check the link", &url, &response));
        }

        Ok(response.json()?)
    }

    /// Fetches and interprets the encode status of an upload
    pub async fn upload_status(&self, gfyname: &str) -> Result<UploadStatus> {
        let body = self.check_upload(gfyname).await?;
        Ok(UploadStatus::from_value(&body))
    }
}

// Query methods
impl<H: HttpClient> GfycatClient<H> {
    /// Fetches the details of a gfy
    ///
    /// Returns the response body unchanged.
    pub async fn query_gfy(&self, gfyname: &str) -> Result<serde_json::Value> {
        let headers = self.auth_headers().await?;
        let url = self.gfy_url(gfyname);
        let response = self.http.get(&url, &headers).await?;
        let body: serde_json::Value = response.json()?;

        if let Some(message) = body.get(ERROR_KEY) {
            let message = message
                .as_str()
                .map_or_else(|| message.to_string(), str::to_string);
            tracing::warn!("Query for {} failed: {}", gfyname, message);
            return Err(GfycatError::api(message, &url, &response));
        }

        if !response.is_ok() {
            tracing::warn!("Query for {} returned {}", gfyname, response.status);
            return Err(GfycatError::api("Bad response from Gfycat", &url, &response));
        }

        Ok(body)
    }

    /// Fetches the details of a gfy as a typed item
    pub async fn query_gfy_item(&self, gfyname: &str) -> Result<GfyItem> {
        let body = self.query_gfy(gfyname).await?;
        let response: GfyItemResponse =
            serde_json::from_value(body).context("Failed to parse gfy item")?;
        Ok(response.gfy_item)
    }
}
