//! HTTP client abstraction for the Gfycat API
//!
//! This module provides a trait-based HTTP client that can be easily mocked for testing.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Trait for making HTTP requests
///
/// Every method returns the raw status and body so callers can apply
/// endpoint-specific error rules.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Makes a GET request
    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<HttpResponse>;

    /// Makes a POST request with a JSON body
    async fn post_json(
        &self,
        url: &str,
        headers: &HeaderMap,
        body: &serde_json::Value,
    ) -> Result<HttpResponse>;

    /// Makes a multipart POST carrying an upload key and the file content
    async fn post_multipart(&self, url: &str, upload: MultipartUpload) -> Result<HttpResponse>;
}

/// Multipart body for the file-drop endpoint
#[derive(Debug, Clone)]
pub struct MultipartUpload {
    pub key: String,
    pub file_name: String,
    pub content: Vec<u8>,
}

/// Response from an HTTP request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Returns true if status is exactly 200
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Deserializes the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).context("Failed to parse JSON response")
    }
}

/// Production HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new reqwest-based HTTP client
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Creates a client whose requests time out after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { inner })
    }

    async fn into_response(response: reqwest::Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;
        Ok(HttpResponse { status, body })
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<HttpResponse> {
        let response = self
            .inner
            .get(url)
            .headers(headers.clone())
            .send()
            .await
            .context("Failed to send request")?;

        Self::into_response(response).await
    }

    async fn post_json(
        &self,
        url: &str,
        headers: &HeaderMap,
        body: &serde_json::Value,
    ) -> Result<HttpResponse> {
        let response = self
            .inner
            .post(url)
            .headers(headers.clone())
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        Self::into_response(response).await
    }

    async fn post_multipart(&self, url: &str, upload: MultipartUpload) -> Result<HttpResponse> {
        let form = Form::new()
            .text("key", upload.key)
            .part("file", Part::bytes(upload.content).file_name(upload.file_name));

        let response = self
            .inner
            .post(url)
            .multipart(form)
            .send()
            .await
            .context("Failed to upload file")?;

        Self::into_response(response).await
    }
}
