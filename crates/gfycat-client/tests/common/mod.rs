//! Common test utilities for integration tests

use anyhow::Result;
use async_trait::async_trait;
use gfycat_client::http::{HttpClient, HttpResponse, MultipartUpload};
use gfycat_client::{ClientConfig, Endpoints};
use reqwest::header::HeaderMap;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const GFYCATS_URL: &str = "https://gfycat.invalid/v1/gfycats";
pub const FILE_DROP_URL: &str = "https://filedrop.invalid";
pub const STATUS_URL: &str = "https://gfycat.invalid/v1/gfycats/fetch/status/";
pub const TOKEN_URL: &str = "https://gfycat.invalid/v1/oauth/token";

/// Configuration pointing at hosts that never resolve
pub fn offline_config() -> ClientConfig {
    ClientConfig {
        endpoints: Endpoints {
            gfycats: GFYCATS_URL.to_string(),
            file_drop: FILE_DROP_URL.to_string(),
            upload_status: STATUS_URL.to_string(),
            oauth_token: TOKEN_URL.to_string(),
        },
        ..ClientConfig::default()
    }
}

/// A request seen by the scripted transport
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: &'static str,
    pub url: String,
    pub authorization: Option<String>,
    pub body: Option<serde_json::Value>,
}

/// Transport that answers requests in the order they were scripted
#[derive(Debug, Clone, Default)]
pub struct ScriptedHttp {
    script: Arc<Mutex<VecDeque<(u16, String)>>>,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl ScriptedHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(self, status: u16, body: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back((status, body.into()));
        self
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    fn answer(&self, seen: Seen) -> Result<HttpResponse> {
        self.seen.lock().unwrap().push(seen.clone());
        let (status, body) = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("Unscripted request to {}", seen.url))?;
        Ok(HttpResponse { status, body })
    }
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[async_trait]
impl HttpClient for ScriptedHttp {
    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<HttpResponse> {
        self.answer(Seen {
            method: "GET",
            url: url.to_string(),
            authorization: authorization(headers),
            body: None,
        })
    }

    async fn post_json(
        &self,
        url: &str,
        headers: &HeaderMap,
        body: &serde_json::Value,
    ) -> Result<HttpResponse> {
        self.answer(Seen {
            method: "POST",
            url: url.to_string(),
            authorization: authorization(headers),
            body: Some(body.clone()),
        })
    }

    async fn post_multipart(&self, url: &str, upload: MultipartUpload) -> Result<HttpResponse> {
        self.answer(Seen {
            method: "POST",
            url: url.to_string(),
            authorization: None,
            body: Some(serde_json::json!({
                "key": upload.key,
                "file_name": upload.file_name,
                "size": upload.content.len(),
            })),
        })
    }
}

/// Client-credentials grant body
pub fn token_body(access_token: &str) -> String {
    serde_json::json!({
        "token_type": "bearer",
        "expires_in": 3600,
        "access_token": access_token,
    })
    .to_string()
}
