//! Access-token lifecycle
//!
//! `TokenManager` holds the token state for one client and makes sure every
//! authenticated request goes out with a live access token, fetching or
//! refreshing only when the held one has expired.

use anyhow::Context;
use chrono::Duration;
use reqwest::header::HeaderMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::credentials::Credentials;
use super::token::{TokenAction, TokenResponse, TokenState};
use crate::error::{GfycatError, Result};
use crate::http::HttpClient;
use crate::time::Clock;

/// Field the OAuth and query endpoints use to report failures
pub(crate) const ERROR_KEY: &str = "errorMessage";

/// Seconds shaved off every reported lifetime so a token never expires mid-request
const EXPIRY_MARGIN_SEC: i64 = 5;

pub struct TokenManager {
    credentials: Credentials,
    token_url: String,
    margin: Duration,
    clock: Arc<dyn Clock>,
    state: Mutex<TokenState>,
}

impl TokenManager {
    pub fn new(
        credentials: Credentials,
        token_url: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            credentials,
            token_url: token_url.into(),
            margin: Duration::seconds(EXPIRY_MARGIN_SEC),
            clock,
            state: Mutex::new(TokenState::default()),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns an `Authorization` header value backed by an unexpired token
    ///
    /// The state lock is held across the exchange, so concurrent callers wait
    /// for one fetch or refresh instead of each starting their own.
    pub async fn ensure_valid_token<H: HttpClient>(&self, http: &H) -> Result<String> {
        let mut state = self.state.lock().await;

        match state.next_action(self.clock.now()) {
            TokenAction::Reuse => {
                tracing::debug!("Reusing cached access token");
            }
            TokenAction::Fetch => {
                let grant = self.credentials.grant();
                tracing::debug!("Fetching access token via {} grant", grant);
                let response = self
                    .exchange(http, &self.credentials.fetch_payload())
                    .await?;
                *state = state.updated(response, self.clock.now(), self.margin)?;
                tracing::info!(
                    "Obtained access token via {} grant (expires {:?}, refresh expires {:?})",
                    grant,
                    state.access_expires_at(),
                    state.refresh_expires_at()
                );
            }
            TokenAction::Refresh => {
                let refresh_token = state
                    .refresh_token()
                    .context("Refresh selected without a refresh token")?;
                tracing::debug!("Refreshing access token");
                let payload = self.credentials.refresh_payload(refresh_token);
                let response = self.exchange(http, &payload).await?;
                *state = state.updated(response, self.clock.now(), self.margin)?;
                tracing::info!(
                    "Refreshed access token (expires {:?}, refresh expires {:?})",
                    state.access_expires_at(),
                    state.refresh_expires_at()
                );
            }
        }

        Ok(state
            .authorization()
            .context("Token state holds no access token")?
            .to_string())
    }

    /// Posts `payload` to the token endpoint and parses the grant
    async fn exchange<H: HttpClient>(
        &self,
        http: &H,
        payload: &serde_json::Value,
    ) -> Result<TokenResponse> {
        let response = http
            .post_json(&self.token_url, &HeaderMap::new(), payload)
            .await?;
        let body: serde_json::Value = response.json()?;

        if let Some(message) = body.get(ERROR_KEY) {
            let message = message
                .as_str()
                .map_or_else(|| message.to_string(), str::to_string);
            tracing::warn!("OAuth endpoint returned {}: {}", response.status, message);
            return Err(GfycatError::api(message, &self.token_url, &response));
        }

        if !response.is_ok() {
            tracing::warn!("OAuth endpoint returned {}", response.status);
            return Err(GfycatError::api(
                "OAuth endpoint error",
                &self.token_url,
                &response,
            ));
        }

        Ok(TokenResponse::from_value(body)?)
    }
}
