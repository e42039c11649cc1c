use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// What `ensure_valid_token` has to do before the next authenticated call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenAction {
    Reuse,
    Fetch,
    Refresh,
}

/// Body of a successful OAuth exchange
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    pub token_type: String,
    pub access_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub refresh_token_expires_in: Option<i64>,
}

impl TokenResponse {
    /// Parses an exchange body, rejecting a refresh token without a lifetime
    pub fn from_value(value: serde_json::Value) -> anyhow::Result<Self> {
        let response: Self =
            serde_json::from_value(value).context("Failed to parse token response")?;
        if response.refresh_token.is_some() && response.refresh_token_expires_in.is_none() {
            anyhow::bail!("Token response has refresh_token but no refresh_token_expires_in");
        }
        Ok(response)
    }
}

#[derive(Debug, Clone)]
struct AccessToken {
    authorization: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct RefreshToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Token state owned by a client
///
/// An access token always travels with its expiry, as does a refresh token.
#[derive(Debug, Clone, Default)]
pub(crate) struct TokenState {
    access: Option<AccessToken>,
    refresh: Option<RefreshToken>,
}

impl TokenState {
    /// Decides whether the held tokens can be used at `now`
    pub fn next_action(&self, now: DateTime<Utc>) -> TokenAction {
        let Some(access) = &self.access else {
            return TokenAction::Fetch;
        };
        if now <= access.expires_at {
            return TokenAction::Reuse;
        }
        match &self.refresh {
            Some(refresh) if now <= refresh.expires_at => TokenAction::Refresh,
            _ => TokenAction::Fetch,
        }
    }

    /// Builds the state that follows a successful exchange
    ///
    /// Every lifetime is shortened by `margin`. A refresh token absent from the
    /// response leaves the current one in place.
    pub fn updated(
        &self,
        response: TokenResponse,
        now: DateTime<Utc>,
        margin: Duration,
    ) -> anyhow::Result<Self> {
        let access = AccessToken {
            authorization: format!("{} {}", response.token_type, response.access_token),
            expires_at: expiry(now, response.expires_in, margin)
                .context("Token response has an out-of-range expires_in")?,
        };
        let refresh = match (response.refresh_token, response.refresh_token_expires_in) {
            (Some(token), Some(expires_in)) => Some(RefreshToken {
                token,
                expires_at: expiry(now, expires_in, margin)
                    .context("Token response has an out-of-range refresh_token_expires_in")?,
            }),
            _ => self.refresh.clone(),
        };
        Ok(Self {
            access: Some(access),
            refresh,
        })
    }

    /// Value for the `Authorization` header
    pub fn authorization(&self) -> Option<&str> {
        self.access.as_ref().map(|a| a.authorization.as_str())
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh.as_ref().map(|r| r.token.as_str())
    }

    pub fn access_expires_at(&self) -> Option<DateTime<Utc>> {
        self.access.as_ref().map(|a| a.expires_at)
    }

    pub fn refresh_expires_at(&self) -> Option<DateTime<Utc>> {
        self.refresh.as_ref().map(|r| r.expires_at)
    }
}

/// `now + lifetime_sec - margin`, or `None` when it leaves chrono's range
fn expiry(now: DateTime<Utc>, lifetime_sec: i64, margin: Duration) -> Option<DateTime<Utc>> {
    now.checked_add_signed(Duration::try_seconds(lifetime_sec)?)?
        .checked_sub_signed(margin)
}
