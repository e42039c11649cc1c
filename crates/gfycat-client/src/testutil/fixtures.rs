//! Test fixtures
//!
//! Endpoints and canned OAuth bodies shared by the client and token tests.

use crate::config::{ClientConfig, Endpoints};

pub const GFYCATS_URL: &str = "https://api.test/v1/gfycats";
pub const FILE_DROP_URL: &str = "https://filedrop.test";
pub const STATUS_URL: &str = "https://api.test/v1/gfycats/fetch/status/";
pub const TOKEN_URL: &str = "https://api.test/v1/oauth/token";

/// Configuration pointing every endpoint at the test hosts
pub fn test_config() -> ClientConfig {
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

/// Client-credentials grant body
pub fn token_body(access_token: &str, expires_in: i64) -> String {
    serde_json::json!({
        "token_type": "bearer",
        "scope": "",
        "expires_in": expires_in,
        "access_token": access_token,
    })
    .to_string()
}

/// Password or refresh grant body
pub fn user_token_body(
    access_token: &str,
    expires_in: i64,
    refresh_token: &str,
    refresh_expires_in: i64,
) -> String {
    serde_json::json!({
        "token_type": "bearer",
        "scope": "",
        "expires_in": expires_in,
        "access_token": access_token,
        "refresh_token": refresh_token,
        "refresh_token_expires_in": refresh_expires_in,
        "resource_owner": "alice",
    })
    .to_string()
}
