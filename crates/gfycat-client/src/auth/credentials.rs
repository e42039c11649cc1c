use serde::{Deserialize, Serialize};
use std::fmt;

/// OAuth grant used for a full token fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    /// Application-only token, no refresh token is issued
    ClientCredentials,
    /// User token, the response carries a refresh token
    Password,
}

impl Grant {
    /// Value sent as `grant_type`
    pub fn as_str(self) -> &'static str {
        match self {
            Grant::ClientCredentials => "client_credentials",
            Grant::Password => "password",
        }
    }
}

impl fmt::Display for Grant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application and optional user credentials
///
/// Immutable once handed to a client.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password: Option<String>,
}

impl Credentials {
    /// Credentials for an application-only token
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            username: None,
            password: None,
        }
    }

    /// Adds a user login, switching full fetches to the password grant
    pub fn with_user(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// True when both username and password are set
    pub fn has_user_login(&self) -> bool {
        self.user_login().is_some()
    }

    fn user_login(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Some((user.as_str(), pass.as_str()))
            }
            _ => None,
        }
    }

    /// Grant used for a full fetch
    pub fn grant(&self) -> Grant {
        if self.has_user_login() {
            Grant::Password
        } else {
            Grant::ClientCredentials
        }
    }

    /// Request body for a full token fetch
    pub(crate) fn fetch_payload(&self) -> serde_json::Value {
        let mut payload = serde_json::json!({
            "grant_type": self.grant().as_str(),
            "client_id": self.client_id,
            "client_secret": self.client_secret,
        });
        if let Some((username, password)) = self.user_login() {
            payload["username"] = username.into();
            payload["password"] = password.into();
        }
        payload
    }

    /// Request body for a refresh-token exchange
    pub(crate) fn refresh_payload(&self, refresh_token: &str) -> serde_json::Value {
        serde_json::json!({
            "grant_type": "refresh",
            "client_id": self.client_id,
            "client_secret": self.client_secret,
            "refresh_token": refresh_token,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_only_credentials_use_client_credentials_grant() {
        let creds = Credentials::new("id", "secret");
        assert_eq!(creds.grant(), Grant::ClientCredentials);

        let payload = creds.fetch_payload();
        assert_eq!(payload["grant_type"], "client_credentials");
        assert_eq!(payload["client_id"], "id");
        assert_eq!(payload["client_secret"], "secret");
        assert!(payload.get("username").is_none());
    }

    #[test]
    fn user_login_switches_to_password_grant() {
        let creds = Credentials::new("id", "secret").with_user("alice", "hunter2");
        assert_eq!(creds.grant(), Grant::Password);

        let payload = creds.fetch_payload();
        assert_eq!(payload["grant_type"], "password");
        assert_eq!(payload["username"], "alice");
        assert_eq!(payload["password"], "hunter2");
    }

    #[test]
    fn username_without_password_stays_on_client_credentials() {
        let creds: Credentials = serde_json::from_str(
            r#"{"client_id": "id", "client_secret": "secret", "username": "alice"}"#,
        )
        .unwrap();

        assert_eq!(creds.grant(), Grant::ClientCredentials);
        assert!(creds.fetch_payload().get("username").is_none());
    }

    #[test]
    fn refresh_payload_carries_token_and_client() {
        let creds = Credentials::new("id", "secret");
        let payload = creds.refresh_payload("r-123");

        assert_eq!(payload["grant_type"], "refresh");
        assert_eq!(payload["refresh_token"], "r-123");
        assert_eq!(payload["client_id"], "id");
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let creds = Credentials::new("id", "top-secret").with_user("alice", "hunter2");
        let debug = format!("{creds:?}");

        assert!(debug.contains("alice"));
        assert!(!debug.contains("top-secret"));
        assert!(!debug.contains("hunter2"));
    }
}
