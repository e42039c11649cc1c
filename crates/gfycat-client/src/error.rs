use crate::http::HttpResponse;

/// Result alias used throughout the client
pub type Result<T, E = GfycatError> = std::result::Result<T, E>;

/// Raw response kept alongside an API error for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseContext {
    pub url: String,
    pub body: String,
}

/// Errors returned by the Gfycat client
#[derive(Debug, thiserror::Error)]
pub enum GfycatError {
    /// The API reported a failure, either through its status code or an error field
    #[error("{}", display_api(.message, *.status))]
    Api {
        message: String,
        status: Option<u16>,
        context: Option<ResponseContext>,
    },
    /// The transport failed or returned a body that could not be parsed
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
    /// The file to upload could not be read
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The client could not be built from the given configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

fn display_api(message: &str, status: Option<u16>) -> String {
    match status {
        Some(status) => format!("({status}) {message}"),
        None => message.to_string(),
    }
}

impl GfycatError {
    /// Builds an API error from a response, keeping the raw body as context
    pub(crate) fn api(message: impl Into<String>, url: &str, response: &HttpResponse) -> Self {
        Self::Api {
            message: message.into(),
            status: Some(response.status),
            context: Some(ResponseContext {
                url: url.to_string(),
                body: response.body.clone(),
            }),
        }
    }

    /// API error that carries no status, for error fields on otherwise successful responses
    pub(crate) fn api_without_status(
        message: impl Into<String>,
        url: &str,
        response: &HttpResponse,
    ) -> Self {
        Self::Api {
            message: message.into(),
            status: None,
            context: Some(ResponseContext {
                url: url.to_string(),
                body: response.body.clone(),
            }),
        }
    }

    /// HTTP status carried by an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// Human-readable message of an API error
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Raw response context of an API error
    pub fn context(&self) -> Option<&ResponseContext> {
        match self {
            Self::Api { context, .. } => context.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn api_error_displays_status_prefix() {
        let err = GfycatError::api("Unable to check the link", "https://x", &response(404, ""));
        assert_eq!(err.to_string(), "(404) Unable to check the link");
    }

    #[test]
    fn api_error_without_status_displays_message_only() {
        let err = GfycatError::api_without_status("bad request", "https://x", &response(200, "{}"));
        assert_eq!(err.to_string(), "bad request");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn api_error_keeps_raw_context() {
        let err = GfycatError::api("boom", "https://api/x", &response(500, "oops"));
        let context = err.context().unwrap();
        assert_eq!(context.url, "https://api/x");
        assert_eq!(context.body, "oops");
        assert_eq!(err.message(), Some("boom"));
    }

    #[test]
    fn transport_errors_pass_through_unchanged() {
        let err: GfycatError = anyhow::anyhow!("connection refused").into();
        assert_eq!(err.to_string(), "connection refused");
        assert!(err.status().is_none());
        assert!(err.message().is_none());
    }
}
