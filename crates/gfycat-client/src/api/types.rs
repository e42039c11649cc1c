use serde::{Deserialize, Serialize};

/// Optional metadata attached to a new gfy
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOptions {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    /// 0 = clean, 1 = adult, 3 = potentially offensive
    pub nsfw: u8,
    /// Skip md5 deduplication against existing gfys
    pub no_md5: bool,
    pub keep_audio: bool,
    pub private: bool,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            tags: None,
            nsfw: 0,
            no_md5: true,
            keep_audio: false,
            private: false,
        }
    }
}

impl UploadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn nsfw(mut self, nsfw: u8) -> Self {
        self.nsfw = nsfw;
        self
    }

    pub fn no_md5(mut self, no_md5: bool) -> Self {
        self.no_md5 = no_md5;
        self
    }

    pub fn keep_audio(mut self, keep_audio: bool) -> Self {
        self.keep_audio = keep_audio;
        self
    }

    pub fn private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }
}

/// Body of a gfy creation request
///
/// Title and description are always sent, empty when unset. Tags are sent as
/// `null` when unset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_url: Option<&'a str>,
    pub title: &'a str,
    pub description: &'a str,
    pub tags: Option<&'a [String]>,
    pub keep_audio: bool,
    pub no_md5: bool,
    pub nsfw: u8,
    pub private: bool,
}

impl<'a> CreateRequest<'a> {
    pub fn new(fetch_url: Option<&'a str>, options: &'a UploadOptions) -> Self {
        Self {
            fetch_url,
            title: options.title.as_deref().unwrap_or_default(),
            description: options.description.as_deref().unwrap_or_default(),
            tags: options.tags.as_deref(),
            keep_audio: options.keep_audio,
            no_md5: options.no_md5,
            nsfw: options.nsfw,
            private: options.private,
        }
    }
}

/// Body returned by a gfy creation request
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreateResponse {
    pub gfyname: String,
}

/// Encode progress reported by the status endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    /// Encoding finished; the final gfyname may differ from the upload key
    Complete { gfyname: Option<String> },
    Encoding,
    NotFound,
    Error { description: Option<String> },
    /// A task value this client does not know about
    Other(String),
}

impl UploadStatus {
    /// Interprets a status-check body
    pub fn from_value(value: &serde_json::Value) -> Self {
        let task = value.get("task").and_then(|t| t.as_str()).unwrap_or_default();
        match task {
            "complete" => UploadStatus::Complete {
                gfyname: value
                    .get("gfyname")
                    .and_then(|g| g.as_str())
                    .map(str::to_string),
            },
            "encoding" => UploadStatus::Encoding,
            // The service spells it this way
            "NotFoundo" | "NotFound" => UploadStatus::NotFound,
            "error" => UploadStatus::Error {
                description: value.get("errorMessage").map(|m| {
                    m.get("description")
                        .and_then(|d| d.as_str())
                        .or_else(|| m.as_str())
                        .map_or_else(|| m.to_string(), str::to_string)
                }),
            },
            other => UploadStatus::Other(other.to_string()),
        }
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self, UploadStatus::Encoding)
    }
}

/// Gfy details returned by a query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GfyItem {
    pub gfy_id: String,
    pub gfy_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub nsfw: Option<serde_json::Value>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub frame_rate: Option<f64>,
    #[serde(default)]
    pub num_frames: Option<f64>,
    #[serde(default)]
    pub views: Option<u64>,
    #[serde(default)]
    pub create_date: Option<i64>,
    #[serde(default)]
    pub mp4_url: Option<String>,
    #[serde(default)]
    pub webm_url: Option<String>,
    #[serde(default)]
    pub gif_url: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
}

/// Envelope of a query response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GfyItemResponse {
    pub gfy_item: GfyItem,
}
