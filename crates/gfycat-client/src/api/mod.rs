mod client;
mod types;

pub use client::GfycatClient;
pub use types::{GfyItem, UploadOptions, UploadStatus};
