//! Async client for the Gfycat API
//!
//! [`GfycatClient`] uploads media from a URL or a local file, follows encode
//! status and queries gfy details. OAuth tokens are fetched on first use and
//! refreshed transparently before authenticated calls.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod time;

#[cfg(test)]
mod testutil;

pub use api::{GfyItem, GfycatClient, UploadOptions, UploadStatus};
pub use auth::{Credentials, Grant};
pub use config::{ClientConfig, Endpoints};
pub use error::{GfycatError, ResponseContext, Result};
