//! Test utilities for the gfycat client
//!
//! This module provides fixtures and mock re-exports for testing.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
