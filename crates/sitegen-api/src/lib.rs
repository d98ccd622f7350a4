//! # sitegen-api - Generation Backend Client
//!
//! HTTP access to the website generation backend, plus the browser
//! navigation used to hand preview and download references to the user.
//!
//! Depends on [`sitegen_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Backend Operations
//! - [`GenerationApi`] - Async trait for submit / status / stop-preview
//! - [`ApiClient`] - `reqwest` implementation of [`GenerationApi`]
//!
//! ### Wire Types (`protocol`)
//! - [`PreviewResponse`], [`PreviewStatus`] - Preview status decoding
//! - [`parse_error_detail()`] - Extract `detail` from FastAPI error bodies
//!
//! ### Navigation (`browser`)
//! - [`open_url()`] - Open a URL with the system or configured browser
//! - [`trigger_download()`] - Navigate to a project's archive

pub mod api;
pub mod browser;
pub mod client;
pub mod protocol;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use api::{GenerationApi, LocalGenerationApi};
pub use browser::{open_url, trigger_download};
pub use client::ApiClient;
pub use protocol::{parse_error_detail, PreviewResponse, PreviewStatus};
