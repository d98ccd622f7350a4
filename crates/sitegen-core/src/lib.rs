//! # sitegen-core - Core Domain Types
//!
//! Foundation crate for sitegen. Provides project domain types, error handling
//! and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`ProjectId`] - Opaque project identifier returned by the backend
//! - [`GenerationRequest`] - A non-blank site description ready to submit
//! - [`StatusSnapshot`] - Latest preview status (ready flag plus references)
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use sitegen_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod prelude;
pub mod types;

pub use error::{
    Error, Result, ResultExt, GENERATION_FALLBACK, STATUS_FALLBACK, STOP_PREVIEW_FALLBACK,
};
pub use types::{GenerationRequest, ProjectId, StatusSnapshot};
