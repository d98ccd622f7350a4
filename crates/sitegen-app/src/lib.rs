//! sitegen-app - Application state and orchestration for sitegen
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the
//! generate / preview / download flow, the Engine abstraction shared by the
//! TUI and headless runners, and configuration loading.

pub mod actions;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod input;
pub mod input_key;
pub mod message;
pub mod poller;
pub mod preview;
pub mod process;
pub mod signals;
pub mod state;

// Re-export primary types
pub use config::Settings;
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{LinkKind, UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use preview::PreviewPhase;
pub use state::{AppPhase, AppState};
