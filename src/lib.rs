//! # Exhibit TUI
//!
//! Terminal client for the Exhibit photo-sharing API.
//!
//! ## Features
//! - Paged list of all posts or only your own
//! - Post detail with a comment section (add, edit, delete)
//! - Create posts with an image upload, edit descriptions, delete
//! - Register, log in, log out; the session survives restarts
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (feature state machines)
//! - Network Layer (Tokio runtime, [`api::ExhibitApi`])

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod constants;
pub mod error;
pub mod features;
pub mod messages;
pub mod models;
pub mod network;
pub mod storage;
pub mod ui;

// Re-export commonly used types
pub use api::ExhibitApi;
pub use app::{AppActor, AppState};
pub use config::Config;
pub use error::ApiError;
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{Comment, Post, PostPage, Session, User};
pub use network::NetworkActor;
