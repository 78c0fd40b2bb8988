//! Home maintenance tracking.
//!
//! The crate is split along the seams the app uses it through:
//!
//! - [`models`]: domain types shared by every layer.
//! - [`state`]: the session-scoped task stores and the derived agenda view.
//! - [`db`]: SQLite persistence behind the backend API.
//! - [`api`]: the axum router the `upkeep` binary serves.
//! - [`client`]: typed HTTP client the state layer writes through.
//! - [`assist`]: proxy to the chat-completion API for repair questions.

pub mod api;
pub mod assist;
pub mod client;
pub mod db;
pub mod models;
pub mod state;
