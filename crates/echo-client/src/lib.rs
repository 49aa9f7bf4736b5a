//! echo-client: client side of the Echo anonymous note board
//!
//! This crate provides:
//! - An HTTP client for the remote notes service
//! - The feed controller (initial load, load more, prepend on create)
//! - The compose controller (draft, validation, submission)
//! - A single auto-dismissing toast slot for success/failure notifications
//!
//! # Architecture
//!
//! Controllers are generic over [`NotesApi`] and keep their state in
//! `tokio::sync::watch` channels. Views subscribe to those channels; nothing
//! mutates state except the controllers' own transitions. Feed loads and
//! submissions are each guarded by their own flag and may overlap.
//!
//! # Usage
//!
//! ```rust,ignore
//! use echo_client::{Board, ClientConfig};
//!
//! let config = ClientConfig::from_env()?;
//! let board = Board::from_config(&config);
//!
//! board.feed.load_initial().await;
//! board.compose.set_message("hello");
//! board.submit().await;
//! ```

pub mod api;
pub mod board;
pub mod compose;
pub mod config;
pub mod error;
pub mod feed;
pub mod toast;

#[cfg(test)]
mod testing;

pub use api::{HttpNotesApi, NotesApi};
pub use board::Board;
pub use compose::{ComposeController, ComposeState, SubmitOutcome};
pub use config::{ClientConfig, ConfigError};
pub use error::{ClientError, ClientResult};
pub use feed::{FeedController, FeedState, LoadOutcome};
pub use toast::{Toast, ToastKind, ToastReceiver, Toasts};

// Re-export the shared types for downstream crates
pub use echo_core;
