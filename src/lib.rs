//! vidlink: client for a multi-platform video link parser.
//!
//! Collects a video URL, asks the parsing backend for its streams, keeps a
//! durable download history and offers an AI copywriting assistant. The
//! stores in this crate are plain Rust; the Dioxus views behind the `ui`
//! feature only render them.

pub mod ai;
pub mod analytics;
pub mod api;
pub mod app;
pub mod config;
pub mod gateway;
pub mod history;
pub mod logging;
pub mod markdown;
pub mod storage;
pub mod store;
pub mod toast;
pub mod types;

#[cfg(feature = "ui")]
pub mod ui;
#[cfg(feature = "ui")]
pub mod views;

pub use app::AppContext;
pub use config::Config;
pub use gateway::{RemoteCallError, RemoteResult};
