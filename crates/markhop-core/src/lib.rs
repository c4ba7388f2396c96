// Public fallible APIs in this crate share one concrete error contract (`MarkhopError`).
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod index;
pub(crate) mod jsonl;
pub mod models;
pub mod resolver;
pub mod store;
pub mod tabs;
pub mod workflow;

pub use client::Markhop;
pub use config::AppConfig;
pub use error::{MarkhopError, Result};
pub use index::{SearchOptions, flatten, search};
pub use resolver::{FolderResolver, LeafCollision};
pub use store::BookmarkStore;
