// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # urturn client
//!
//! A client for the urturn content-query API (posts and expressions).
//!
//! ## Features
//!
//! - **Three call shapes**: options record, bare search term, or positional
//!   `(type, selector, query[, id])` arguments, all normalized to one record
//! - **Fail-closed validation**: bad input is rejected before any request
//! - **Self-advancing cursors**: asking for the same query again returns the
//!   next page
//! - **Pluggable transport**: reqwest by default, any [`http::Transport`] in tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use urturn_client::{CallShape, Client, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Client::new(ClientConfig::default());
//!
//!     // Page 1, then page 2 of the same search
//!     let first = client.get("hello").await;
//!     let second = client.get("hello").await;
//!
//!     // Posts by a user
//!     let posts = client.get(CallShape::positional("post", "username", "alice")).await;
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Client::get                           │
//! │   CallShape → RawOptions → validate → QueryOptions           │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌───────────────┬──────────────┴───────┬───────────────────────┐
//! │  QueryCache   │    QueryCursor       │      Transport        │
//! ├───────────────┼──────────────────────┼───────────────────────┤
//! │ signature →   │ URL for current page │ GET + JSON parse      │
//! │ cursor        │ page += 1            │ reqwest / injected    │
//! └───────────────┴──────────────────────┴───────────────────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and loose-value helpers
pub mod types;

/// Message placeholder interpolation
pub mod template;

/// Caller-facing error records
pub mod report;

/// Call shapes, validation, and resource kinds
pub mod query;

/// Query cursors and the cursor cache
pub mod pagination;

/// Transport trait and reqwest transport
pub mod http;

/// Client configuration
pub mod config;

/// The request facade
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::{Callbacks, Client, Dispatch, PageResult, PendingPage};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use query::{CallShape, QueryOptions, QuerySelector, QueryType};
pub use report::{ErrorCode, ErrorRecord};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
