//! Pagination module
//!
//! Query cursors and the cache that keeps one cursor per distinct query.
//!
//! # Overview
//!
//! A [`QueryCursor`] tracks which page of a query comes next and builds the
//! request URL for it. The [`QueryCache`] hands out the same cursor for every
//! request with the same signature, so asking for a query again continues
//! where the previous request left off.

mod cache;
mod cursor;

pub use cache::QueryCache;
pub use cursor::{encode_component, CursorHandle, QueryCursor, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
