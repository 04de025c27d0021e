//! Query module
//!
//! Turns the accepted call shapes into validated query options.
//!
//! # Overview
//!
//! - [`CallShape`] - the three ways a caller can describe a request
//! - [`RawOptions`] - the canonical record every shape normalizes into
//! - [`validate`] - checks a record and produces typed [`QueryOptions`]
//! - [`ResourceKind`] - the static post/expression selector tables

mod normalize;
mod types;

pub use normalize::{
    validate, CallShape, RawOptions, KEY_ID, KEY_PAGE, KEY_PER_PAGE, KEY_QUERY, KEY_QUERY_SELECTOR,
    KEY_QUERY_TYPE,
};
pub use types::{QueryOptions, QuerySelector, QuerySignature, QueryType, ResourceKind};

#[cfg(test)]
mod tests;
