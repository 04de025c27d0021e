//! HTTP module
//!
//! The transport seam between the client and the network.
//!
//! # Features
//!
//! - **Transport trait**: the single "GET a URL, parse JSON" capability
//! - **Transport slot**: an available transport or the reason there is none
//! - **reqwest transport**: protocol-relative URL resolution, optional timeout,
//!   error classification

mod client;
mod transport;

pub use client::{HttpTransport, HttpTransportConfig, HttpTransportConfigBuilder};
pub use transport::{Transport, TransportSlot};
