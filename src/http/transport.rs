//! Transport abstraction
//!
//! The client only needs one capability from the network: GET a URL and hand
//! back the parsed JSON body. Anything implementing [`Transport`] can stand in
//! for the real HTTP stack.

use crate::error::Result;
use crate::report::ErrorKind;
use crate::types::JsonValue;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Issues a single GET and parses the JSON response
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url` and parse the body as JSON.
    ///
    /// `url` may be protocol-relative (`//host/path`). One request per call,
    /// no retries.
    async fn fetch_json(&self, url: &str) -> Result<JsonValue>;
}

/// The transport a client holds: a working one, or the reason there is none
#[derive(Clone)]
pub enum TransportSlot {
    /// Requests go through this transport
    Available(Arc<dyn Transport>),
    /// Every request fails immediately with this error
    Unavailable(ErrorKind),
}

impl TransportSlot {
    /// Slot for an environment with no transport at all
    pub fn none() -> Self {
        Self::Unavailable(ErrorKind::NoTransport)
    }

    /// Slot wrapping a transport
    pub fn available(transport: Arc<dyn Transport>) -> Self {
        Self::Available(transport)
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

impl fmt::Debug for TransportSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available(_) => f.write_str("TransportSlot::Available"),
            Self::Unavailable(kind) => f
                .debug_tuple("TransportSlot::Unavailable")
                .field(&kind.code())
                .finish(),
        }
    }
}
