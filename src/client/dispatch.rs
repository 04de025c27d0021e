//! Request outcomes
//!
//! A call to [`Client::get`](super::Client::get) either fails validation
//! straight away or yields a [`PendingPage`] whose URL is already fixed.
//! Awaiting the page performs the request and resolves exactly once.

use crate::http::TransportSlot;
use crate::report::{ErrorKind, ErrorRecord};
use crate::types::JsonValue;
use futures::future::BoxFuture;
use std::fmt;
use std::future::IntoFuture;
use tracing::warn;

/// Method name reported in every record produced by the facade
pub const METHOD_GET: &str = "get";

/// Final result of one page request
pub type PageResult = std::result::Result<JsonValue, ErrorRecord>;

/// What `get` produced
#[must_use = "a pending page does nothing until awaited"]
#[derive(Debug)]
pub enum Dispatch {
    /// Validation failed; nothing was sent
    Rejected(ErrorRecord),
    /// A request for the page at this URL is ready
    Pending(PendingPage),
}

impl Dispatch {
    /// Whether the request was rejected before reaching the transport
    pub fn failed(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// URL that will be requested
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Rejected(_) => None,
            Self::Pending(page) => Some(page.url()),
        }
    }

    /// The rejection, if validation failed
    pub fn error(&self) -> Option<&ErrorRecord> {
        match self {
            Self::Rejected(record) => Some(record),
            Self::Pending(_) => None,
        }
    }

    /// Wait for the page, or return the rejection
    pub async fn outcome(self) -> PageResult {
        match self {
            Self::Rejected(record) => Err(record),
            Self::Pending(page) => page.send().await,
        }
    }
}

impl IntoFuture for Dispatch {
    type Output = PageResult;
    type IntoFuture = BoxFuture<'static, PageResult>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.outcome())
    }
}

/// A page request whose URL has been built
#[derive(Debug)]
pub struct PendingPage {
    url: String,
    transport: TransportSlot,
}

impl PendingPage {
    pub(crate) fn new(url: String, transport: TransportSlot) -> Self {
        Self { url, transport }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Perform the request.
    ///
    /// With no usable transport this resolves immediately with the slot's
    /// error. Network failures resolve to `XHR_ERROR` or `XHR_TIMEOUT`.
    pub async fn send(self) -> PageResult {
        let transport = match self.transport {
            TransportSlot::Available(transport) => transport,
            TransportSlot::Unavailable(kind) => {
                return Err(ErrorRecord::from_kind(METHOD_GET, &kind));
            }
        };

        transport.fetch_json(&self.url).await.map_err(|e| {
            let record = ErrorRecord::from_kind(METHOD_GET, &ErrorKind::from_error(&e));
            warn!("Request for {} failed: {}", self.url, record);
            record
        })
    }
}

impl IntoFuture for PendingPage {
    type Output = PageResult;
    type IntoFuture = BoxFuture<'static, PageResult>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.send())
    }
}

// ============================================================================
// Callbacks
// ============================================================================

type SuccessFn = Box<dyn FnOnce(JsonValue) + Send>;
type ErrorFn = Box<dyn FnOnce(ErrorRecord) + Send>;

enum ErrorSink {
    /// Errors are dropped
    Ignore,
    Callback(ErrorFn),
    /// Embedded widget: errors are dropped and requests carry tracking
    Widget,
}

/// Success/error callback pair for [`Client::dispatch`](super::Client::dispatch)
///
/// Exactly one of the two is invoked per request. Without an error callback,
/// errors are dropped.
pub struct Callbacks {
    on_success: SuccessFn,
    on_error: ErrorSink,
}

impl Callbacks {
    /// Callbacks with only a success handler
    pub fn new(on_success: impl FnOnce(JsonValue) + Send + 'static) -> Self {
        Self {
            on_success: Box::new(on_success),
            on_error: ErrorSink::Ignore,
        }
    }

    /// Callbacks for an embedded widget: tracking on, errors dropped
    pub fn for_widget(on_success: impl FnOnce(JsonValue) + Send + 'static) -> Self {
        Self {
            on_success: Box::new(on_success),
            on_error: ErrorSink::Widget,
        }
    }

    /// Add an error handler
    #[must_use]
    pub fn on_error(mut self, on_error: impl FnOnce(ErrorRecord) + Send + 'static) -> Self {
        self.on_error = ErrorSink::Callback(Box::new(on_error));
        self
    }

    /// Whether requests made with these callbacks carry widget tracking
    pub fn is_widget(&self) -> bool {
        matches!(self.on_error, ErrorSink::Widget)
    }

    pub(crate) fn complete(self, result: PageResult) {
        match result {
            Ok(value) => (self.on_success)(value),
            Err(record) => self.fail(record),
        }
    }

    pub(crate) fn fail(self, record: ErrorRecord) {
        match self.on_error {
            ErrorSink::Callback(on_error) => on_error(record),
            ErrorSink::Ignore | ErrorSink::Widget => {
                warn!("Dropping error with no handler: {}", record);
            }
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("has_error_handler", &matches!(self.on_error, ErrorSink::Callback(_)))
            .field("widget", &self.is_widget())
            .finish_non_exhaustive()
    }
}
