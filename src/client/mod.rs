//! Client module
//!
//! The public entry point. A [`Client`] owns the configuration, the query
//! cache, and the transport, and turns each call into a page request:
//!
//! 1. normalize the call shape into a canonical options record
//! 2. validate it, rejecting the call without touching the network
//! 3. fetch the query's cursor from the cache, creating it on first use
//! 4. apply any `page` / `perPage` override to that cursor
//! 5. build the page URL (advancing the cursor) and hand it to the transport
//!
//! Asking for the same query again continues with the next page.

mod dispatch;

pub use dispatch::{Callbacks, Dispatch, PageResult, PendingPage, METHOD_GET};

use crate::config::ClientConfig;
use crate::http::{HttpTransport, HttpTransportConfig, Transport, TransportSlot};
use crate::pagination::QueryCache;
use crate::query::{validate, CallShape};
use crate::report::{ErrorKind, ErrorRecord};
use std::sync::Arc;
use tracing::{debug, warn};

/// urturn API client
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
    cache: QueryCache,
    transport: TransportSlot,
}

impl Client {
    /// Create a client that talks HTTP through reqwest.
    ///
    /// If the HTTP stack cannot be constructed the client is still returned;
    /// every request then fails with `XHR_IE_FAIL`.
    pub fn new(config: ClientConfig) -> Self {
        let transport = match HttpTransport::with_config(HttpTransportConfig::from(&config)) {
            Ok(transport) => TransportSlot::available(Arc::new(transport)),
            Err(e) => {
                warn!("HTTP transport unavailable: {}", e);
                TransportSlot::Unavailable(ErrorKind::from_error(&e))
            }
        };
        Self::with_parts(config, QueryCache::new(), transport)
    }

    /// Create a client using the given transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self::with_parts(config, QueryCache::new(), TransportSlot::available(transport))
    }

    /// Create a client with no transport; every request fails with `NO_XHR`
    pub fn without_transport(config: ClientConfig) -> Self {
        Self::with_parts(config, QueryCache::new(), TransportSlot::none())
    }

    /// Create a client from explicit parts
    pub fn with_parts(config: ClientConfig, cache: QueryCache, transport: TransportSlot) -> Self {
        Self {
            config,
            cache,
            transport,
        }
    }

    /// Replace the query cache, e.g. to share cursors between clients
    #[must_use]
    pub fn with_cache(mut self, cache: QueryCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Configured API host
    pub fn host(&self) -> &str {
        &self.config.host
    }

    /// Request the next page of a query
    pub fn get(&self, call: impl Into<CallShape>) -> Dispatch {
        self.submit(call.into(), false)
    }

    /// Request the next page of a query on behalf of an embedded widget.
    ///
    /// Adds `track=1` and the configured `page_href` to the request.
    pub fn get_for_widget(&self, call: impl Into<CallShape>) -> Dispatch {
        self.submit(call.into(), true)
    }

    /// Request the next page and report through callbacks.
    ///
    /// Returns `true` when the call was rejected by validation (the error
    /// callback has already run), `false` once the request is on its way.
    /// The request runs on the current tokio runtime; outside of one, the
    /// error callback receives `NO_XHR`.
    pub fn dispatch(&self, call: impl Into<CallShape>, callbacks: Callbacks) -> bool {
        let page = match self.submit(call.into(), callbacks.is_widget()) {
            Dispatch::Rejected(record) => {
                callbacks.fail(record);
                return true;
            }
            Dispatch::Pending(page) => page,
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    let result = page.send().await;
                    callbacks.complete(result);
                });
            }
            Err(e) => {
                warn!("No async runtime to send {}: {}", page.url(), e);
                callbacks.fail(ErrorRecord::from_kind(METHOD_GET, &ErrorKind::NoTransport));
            }
        }
        false
    }

    fn submit(&self, call: CallShape, widget: bool) -> Dispatch {
        let raw = call.normalize();
        let options = match validate(&raw) {
            Ok(options) => options,
            Err(kind) => {
                let record = ErrorRecord::from_kind(METHOD_GET, &kind);
                warn!("Rejected request: {}", record);
                return Dispatch::Rejected(record);
            }
        };

        let cursor = self.cache.get(&options);

        let href = if widget {
            Some(self.config.page_href.as_deref().unwrap_or_default())
        } else {
            None
        };
        let url = cursor.request_url(&options, &self.config.endpoint_root(), href);
        debug!("Dispatching {} for {}", url, options.signature());

        Dispatch::Pending(PendingPage::new(url, self.transport.clone()))
    }
}
