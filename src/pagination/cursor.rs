//! Query cursor
//!
//! A cursor is the pagination state of one distinct query. Every call to
//! [`QueryCursor::next_url`] yields the URL of the current page and moves the
//! cursor to the following one, so repeated requests walk the result set.

use crate::query::{QueryOptions, QuerySelector, QueryType};
use crate::types::{format_number, truncate_i32};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// First page of every new cursor
pub const DEFAULT_PAGE: u64 = 1;

/// Page size of every new cursor
pub const DEFAULT_PAGE_SIZE: f64 = 50.0;

/// Characters escaped in query string components.
///
/// Everything except ASCII alphanumerics and `- _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a query string component
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// Pagination state of one query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryCursor {
    query_type: QueryType,
    query_selector: QuerySelector,
    query: String,
    /// Page the next request will ask for
    page: u64,
    /// Unvalidated; see [`QueryCursor::set_page_size`]
    page_size: f64,
}

impl QueryCursor {
    /// Create a cursor on the first page with the default page size
    pub fn new(options: &QueryOptions) -> Self {
        Self {
            query_type: options.query_type,
            query_selector: options.query_selector,
            query: options.query.clone(),
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn query_type(&self) -> QueryType {
        self.query_type
    }

    pub fn query_selector(&self) -> QuerySelector {
        self.query_selector
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Page the next request will ask for
    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> f64 {
        self.page_size
    }

    /// Build the URL for the current page and advance to the next one.
    ///
    /// `endpoint_root` is the protocol-relative API root, e.g.
    /// `//www.urturn.com/api/`. With `tracking_href` set, widget tracking
    /// parameters are appended.
    pub fn next_url(&mut self, endpoint_root: &str, tracking_href: Option<&str>) -> String {
        let resource = self.query_type.resource();
        let field = match resource.field_for(self.query_selector) {
            Some(field) => field,
            None => {
                warn!(
                    "Selector '{}' is not defined for '{}', using it as the field name",
                    self.query_selector, self.query_type
                );
                self.query_selector.as_str()
            }
        };

        let mut url = format!(
            "{endpoint_root}{}.json?{field}={}&page={}&per_page={}",
            resource.name,
            encode_component(&self.query),
            self.page,
            format_number(self.page_size)
        );
        self.page += 1;

        if let Some(href) = tracking_href {
            url.push_str("&track=1&href=");
            url.push_str(&encode_component(href));
        }

        debug!("Built request URL: {}", url);
        url
    }

    /// Jump to a page.
    ///
    /// The value is truncated to an integer; anything not strictly positive
    /// afterwards is ignored.
    pub fn set_page(&mut self, page: f64) {
        let page = truncate_i32(page);
        if page > 0 {
            self.page = page as u64;
        }
    }

    /// Overwrite the page size. Not validated: a non-finite or fractional
    /// size is sent as-is.
    pub fn set_page_size(&mut self, page_size: f64) {
        self.page_size = page_size;
    }
}

/// Shared handle to a cursor owned by a [`QueryCache`](super::QueryCache)
#[derive(Debug, Clone)]
pub struct CursorHandle(Arc<Mutex<QueryCursor>>);

impl CursorHandle {
    pub(crate) fn new(cursor: QueryCursor) -> Self {
        Self(Arc::new(Mutex::new(cursor)))
    }

    fn lock(&self) -> MutexGuard<'_, QueryCursor> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether both handles point at the same cursor
    pub fn same_cursor(&self, other: &CursorHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// See [`QueryCursor::next_url`]
    pub fn next_url(&self, endpoint_root: &str, tracking_href: Option<&str>) -> String {
        self.lock().next_url(endpoint_root, tracking_href)
    }

    /// Apply the page overrides in `options`, then build the URL for the
    /// current page and advance.
    ///
    /// Everything happens under one lock, so a concurrent request on the same
    /// query cannot take the page another caller just jumped to.
    pub fn request_url(
        &self,
        options: &QueryOptions,
        endpoint_root: &str,
        tracking_href: Option<&str>,
    ) -> String {
        let mut cursor = self.lock();
        if let Some(page) = options.page {
            cursor.set_page(page);
        }
        if let Some(per_page) = options.per_page {
            cursor.set_page_size(per_page);
        }
        cursor.next_url(endpoint_root, tracking_href)
    }

    pub fn page(&self) -> u64 {
        self.lock().page()
    }

    pub fn page_size(&self) -> f64 {
        self.lock().page_size()
    }
}
