//! Bounded page fetch.
//!
//! Uses the curl crate (libcurl) to issue a single GET with a whole-transfer
//! timeout, reject error statuses, and push at most `max_body_bytes` of the
//! body into a [`BodySink`] as it arrives. Nothing is buffered here.

mod handler;

use std::time::Duration;

use crate::error::OgxError;
use crate::url_model::TargetUrl;

use handler::{Abort, PageHandler};

/// Default whole-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Body cap; OpenGraph tags live in `<head>`, near the start of the document.
pub const DEFAULT_MAX_BODY_BYTES: u64 = 2 << 20;

/// Redirect hops curl will follow before giving up.
const MAX_REDIRECTS: u32 = 10;

/// `User-Agent` sent with every request.
pub fn default_user_agent() -> String {
    format!("ogx/{}", env!("CARGO_PKG_VERSION"))
}

/// Whether the sink wants more bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkFlow {
    Continue,
    Stop,
}

/// Consumer of the response body, fed one chunk at a time in arrival order.
pub trait BodySink {
    /// Receives the next chunk. Returning [`SinkFlow::Stop`] ends the transfer
    /// without error.
    fn write(&mut self, chunk: &[u8]) -> SinkFlow;
}

/// Request parameters for [`fetch`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub max_body_bytes: u64,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            user_agent: default_user_agent(),
        }
    }
}

/// Facts about a finished transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSummary {
    pub status: u32,
    /// Body bytes delivered to the sink.
    pub bytes: u64,
    /// True if body bytes past the cap were discarded.
    pub truncated: bool,
}

/// Performs the GET and streams the capped body into `sink`.
///
/// Follows redirects. Runs in the current thread and blocks until the
/// transfer ends, the cap is reached, the sink stops, or the timeout fires.
/// The curl handle, and with it the connection, is released before returning
/// on every path.
pub fn fetch<S: BodySink>(
    url: &TargetUrl,
    opts: &FetchOptions,
    sink: &mut S,
) -> Result<FetchSummary, OgxError> {
    let mut easy = curl::easy::Easy2::new(PageHandler::new(sink, opts.max_body_bytes));
    easy.url(url.as_str()).map_err(OgxError::network)?;
    easy.get(true).map_err(OgxError::network)?;
    easy.useragent(&opts.user_agent)
        .map_err(OgxError::network)?;
    easy.follow_location(true).map_err(OgxError::network)?;
    easy.max_redirections(MAX_REDIRECTS)
        .map_err(OgxError::network)?;
    // Covers connect, headers and body, not just connection setup.
    easy.timeout(opts.timeout).map_err(OgxError::network)?;

    tracing::debug!(url = %url, timeout = ?opts.timeout, "GET");

    if let Err(e) = easy.perform() {
        // A write abort is ours (status reject, cap, or sink stop); anything else is transport.
        if !(e.is_write_error() && easy.get_ref().abort.is_some()) {
            return Err(OgxError::network(e));
        }
    }

    let code = easy.response_code().map_err(OgxError::network)?;
    let handler = easy.get_ref();
    let status_ok = (200..400).contains(&code);
    if !status_ok || handler.abort == Some(Abort::Status) {
        let reason = handler
            .status
            .as_ref()
            .filter(|(c, _)| *c == code)
            .map(|(_, r)| r.clone())
            .unwrap_or_default();
        tracing::debug!(code, "rejected response status");
        return Err(OgxError::HttpStatus { code, reason });
    }

    let truncated = handler.abort == Some(Abort::Capped);
    let bytes = handler.delivered;

    tracing::debug!(code, bytes, truncated, "fetched body");
    Ok(FetchSummary {
        status: code,
        bytes,
        truncated,
    })
}
