//! Easy2 Handler for the page GET.
//! Tracks the status of the last response, enforces the body cap, and forwards
//! accepted bytes to the sink.

use std::str;

use super::{BodySink, SinkFlow};

/// Why the handler stopped accepting body bytes before curl finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Abort {
    /// Final status outside the accepted range; nothing reached the sink.
    Status,
    /// Byte cap reached; remaining body discarded.
    Capped,
    /// The sink asked to stop.
    SinkDone,
}

/// Handler state for one page transfer. Implements curl's Handler for Easy2.
pub struct PageHandler<'a, S> {
    pub(super) sink: &'a mut S,
    pub(super) max_bytes: u64,
    pub(super) delivered: u64,
    /// Code and reason phrase from the most recent `HTTP/` status line.
    pub(super) status: Option<(u32, String)>,
    pub(super) abort: Option<Abort>,
}

impl<'a, S: BodySink> PageHandler<'a, S> {
    pub(super) fn new(sink: &'a mut S, max_bytes: u64) -> Self {
        Self {
            sink,
            max_bytes,
            delivered: 0,
            status: None,
            abort: None,
        }
    }

    fn status_accepted(&self) -> bool {
        match self.status {
            Some((code, _)) => (200..400).contains(&code),
            // No status line seen (e.g. non-HTTP scheme); let curl's code decide later.
            None => true,
        }
    }
}

impl<S: BodySink> curl::easy::Handler for PageHandler<'_, S> {
    fn header(&mut self, data: &[u8]) -> bool {
        if let Ok(line) = str::from_utf8(data) {
            // Each redirect hop starts a new header block with its own status line.
            if let Some(status) = parse_status_line(line.trim_end()) {
                self.status = Some(status);
            }
        }
        true
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, curl::easy::WriteError> {
        if self.abort.is_some() {
            return Ok(0);
        }
        if !self.status_accepted() {
            self.abort = Some(Abort::Status);
            return Ok(0);
        }

        let remaining = self.max_bytes.saturating_sub(self.delivered);
        let take = (data.len() as u64).min(remaining) as usize;
        if take > 0 {
            self.delivered += take as u64;
            if self.sink.write(&data[..take]) == SinkFlow::Stop {
                self.abort = Some(Abort::SinkDone);
                return Ok(0);
            }
        }

        if take < data.len() {
            self.abort = Some(Abort::Capped);
            return Ok(0);
        }
        Ok(data.len())
    }
}

/// Parses `HTTP/1.1 404 Not Found` (or `HTTP/2 200`) into code and reason.
pub(super) fn parse_status_line(line: &str) -> Option<(u32, String)> {
    let rest = line.strip_prefix("HTTP/")?;
    let mut parts = rest.splitn(3, ' ');
    let _version = parts.next()?;
    let code = parts.next()?.trim().parse::<u32>().ok()?;
    let reason = parts.next().unwrap_or("").trim().to_string();
    Some((code, reason))
}
