//! Streaming OpenGraph extraction using `lol_html`.
//!
//! The extractor is a [`BodySink`]: every body chunk goes straight into a
//! streaming rewriter with a single `meta` element handler, so no DOM is
//! built and the document is never held in full. Matching pairs are appended
//! to a [`TagMap`] as their closing `>` is parsed.

use std::cell::RefCell;
use std::io::{ErrorKind, Read};
use std::rc::Rc;

use html_escape::decode_html_entities;
use lol_html::{element, HtmlRewriter, OutputSink, Settings};

use crate::fetch::{BodySink, SinkFlow};
use crate::tags::{TagMap, TagPair, OG_PREFIX};

const READ_BUF_SIZE: usize = 8 * 1024;

/// Incremental `og:*` extractor fed one chunk at a time.
pub struct TagExtractor {
    /// `None` once the rewriter failed; later chunks are ignored.
    rewriter: Option<HtmlRewriter<'static, NoopSink>>,
    tags: Rc<RefCell<TagMap>>,
}

impl TagExtractor {
    pub fn new() -> Self {
        let tags = Rc::new(RefCell::new(TagMap::new()));
        let handler_tags = Rc::clone(&tags);

        let meta_handler = element!("meta", move |el| {
            let attrs = el
                .attributes()
                .iter()
                .map(|attr| (attr.name(), attr.value()));
            if let Some(pair) = meta_pair(attrs) {
                handler_tags.borrow_mut().push_pair(pair);
            }
            Ok(())
        });

        let rewriter = HtmlRewriter::new(
            Settings {
                element_content_handlers: vec![meta_handler],
                // Ambiguous markup should not end the scan early.
                strict: false,
                ..Settings::default()
            },
            NoopSink,
        );

        Self {
            rewriter: Some(rewriter),
            tags,
        }
    }

    /// Flushes the tokenizer and returns everything extracted so far.
    ///
    /// A tokenizer error at end of input only ends emission.
    pub fn finish(self) -> TagMap {
        let TagExtractor { rewriter, tags } = self;
        if let Some(rewriter) = rewriter {
            if let Err(e) = rewriter.end() {
                tracing::debug!("html tokenizer stopped at end of input: {}", e);
            }
        }
        // The rewriter (and its handler's clone) is gone, so this is the last reference.
        Rc::try_unwrap(tags)
            .map(RefCell::into_inner)
            .unwrap_or_else(|shared| shared.borrow().clone())
    }
}

impl Default for TagExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl BodySink for TagExtractor {
    fn write(&mut self, chunk: &[u8]) -> SinkFlow {
        let Some(rewriter) = self.rewriter.as_mut() else {
            return SinkFlow::Stop;
        };
        match rewriter.write(chunk) {
            Ok(()) => SinkFlow::Continue,
            Err(e) => {
                // Keep what was extracted; the rest of the document is skipped.
                tracing::debug!("html tokenizer stopped: {}", e);
                self.rewriter = None;
                SinkFlow::Stop
            }
        }
    }
}

/// Extracts tags from an in-memory document.
pub fn extract_from_bytes(html: &[u8]) -> TagMap {
    let mut extractor = TagExtractor::new();
    extractor.write(html);
    extractor.finish()
}

/// Extracts tags from at most `max_bytes` of `reader`.
///
/// A read error ends the scan like end of input does.
pub fn extract_from_reader<R: Read>(reader: R, max_bytes: u64) -> TagMap {
    let mut reader = reader.take(max_bytes);
    let mut extractor = TagExtractor::new();
    let mut buf = [0u8; READ_BUF_SIZE];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::debug!("read stopped: {}", e);
                break;
            }
        };
        if extractor.write(&buf[..n]) == SinkFlow::Stop {
            break;
        }
    }
    extractor.finish()
}

/// Builds a pair from a `meta` element's attributes, given in source order.
///
/// The key comes from the first non-empty `property` or `name` attribute; the
/// value from the last `content` attribute. Returns `None` unless the key has
/// the `og:` prefix and the value is non-empty.
fn meta_pair<I>(attrs: I) -> Option<TagPair>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut key = String::new();
    let mut content = String::new();

    for (name, value) in attrs {
        if name.eq_ignore_ascii_case("property") || name.eq_ignore_ascii_case("name") {
            if key.is_empty() {
                key = decode_html_entities(&value).trim().to_lowercase();
            }
        } else if name.eq_ignore_ascii_case("content") {
            content = decode_html_entities(&value).trim().to_string();
        }
    }

    if key.is_empty() || content.is_empty() || !key.starts_with(OG_PREFIX) {
        return None;
    }
    Some(TagPair {
        key,
        value: content,
    })
}

/// Output sink that discards the rewritten document.
struct NoopSink;

impl OutputSink for NoopSink {
    fn handle_chunk(&mut self, _: &[u8]) {}
}
