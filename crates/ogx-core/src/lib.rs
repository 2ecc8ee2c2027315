pub mod config;
pub mod error;
pub mod logging;

// Pipeline stages, leaf-first.
pub mod url_model;
pub mod fetch;
pub mod extract;
pub mod tags;
pub mod report;

use crate::error::OgxError;
use crate::extract::TagExtractor;
use crate::fetch::FetchOptions;
use crate::tags::TagMap;
use crate::url_model::TargetUrl;

/// The inspected URL and the tags found on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    pub url: TargetUrl,
    pub tags: TagMap,
}

/// Normalizes `raw`, fetches the page, and extracts its `og:*` tags.
///
/// One request, no retries. Tokenizer trouble only shortens the result;
/// every returned error is terminal.
pub fn inspect(raw: &str, opts: &FetchOptions) -> Result<Inspection, OgxError> {
    let url = url_model::normalize_url(raw)?;
    tracing::info!(url = %url, "inspecting");

    let mut extractor = TagExtractor::new();
    let summary = fetch::fetch(&url, opts, &mut extractor)?;
    if summary.truncated {
        tracing::info!(
            limit = opts.max_body_bytes,
            "body exceeded the size cap; remainder ignored"
        );
    }

    let tags = extractor.finish();
    tracing::info!(
        status = summary.status,
        bytes = summary.bytes,
        keys = tags.len(),
        values = tags.value_count(),
        "extraction finished"
    );

    Ok(Inspection { url, tags })
}
