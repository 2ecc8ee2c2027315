//! Report rendering: plain text or pretty-printed JSON.

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;

use crate::error::OgxError;
use crate::Inspection;

/// Line printed in text mode when the page had no OpenGraph tags.
pub const NO_TAGS_NOTICE: &str = "No OpenGraph tags found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// JSON shape: keys of `tags` serialize in ascending order.
#[derive(Serialize)]
struct JsonReport<'a> {
    url: &'a str,
    tags: BTreeMap<&'a str, &'a [String]>,
}

/// Writes the report for `inspection` in the chosen format.
pub fn render<W: Write>(
    out: &mut W,
    inspection: &Inspection,
    format: OutputFormat,
) -> Result<(), OgxError> {
    match format {
        OutputFormat::Text => write_text(out, inspection),
        OutputFormat::Json => write_json(out, inspection),
    }
}

/// `URL: <url>`, a blank line, then `key: value` lines sorted by key.
pub fn write_text<W: Write>(out: &mut W, inspection: &Inspection) -> Result<(), OgxError> {
    writeln!(out, "URL: {}", inspection.url)?;
    writeln!(out)?;
    if inspection.tags.is_empty() {
        writeln!(out, "{}", NO_TAGS_NOTICE)?;
    }
    for (key, values) in inspection.tags.sorted() {
        for value in values {
            writeln!(out, "{}: {}", key, value)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Pretty JSON with 2-space indentation and a trailing newline.
///
/// `serde_json` never HTML-escapes, so decoded values such as `&` stay as-is.
pub fn write_json<W: Write>(out: &mut W, inspection: &Inspection) -> Result<(), OgxError> {
    let report = JsonReport {
        url: inspection.url.as_str(),
        tags: inspection.tags.iter().collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &report).map_err(std::io::Error::from)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
