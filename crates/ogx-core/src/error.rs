//! Error kinds for the inspection pipeline.
//!
//! Every variant is terminal: nothing in the pipeline retries. Tokenizer
//! failures are not represented here because they only end tag emission.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OgxError {
    /// Empty or unparsable URL; the message echoes the offending input.
    #[error("{0}")]
    InvalidInput(String),

    /// Connection, DNS, TLS or timeout failure reported by curl.
    #[error("request failed: {0}")]
    Network(String),

    /// Final response status outside `[200, 400)`.
    #[error("unexpected HTTP status: {}", format_status(.code, .reason))]
    HttpStatus { code: u32, reason: String },

    /// Writing the rendered report failed.
    #[error("write output: {0}")]
    Output(#[from] std::io::Error),
}

impl OgxError {
    pub(crate) fn network(err: curl::Error) -> Self {
        OgxError::Network(err.to_string())
    }
}

fn format_status(code: &u32, reason: &str) -> String {
    if reason.is_empty() {
        code.to_string()
    } else {
        format!("{} {}", code, reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_with_reason() {
        let err = OgxError::HttpStatus {
            code: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "unexpected HTTP status: 404 Not Found");
    }

    #[test]
    fn http_status_without_reason() {
        // HTTP/2 responses carry no reason phrase.
        let err = OgxError::HttpStatus {
            code: 500,
            reason: String::new(),
        };
        assert_eq!(err.to_string(), "unexpected HTTP status: 500");
    }

    #[test]
    fn invalid_input_is_verbatim() {
        let err = OgxError::InvalidInput("url cannot be empty".to_string());
        assert_eq!(err.to_string(), "url cannot be empty");
    }
}
