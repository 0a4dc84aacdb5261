//! Decoding many links at once, as submitted from a form or a JSON body.

use crate::decoder::{Decoder, DecodeError};
use crate::helpers::html_unescape;
use serde::{Deserialize, Serialize};

/// A list of rewritten URLs to decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeRequest {
    /// The rewritten URLs.
    pub urls: Vec<String>,
}

/// The results of a [`DecodeRequest`], index-aligned with its URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeResponse {
    /// The decoded URLs. Empty where decoding failed.
    pub results: Vec<String>,
    /// The error messages. Empty where decoding succeeded. Omitted from JSON when every URL
    /// decoded.
    #[serde(default, skip_serializing_if = "all_empty")]
    pub errors: Vec<String>,
}

impl DecodeResponse {
    /// Whether any URL failed to decode.
    pub fn has_errors(&self) -> bool {
        !all_empty(&self.errors)
    }

    /// Serializes the response to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn all_empty(errors: &[String]) -> bool {
    errors.iter().all(|error| error.is_empty())
}

/// The result of decoding one line of input.
#[derive(Debug)]
pub struct DecodeOutcome {
    /// The trimmed line as it was decoded.
    pub input: String,
    /// The decoded URL or why it could not be decoded.
    pub result: Result<String, DecodeError>,
}

impl Decoder {
    /// Decodes every URL of a request. Each URL is HTML-unescaped first. A failure is
    /// recorded at its index and does not affect the other URLs.
    pub fn decode_request(&self, request: &DecodeRequest) -> DecodeResponse {
        let mut response = DecodeResponse {
            results: Vec::with_capacity(request.urls.len()),
            errors: Vec::with_capacity(request.urls.len()),
        };

        for url in &request.urls {
            match self.decode(&html_unescape(url)) {
                Ok(decoded) => {
                    response.results.push(decoded);
                    response.errors.push(String::new());
                },
                Err(error) => {
                    log::debug!("Failed to decode {url:?}: {error}");
                    response.results.push(String::new());
                    response.errors.push(error.to_string());
                },
            }
        }

        response
    }

    /// Decodes each non-blank line of `text`. The whole text is HTML-unescaped first and each
    /// line is trimmed.
    pub fn decode_lines(&self, text: &str) -> Vec<DecodeOutcome> {
        html_unescape(text)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| DecodeOutcome {
                input: line.to_string(),
                result: self.decode(line),
            })
            .collect()
    }
}
