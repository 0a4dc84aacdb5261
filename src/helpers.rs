use std::borrow::Cow;
use base64::{alphabet, Engine as _};
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};

/// URL-safe, padded, and tolerant of non-zero bits left over in the last symbol.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Represents a malformed percent-escape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid URL escape {:?}", .0)]
pub struct EscapeError(pub String);

/// Reverses query-string escaping: `%XX` becomes the byte `0xXX` and `+` becomes a space.
///
/// Returns the raw bytes, which are not guaranteed to be valid UTF-8. Fails if a `%` is not
/// followed by two hex digits.
pub fn query_unescape(input: &str) -> Result<Vec<u8>, EscapeError> {
    fn from_hex(b: u8) -> Option<u8> {
        match b {
            b'0'..=b'9' => Some(b - b'0'),
            b'A'..=b'F' => Some(b - b'A' + 10),
            b'a'..=b'f' => Some(b - b'a' + 10),
            _ => None,
        }
    }

    let bytes = input.as_bytes();
    let mut output = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while let Some(&b) = bytes.get(i) {
        match b {
            b'%' => {
                let hi = bytes.get(i + 1).copied().and_then(from_hex);
                let lo = bytes.get(i + 2).copied().and_then(from_hex);

                if let (Some(hi), Some(lo)) = (hi, lo) {
                    output.push(hi * 16 + lo);
                    i += 3;
                } else {
                    // report at most the escape itself
                    let end = (i + 3).min(bytes.len());
                    let escape = String::from_utf8_lossy(&bytes[i..end]).into_owned();

                    return Err(EscapeError(escape));
                }
            },
            b'+' => {
                output.push(b' ');
                i += 1;
            },
            b => {
                output.push(b);
                i += 1;
            },
        }
    }

    Ok(output)
}

/// Unescapes HTML entities such as `&amp;` and `&#39;`. A named entity missing its `;` is left
/// as-is.
pub fn html_unescape(input: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(input)
}

/// Pads a URL-safe base64 string with `=` to a multiple of 4 and decodes it.
pub fn decode_base64_url(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let trimmed = input.trim_end_matches('=');
    let mut padded = String::with_capacity(trimmed.len() + 3);

    padded.push_str(trimmed);

    while padded.len() % 4 != 0 {
        padded.push('=');
    }

    URL_SAFE_LENIENT.decode(padded)
}
