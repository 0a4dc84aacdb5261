use super::DecodeError;
use super::helpers::unescape_fragment;
use crate::enums::Version;
use lazy_regex::regex_captures;

/// Decodes a v1 link: the target is query-escaped between `u=` and `&k=`.
pub fn decode(rewritten_url: &str) -> Result<String, DecodeError> {
    let (_, escaped) = regex_captures!(r#"u=(.+?)&k="#, rewritten_url)
        .ok_or(DecodeError::Structural(Version::V1))?;
    
    unescape_fragment(escaped)
}
