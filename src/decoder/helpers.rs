use super::DecodeError;
use crate::helpers::{html_unescape, query_unescape};

/// Query-unescapes a captured v1/v2 fragment, then unescapes its HTML entities.
pub fn unescape_fragment(fragment: &str) -> Result<String, DecodeError> {
    let bytes = query_unescape(fragment)?;
    let unescaped = String::from_utf8(bytes)?;
    
    Ok(html_unescape(&unescaped).into_owned())
}
