use super::DecodeError;
use super::helpers::unescape_fragment;
use crate::enums::Version;
use lazy_regex::regex_captures;

/// Decodes a v2 link. The target sits between `u=` and `&d=` (or `&c=`), query-escaped with
/// every `%` written as `-` and every `/` written as `_`.
pub fn decode(rewritten_url: &str) -> Result<String, DecodeError> {
    let (_, substituted) = regex_captures!(r#"u=(.+?)&[dc]="#, rewritten_url)
        .ok_or(DecodeError::Structural(Version::V2))?;
    // must be undone before unescaping
    let escaped = substituted
        .chars()
        .map(|ch| match ch {
            '-' => '%',
            '_' => '/',
            ch => ch,
        })
        .collect::<String>();
    
    unescape_fragment(&escaped)
}
