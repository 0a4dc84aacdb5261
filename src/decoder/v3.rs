use super::DecodeError;
use super::substitute::TokenSubstitutor;
use crate::enums::Version;
use crate::helpers::{decode_base64_url, query_unescape};
use std::borrow::Cow;
use lazy_regex::regex_captures;

/// Decodes a v3 link of the form `v3/__<skeleton>__;<base64>!`.
///
/// The skeleton is the query-escaped target with some characters replaced by `*` and `**<c>`
/// tokens. The replaced bytes are carried, in order, in the URL-safe base64 run.
pub fn decode(rewritten_url: &str, strict: bool) -> Result<String, DecodeError> {
    let (_, skeleton, encoded_bytes) = regex_captures!(r#"v3/__(.+?)__;(.*?)!"#, rewritten_url)
        .ok_or(DecodeError::Structural(Version::V3))?;
    let skeleton = repair_single_slash(skeleton);
    let encoded_url = query_unescape(&skeleton)?;
    let buffer = decode_base64_url(encoded_bytes)?;
    let substitution = TokenSubstitutor::new(&encoded_url, &buffer)
        .strict(strict)
        .run()?;
    
    if substitution.cursor < buffer.len() {
        log::debug!(
            "{} encoded byte(s) left unused",
            buffer.len() - substitution.cursor,
        );
    }
    
    let decoded = String::from_utf8(substitution.output)?;
    
    Ok(decoded)
}

/// Restores `scheme://` where the skeleton shortened it to `scheme:/`.
fn repair_single_slash(skeleton: &str) -> Cow<'_, str> {
    if let Some((_, scheme, _)) = regex_captures!(r#"(?i)^([a-z0-9+.-]+:/)([^/].+)"#, skeleton) {
        let rest = &skeleton[scheme.len()..];
        
        return Cow::Owned(format!("{scheme}/{rest}"));
    }
    
    Cow::Borrowed(skeleton)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::ErrorKind;
    
    fn decode_lenient(rewritten_url: &str) -> Result<String, DecodeError> {
        decode(rewritten_url, false)
    }
    
    #[test]
    fn decodes_target_without_tokens() {
        let rewritten_url = "https://urldefense.com/v3/__https://www.example.com/path?a=1&b=2__;!!ABCdef!ghIJ$";
        
        assert_eq!(decode_lenient(rewritten_url).unwrap(), "https://www.example.com/path?a=1&b=2");
    }
    
    #[test]
    fn substitutes_single_star() {
        let rewritten_url = "https://urldefense.com/v3/__https://example.com/search?q=a*b__;Kw!!G3vK!abc$";
        
        assert_eq!(decode_lenient(rewritten_url).unwrap(), "https://example.com/search?q=a+b");
    }
    
    #[test]
    fn substitutes_run_token() {
        // B = 3 bytes
        let rewritten_url = "https://urldefense.com/v3/__https://example.com/?q=**B&next=1__;ISQn!!G3vK$";
        
        assert_eq!(decode_lenient(rewritten_url).unwrap(), "https://example.com/?q=!$'&next=1");
    }
    
    #[test]
    fn splices_multibyte_characters_bytewise() {
        let rewritten_url = "https://urldefense.com/v3/__https://example.com/caf**A?tag=*__;w6kq!!G3vK$";
        let buffer = b"\xc3\xa9*";
        
        assert_eq!(decode_base64_url("w6kq").unwrap(), buffer);
        assert_eq!(decode_lenient(rewritten_url).unwrap(), "https://example.com/café?tag=*");
    }
    
    #[test]
    fn splices_mixed_tokens_in_order() {
        let rewritten_url = "https://urldefense.com/v3/__https://example.com/*caf**A__;K8Op!!G3vK$";
        
        assert_eq!(decode_lenient(rewritten_url).unwrap(), "https://example.com/+café");
    }
    
    #[test]
    fn unescapes_skeleton_before_substituting() {
        let rewritten_url = "https://urldefense.com/v3/__https://example.com/a%20b*__;QA!!G3vK$";
        
        assert_eq!(decode_lenient(rewritten_url).unwrap(), "https://example.com/a b@");
    }
    
    #[test]
    fn accepts_base64_with_trailing_bits() {
        let rewritten_url = "https://urldefense.com/v3/__https://x.test/*__;Kx!!G3vK$";
        
        assert_eq!(decode_lenient(rewritten_url).unwrap(), "https://x.test/+");
    }
    
    #[test]
    fn invalid_utf8_is_encoding_error() {
        // the single byte 0xFF
        let error = decode_lenient("https://urldefense.com/v3/__https://x.test/*__;_w!!G3vK$").unwrap_err();
        
        assert!(matches!(error, DecodeError::UTF8(_)));
        assert_eq!(error.kind(), ErrorKind::Encoding);
    }
    
    #[test]
    fn repairs_single_slash_scheme() {
        let rewritten_url = "https://urldefense.com/v3/__http:/example.com/page__;!!G3vK$";
        
        assert_eq!(decode_lenient(rewritten_url).unwrap(), "http://example.com/page");
        assert_eq!(repair_single_slash("HTTPS:/a.test"), "HTTPS://a.test");
        assert_eq!(repair_single_slash("https://a.test"), "https://a.test");
        assert_eq!(repair_single_slash("mailto:user"), "mailto:user");
        assert_eq!(repair_single_slash("x:/a"), "x:/a");
    }
    
    #[test]
    fn missing_body_is_structural() {
        for rewritten_url in [
            "https://urldefense.com/v3/https://example.com",
            "https://urldefense.com/v3/__https://example.com__",
            "https://urldefense.com/v3/__https://example.com__;Kw",
        ] {
            let error = decode_lenient(rewritten_url).unwrap_err();
            
            assert!(matches!(error, DecodeError::Structural(Version::V3)), "{rewritten_url}");
        }
    }
    
    #[test]
    fn bad_base64_is_encoding_error() {
        let error = decode_lenient("https://urldefense.com/v3/__https://x.test/*__;A!!G3vK$").unwrap_err();
        
        assert!(matches!(error, DecodeError::Base64(_)));
        assert_eq!(error.kind(), ErrorKind::Encoding);
        
        let error = decode_lenient("https://urldefense.com/v3/__https://x.test/*__;K$g!!G3vK$").unwrap_err();
        
        assert!(matches!(error, DecodeError::Base64(_)));
    }
    
    #[test]
    fn bad_skeleton_escape_is_encoding_error() {
        let error = decode_lenient("https://urldefense.com/v3/__https://x.test/%zz__;!!G3vK$").unwrap_err();
        
        assert!(matches!(error, DecodeError::InvalidEscape(_)));
    }
    
    #[test]
    fn exhausted_buffer_is_truncated_buffer() {
        let error = decode_lenient("https://urldefense.com/v3/__https://x.test/**__;Kw!!G3vK$").unwrap_err();
        
        assert!(matches!(error, DecodeError::TruncatedBuffer { cursor: 1, requested: 1, available: 0 }));
        assert_eq!(error.kind(), ErrorKind::TruncatedBuffer);
    }
    
    #[test]
    fn short_run_depends_on_strictness() {
        // C = 4, but only two bytes are encoded
        let rewritten_url = "https://urldefense.com/v3/__https://x.test/**C__;YWI!!G3vK$";
        
        assert_eq!(decode_lenient(rewritten_url).unwrap(), "https://x.test/ab");
        
        let error = decode(rewritten_url, true).unwrap_err();
        
        assert!(matches!(error, DecodeError::TruncatedBuffer { requested: 4, available: 2, .. }));
    }
    
    #[test]
    fn unknown_run_character_depends_on_strictness() {
        // legacy quirk: lenient decoding drops the token
        let rewritten_url = "https://urldefense.com/v3/__https://x.test/a**.b__;!!G3vK$";
        
        assert_eq!(decode_lenient(rewritten_url).unwrap(), "https://x.test/ab");
        
        let error = decode(rewritten_url, true).unwrap_err();
        
        assert!(matches!(error, DecodeError::UnknownRunCharacter('.')));
    }
}
