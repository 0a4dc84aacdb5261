mod error;
mod builder;
mod helpers;
mod substitute;
mod v1;
mod v2;
mod v3;

pub use error::{DecodeError, ErrorKind};
pub use builder::DecoderBuilder;
pub use substitute::{TokenSubstitutor, Substitution, State};

use crate::enums::Version;

/// Decodes links rewritten by URL Defense back to their original targets.
/// 
/// A [`Decoder`] holds no per-call state. The patterns and run mapping it uses are shared 
/// statics, so one decoder can be used from any number of threads at once.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    strict: bool,
}

impl Decoder {
    /// Creates a new lenient [`Decoder`].
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Creates a new [`DecoderBuilder`].
    pub fn builder() -> DecoderBuilder {
        DecoderBuilder::new()
    }
    
    /// Whether this decoder is strict. See [`DecoderBuilder::strict`].
    pub fn is_strict(&self) -> bool {
        self.strict
    }
    
    /// Decodes a rewritten URL, detecting its version from its prefix.
    /// 
    /// The input should already be free of HTML entities; only the captured target of v1 and 
    /// v2 links is HTML-unescaped. A target whose recovered bytes are not valid UTF-8 fails with 
    /// [`DecodeError::UTF8`].
    /// 
    /// # Examples
    /// ```
    /// use url_defense_decoder::Decoder;
    /// 
    /// let decoder = Decoder::new();
    /// let decoded = decoder.decode("https://urldefense.proofpoint.com/v2/url?u=http-3A__example.com&d=DwMFAg").unwrap();
    /// 
    /// assert_eq!(decoded, "http://example.com");
    /// ```
    pub fn decode(&self, rewritten_url: &str) -> Result<String, DecodeError> {
        let version = Version::detect(rewritten_url)
            .ok_or(DecodeError::UnrecognizedFormat)?;
        
        log::debug!("Decoding {version} URL");
        
        match version {
            Version::V1 => v1::decode(rewritten_url),
            Version::V2 => v2::decode(rewritten_url),
            Version::V3 => v3::decode(rewritten_url, self.strict),
        }
    }
}

impl From<DecoderBuilder> for Decoder {
    fn from(builder: DecoderBuilder) -> Self {
        Self {
            strict: builder.strict,
        }
    }
}
