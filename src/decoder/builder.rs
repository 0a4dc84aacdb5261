use super::Decoder;

/// Builder for creating a [`Decoder`].
///
/// # Examples
/// ```
/// use url_defense_decoder::Decoder;
/// 
/// let decoder = Decoder::builder()
///     .strict(true)
///     .build();
/// 
/// assert!(decoder.is_strict());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DecoderBuilder {
    pub strict: bool,
}

impl DecoderBuilder {
    /// Creates a new [`DecoderBuilder`].
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Sets strict mode. Defaults to `false`.
    /// 
    /// A lenient decoder matches the gateway's legacy behavior for v3 links: a `**<c>` token 
    /// whose `c` is not a run symbol is dropped from the output, and a run that reads past the 
    /// encoded bytes emits whatever bytes remain. A strict decoder fails with 
    /// [`super::DecodeError::UnknownRunCharacter`] and [`super::DecodeError::TruncatedBuffer`] 
    /// respectively.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
    
    /// Builds the [`Decoder`].
    pub fn build(self) -> Decoder {
        Decoder::from(self)
    }
}
