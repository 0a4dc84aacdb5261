//! Decodes links rewritten by the URL Defense email gateway.
//!
//! ```
//! let decoded = url_defense_decoder::decode("https://urldefense.com/v3/__https://example.com/search?q=a*b__;Kw!!G3vK!abc$").unwrap();
//!
//! assert_eq!(decoded, "https://example.com/search?q=a+b");
//! ```

pub mod enums;
pub mod decoder;
pub mod batch;
pub mod helpers;
pub mod run_mapping;

pub use decoder::{Decoder, DecoderBuilder, DecodeError, ErrorKind};
pub use enums::Version;

use lazy_static::lazy_static;

lazy_static! {
    static ref DEFAULT_DECODER: Decoder = Decoder::new();
}

/// Decodes a rewritten URL using a shared lenient [`Decoder`].
pub fn decode(rewritten_url: &str) -> Result<String, DecodeError> {
    DEFAULT_DECODER.decode(rewritten_url)
}
