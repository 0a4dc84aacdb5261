use crate::enums::Version;
use crate::helpers::EscapeError;

/// The broad category of a [`DecodeError`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorKind {
    /// The input has no known URL Defense prefix.
    UnrecognizedFormat,
    /// The prefix matched but the version's body did not.
    Structural,
    /// Percent, base64 or UTF-8 decoding failed.
    Encoding,
    /// A v3 token asked for more bytes than were encoded.
    TruncatedBuffer,
    /// A v3 run token used a symbol outside the run alphabet (strict mode only).
    UnknownRunCharacter,
}

/// Represents a decode error.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("does not appear to be a URL Defense URL")]
    UnrecognizedFormat,
    #[error("error parsing {} URL", .0)]
    Structural(Version),
    #[error("{}", .0)]
    InvalidEscape(#[from] EscapeError),
    #[error("Error decoding base64: {}", .0)]
    Base64(#[from] base64::DecodeError),
    #[error("UTF8 error: {}", .0)]
    UTF8(#[from] std::string::FromUtf8Error),
    #[error("Token at byte {cursor} requested {requested} byte(s) but only {available} remain")]
    TruncatedBuffer {
        cursor: usize,
        requested: usize,
        available: usize,
    },
    #[error("Unknown run character {:?}", .0)]
    UnknownRunCharacter(char),
}

impl DecodeError {
    /// Gets the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnrecognizedFormat => ErrorKind::UnrecognizedFormat,
            Self::Structural(_) => ErrorKind::Structural,
            Self::InvalidEscape(_) |
            Self::Base64(_) |
            Self::UTF8(_) => ErrorKind::Encoding,
            Self::TruncatedBuffer { .. } => ErrorKind::TruncatedBuffer,
            Self::UnknownRunCharacter(_) => ErrorKind::UnknownRunCharacter,
        }
    }
}
