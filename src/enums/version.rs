use std::fmt;
use lazy_regex::regex_captures;

/// The URL Defense wrapper format.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Version {
    /// `/v1/?u=<escaped>&k=...`
    V1,
    /// `/v2/url?u=<substituted>&d=...` or `&c=...`
    V2,
    /// `/v3/__<skeleton>__;<base64>!...`
    V3,
}

impl Version {
    /// Classifies a wrapped URL by its `https://urldefense[.proofpoint].com/v<N>/` prefix.
    /// Returns `None` for anything else, including unknown version labels.
    pub fn detect(input: &str) -> Option<Self> {
        let (_, label) = regex_captures!(
            r#"^https://urldefense(?:\.proofpoint)?\.com/(v[0-9]+)/"#,
            input
        )?;

        match label {
            "v1" => Some(Self::V1),
            "v2" => Some(Self::V2),
            "v3" => Some(Self::V3),
            _ => None,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::V1 => write!(f, "v1"),
            Self::V2 => write!(f, "v2"),
            Self::V3 => write!(f, "v3"),
        }
    }
}
