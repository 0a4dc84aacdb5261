use lazy_static::lazy_static;

/// The run alphabet, in order. The symbol at index `i` stands for a run of `i + 2` bytes.
pub const RUN_ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// The shortest run a `**<c>` token can stand for.
pub const MIN_RUN_LENGTH: usize = 2;

/// The longest run a `**<c>` token can stand for.
pub const MAX_RUN_LENGTH: usize = MIN_RUN_LENGTH + RUN_ALPHABET.len() - 1;

lazy_static! {
    /// The shared mapping, built once and read by every decode.
    pub static ref RUN_MAPPING: RunMapping = RunMapping::new();
}

/// Maps each symbol of [`RUN_ALPHABET`] to the length of the byte run it encodes in a v3
/// `**<c>` token: `A` is 2, `B` is 3, and so on up to `_` at 65.
#[derive(Debug, Clone)]
pub struct RunMapping {
    // indexed by ASCII byte; 0 means the byte is not a run symbol
    lengths: [u8; 128],
}

impl RunMapping {
    /// Builds the mapping from [`RUN_ALPHABET`].
    pub fn new() -> Self {
        let mut lengths = [0u8; 128];

        for (run_length, symbol) in (MIN_RUN_LENGTH..).zip(RUN_ALPHABET.iter()) {
            if let Some(slot) = lengths.get_mut(*symbol as usize) {
                // the longest run is 65, well inside u8
                *slot = run_length as u8;
            }
        }

        Self {
            lengths,
        }
    }

    /// Gets the run length for a symbol, or `None` if the symbol is not in the alphabet.
    pub fn get(&self, symbol: char) -> Option<usize> {
        if !symbol.is_ascii() {
            return None;
        }

        match self.lengths.get(symbol as usize) {
            Some(0) | None => None,
            Some(length) => Some(*length as usize),
        }
    }

    /// Iterates over `(symbol, run length)` pairs in alphabet order.
    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        RUN_ALPHABET
            .iter()
            .filter_map(move |symbol| {
                let symbol = *symbol as char;

                self.get(symbol).map(|length| (symbol, length))
            })
    }
}

impl Default for RunMapping {
    fn default() -> Self {
        Self::new()
    }
}
