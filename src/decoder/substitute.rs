use super::DecodeError;
use crate::run_mapping::{RunMapping, RUN_MAPPING};
use lazy_regex::bytes_regex;

/// Where a [`TokenSubstitutor`] is in its walk over the skeleton.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum State {
    /// Looking for the next token from the scan position.
    Scanning,
    /// Copying the literal text before the next token (or the tail) to the output.
    EmittingLiteral,
    /// Replacing the token at the scan position with bytes from the buffer.
    Substituting,
    /// The scan position reached the end of the skeleton.
    Done,
}

/// The output of a completed substitution.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Substitution {
    /// The skeleton with every token replaced.
    pub output: Vec<u8>,
    /// How far into the buffer the tokens asked to read. May exceed the buffer's length in
    /// lenient mode when a run token overran it.
    pub cursor: usize,
    /// The number of tokens replaced.
    pub tokens: usize,
}

/// Splices decoded bytes back into a v3 skeleton.
///
/// The skeleton is walked left to right. Literal text is copied as-is. A `*` token is replaced
/// by the next byte of the buffer, and a `**<c>` token by the next `n` bytes, where `n` is the
/// run length of `c` in the [`RunMapping`]. The buffer is only ever read forward.
///
/// # Examples
/// ```
/// use url_defense_decoder::decoder::TokenSubstitutor;
///
/// let substitution = TokenSubstitutor::new(b"a*b**Ac", b"XYZ").run().unwrap();
///
/// assert_eq!(substitution.output, b"aXbYZc");
/// assert_eq!(substitution.cursor, 3);
/// ```
#[derive(Debug)]
pub struct TokenSubstitutor<'a> {
    skeleton: &'a [u8],
    buffer: &'a [u8],
    mapping: &'a RunMapping,
    strict: bool,
    state: State,
    scan_position: usize,
    cursor: usize,
    // the (start, end) of the token found by the last scan
    pending: Option<(usize, usize)>,
    output: Vec<u8>,
    tokens: usize,
}

impl<'a> TokenSubstitutor<'a> {
    /// Creates a new [`TokenSubstitutor`] in lenient mode using the shared [`RUN_MAPPING`].
    pub fn new(skeleton: &'a [u8], buffer: &'a [u8]) -> Self {
        Self {
            skeleton,
            buffer,
            mapping: &RUN_MAPPING,
            strict: false,
            state: State::Scanning,
            scan_position: 0,
            cursor: 0,
            pending: None,
            output: Vec::with_capacity(skeleton.len() + buffer.len()),
            tokens: 0,
        }
    }

    /// Sets strict mode. When strict, an unknown run symbol or a run token that overruns the
    /// buffer is an error instead of being tolerated.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Gets the current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Gets the position of the next unread skeleton byte.
    pub fn scan_position(&self) -> usize {
        self.scan_position
    }

    /// Gets the position of the next unread buffer byte.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Gets the output produced so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Performs one transition and returns the new state.
    pub fn step(&mut self) -> Result<State, DecodeError> {
        match self.state {
            State::Scanning => {
                // `*` or `**` and one character; a byte that is not valid UTF-8 counts as one
                // character so it is consumed as an (unknown) run symbol
                let pattern = bytes_regex!(r#"\*(\*(?:.|(?-u:[\x80-\xFF])))?"#);

                self.pending = pattern
                    .find_at(self.skeleton, self.scan_position)
                    .map(|token| (token.start(), token.end()));
                self.state = match self.pending {
                    Some((start, _)) if start == self.scan_position => State::Substituting,
                    Some(_) => State::EmittingLiteral,
                    None if self.scan_position < self.skeleton.len() => State::EmittingLiteral,
                    None => State::Done,
                };
            },
            State::EmittingLiteral => {
                let end = match self.pending {
                    Some((start, _)) => start,
                    None => self.skeleton.len(),
                };

                self.output.extend_from_slice(&self.skeleton[self.scan_position..end]);
                self.scan_position = end;
                self.state = if self.pending.is_some() {
                    State::Substituting
                } else {
                    State::Done
                };
            },
            State::Substituting => {
                if let Some((start, end)) = self.pending.take() {
                    self.substitute(start, end)?;
                    self.scan_position = end;
                }

                self.state = State::Scanning;
            },
            State::Done => {},
        }

        Ok(self.state)
    }

    /// Runs to completion.
    pub fn run(mut self) -> Result<Substitution, DecodeError> {
        while self.step()? != State::Done {}

        log::debug!(
            "Substituted {} token(s) reading {} of {} buffered byte(s)",
            self.tokens,
            self.cursor,
            self.buffer.len(),
        );

        Ok(Substitution {
            output: self.output,
            cursor: self.cursor,
            tokens: self.tokens,
        })
    }

    fn substitute(&mut self, start: usize, end: usize) -> Result<(), DecodeError> {
        let skeleton = self.skeleton;
        let token = &skeleton[start..end];

        self.tokens += 1;

        let symbol = match token.get(2..) {
            Some(symbol) => symbol,
            None => {
                // single star
                log::trace!("Token `*` at {start} reads byte {}", self.cursor);

                let byte = self.buffer.get(self.cursor).copied().ok_or(DecodeError::TruncatedBuffer {
                    cursor: self.cursor,
                    requested: 1,
                    available: self.buffer.len().saturating_sub(self.cursor),
                })?;

                self.output.push(byte);
                self.cursor += 1;

                return Ok(());
            },
        };
        let symbol = std::str::from_utf8(symbol)
            .ok()
            .and_then(|symbol| symbol.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        let run_length = match self.mapping.get(symbol) {
            Some(run_length) => run_length,
            None if self.strict => {
                return Err(DecodeError::UnknownRunCharacter(symbol));
            },
            None => {
                log::warn!("Unknown run character {symbol:?} at {start}; token skipped");
                return Ok(());
            },
        };
        let from = self.cursor.min(self.buffer.len());
        let to = self.cursor.saturating_add(run_length).min(self.buffer.len());
        let available = to - from;

        log::trace!("Token `**{symbol}` at {start} reads {run_length} byte(s) from {}", self.cursor);

        if available < run_length {
            if self.strict {
                return Err(DecodeError::TruncatedBuffer {
                    cursor: self.cursor,
                    requested: run_length,
                    available,
                });
            }

            log::warn!(
                "Run of {run_length} byte(s) at {start} overruns the buffer; {available} byte(s) emitted",
            );
        }

        self.output.extend_from_slice(&self.buffer[from..to]);
        // the cursor tracks what the token asked for, not what was available
        self.cursor = self.cursor.saturating_add(run_length);

        Ok(())
    }
}
