//! Decoding of `\uXXXX` escape sequences, including surrogate pairs.
//!
//! The [`UnicodeEscapeBuffer`] accumulates the four ASCII hexadecimal digits
//! of an escape one character at a time, so an escape may be split across
//! chunk boundaries at any point. When the four digits form the high half of
//! a surrogate pair (U+D800–U+DBFF) the buffer keeps waiting: the next input
//! must be a second `\uXXXX` escape carrying the low half (U+DC00–U+DFFF),
//! and the two halves decode to a single code point. A high half followed by
//! anything else, or a low half on its own, is an error.

use crate::error::LexError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Accumulating the four digits of the first (or only) escape.
    Unit,
    /// A high surrogate was decoded; the next character must be `\`.
    PairBackslash,
    /// Saw the `\` after a high surrogate; the next character must be `u`.
    PairEscapeU,
    /// Accumulating the four digits of the low-half escape.
    PairUnit,
}

/// Accumulates hexadecimal escape digits and decodes them into a `char`.
#[derive(Debug)]
pub(crate) struct UnicodeEscapeBuffer {
    acc: u32,
    len: u8,
    high: u32,
    phase: Phase,
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self {
            acc: 0,
            len: 0,
            high: 0,
            phase: Phase::Unit,
        }
    }

    /// Clears all accumulated state, ready for a fresh escape.
    pub fn reset(&mut self) {
        self.acc = 0;
        self.len = 0;
        self.high = 0;
        self.phase = Phase::Unit;
    }

    /// Convert a single ASCII hex digit into its 0..=15 value.
    #[inline]
    fn hex_val(c: char) -> Option<u32> {
        match c {
            '0'..='9' => Some((c as u32) - ('0' as u32)),
            'a'..='f' => Some((c as u32) - ('a' as u32) + 10),
            'A'..='F' => Some((c as u32) - ('A' as u32) + 10),
            _ => None,
        }
    }

    fn is_high_surrogate(code: u32) -> bool {
        (0xD800..=0xDBFF).contains(&code)
    }

    fn is_low_surrogate(code: u32) -> bool {
        (0xDC00..=0xDFFF).contains(&code)
    }

    /// Feeds the next character of the escape sequence.
    ///
    /// Returns `Ok(None)` while the escape is still incomplete (more digits,
    /// or the low half of a surrogate pair, are required), `Ok(Some(ch))`
    /// once a full code point has been decoded, and `Err` on any malformed
    /// digit or broken surrogate pair. The buffer resets itself after a
    /// successful decode.
    pub fn feed(&mut self, c: char) -> Result<Option<char>, LexError> {
        match self.phase {
            Phase::PairBackslash => {
                if c == '\\' {
                    self.phase = Phase::PairEscapeU;
                    Ok(None)
                } else {
                    Err(LexError::UnpairedSurrogate(self.high))
                }
            }
            Phase::PairEscapeU => {
                if c == 'u' {
                    self.phase = Phase::PairUnit;
                    self.acc = 0;
                    self.len = 0;
                    Ok(None)
                } else {
                    Err(LexError::UnpairedSurrogate(self.high))
                }
            }
            Phase::Unit | Phase::PairUnit => {
                let d = Self::hex_val(c).ok_or(LexError::InvalidUnicodeEscape(c))?;

                self.acc = (self.acc << 4) | d;
                self.len += 1;

                if self.len < 4 {
                    return Ok(None);
                }

                let code = self.acc;
                match self.phase {
                    Phase::Unit if Self::is_high_surrogate(code) => {
                        self.high = code;
                        self.phase = Phase::PairBackslash;
                        Ok(None)
                    }
                    Phase::Unit if Self::is_low_surrogate(code) => {
                        Err(LexError::UnpairedSurrogate(code))
                    }
                    Phase::Unit => {
                        self.reset();
                        // Non-surrogate BMP code points are always valid scalars
                        core::char::from_u32(code)
                            .ok_or(LexError::InvalidUnicodeEscape(c))
                            .map(Some)
                    }
                    _ if Self::is_low_surrogate(code) => {
                        let combined =
                            0x10000 + ((self.high - 0xD800) << 10) + (code - 0xDC00);
                        let high = self.high;
                        self.reset();
                        core::char::from_u32(combined)
                            .ok_or(LexError::UnpairedSurrogate(high))
                            .map(Some)
                    }
                    _ => Err(LexError::UnpairedSurrogate(self.high)),
                }
            }
        }
    }
}
