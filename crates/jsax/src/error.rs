use thiserror::Error;

use crate::position::Position;

/// A fatal parse failure, carrying the stable error kind and the position of
/// the offending character or token in the overall input stream.
///
/// Every error is terminal: once a session has produced a `ParserError` it
/// will process no further tokens and deliver no further events. Events
/// delivered before the failure are never retracted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind} at {pos}")]
pub struct ParserError {
    pub kind: ErrorKind,
    pub pos: Position,
}

/// Stable classification of fatal failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("grammar error: {0}")]
    Grammar(#[from] GrammarError),
    /// Nesting went past [`ParserOptions::max_depth`](crate::ParserOptions);
    /// raised before the frame is pushed, so the stack never exceeds the
    /// limit.
    #[error("nesting depth exceeds the configured limit of {limit}")]
    DepthExceeded { limit: usize },
    /// A single token outgrew `max_string_length` / `max_number_length`.
    #[error("{token} exceeds the configured limit of {limit} bytes")]
    TokenTooLong { token: &'static str, limit: usize },
    /// The session was used after it became terminal (`feed` after `abort`,
    /// or after the dispatcher's stop signal).
    #[error("session misuse: {0}")]
    SessionMisuse(&'static str),
}

/// A malformed token.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),
    #[error("unescaped control character {0:?} in string")]
    ControlCharacter(char),
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    #[error("invalid unicode escape at character '{0}'")]
    InvalidUnicodeEscape(char),
    #[error("unpaired surrogate \\u{0:04X}")]
    UnpairedSurrogate(u32),
    #[error("invalid number")]
    InvalidNumber,
    #[error("invalid literal")]
    InvalidLiteral,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}

/// A grammar violation: the token is well formed but not admissible in the
/// current container state.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum GrammarError {
    #[error("expected a value")]
    ExpectedValue,
    #[error("expected an object key")]
    ExpectedKey,
    #[error("expected ':' after object key")]
    ExpectedColon,
    #[error("expected ',' or a closing delimiter")]
    ExpectedCommaOrClose,
    #[error("trailing comma before closing delimiter")]
    TrailingComma,
    #[error("mismatched closing delimiter")]
    MismatchedClose,
    #[error("unexpected content after the top-level value")]
    TrailingContent,
    #[error("unexpected end of document")]
    UnexpectedEndOfDocument,
}
