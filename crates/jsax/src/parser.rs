//! The incremental push parser: a character-level tokenizer and a
//! container-frame state machine, both able to suspend at any input boundary.
//!
//! Input arrives in arbitrary chunks via [`StreamingParser::feed`]; events are
//! pulled through the [`Iterator`] impl. Exhausting the iterator without an
//! error means the parser needs more input. [`StreamingParser::finish`]
//! consumes the parser, so feeding after end-of-input is unrepresentable.

use alloc::{collections::VecDeque, string::String, vec::Vec};

use crate::{
    buffer::Buffer,
    error::{ErrorKind, GrammarError, LexError, ParserError},
    escape_buffer::UnicodeEscapeBuffer,
    event::{Event, Number},
    literal_buffer::{ExpectedLiteralBuffer, Literal, Step},
    options::{NumberMode, ParserOptions},
    position::Position,
};

/// What the lexer sees when it looks at the front of the input ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PeekedChar {
    /// No character available, but the stream is still open.
    Empty,
    Char(char),
    /// No character available and the stream is closed.
    EndOfInput,
}

/// A complete token recognized by the lexer.
#[derive(Debug, Clone, PartialEq)]
enum Token {
    /// Ran out of input. When `partial_lex` is set the lexer is suspended
    /// mid-token and will resume from its saved state on the next chunk.
    Eof,
    Key(String),
    String(String),
    Number(String),
    Boolean(bool),
    Null,
    Punctuator(u8),
}

/// Tokenizer state, persisted across chunk boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Default,
    Value,
    ValueLiteral,
    Sign,
    Zero,
    DecimalInteger,
    DecimalPoint,
    DecimalFraction,
    DecimalExponent,
    DecimalExponentSign,
    DecimalExponentInteger,
    String,
    StringEscape,
    StringEscapeUnicode,
    Start,
    BeforeFirstKey,
    BeforeKey,
    AfterKey,
    BeforeMemberValue,
    BeforeFirstElement,
    BeforeElement,
    AfterMemberValue,
    AfterElement,
    End,
    Error,
}

/// Grammar state: what the next token is allowed to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Start,
    BeforeFirstKey,
    BeforeKey,
    AfterKey,
    BeforeMemberValue,
    BeforeFirstElement,
    BeforeElement,
    AfterMemberValue,
    AfterElement,
    End,
    Error,
}

impl From<ParseState> for LexState {
    fn from(value: ParseState) -> Self {
        match value {
            ParseState::Start => LexState::Start,
            ParseState::BeforeFirstKey => LexState::BeforeFirstKey,
            ParseState::BeforeKey => LexState::BeforeKey,
            ParseState::AfterKey => LexState::AfterKey,
            ParseState::BeforeMemberValue => LexState::BeforeMemberValue,
            ParseState::BeforeFirstElement => LexState::BeforeFirstElement,
            ParseState::BeforeElement => LexState::BeforeElement,
            ParseState::AfterMemberValue => LexState::AfterMemberValue,
            ParseState::AfterElement => LexState::AfterElement,
            ParseState::End => LexState::End,
            ParseState::Error => LexState::Error,
        }
    }
}

/// One open container on the nesting stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Object,
    Array,
}

fn is_json_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// An incremental, push-based JSON parser.
///
/// Feed input in chunks of any size, then iterate to drain the events those
/// chunks made unambiguous. Chunk boundaries may fall anywhere, including
/// inside escape sequences or keywords; the emitted event sequence is
/// identical for every partition of the same input.
///
/// # Examples
///
/// ```rust
/// use jsax::{Event, ParserOptions, StreamingParser};
///
/// let mut parser = StreamingParser::new(ParserOptions::default());
/// parser.feed("[1, tr").unwrap();
/// parser.feed("ue]").unwrap();
///
/// let events: Result<Vec<_>, _> = parser.finish().collect();
/// assert_eq!(events.unwrap().last(), Some(&Event::DocumentEnd));
/// ```
#[derive(Debug)]
pub struct StreamingParser {
    options: ParserOptions,

    source: Buffer,
    end_of_input: bool,
    aborted: bool,

    /// Position of the next unread character.
    pos: Position,
    /// Position where the token currently being lexed began.
    token_pos: Position,

    lex_state: LexState,
    parse_state: ParseState,
    /// Scratch accumulator for the token in flight (string content or number
    /// literal text).
    buffer: String,
    unicode_escape_buffer: UnicodeEscapeBuffer,
    expected_literal: ExpectedLiteralBuffer,
    /// Set when the lexer is suspended mid-token waiting for input.
    partial_lex: bool,

    frames: Vec<Frame>,
    pending: VecDeque<Event>,
    documents_completed: usize,
    document_ended: bool,
    /// An aborted-then-closed session reports misuse exactly once.
    abort_reported: bool,
}

impl StreamingParser {
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            source: Buffer::new(),
            end_of_input: false,
            aborted: false,
            pos: Position::start(),
            token_pos: Position::start(),
            lex_state: LexState::Default,
            parse_state: ParseState::Start,
            buffer: String::new(),
            unicode_escape_buffer: UnicodeEscapeBuffer::new(),
            expected_literal: ExpectedLiteralBuffer::none(),
            partial_lex: false,
            frames: Vec::new(),
            pending: VecDeque::new(),
            documents_completed: 0,
            document_ended: false,
            abort_reported: false,
        }
    }

    /// Appends a chunk of input to the session.
    ///
    /// The chunk is buffered only until consumed; call sites should drain
    /// events between feeds to keep memory bounded. Feeding an aborted
    /// session is an error.
    pub fn feed(&mut self, chunk: &str) -> Result<(), ParserError> {
        if self.aborted {
            return Err(self.misuse_error("feed after abort"));
        }
        self.source.push(chunk);
        Ok(())
    }

    /// Signals end of input, consuming the parser.
    ///
    /// The returned handle drains the remaining events, failing if the input
    /// ends mid-document. Closing an aborted session yields a
    /// [`ErrorKind::SessionMisuse`] error.
    #[must_use]
    pub fn finish(mut self) -> ClosedStreamingParser {
        self.end_of_input = true;
        ClosedStreamingParser { parser: self }
    }

    /// Terminates the session early, dropping all buffered input and queued
    /// events. Any later [`feed`](Self::feed), or closing the session via
    /// [`finish`](Self::finish), fails with [`ErrorKind::SessionMisuse`].
    pub fn abort(&mut self) {
        self.aborted = true;
        self.lex_state = LexState::Error;
        self.parse_state = ParseState::Error;
        self.source.clear();
        self.buffer = String::new();
        self.pending.clear();
        self.frames = Vec::new();
    }

    /// Characters currently held by the session: unread input plus the token
    /// accumulator. Exposed so memory-boundedness can be observed.
    #[doc(hidden)]
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.source.len() + self.buffer.len()
    }

    pub(crate) fn misuse_error(&self, what: &'static str) -> ParserError {
        ParserError {
            kind: ErrorKind::SessionMisuse(what),
            pos: self.pos,
        }
    }

    fn next_event(&mut self) -> Option<Result<Event, ParserError>> {
        match self.next_event_internal() {
            Some(Err(err)) => {
                self.lex_state = LexState::Error;
                self.parse_state = ParseState::Error;
                Some(Err(err))
            }
            other => other,
        }
    }

    fn next_event_internal(&mut self) -> Option<Result<Event, ParserError>> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }
            if self.aborted {
                if self.end_of_input && !self.abort_reported {
                    self.abort_reported = true;
                    return Some(Err(self.misuse_error("finish after abort")));
                }
                return None;
            }
            if self.parse_state == ParseState::Error {
                return None;
            }
            if self.options.allow_top_level_sequence && self.parse_state == ParseState::End {
                self.lex_state = LexState::Default;
                self.parse_state = ParseState::Start;
            }

            let token = match self.lex() {
                Ok(token) => token,
                Err(err) => return Some(Err(err)),
            };
            let is_eof = matches!(token, Token::Eof);
            if let Err(err) = self.dispatch_parse_state(token) {
                return Some(Err(err));
            }
            if is_eof {
                return self.pending.pop_front().map(Ok);
            }
        }
    }

    // Lexing

    fn peek_char(&self) -> PeekedChar {
        match self.source.peek() {
            Some(c) => PeekedChar::Char(c),
            None if self.end_of_input => PeekedChar::EndOfInput,
            None => PeekedChar::Empty,
        }
    }

    fn advance_char(&mut self) {
        if let Some(c) = self.source.next() {
            self.pos.advance(c);
        }
    }

    fn mark_token_start(&mut self) {
        self.token_pos = self.pos;
    }

    fn new_token(&mut self, token: Token, partial: bool) -> Token {
        self.partial_lex = partial;
        token
    }

    fn lex(&mut self) -> Result<Token, ParserError> {
        if !self.partial_lex {
            self.lex_state = LexState::Default;
        }
        loop {
            let next_char = self.peek_char();
            if let Some(token) = self.lex_state_step(self.lex_state, next_char)? {
                return Ok(token);
            }
        }
    }

    fn punctuator_token(&mut self, c: char) -> Token {
        self.mark_token_start();
        self.advance_char();
        self.new_token(Token::Punctuator(c as u8), false)
    }

    #[allow(clippy::too_many_lines)]
    fn lex_state_step(
        &mut self,
        state: LexState,
        next_char: PeekedChar,
    ) -> Result<Option<Token>, ParserError> {
        use PeekedChar::{Char, Empty, EndOfInput};

        match state {
            LexState::Default => match next_char {
                Char(c) if is_json_whitespace(c) => {
                    self.advance_char();
                    Ok(None)
                }
                Empty => Ok(Some(self.new_token(Token::Eof, true))),
                EndOfInput => Ok(Some(self.new_token(Token::Eof, false))),
                Char(_) => self.lex_state_step(self.parse_state.into(), next_char),
            },

            LexState::Value => match next_char {
                Char(c @ ('{' | '[')) => Ok(Some(self.punctuator_token(c))),
                Char(c @ ('n' | 't' | 'f')) => {
                    self.mark_token_start();
                    self.advance_char();
                    self.expected_literal = ExpectedLiteralBuffer::new(c);
                    self.lex_state = LexState::ValueLiteral;
                    Ok(None)
                }
                Char('-') => {
                    self.mark_token_start();
                    self.advance_char();
                    self.buffer.clear();
                    self.buffer.push('-');
                    self.lex_state = LexState::Sign;
                    Ok(None)
                }
                Char('0') => {
                    self.mark_token_start();
                    self.advance_char();
                    self.buffer.clear();
                    self.buffer.push('0');
                    self.lex_state = LexState::Zero;
                    Ok(None)
                }
                Char(c) if c.is_ascii_digit() => {
                    self.mark_token_start();
                    self.advance_char();
                    self.buffer.clear();
                    self.buffer.push(c);
                    self.lex_state = LexState::DecimalInteger;
                    Ok(None)
                }
                Char('"') => {
                    self.mark_token_start();
                    self.advance_char();
                    self.buffer.clear();
                    self.lex_state = LexState::String;
                    Ok(None)
                }
                c => Err(self.invalid_char(c)),
            },

            LexState::ValueLiteral => match next_char {
                Empty => Ok(Some(self.new_token(Token::Eof, true))),
                Char(c) => match self.expected_literal.step(c) {
                    Step::NeedMore => {
                        self.advance_char();
                        Ok(None)
                    }
                    Step::Done(literal) => {
                        self.advance_char();
                        let token = match literal {
                            Literal::Null => Token::Null,
                            Literal::True => Token::Boolean(true),
                            Literal::False => Token::Boolean(false),
                        };
                        Ok(Some(self.new_token(token, false)))
                    }
                    Step::Reject => Err(self.lex_error(LexError::InvalidLiteral)),
                },
                EndOfInput => Err(self.lex_error(LexError::InvalidLiteral)),
            },

            LexState::Sign => match next_char {
                Empty => Ok(Some(self.new_token(Token::Eof, true))),
                Char('0') => {
                    self.advance_char();
                    self.buffer.push('0');
                    self.lex_state = LexState::Zero;
                    Ok(None)
                }
                Char(c) if c.is_ascii_digit() => {
                    self.advance_char();
                    self.buffer.push(c);
                    self.lex_state = LexState::DecimalInteger;
                    Ok(None)
                }
                _ => Err(self.lex_error(LexError::InvalidNumber)),
            },

            LexState::Zero => match next_char {
                Empty => Ok(Some(self.new_token(Token::Eof, true))),
                Char('.') => {
                    self.advance_char();
                    self.buffer.push('.');
                    self.lex_state = LexState::DecimalPoint;
                    Ok(None)
                }
                Char(c @ ('e' | 'E')) => {
                    self.advance_char();
                    self.buffer.push(c);
                    self.lex_state = LexState::DecimalExponent;
                    Ok(None)
                }
                // "01" has a leading zero
                Char('0'..='9') => Err(self.lex_error(LexError::InvalidNumber)),
                _ => {
                    let token = self.produce_number();
                    Ok(Some(self.new_token(token, false)))
                }
            },

            LexState::DecimalInteger => match next_char {
                Empty => Ok(Some(self.new_token(Token::Eof, true))),
                Char('.') => {
                    self.advance_char();
                    self.buffer.push('.');
                    self.lex_state = LexState::DecimalPoint;
                    Ok(None)
                }
                Char(c @ ('e' | 'E')) => {
                    self.advance_char();
                    self.buffer.push(c);
                    self.lex_state = LexState::DecimalExponent;
                    Ok(None)
                }
                Char(c) if c.is_ascii_digit() => {
                    self.copy_digits()?;
                    Ok(None)
                }
                _ => {
                    let token = self.produce_number();
                    Ok(Some(self.new_token(token, false)))
                }
            },

            LexState::DecimalPoint => match next_char {
                Empty => Ok(Some(self.new_token(Token::Eof, true))),
                Char(c) if c.is_ascii_digit() => {
                    self.copy_digits()?;
                    self.lex_state = LexState::DecimalFraction;
                    Ok(None)
                }
                // At least one fraction digit is required
                _ => Err(self.lex_error(LexError::InvalidNumber)),
            },

            LexState::DecimalFraction => match next_char {
                Empty => Ok(Some(self.new_token(Token::Eof, true))),
                Char(c @ ('e' | 'E')) => {
                    self.advance_char();
                    self.buffer.push(c);
                    self.lex_state = LexState::DecimalExponent;
                    Ok(None)
                }
                Char(c) if c.is_ascii_digit() => {
                    self.copy_digits()?;
                    Ok(None)
                }
                _ => {
                    let token = self.produce_number();
                    Ok(Some(self.new_token(token, false)))
                }
            },

            LexState::DecimalExponent => match next_char {
                Empty => Ok(Some(self.new_token(Token::Eof, true))),
                Char(c @ ('+' | '-')) => {
                    self.advance_char();
                    self.buffer.push(c);
                    self.lex_state = LexState::DecimalExponentSign;
                    Ok(None)
                }
                Char(c) if c.is_ascii_digit() => {
                    self.copy_digits()?;
                    self.lex_state = LexState::DecimalExponentInteger;
                    Ok(None)
                }
                _ => Err(self.lex_error(LexError::InvalidNumber)),
            },

            LexState::DecimalExponentSign => match next_char {
                Empty => Ok(Some(self.new_token(Token::Eof, true))),
                Char(c) if c.is_ascii_digit() => {
                    self.copy_digits()?;
                    self.lex_state = LexState::DecimalExponentInteger;
                    Ok(None)
                }
                _ => Err(self.lex_error(LexError::InvalidNumber)),
            },

            LexState::DecimalExponentInteger => match next_char {
                Empty => Ok(Some(self.new_token(Token::Eof, true))),
                Char(c) if c.is_ascii_digit() => {
                    self.copy_digits()?;
                    Ok(None)
                }
                _ => {
                    let token = self.produce_number();
                    Ok(Some(self.new_token(token, false)))
                }
            },

            LexState::String => match next_char {
                Char('\\') => {
                    self.advance_char();
                    self.lex_state = LexState::StringEscape;
                    Ok(None)
                }
                Char('"') => {
                    self.advance_char();
                    let token = self.produce_string();
                    Ok(Some(self.new_token(token, false)))
                }
                Char(c) if (c as u32) < 0x20 => {
                    Err(self.lex_error(LexError::ControlCharacter(c)))
                }
                Char(_) => {
                    let copied = self
                        .source
                        .copy_while(&mut self.buffer, |c| {
                            c != '\\' && c != '"' && (c as u32) >= 0x20
                        });
                    self.pos.advance_by(copied);
                    self.check_string_limit()?;
                    Ok(None)
                }
                Empty => Ok(Some(self.new_token(Token::Eof, true))),
                EndOfInput => Err(self.lex_error(LexError::UnterminatedString)),
            },

            LexState::StringEscape => match next_char {
                Empty => Ok(Some(self.new_token(Token::Eof, true))),
                Char(c @ ('"' | '\\' | '/')) => self.push_escaped(c),
                Char('b') => self.push_escaped('\u{8}'),
                Char('f') => self.push_escaped('\u{c}'),
                Char('n') => self.push_escaped('\n'),
                Char('r') => self.push_escaped('\r'),
                Char('t') => self.push_escaped('\t'),
                Char('u') => {
                    self.advance_char();
                    self.unicode_escape_buffer.reset();
                    self.lex_state = LexState::StringEscapeUnicode;
                    Ok(None)
                }
                Char(c) => Err(self.lex_error(LexError::InvalidEscape(c))),
                EndOfInput => Err(self.lex_error(LexError::UnterminatedString)),
            },

            LexState::StringEscapeUnicode => match next_char {
                Empty => Ok(Some(self.new_token(Token::Eof, true))),
                Char(c) => {
                    self.advance_char();
                    match self.unicode_escape_buffer.feed(c) {
                        Ok(Some(decoded)) => {
                            self.buffer.push(decoded);
                            self.check_string_limit()?;
                            self.lex_state = LexState::String;
                            Ok(None)
                        }
                        Ok(None) => Ok(None),
                        Err(err) => Err(self.lex_error(err)),
                    }
                }
                EndOfInput => Err(self.lex_error(LexError::UnterminatedString)),
            },

            LexState::Start => match next_char {
                Char(c @ ('{' | '[')) => Ok(Some(self.punctuator_token(c))),
                Char(c @ ('}' | ']' | ',' | ':')) => Ok(Some(self.punctuator_token(c))),
                _ => {
                    self.lex_state = LexState::Value;
                    Ok(None)
                }
            },

            LexState::BeforeFirstKey | LexState::BeforeKey => match next_char {
                Char('"') => {
                    self.mark_token_start();
                    self.advance_char();
                    self.buffer.clear();
                    self.lex_state = LexState::String;
                    Ok(None)
                }
                Char(c @ ('}' | ']' | ',' | ':')) => Ok(Some(self.punctuator_token(c))),
                _ => {
                    self.lex_state = LexState::Value;
                    Ok(None)
                }
            },

            LexState::AfterKey => match next_char {
                Char(c @ (':' | ',' | '}' | ']')) => Ok(Some(self.punctuator_token(c))),
                _ => {
                    self.lex_state = LexState::Value;
                    Ok(None)
                }
            },

            LexState::BeforeMemberValue => match next_char {
                Char(c @ ('}' | ']' | ',' | ':')) => Ok(Some(self.punctuator_token(c))),
                _ => {
                    self.lex_state = LexState::Value;
                    Ok(None)
                }
            },

            LexState::BeforeFirstElement | LexState::BeforeElement => match next_char {
                Char(c @ (']' | '}' | ',' | ':')) => Ok(Some(self.punctuator_token(c))),
                _ => {
                    self.lex_state = LexState::Value;
                    Ok(None)
                }
            },

            LexState::AfterMemberValue | LexState::AfterElement => match next_char {
                Char(c @ (',' | '}' | ']' | ':')) => Ok(Some(self.punctuator_token(c))),
                _ => {
                    self.lex_state = LexState::Value;
                    Ok(None)
                }
            },

            LexState::End => match next_char {
                Char(c @ ('{' | '[' | '}' | ']' | ',' | ':')) => {
                    Ok(Some(self.punctuator_token(c)))
                }
                _ => {
                    self.lex_state = LexState::Value;
                    Ok(None)
                }
            },

            LexState::Error => Ok(None),
        }
    }

    fn push_escaped(&mut self, decoded: char) -> Result<Option<Token>, ParserError> {
        self.advance_char();
        self.buffer.push(decoded);
        self.check_string_limit()?;
        self.lex_state = LexState::String;
        Ok(None)
    }

    /// Bulk-copies a run of digits into the number accumulator.
    fn copy_digits(&mut self) -> Result<(), ParserError> {
        let copied = self
            .source
            .copy_while(&mut self.buffer, |c| c.is_ascii_digit());
        self.pos.advance_by(copied);
        self.check_number_limit()
    }

    fn produce_string(&mut self) -> Token {
        let value = core::mem::take(&mut self.buffer);
        if matches!(
            self.parse_state,
            ParseState::BeforeFirstKey | ParseState::BeforeKey
        ) {
            Token::Key(value)
        } else {
            Token::String(value)
        }
    }

    fn produce_number(&mut self) -> Token {
        Token::Number(core::mem::take(&mut self.buffer))
    }

    fn check_string_limit(&self) -> Result<(), ParserError> {
        match self.options.max_string_length {
            Some(limit) if self.buffer.len() > limit => Err(self.syntax_error(
                ErrorKind::TokenTooLong {
                    token: "string",
                    limit,
                },
                self.token_pos,
            )),
            _ => Ok(()),
        }
    }

    fn check_number_limit(&self) -> Result<(), ParserError> {
        match self.options.max_number_length {
            Some(limit) if self.buffer.len() > limit => Err(self.syntax_error(
                ErrorKind::TokenTooLong {
                    token: "number",
                    limit,
                },
                self.token_pos,
            )),
            _ => Ok(()),
        }
    }

    // Parsing

    #[allow(clippy::too_many_lines)]
    fn dispatch_parse_state(&mut self, token: Token) -> Result<(), ParserError> {
        match self.parse_state {
            ParseState::Start => match token {
                Token::Eof if self.end_of_input => {
                    if self.options.allow_top_level_sequence {
                        if self.documents_completed > 0 && !self.document_ended {
                            self.document_ended = true;
                            self.pending.push_back(Event::DocumentEnd);
                        }
                        Ok(())
                    } else {
                        Err(self.unexpected_end())
                    }
                }
                Token::Eof => Ok(()),
                Token::Punctuator(p) if !matches!(p, b'{' | b'[') => {
                    Err(self.grammar_error(GrammarError::ExpectedValue))
                }
                _ => self.push_value(token),
            },

            ParseState::BeforeFirstKey => match token {
                Token::Eof if self.end_of_input => Err(self.unexpected_end()),
                Token::Eof => Ok(()),
                Token::Key(key) => {
                    self.pending.push_back(Event::Key(key));
                    self.parse_state = ParseState::AfterKey;
                    Ok(())
                }
                Token::Punctuator(b'}') => self.pop_frame(),
                _ => Err(self.grammar_error(GrammarError::ExpectedKey)),
            },

            ParseState::BeforeKey => match token {
                Token::Eof if self.end_of_input => Err(self.unexpected_end()),
                Token::Eof => Ok(()),
                Token::Key(key) => {
                    self.pending.push_back(Event::Key(key));
                    self.parse_state = ParseState::AfterKey;
                    Ok(())
                }
                Token::Punctuator(b'}') => {
                    Err(self.grammar_error(GrammarError::TrailingComma))
                }
                _ => Err(self.grammar_error(GrammarError::ExpectedKey)),
            },

            ParseState::AfterKey => match token {
                Token::Eof if self.end_of_input => Err(self.unexpected_end()),
                Token::Eof => Ok(()),
                Token::Punctuator(b':') => {
                    self.parse_state = ParseState::BeforeMemberValue;
                    Ok(())
                }
                _ => Err(self.grammar_error(GrammarError::ExpectedColon)),
            },

            ParseState::BeforeMemberValue => match token {
                Token::Eof if self.end_of_input => Err(self.unexpected_end()),
                Token::Eof => Ok(()),
                Token::Punctuator(p) if !matches!(p, b'{' | b'[') => {
                    Err(self.grammar_error(GrammarError::ExpectedValue))
                }
                _ => self.push_value(token),
            },

            ParseState::BeforeFirstElement => match token {
                Token::Eof if self.end_of_input => Err(self.unexpected_end()),
                Token::Eof => Ok(()),
                Token::Punctuator(b']') => self.pop_frame(),
                Token::Punctuator(p) if !matches!(p, b'{' | b'[') => {
                    Err(self.grammar_error(GrammarError::ExpectedValue))
                }
                _ => self.push_value(token),
            },

            ParseState::BeforeElement => match token {
                Token::Eof if self.end_of_input => Err(self.unexpected_end()),
                Token::Eof => Ok(()),
                Token::Punctuator(b']') => {
                    Err(self.grammar_error(GrammarError::TrailingComma))
                }
                Token::Punctuator(p) if !matches!(p, b'{' | b'[') => {
                    Err(self.grammar_error(GrammarError::ExpectedValue))
                }
                _ => self.push_value(token),
            },

            ParseState::AfterMemberValue => match token {
                Token::Eof if self.end_of_input => Err(self.unexpected_end()),
                Token::Eof => Ok(()),
                Token::Punctuator(b',') => {
                    self.parse_state = ParseState::BeforeKey;
                    Ok(())
                }
                Token::Punctuator(b'}') => self.pop_frame(),
                Token::Punctuator(b']') => {
                    Err(self.grammar_error(GrammarError::MismatchedClose))
                }
                _ => Err(self.grammar_error(GrammarError::ExpectedCommaOrClose)),
            },

            ParseState::AfterElement => match token {
                Token::Eof if self.end_of_input => Err(self.unexpected_end()),
                Token::Eof => Ok(()),
                Token::Punctuator(b',') => {
                    self.parse_state = ParseState::BeforeElement;
                    Ok(())
                }
                Token::Punctuator(b']') => self.pop_frame(),
                Token::Punctuator(b'}') => {
                    Err(self.grammar_error(GrammarError::MismatchedClose))
                }
                _ => Err(self.grammar_error(GrammarError::ExpectedCommaOrClose)),
            },

            ParseState::End => match token {
                Token::Eof => Ok(()),
                _ => Err(self.grammar_error(GrammarError::TrailingContent)),
            },

            ParseState::Error => Ok(()),
        }
    }

    fn push_value(&mut self, token: Token) -> Result<(), ParserError> {
        match token {
            Token::Punctuator(b'{') => {
                self.push_frame(Frame::Object)?;
                self.pending.push_back(Event::ObjectBegin);
                self.parse_state = ParseState::BeforeFirstKey;
            }
            Token::Punctuator(b'[') => {
                self.push_frame(Frame::Array)?;
                self.pending.push_back(Event::ArrayBegin);
                self.parse_state = ParseState::BeforeFirstElement;
            }
            Token::Null => {
                self.pending.push_back(Event::Null);
                self.value_complete();
            }
            Token::Boolean(b) => {
                self.pending.push_back(Event::Boolean(b));
                self.value_complete();
            }
            Token::Number(text) => {
                let number = self.decode_number(text)?;
                self.pending.push_back(Event::Number(number));
                self.value_complete();
            }
            Token::String(s) => {
                self.pending.push_back(Event::String(s));
                self.value_complete();
            }
            // Filtered by every dispatch arm that calls us
            Token::Eof | Token::Key(_) | Token::Punctuator(_) => {}
        }
        Ok(())
    }

    fn push_frame(&mut self, frame: Frame) -> Result<(), ParserError> {
        if self.frames.len() >= self.options.max_depth {
            return Err(self.syntax_error(
                ErrorKind::DepthExceeded {
                    limit: self.options.max_depth,
                },
                self.token_pos,
            ));
        }
        self.frames.push(frame);
        Ok(())
    }

    fn pop_frame(&mut self) -> Result<(), ParserError> {
        // The dispatch arms only route a close token here when it matches
        // the top frame's kind.
        match self.frames.pop() {
            Some(Frame::Object) => self.pending.push_back(Event::ObjectEnd),
            Some(Frame::Array) => self.pending.push_back(Event::ArrayEnd),
            None => {}
        }
        self.value_complete();
        Ok(())
    }

    /// A value just finished; the next grammar state depends on the
    /// enclosing frame, if any.
    fn value_complete(&mut self) {
        match self.frames.last() {
            Some(Frame::Object) => self.parse_state = ParseState::AfterMemberValue,
            Some(Frame::Array) => self.parse_state = ParseState::AfterElement,
            None => {
                self.parse_state = ParseState::End;
                self.documents_completed += 1;
                if !self.options.allow_top_level_sequence && !self.document_ended {
                    self.document_ended = true;
                    self.pending.push_back(Event::DocumentEnd);
                }
            }
        }
    }

    fn decode_number(&self, text: String) -> Result<Number, ParserError> {
        let fail = || self.syntax_error(LexError::InvalidNumber.into(), self.token_pos);
        match self.options.number_mode {
            NumberMode::Literal => Ok(Number::Literal(text)),
            NumberMode::Float => text.parse().map(Number::Float).map_err(|_| fail()),
            NumberMode::Exact => {
                if text.bytes().any(|b| matches!(b, b'.' | b'e' | b'E')) {
                    text.parse().map(Number::Float).map_err(|_| fail())
                } else {
                    match text.parse() {
                        Ok(i) => Ok(Number::Int(i)),
                        // Out of i64 range; keep the magnitude as a float
                        Err(_) => text.parse().map(Number::Float).map_err(|_| fail()),
                    }
                }
            }
        }
    }

    // Error construction

    fn syntax_error(&self, kind: ErrorKind, pos: Position) -> ParserError {
        #[cfg(test)]
        assert!(
            !self.options.panic_on_error,
            "parse failure: {kind} at {pos}"
        );
        ParserError { kind, pos }
    }

    fn lex_error(&self, err: LexError) -> ParserError {
        self.syntax_error(ErrorKind::Lex(err), self.pos)
    }

    fn grammar_error(&self, err: GrammarError) -> ParserError {
        self.syntax_error(ErrorKind::Grammar(err), self.token_pos)
    }

    fn unexpected_end(&self) -> ParserError {
        self.syntax_error(
            ErrorKind::Grammar(GrammarError::UnexpectedEndOfDocument),
            self.pos,
        )
    }

    fn invalid_char(&self, c: PeekedChar) -> ParserError {
        match c {
            PeekedChar::Char(c) => self.lex_error(LexError::InvalidCharacter(c)),
            PeekedChar::Empty | PeekedChar::EndOfInput => {
                self.lex_error(LexError::UnexpectedEndOfInput)
            }
        }
    }
}

impl Iterator for StreamingParser {
    type Item = Result<Event, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event()
    }
}

/// A parser whose input has ended; see [`StreamingParser::finish`].
///
/// Iterating drains the remaining events. If the input stopped mid-document,
/// the iterator yields the corresponding error in place of further events.
#[derive(Debug)]
pub struct ClosedStreamingParser {
    parser: StreamingParser,
}

impl ClosedStreamingParser {
    #[doc(hidden)]
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.parser.buffered_len()
    }
}

impl Iterator for ClosedStreamingParser {
    type Item = Result<Event, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parser.next_event()
    }
}
