//! Incremental, event-driven JSON parsing.
//!
//! `jsax` parses JSON that arrives in chunks of arbitrary size, emitting a
//! stream of structural and scalar events as soon as each token is
//! unambiguously complete. Nothing is ever re-tokenized: chunk boundaries may
//! fall inside strings, escape sequences, numbers, or keywords, and the
//! emitted event sequence is identical for every partition of the same
//! input. Memory use is bounded by the unconsumed input tail plus the
//! largest single token, never by the document size.
//!
//! Two front ends share the same engine:
//!
//! - [`StreamingParser`]: feed chunks, pull [`Event`]s through [`Iterator`].
//! - [`SaxParser`]: feed chunks, receive events as [`SaxHandler`] callbacks,
//!   with a per-event stop signal.
//!
//! ```rust
//! use jsax::{Event, Number, ParserOptions, StreamingParser};
//!
//! let mut parser = StreamingParser::new(ParserOptions::default());
//! parser.feed(r#"{"temperature"#).unwrap();
//! parser.feed(r#"": 21.5}"#).unwrap();
//!
//! let events: Vec<_> = parser.finish().collect::<Result<_, _>>().unwrap();
//! assert_eq!(
//!     events,
//!     [
//!         Event::ObjectBegin,
//!         Event::Key("temperature".into()),
//!         Event::Number(Number::Float(21.5)),
//!         Event::ObjectEnd,
//!         Event::DocumentEnd,
//!     ]
//! );
//! ```

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod buffer;
mod error;
mod escape_buffer;
mod event;
mod literal_buffer;
mod options;
mod parser;
mod position;
mod sax;

#[cfg(test)]
mod tests;

pub use error::{ErrorKind, GrammarError, LexError, ParserError};
pub use event::{Event, Number};
pub use options::{NumberMode, ParserOptions, DEFAULT_MAX_DEPTH};
pub use parser::{ClosedStreamingParser, StreamingParser};
pub use position::Position;
pub use sax::{Flow, SaxHandler, SaxParser};
