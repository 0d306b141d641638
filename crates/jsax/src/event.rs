//! Events emitted by the streaming parser.

use alloc::string::String;

/// Payload of a [`Event::Number`], shaped by
/// [`NumberMode`](crate::NumberMode).
///
/// In `Literal` mode the untouched source text is carried through, deferring
/// all precision decisions to the consumer. `Exact` mode decodes
/// integer-shaped literals to `i64` and everything else to `f64`; `Float`
/// mode decodes everything to `f64`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Number {
    Literal(String),
    Int(i64),
    Float(f64),
}

impl Number {
    /// The numeric value as an `f64`, decoding literal text if necessary.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Number::Literal(text) => text.parse().ok(),
            #[allow(clippy::cast_precision_loss)]
            Number::Int(i) => Some(*i as f64),
            Number::Float(f) => Some(*f),
        }
    }
}

/// One structural or scalar recognition, delivered in document order.
///
/// Events are emitted as soon as the underlying token is unambiguously
/// complete; they carry nothing beyond their own scalar payload. A `Key` is
/// always followed (possibly after nested container events) by exactly one
/// value before the next key or the enclosing object's end. `DocumentEnd` is
/// emitted exactly once per session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Event {
    ObjectBegin,
    ObjectEnd,
    ArrayBegin,
    ArrayEnd,
    Key(String),
    String(String),
    Number(Number),
    Boolean(bool),
    Null,
    DocumentEnd,
}
