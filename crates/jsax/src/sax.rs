//! Callback-style event delivery on top of [`StreamingParser`].
//!
//! A [`SaxHandler`] receives one method call per event, in document order.
//! Every callback returns a [`Flow`]; returning [`Flow::Stop`] aborts the
//! session, and the handler sees nothing further.

use crate::{
    error::ParserError,
    event::{Event, Number},
    options::ParserOptions,
    parser::StreamingParser,
};

/// Consumer verdict returned from every [`SaxHandler`] callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Flow {
    /// Keep delivering events.
    Continue,
    /// Stop the session; remaining input is discarded.
    Stop,
}

/// Receives parse events as method calls.
///
/// Every method defaults to `Flow::Continue`, so a handler implements only
/// the events it cares about.
///
/// # Examples
///
/// ```rust
/// use jsax::{Flow, ParserOptions, SaxHandler, SaxParser};
///
/// #[derive(Default)]
/// struct KeyCollector(Vec<String>);
///
/// impl SaxHandler for KeyCollector {
///     fn on_key(&mut self, key: &str) -> Flow {
///         self.0.push(key.to_owned());
///         Flow::Continue
///     }
/// }
///
/// let mut sax = SaxParser::new(ParserOptions::default(), KeyCollector::default());
/// assert_eq!(sax.feed(r#"{"a": 1, "b": {"c": 2}}"#).unwrap(), Flow::Continue);
/// let collector = sax.finish().unwrap();
/// assert_eq!(collector.0, ["a", "b", "c"]);
/// ```
pub trait SaxHandler {
    fn on_object_begin(&mut self) -> Flow {
        Flow::Continue
    }

    fn on_object_end(&mut self) -> Flow {
        Flow::Continue
    }

    fn on_array_begin(&mut self) -> Flow {
        Flow::Continue
    }

    fn on_array_end(&mut self) -> Flow {
        Flow::Continue
    }

    fn on_key(&mut self, key: &str) -> Flow {
        let _ = key;
        Flow::Continue
    }

    fn on_string(&mut self, value: &str) -> Flow {
        let _ = value;
        Flow::Continue
    }

    fn on_number(&mut self, value: &Number) -> Flow {
        let _ = value;
        Flow::Continue
    }

    fn on_boolean(&mut self, value: bool) -> Flow {
        let _ = value;
        Flow::Continue
    }

    fn on_null(&mut self) -> Flow {
        Flow::Continue
    }

    fn on_document_end(&mut self) -> Flow {
        Flow::Continue
    }
}

/// Drives a [`SaxHandler`] from chunked input.
///
/// Owns both the parser and the handler; each `feed` drains every event the
/// chunk made unambiguous and delivers it before returning.
#[derive(Debug)]
pub struct SaxParser<H> {
    parser: StreamingParser,
    handler: H,
    stopped: bool,
}

impl<H: SaxHandler> SaxParser<H> {
    pub fn new(options: ParserOptions, handler: H) -> Self {
        Self {
            parser: StreamingParser::new(options),
            handler,
            stopped: false,
        }
    }

    /// Feeds a chunk and delivers the resulting events.
    ///
    /// Returns `Ok(Flow::Stop)` when the handler stopped the session; the
    /// session is then terminal and further feeds fail with
    /// [`ErrorKind::SessionMisuse`](crate::ErrorKind::SessionMisuse).
    pub fn feed(&mut self, chunk: &str) -> Result<Flow, ParserError> {
        if self.stopped {
            return Err(self.parser.misuse_error("feed after stop"));
        }
        self.parser.feed(chunk)?;
        while let Some(event) = self.parser.next() {
            if self.deliver(event?) == Flow::Stop {
                self.stop();
                return Ok(Flow::Stop);
            }
        }
        Ok(Flow::Continue)
    }

    /// Signals end of input, delivers the remaining events, and returns the
    /// handler.
    ///
    /// A `Flow::Stop` during the final drain simply ends delivery early.
    pub fn finish(self) -> Result<H, ParserError> {
        if self.stopped {
            return Err(self.parser.misuse_error("finish after stop"));
        }
        let mut handler = self.handler;
        let mut closed = self.parser.finish();
        for event in &mut closed {
            if Self::deliver_to(&mut handler, event?) == Flow::Stop {
                break;
            }
        }
        Ok(handler)
    }

    /// Stops the session without consuming it; the handler stays accessible
    /// through [`into_handler`](Self::into_handler).
    pub fn abort(&mut self) {
        self.stop();
    }

    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Releases the handler, discarding the parser. Useful after a stop to
    /// recover whatever the handler aggregated.
    #[must_use]
    pub fn into_handler(self) -> H {
        self.handler
    }

    fn stop(&mut self) {
        self.stopped = true;
        self.parser.abort();
    }

    fn deliver(&mut self, event: Event) -> Flow {
        Self::deliver_to(&mut self.handler, event)
    }

    fn deliver_to(handler: &mut H, event: Event) -> Flow {
        match event {
            Event::ObjectBegin => handler.on_object_begin(),
            Event::ObjectEnd => handler.on_object_end(),
            Event::ArrayBegin => handler.on_array_begin(),
            Event::ArrayEnd => handler.on_array_end(),
            Event::Key(key) => handler.on_key(&key),
            Event::String(value) => handler.on_string(&value),
            Event::Number(value) => handler.on_number(&value),
            Event::Boolean(value) => handler.on_boolean(value),
            Event::Null => handler.on_null(),
            Event::DocumentEnd => handler.on_document_end(),
        }
    }
}
