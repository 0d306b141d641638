mod parse_good;
mod sax;

use alloc::{string::String, vec::Vec};

use crate::{Event, ParserError, ParserOptions, StreamingParser};

/// Feeds `src` as a single chunk and drains every event.
pub(crate) fn parse_to_end(src: &str, options: ParserOptions) -> Result<Vec<Event>, ParserError> {
    let mut parser = StreamingParser::new(options);
    parser.feed(src)?;
    parser.finish().collect()
}

pub(crate) fn parse_default(src: &str) -> Result<Vec<Event>, ParserError> {
    parse_to_end(src, ParserOptions::default())
}

/// Feeds `src` split at a character boundary, draining events after each
/// chunk, so suspended lexer state actually gets exercised.
pub(crate) fn parse_split(src: &str, boundary: usize) -> Result<Vec<Event>, ParserError> {
    let chars: Vec<char> = src.chars().collect();
    let head: String = chars[..boundary].iter().collect();
    let tail: String = chars[boundary..].iter().collect();

    let mut parser = StreamingParser::new(ParserOptions::default());
    let mut events = Vec::new();
    parser.feed(&head)?;
    for event in parser.by_ref() {
        events.push(event?);
    }
    parser.feed(&tail)?;
    for event in parser.by_ref() {
        events.push(event?);
    }
    for event in parser.finish() {
        events.push(event?);
    }
    Ok(events)
}
