use alloc::{string::String, vec, vec::Vec};

use super::{parse_default, parse_to_end};
use crate::{
    Event, Number, NumberMode, ParserOptions, StreamingParser,
};

fn key(k: &str) -> Event {
    Event::Key(String::from(k))
}

fn string(s: &str) -> Event {
    Event::String(String::from(s))
}

fn int(i: i64) -> Event {
    Event::Number(Number::Int(i))
}

fn float(f: f64) -> Event {
    Event::Number(Number::Float(f))
}

#[test]
fn mixed_document_event_sequence() {
    let events = parse_default("{\"a\":1,\"b\":[2,3.5,true,null,\"x\\u00e9\"]}").unwrap();
    assert_eq!(
        events,
        vec![
            Event::ObjectBegin,
            key("a"),
            int(1),
            key("b"),
            Event::ArrayBegin,
            int(2),
            float(3.5),
            Event::Boolean(true),
            Event::Null,
            string("x\u{e9}"),
            Event::ArrayEnd,
            Event::ObjectEnd,
            Event::DocumentEnd,
        ]
    );
}

#[test]
fn empty_containers() {
    assert_eq!(
        parse_default("{}").unwrap(),
        vec![Event::ObjectBegin, Event::ObjectEnd, Event::DocumentEnd]
    );
    assert_eq!(
        parse_default("[]").unwrap(),
        vec![Event::ArrayBegin, Event::ArrayEnd, Event::DocumentEnd]
    );
    assert_eq!(
        parse_default(r#"{"a":{}}"#).unwrap(),
        vec![
            Event::ObjectBegin,
            key("a"),
            Event::ObjectBegin,
            Event::ObjectEnd,
            Event::ObjectEnd,
            Event::DocumentEnd,
        ]
    );
}

#[test]
fn top_level_scalars() {
    assert_eq!(
        parse_default("true").unwrap(),
        vec![Event::Boolean(true), Event::DocumentEnd]
    );
    assert_eq!(
        parse_default("null").unwrap(),
        vec![Event::Null, Event::DocumentEnd]
    );
    assert_eq!(
        parse_default(r#""hi""#).unwrap(),
        vec![string("hi"), Event::DocumentEnd]
    );
    assert_eq!(parse_default("42").unwrap(), vec![int(42), Event::DocumentEnd]);
    assert_eq!(
        parse_default("-0.5e3").unwrap(),
        vec![float(-500.0), Event::DocumentEnd]
    );
}

#[test]
fn interstitial_whitespace_is_skipped() {
    let events = parse_default(" \t{\r\n  \"a\" :\t1 ,\n \"b\" : [ ] }\n").unwrap();
    assert_eq!(
        events,
        vec![
            Event::ObjectBegin,
            key("a"),
            int(1),
            key("b"),
            Event::ArrayBegin,
            Event::ArrayEnd,
            Event::ObjectEnd,
            Event::DocumentEnd,
        ]
    );
}

#[test]
fn simple_escapes_decode() {
    let events = parse_default(r#""\"\\\/\b\f\n\r\t""#).unwrap();
    assert_eq!(
        events,
        vec![string("\"\\/\u{8}\u{c}\n\r\t"), Event::DocumentEnd]
    );
}

#[test]
fn unicode_escapes_decode() {
    assert_eq!(
        parse_default("\"\\u0041\\u00e9\"").unwrap(),
        vec![string("A\u{e9}"), Event::DocumentEnd]
    );
    // A surrogate pair decodes to one code point
    assert_eq!(
        parse_default("\"\\ud83d\\ude00\"").unwrap(),
        vec![string("\u{1F600}"), Event::DocumentEnd]
    );
}

#[test]
fn escaped_keys_decode() {
    assert_eq!(
        parse_default("{\"\\u0041\":null}").unwrap(),
        vec![
            Event::ObjectBegin,
            key("A"),
            Event::Null,
            Event::ObjectEnd,
            Event::DocumentEnd,
        ]
    );
}

#[test]
fn i64_boundaries_stay_exact() {
    assert_eq!(
        parse_default("9223372036854775807").unwrap(),
        vec![int(i64::MAX), Event::DocumentEnd]
    );
    assert_eq!(
        parse_default("-9223372036854775808").unwrap(),
        vec![int(i64::MIN), Event::DocumentEnd]
    );
    // One past i64::MAX falls back to f64 rather than erroring
    assert_eq!(
        parse_default("9223372036854775808").unwrap(),
        vec![float(9_223_372_036_854_775_808.0), Event::DocumentEnd]
    );
}

#[test]
fn literal_number_mode_preserves_source_text() {
    let options = ParserOptions {
        number_mode: NumberMode::Literal,
        ..Default::default()
    };
    assert_eq!(
        parse_to_end("[3.50, -0, 1e2]", options).unwrap(),
        vec![
            Event::ArrayBegin,
            Event::Number(Number::Literal(String::from("3.50"))),
            Event::Number(Number::Literal(String::from("-0"))),
            Event::Number(Number::Literal(String::from("1e2"))),
            Event::ArrayEnd,
            Event::DocumentEnd,
        ]
    );
}

#[test]
fn float_number_mode_decodes_integers_too() {
    let options = ParserOptions {
        number_mode: NumberMode::Float,
        ..Default::default()
    };
    assert_eq!(
        parse_to_end("7", options).unwrap(),
        vec![float(7.0), Event::DocumentEnd]
    );
}

#[test]
fn document_end_is_emitted_before_close() {
    // Once the top-level value is complete, no close signal is needed.
    let mut parser = StreamingParser::new(ParserOptions::default());
    parser.feed(r#"{"a":1}"#).unwrap();
    let events: Vec<_> = parser.by_ref().map(Result::unwrap).collect();
    assert_eq!(events.last(), Some(&Event::DocumentEnd));
}

#[test]
fn top_level_sequence_of_documents() {
    let options = ParserOptions {
        allow_top_level_sequence: true,
        ..Default::default()
    };
    let events = parse_to_end(r#"{"a":1} {"b":2}"#, options).unwrap();
    assert_eq!(
        events,
        vec![
            Event::ObjectBegin,
            key("a"),
            int(1),
            Event::ObjectEnd,
            Event::ObjectBegin,
            key("b"),
            int(2),
            Event::ObjectEnd,
            Event::DocumentEnd,
        ]
    );
}

#[test]
fn top_level_sequence_of_scalars() {
    let options = ParserOptions {
        allow_top_level_sequence: true,
        ..Default::default()
    };
    assert_eq!(
        parse_to_end("123 45 678 9", options).unwrap(),
        vec![
            int(123),
            int(45),
            int(678),
            int(9),
            Event::DocumentEnd
        ]
    );
}

#[test]
fn empty_sequence_is_allowed() {
    let options = ParserOptions {
        allow_top_level_sequence: true,
        ..Default::default()
    };
    assert!(parse_to_end("  \n ", options).unwrap().is_empty());
}

#[test]
fn tokens_resume_across_feeds() {
    let mut parser = StreamingParser::new(ParserOptions::default());
    let mut events = Vec::new();
    for chunk in ["[fa", "lse, 12", "3, \"a\\u00", "e9b\"]"] {
        parser.feed(chunk).unwrap();
        for event in parser.by_ref() {
            events.push(event.unwrap());
        }
    }
    for event in parser.finish() {
        events.push(event.unwrap());
    }
    assert_eq!(
        events,
        vec![
            Event::ArrayBegin,
            Event::Boolean(false),
            int(123),
            string("a\u{e9}b"),
            Event::ArrayEnd,
            Event::DocumentEnd,
        ]
    );
}
