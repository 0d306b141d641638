use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};

use crate::{
    ErrorKind, Flow, GrammarError, Number, ParserOptions, SaxHandler, SaxParser,
};

/// Reconstructed document tree, for checking that callbacks arrive in an
/// order from which the document can actually be rebuilt.
#[derive(Debug, Clone, PartialEq)]
enum Value {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Vec<(String, Value)>),
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Value>,
    pending_keys: Vec<Option<String>>,
    finished: Vec<Value>,
    documents_ended: usize,
}

impl TreeBuilder {
    fn place(&mut self, value: Value) {
        match self.stack.last_mut() {
            None => self.finished.push(value),
            Some(Value::Array(items)) => items.push(value),
            Some(Value::Object(members)) => {
                let key = self
                    .pending_keys
                    .last_mut()
                    .and_then(Option::take)
                    .expect("value without a preceding key");
                members.push((key, value));
            }
            Some(other) => panic!("scalar {other:?} on the container stack"),
        }
    }
}

impl SaxHandler for TreeBuilder {
    fn on_object_begin(&mut self) -> Flow {
        self.stack.push(Value::Object(Vec::new()));
        self.pending_keys.push(None);
        Flow::Continue
    }

    fn on_object_end(&mut self) -> Flow {
        self.pending_keys.pop();
        let object = self.stack.pop().expect("unbalanced object end");
        self.place(object);
        Flow::Continue
    }

    fn on_array_begin(&mut self) -> Flow {
        self.stack.push(Value::Array(Vec::new()));
        Flow::Continue
    }

    fn on_array_end(&mut self) -> Flow {
        let array = self.stack.pop().expect("unbalanced array end");
        self.place(array);
        Flow::Continue
    }

    fn on_key(&mut self, key: &str) -> Flow {
        *self.pending_keys.last_mut().expect("key outside an object") =
            Some(key.to_string());
        Flow::Continue
    }

    fn on_string(&mut self, value: &str) -> Flow {
        self.place(Value::String(value.to_string()));
        Flow::Continue
    }

    fn on_number(&mut self, value: &Number) -> Flow {
        self.place(Value::Number(value.as_f64().unwrap()));
        Flow::Continue
    }

    fn on_boolean(&mut self, value: bool) -> Flow {
        self.place(Value::Boolean(value));
        Flow::Continue
    }

    fn on_null(&mut self) -> Flow {
        self.place(Value::Null);
        Flow::Continue
    }

    fn on_document_end(&mut self) -> Flow {
        self.documents_ended += 1;
        Flow::Continue
    }
}

#[test]
fn callbacks_rebuild_the_document() {
    let mut sax = SaxParser::new(ParserOptions::default(), TreeBuilder::default());
    assert_eq!(
        sax.feed("{\"a\":1,\"b\":[2,3.5,tr").unwrap(),
        Flow::Continue
    );
    assert_eq!(
        sax.feed("ue,null,\"x\\u00e9\"]}").unwrap(),
        Flow::Continue
    );
    let builder = sax.finish().unwrap();

    assert_eq!(builder.documents_ended, 1);
    assert_eq!(
        builder.finished,
        vec![Value::Object(vec![
            ("a".to_string(), Value::Number(1.0)),
            (
                "b".to_string(),
                Value::Array(vec![
                    Value::Number(2.0),
                    Value::Number(3.5),
                    Value::Boolean(true),
                    Value::Null,
                    Value::String("x\u{e9}".to_string()),
                ])
            ),
        ])]
    );
}

#[derive(Debug, Default)]
struct StopAtKey {
    target: &'static str,
    seen: Vec<String>,
}

impl SaxHandler for StopAtKey {
    fn on_key(&mut self, key: &str) -> Flow {
        self.seen.push(key.to_string());
        if key == self.target {
            Flow::Stop
        } else {
            Flow::Continue
        }
    }
}

#[test]
fn stop_signal_halts_delivery_and_session() {
    let handler = StopAtKey {
        target: "b",
        seen: Vec::new(),
    };
    let mut sax = SaxParser::new(ParserOptions::default(), handler);
    assert_eq!(
        sax.feed("{\"a\":1,\"b\":2,\"c\":3}").unwrap(),
        Flow::Stop
    );

    // The session is terminal: further feeding is misuse
    let err = sax.feed("{}").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SessionMisuse(_)));

    let handler = sax.into_handler();
    assert_eq!(handler.seen, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn finish_after_stop_is_misuse() {
    let handler = StopAtKey {
        target: "a",
        seen: Vec::new(),
    };
    let mut sax = SaxParser::new(ParserOptions::default(), handler);
    assert_eq!(sax.feed("{\"a\":1}").unwrap(), Flow::Stop);
    let err = sax.finish().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SessionMisuse(_)));
}

#[test]
fn parse_errors_surface_through_feed() {
    let mut sax = SaxParser::new(ParserOptions::default(), TreeBuilder::default());
    let err = sax.feed("[1,]").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Grammar(GrammarError::TrailingComma));
}

#[test]
fn finish_drains_remaining_events() {
    let mut sax = SaxParser::new(ParserOptions::default(), TreeBuilder::default());
    assert_eq!(sax.feed("\"done").unwrap(), Flow::Continue);
    assert_eq!(sax.feed("\"").unwrap(), Flow::Continue);
    let builder = sax.finish().unwrap();
    assert_eq!(builder.finished, vec![Value::String("done".to_string())]);
    assert_eq!(builder.documents_ended, 1);
}

#[test]
fn default_handler_methods_accept_everything() {
    struct NullCounter(usize);

    impl SaxHandler for NullCounter {
        fn on_null(&mut self) -> Flow {
            self.0 += 1;
            Flow::Continue
        }
    }

    let mut sax = SaxParser::new(ParserOptions::default(), NullCounter(0));
    assert_eq!(
        sax.feed("[null,{\"a\":null},null]").unwrap(),
        Flow::Continue
    );
    let counter = sax.finish().unwrap();
    assert_eq!(counter.0, 3);
}

#[test]
fn abort_makes_the_session_terminal() {
    let mut sax = SaxParser::new(ParserOptions::default(), TreeBuilder::default());
    assert_eq!(sax.feed("[1,2").unwrap(), Flow::Continue);
    sax.abort();
    assert!(sax.feed("]").is_err());
}
