/// Which keyword literal the matcher is expecting to complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Literal {
    Null,
    True,
    False,
}

/// What happened after feeding one more character into the literal matcher?
pub(crate) enum Step {
    /// Character matched, but the literal is not finished yet.
    NeedMore,
    /// Character matched *and* we consumed the last byte of the literal.
    Done(Literal),
    /// Character did **not** match the expected byte.
    Reject,
}

/// `None`  ➜  we are **not** in the middle of a literal
/// `Some`  ➜  `(remaining_bytes, literal)` while matching
///
/// Matching is by exact, case-sensitive prefix; the remaining-byte slice is
/// the only state, so a keyword split across chunks resumes where it left off.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ExpectedLiteralBuffer(Option<(&'static [u8], Literal)>);

impl ExpectedLiteralBuffer {
    /// No literal is in flight
    pub fn none() -> Self {
        ExpectedLiteralBuffer(None)
    }

    /// Start matching after the *first* character (`n`, `t`, or `f`)
    pub fn new(first: char) -> Self {
        match first {
            'n' => ExpectedLiteralBuffer(Some((b"ull", Literal::Null))),
            't' => ExpectedLiteralBuffer(Some((b"rue", Literal::True))),
            'f' => ExpectedLiteralBuffer(Some((b"alse", Literal::False))),
            _ => ExpectedLiteralBuffer::none(),
        }
    }

    /// Give the matcher the next input character and learn what to do next.
    pub fn step(&mut self, c: char) -> Step {
        // If we are not in the middle of a literal, any char is a reject
        let Some((bytes, kind)) = self.0.take() else {
            return Step::Reject;
        };

        match bytes.split_first() {
            Some((b, rest)) if *b as char == c => {
                if rest.is_empty() {
                    Step::Done(kind)
                } else {
                    self.0 = Some((rest, kind));
                    Step::NeedMore
                }
            }
            _ => {
                self.0 = Some((bytes, kind));
                Step::Reject
            }
        }
    }
}
