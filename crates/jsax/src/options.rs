/// Default for [`ParserOptions::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// How [`Event::Number`](crate::Event) payloads are carried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberMode {
    /// Carry the literal source text, untouched.
    Literal,
    /// Decode every number to `f64`.
    Float,
    /// Decode integer-shaped literals to `i64` (falling back to `f64` when
    /// they overflow) and fractional/exponent literals to `f64`.
    #[default]
    Exact,
}

/// Configuration options for a streaming parse session.
///
/// # Examples
///
/// ```rust
/// use jsax::{ParserOptions, StreamingParser};
///
/// let _parser = StreamingParser::new(ParserOptions {
///     allow_top_level_sequence: true,
///     ..Default::default()
/// });
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParserOptions {
    /// Maximum container nesting depth. Opening a container beyond this
    /// limit is a fatal [`DepthExceeded`](crate::ErrorKind::DepthExceeded)
    /// error, raised before the frame is pushed.
    ///
    /// # Default
    ///
    /// `1000`
    pub max_depth: usize,

    /// Whether to accept a sequence of whitespace-delimited top-level values
    /// instead of erroring after the first.
    ///
    /// When `true`, the parser resets to "expect a new value" after each
    /// completed top-level value. This supports formats such as JSON Lines
    /// (JSONL) and newline-delimited JSON (ND-JSON), and arbitrary
    /// concatenation of JSON values.
    ///
    /// # Examples
    ///
    /// ```json
    /// {}{}{}
    /// ```
    ///
    /// ```json
    /// 123 45 678 9
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub allow_top_level_sequence: bool,

    /// How number payloads are carried; see [`NumberMode`].
    ///
    /// # Default
    ///
    /// [`NumberMode::Exact`]
    pub number_mode: NumberMode,

    /// Upper bound, in bytes of decoded content, on a single string token
    /// (values and keys alike). `None` means unlimited.
    ///
    /// # Default
    ///
    /// `None`
    pub max_string_length: Option<usize>,

    /// Upper bound, in bytes, on a single number literal. `None` means
    /// unlimited.
    ///
    /// # Default
    ///
    /// `None`
    pub max_number_length: Option<usize>,

    #[cfg(test)]
    /// Panic on syntax errors instead of returning them.
    ///
    /// Enabled only in test builds to produce backtraces on parse failures.
    pub panic_on_error: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_top_level_sequence: false,
            number_mode: NumberMode::default(),
            max_string_length: None,
            max_number_length: None,
            #[cfg(test)]
            panic_on_error: false,
        }
    }
}
