/// Default limit on composite nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// How string payloads are checked when decoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TextPolicy {
    /// Payloads are arbitrary bytes.
    Bytes,
    /// Payloads, dictionary keys included, must be valid UTF-8.
    Utf8,
}

impl Default for TextPolicy {
    fn default() -> Self { TextPolicy::Bytes }
}

/// Settings shared by the encoder and decoder.
///
/// # Example
///
/// ```
/// use emp::prelude::*;
///
/// let opts = Options::new().with_max_depth(4).with_text_policy(TextPolicy::Utf8);
///
/// // five nested arrays is one too many
/// let mut ks = Value::Null;
/// for _ in 0..5 {
///     ks = Value::Array(vec![ks]);
/// }
///
/// assert!(encode_with(&ks, &mut Vec::new(), &opts).is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Maximum number of nested arrays and dictionaries.
    pub max_depth: usize,
    /// Checks applied to decoded strings.
    pub text: TextPolicy,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_depth: DEFAULT_MAX_DEPTH,
            text: TextPolicy::default(),
        }
    }
}

impl Options {
    /// Creates the default options.
    pub fn new() -> Self { Self::default() }

    /// Sets the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the text policy.
    pub fn with_text_policy(mut self, text: TextPolicy) -> Self {
        self.text = text;
        self
    }
}
