//! Positional command arguments with typed accessors and uniform defaulting.

/// Borrowed view over the whitespace-split tokens after the command name.
///
/// Accessors never fail: malformed or missing values yield `None`, and the
/// `*_or` variants substitute the command's documented default.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Args<'a> {
    tokens: &'a [String],
}

impl<'a> Args<'a> {
    pub(crate) fn new(tokens: &'a [String]) -> Self {
        Self { tokens }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub(crate) fn str_at(&self, index: usize) -> Option<&'a str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Strictly positive integer at `index`, if parseable.
    pub(crate) fn positive_u64(&self, index: usize) -> Option<u64> {
        self.str_at(index)?
            .parse::<u64>()
            .ok()
            .filter(|value| *value > 0)
    }

    /// Strictly positive integer at `index`, or the documented default.
    pub(crate) fn positive_u64_or(&self, index: usize, default: u64) -> u64 {
        self.positive_u64(index).unwrap_or(default)
    }

    /// Strictly positive finite float at `index`, if parseable.
    pub(crate) fn positive_f32(&self, index: usize) -> Option<f32> {
        self.str_at(index)?
            .parse::<f32>()
            .ok()
            .filter(|value| value.is_finite() && *value > 0.0)
    }

    /// One-based index at `index` converted to zero-based, if in `0..len`.
    pub(crate) fn one_based_index(&self, index: usize, len: usize) -> Option<usize> {
        let raw = self.str_at(index)?.parse::<usize>().ok()?;
        raw.checked_sub(1).filter(|zero_based| *zero_based < len)
    }
}
