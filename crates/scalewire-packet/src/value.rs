/// Outcome of extracting one numeric field.
///
/// Malformed numeric text is a recoverable, local condition: the reading
/// counts as 0 and parsing continues. Carrying the distinction (rather than
/// collapsing straight to 0) lets callers tell "really was zero" from
/// "failed to parse".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    /// The field parsed cleanly.
    Parsed(i64),
    /// The field was absent or malformed; counts as 0.
    Defaulted,
}

impl FieldValue {
    /// The numeric value, with `Defaulted` degrading to 0.
    pub fn get(self) -> i64 {
        match self {
            Self::Parsed(value) => value,
            Self::Defaulted => 0,
        }
    }

    /// Whether this value came from a parse failure.
    pub fn is_defaulted(self) -> bool {
        matches!(self, Self::Defaulted)
    }
}
