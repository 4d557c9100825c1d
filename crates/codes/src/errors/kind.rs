/// Classification of code errors.
///
/// # Behavior Summary
///
/// | Kind | Caused by | May a caller fall back to the raw input? |
/// |------|-----------|------------------------------------------|
/// | `Input` | The code itself | Yes |
/// | `Lookup` | A table miss | Yes |
/// | `Configuration` | Broken tables or reference data | No, fail at startup |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The code is structurally invalid or uses an unknown numbering pattern.
    Input,

    /// The code parsed but its exchange token or product root is not known.
    Lookup,

    /// Alias tables or reference data are inconsistent.
    /// Raised while building tables, never during canonicalization.
    Configuration,
}

impl ErrorKind {
    /// Whether this error must abort the process rather than be worked around.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration)
    }
}
