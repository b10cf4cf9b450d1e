use std::fmt;

/// Pattern construction errors. Arity and capture-type mismatches are ruled
/// out by the typed builder, so the only runtime-rejectable inputs are
/// malformed literals and duplicate query parameter names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    EmptyLiteral,
    LiteralContainsSlash(String),
    EmptyQueryName,
    DuplicateQueryParam(String),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::EmptyLiteral => write!(f, "literal segment is empty"),
            PatternError::LiteralContainsSlash(s) => {
                write!(f, "literal segment {s:?} contains '/'")
            }
            PatternError::EmptyQueryName => write!(f, "query parameter name is empty"),
            PatternError::DuplicateQueryParam(name) => {
                write!(f, "duplicate query parameter {name:?} in pattern")
            }
        }
    }
}

impl std::error::Error for PatternError {}
