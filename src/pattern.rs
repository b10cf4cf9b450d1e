use std::marker::PhantomData;

use crate::decoder::{self, Decoder, ErasedDecoder};
use crate::error::PatternError;
use crate::handler::Append;

/// One element of a pattern's path, in declaration order. Exactly one
/// terminator (`End`, `Slash`, or `Splat`) occurs, and only last; the typed
/// builder makes any other shape unrepresentable.
#[derive(Debug, Clone)]
pub(crate) enum PathNode {
    Exact(String),
    Capture(ErasedDecoder),
    Wildcard,
    Splat,
    Slash,
    End,
}

/// One clause of a pattern's query sub-language. Clauses are unordered for
/// matching but keep declaration order, which is the order query captures
/// are handed to the handler.
#[derive(Debug, Clone)]
pub(crate) enum QueryClause {
    Exact { name: String, value: String },
    Capture { name: String, decoder: ErasedDecoder },
}

impl QueryClause {
    pub(crate) fn name(&self) -> &str {
        match self {
            QueryClause::Exact { name, .. } | QueryClause::Capture { name, .. } => name,
        }
    }

    pub(crate) fn is_exact(&self) -> bool {
        matches!(self, QueryClause::Exact { .. })
    }

    /// Same clause: same name, same kind, same literal value or decoder
    /// identity. Used to detect terminal replacement.
    pub(crate) fn same_shape(&self, other: &QueryClause) -> bool {
        match (self, other) {
            (
                QueryClause::Exact { name: a, value: va },
                QueryClause::Exact { name: b, value: vb },
            ) => a == b && va == vb,
            (
                QueryClause::Capture { name: a, decoder: da },
                QueryClause::Capture { name: b, decoder: db },
            ) => a == b && da.tag == db.tag,
            _ => false,
        }
    }
}

/// Start a pattern at the root path.
pub fn root() -> PathBuilder<()> {
    PathBuilder {
        path: Vec::new(),
        _args: PhantomData,
    }
}

/// A pattern still accepting path nodes. `Args` is the tuple of capture
/// output types accumulated so far; every capturing extension appends to it,
/// so the finished pattern carries its handler's exact parameter list.
#[derive(Debug, Clone)]
pub struct PathBuilder<Args = ()> {
    path: Vec<PathNode>,
    _args: PhantomData<fn() -> Args>,
}

impl<Args> PathBuilder<Args> {
    /// Append a literal segment. Empty literals and literals containing `/`
    /// can never equal a request segment and are rejected.
    pub fn seg(self, literal: impl Into<String>) -> Result<Self, PatternError> {
        let literal = literal.into();
        if literal.is_empty() {
            return Err(PatternError::EmptyLiteral);
        }
        if literal.contains('/') {
            return Err(PatternError::LiteralContainsSlash(literal));
        }
        let mut path = self.path;
        path.push(PathNode::Exact(literal));
        Ok(PathBuilder {
            path,
            _args: PhantomData,
        })
    }

    /// Append a typed single-segment capture.
    pub fn capture<T>(self, decoder: &Decoder<T>) -> PathBuilder<Args::Out>
    where
        Args: Append<T>,
        T: Send + Sync + 'static,
    {
        let mut path = self.path;
        path.push(PathNode::Capture(decoder.erase()));
        PathBuilder {
            path,
            _args: PhantomData,
        }
    }

    pub fn int(self) -> PathBuilder<Args::Out>
    where
        Args: Append<isize>,
    {
        self.capture(&decoder::int())
    }

    pub fn int32(self) -> PathBuilder<Args::Out>
    where
        Args: Append<i32>,
    {
        self.capture(&decoder::int32())
    }

    pub fn int64(self) -> PathBuilder<Args::Out>
    where
        Args: Append<i64>,
    {
        self.capture(&decoder::int64())
    }

    pub fn float(self) -> PathBuilder<Args::Out>
    where
        Args: Append<f64>,
    {
        self.capture(&decoder::float())
    }

    pub fn boolean(self) -> PathBuilder<Args::Out>
    where
        Args: Append<bool>,
    {
        self.capture(&decoder::boolean())
    }

    pub fn string(self) -> PathBuilder<Args::Out>
    where
        Args: Append<String>,
    {
        self.capture(&decoder::string())
    }

    /// Append an untyped single-segment capture (`*`), always string-typed.
    pub fn wildcard(self) -> PathBuilder<Args::Out>
    where
        Args: Append<String>,
    {
        let mut path = self.path;
        path.push(PathNode::Wildcard);
        PathBuilder {
            path,
            _args: PhantomData,
        }
    }

    /// Terminate: no more segments and no trailing slash.
    pub fn end(self) -> Pattern<Args> {
        let mut path = self.path;
        path.push(PathNode::End);
        Pattern {
            path,
            query: Vec::new(),
            _args: PhantomData,
        }
    }

    /// Terminate: a trailing `/` must be present and then the path ends.
    pub fn slash(self) -> Pattern<Args> {
        let mut path = self.path;
        path.push(PathNode::Slash);
        Pattern {
            path,
            query: Vec::new(),
            _args: PhantomData,
        }
    }

    /// Terminate with a full splat (`**`): consumes the remaining path
    /// segments and the raw query, captured as a single string.
    pub fn splat(self) -> Pattern<Args::Out>
    where
        Args: Append<String>,
    {
        let mut path = self.path;
        path.push(PathNode::Splat);
        Pattern {
            path,
            query: Vec::new(),
            _args: PhantomData,
        }
    }
}

/// A terminated pattern. Query clauses may still be added; `Args` is the
/// full capture tuple (path captures first, then query captures in
/// declaration order).
#[derive(Debug, Clone)]
pub struct Pattern<Args = ()> {
    pub(crate) path: Vec<PathNode>,
    pub(crate) query: Vec<QueryClause>,
    _args: PhantomData<fn() -> Args>,
}

impl<Args> Pattern<Args> {
    fn check_query_name(&self, name: &str) -> Result<(), PatternError> {
        if name.is_empty() {
            return Err(PatternError::EmptyQueryName);
        }
        if self.query.iter().any(|c| c.name() == name) {
            return Err(PatternError::DuplicateQueryParam(name.to_string()));
        }
        Ok(())
    }

    /// Require parameter `name` with the exact literal `value`.
    pub fn query(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, PatternError> {
        let name = name.into();
        self.check_query_name(&name)?;
        self.query.push(QueryClause::Exact {
            name,
            value: value.into(),
        });
        Ok(self)
    }

    /// Require parameter `name` and decode its value as a capture.
    pub fn query_capture<T>(
        self,
        name: impl Into<String>,
        decoder: &Decoder<T>,
    ) -> Result<Pattern<Args::Out>, PatternError>
    where
        Args: Append<T>,
        T: Send + Sync + 'static,
    {
        let name = name.into();
        self.check_query_name(&name)?;
        let mut query = self.query;
        query.push(QueryClause::Capture {
            name,
            decoder: decoder.erase(),
        });
        Ok(Pattern {
            path: self.path,
            query,
            _args: PhantomData,
        })
    }

    pub fn query_int(self, name: impl Into<String>) -> Result<Pattern<Args::Out>, PatternError>
    where
        Args: Append<isize>,
    {
        self.query_capture(name, &decoder::int())
    }

    pub fn query_int32(self, name: impl Into<String>) -> Result<Pattern<Args::Out>, PatternError>
    where
        Args: Append<i32>,
    {
        self.query_capture(name, &decoder::int32())
    }

    pub fn query_int64(self, name: impl Into<String>) -> Result<Pattern<Args::Out>, PatternError>
    where
        Args: Append<i64>,
    {
        self.query_capture(name, &decoder::int64())
    }

    pub fn query_float(self, name: impl Into<String>) -> Result<Pattern<Args::Out>, PatternError>
    where
        Args: Append<f64>,
    {
        self.query_capture(name, &decoder::float())
    }

    pub fn query_bool(self, name: impl Into<String>) -> Result<Pattern<Args::Out>, PatternError>
    where
        Args: Append<bool>,
    {
        self.query_capture(name, &decoder::boolean())
    }

    pub fn query_string(self, name: impl Into<String>) -> Result<Pattern<Args::Out>, PatternError>
    where
        Args: Append<String>,
    {
        self.query_capture(name, &decoder::string())
    }
}
