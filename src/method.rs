use std::fmt;

/// HTTP request method: the eight registered verbs plus an escape hatch for
/// extension methods.
///
/// Equality on the named verbs is tag equality; equality on `Other` is
/// ASCII-case-insensitive. Normalization maps the canonical uppercase
/// strings to named verbs and everything else to `Other`.
#[derive(Debug, Clone, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Other(String),
}

impl Method {
    pub fn normalize(s: &str) -> Self {
        match s {
            "GET" => Method::Get,
            "HEAD" => Method::Head,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "CONNECT" => Method::Connect,
            "OPTIONS" => Method::Options,
            "TRACE" => Method::Trace,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Connect => "CONNECT",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Other(s) => s,
        }
    }
}

impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Method::Other(a), Method::Other(b)) => a.eq_ignore_ascii_case(b),
            (Method::Get, Method::Get)
            | (Method::Head, Method::Head)
            | (Method::Post, Method::Post)
            | (Method::Put, Method::Put)
            | (Method::Delete, Method::Delete)
            | (Method::Connect, Method::Connect)
            | (Method::Options, Method::Options)
            | (Method::Trace, Method::Trace) => true,
            _ => false,
        }
    }
}

impl Default for Method {
    fn default() -> Self {
        Method::Get
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&http::Method> for Method {
    fn from(m: &http::Method) -> Self {
        Method::normalize(m.as_str())
    }
}
