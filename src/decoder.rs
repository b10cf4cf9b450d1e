use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Stable identity of a decoder. Two edges in the trie are the same edge iff
/// their tags are equal, so identity must survive cloning but distinguish
/// independently constructed user decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DecoderTag {
    Int,
    Int32,
    Int64,
    Float,
    Bool,
    Str,
    User(u64),
}

impl DecoderTag {
    /// Edge preference rank: narrower built-ins first, user decoders after
    /// all built-ins. User decoders are not ordered here; the trie keeps
    /// them in first-insertion order.
    pub(crate) fn rank(self) -> u8 {
        match self {
            DecoderTag::Int => 0,
            DecoderTag::Int32 => 1,
            DecoderTag::Int64 => 2,
            DecoderTag::Float => 3,
            DecoderTag::Bool => 4,
            DecoderTag::Str => 5,
            DecoderTag::User(_) => 6,
        }
    }
}

static NEXT_USER_TAG: AtomicU64 = AtomicU64::new(0);

/// A named converter from one raw URI token to a typed value.
///
/// Decoders are plain values: cloning preserves identity (the clone matches
/// the same trie edge), while every call to [`Decoder::new`] mints a fresh
/// identity even for a byte-identical parse function.
pub struct Decoder<T> {
    name: Arc<str>,
    tag: DecoderTag,
    parse: Arc<dyn Fn(&str) -> Option<T> + Send + Sync>,
}

impl<T> Clone for Decoder<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            tag: self.tag,
            parse: self.parse.clone(),
        }
    }
}

impl<T> fmt::Debug for Decoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

impl<T: Send + Sync + 'static> Decoder<T> {
    /// Create a user decoder. `name` is informational only; identity comes
    /// from a generated tag.
    pub fn new(
        name: impl Into<Arc<str>>,
        parse: impl Fn(&str) -> Option<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            tag: DecoderTag::User(NEXT_USER_TAG.fetch_add(1, Ordering::Relaxed)),
            parse: Arc::new(parse),
        }
    }

    fn builtin(
        name: &'static str,
        tag: DecoderTag,
        parse: impl Fn(&str) -> Option<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            tag,
            parse: Arc::new(parse),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attempt to decode one token. `None` means the token is rejected.
    pub fn decode(&self, token: &str) -> Option<T> {
        (*self.parse)(token)
    }

    pub(crate) fn erase(&self) -> ErasedDecoder {
        let parse = self.parse.clone();
        ErasedDecoder {
            name: self.name.clone(),
            tag: self.tag,
            parse: Arc::new(move |token| {
                (*parse)(token).map(|v| Box::new(v) as Box<dyn Any + Send + Sync>)
            }),
        }
    }
}

/// Type-erased decoder as stored on a trie edge. Decoded values travel as
/// `Box<dyn Any>` and are downcast back by the route's binder.
#[derive(Clone)]
pub(crate) struct ErasedDecoder {
    name: Arc<str>,
    pub(crate) tag: DecoderTag,
    parse: Arc<dyn Fn(&str) -> Option<Box<dyn Any + Send + Sync>> + Send + Sync>,
}

impl ErasedDecoder {
    pub(crate) fn decode(&self, token: &str) -> Option<Box<dyn Any + Send + Sync>> {
        (*self.parse)(token)
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for ErasedDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedDecoder")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// Shared lexical rules for the signed integer family: base-10 digits with
/// an optional leading `-`. A leading `+` is rejected, redundant leading
/// zeros are accepted, overflow fails.
fn parse_signed<T: std::str::FromStr>(token: &str) -> Option<T> {
    if token.is_empty() || token.starts_with('+') {
        return None;
    }
    token.parse().ok()
}

/// Platform signed integer.
pub fn int() -> Decoder<isize> {
    Decoder::builtin("int", DecoderTag::Int, parse_signed)
}

pub fn int32() -> Decoder<i32> {
    Decoder::builtin("int32", DecoderTag::Int32, parse_signed)
}

pub fn int64() -> Decoder<i64> {
    Decoder::builtin("int64", DecoderTag::Int64, parse_signed)
}

pub fn float() -> Decoder<f64> {
    Decoder::builtin("float", DecoderTag::Float, |token| token.parse().ok())
}

/// Strictly the lowercase literals `true` and `false`.
pub fn boolean() -> Decoder<bool> {
    Decoder::builtin("bool", DecoderTag::Bool, |token| match token {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    })
}

/// Any non-empty token. A zero-length segment never matches.
pub fn string() -> Decoder<String> {
    Decoder::builtin("string", DecoderTag::Str, |token| {
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_accepts_signed_base10() {
        let d = int();
        assert_eq!(d.decode("0"), Some(0));
        assert_eq!(d.decode("100001"), Some(100001));
        assert_eq!(d.decode("-42"), Some(-42));
    }

    #[test]
    fn int_rejects_leading_plus() {
        assert_eq!(int().decode("+5"), None);
        assert_eq!(int64().decode("+5"), None);
    }

    #[test]
    fn int_accepts_leading_zeros() {
        assert_eq!(int().decode("007"), Some(7));
        assert_eq!(int32().decode("00"), Some(0));
    }

    #[test]
    fn int_rejects_empty_and_garbage() {
        assert_eq!(int().decode(""), None);
        assert_eq!(int().decode("12a"), None);
        assert_eq!(int().decode("-"), None);
    }

    #[test]
    fn int32_rejects_overflow() {
        assert_eq!(int32().decode("2147483647"), Some(i32::MAX));
        assert_eq!(int32().decode("2147483648"), None);
    }

    #[test]
    fn int64_rejects_overflow() {
        assert_eq!(int64().decode("9223372036854775807"), Some(i64::MAX));
        assert_eq!(int64().decode("9223372036854775808"), None);
    }

    #[test]
    fn bool_is_strict() {
        let d = boolean();
        assert_eq!(d.decode("true"), Some(true));
        assert_eq!(d.decode("false"), Some(false));
        assert_eq!(d.decode("True"), None);
        assert_eq!(d.decode("1"), None);
        assert_eq!(d.decode(""), None);
    }

    #[test]
    fn float_accepts_decimal_notation() {
        let d = float();
        assert_eq!(d.decode("100001.1"), Some(100001.1));
        assert_eq!(d.decode("-0.5"), Some(-0.5));
        assert_eq!(d.decode("about"), None);
    }

    #[test]
    fn string_rejects_empty() {
        let d = string();
        assert_eq!(d.decode("dyson350"), Some("dyson350".to_string()));
        assert_eq!(d.decode(""), None);
    }

    #[test]
    fn builtin_identity_is_shared_across_constructions() {
        assert_eq!(int().tag, int().tag);
        assert_eq!(float().tag, float().tag);
    }

    #[test]
    fn user_decoders_are_distinct_even_with_same_name() {
        let a = Decoder::new("fruit", |t: &str| (t == "apple").then(|| t.to_string()));
        let b = Decoder::new("fruit", |t: &str| (t == "apple").then(|| t.to_string()));
        assert_ne!(a.tag, b.tag);
        // A clone is the same decoder.
        assert_eq!(a.tag, a.clone().tag);
    }
}
