//! Query string decoding
//!
//! Parses the query component of a URI into an ordered multi-map. Keys keep
//! the order of their first occurrence; repeated keys accumulate their values
//! in encounter order.
//!
//! Decoding follows `application/x-www-form-urlencoded` rules: `+` becomes a
//! space and `%XX` escapes are decoded as UTF-8. Invalid UTF-8 sequences are
//! replaced with U+FFFD and malformed escapes are kept verbatim, so parsing
//! never fails.

use std::borrow::Cow;

use url::Url;

/// Ordered key → values mapping decoded from a query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, Vec<String>)>,
}

impl QueryParams {
    /// All values recorded for `key`, in encounter order
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, values)| values.as_slice())
    }

    /// First value recorded for `key`
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|values| values.first()).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of distinct keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in first-occurrence order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    fn push(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }
}

/// Parse the query component of `url`
///
/// An absent or empty query yields an empty mapping.
#[must_use]
pub fn parse_query(url: &Url) -> QueryParams {
    url.query().map(parse_query_str).unwrap_or_default()
}

/// Parse a raw (still percent-encoded) query string, without the leading `?`
///
/// Fragments are split on the first `=`. A fragment without `=`, or whose
/// `=` is its first character, is taken whole as the key with an empty
/// value. Empty fragments (as in `a=1&&b=2`) are skipped.
#[must_use]
pub fn parse_query_str(query: &str) -> QueryParams {
    let mut params = QueryParams::default();

    for fragment in query.split('&').filter(|f| !f.is_empty()) {
        let (key, value) = match fragment.find('=') {
            Some(idx) if idx > 0 => (&fragment[..idx], &fragment[idx + 1..]),
            _ => (fragment, ""),
        };
        params.push(decode_component(key), decode_component(value));
    }

    params
}

fn decode_component(raw: &str) -> String {
    let spaced: Cow<'_, str> =
        if raw.contains('+') { Cow::Owned(raw.replace('+', " ")) } else { Cow::Borrowed(raw) };
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}
