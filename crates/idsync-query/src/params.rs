//! Ordered query parameter map
//!
//! Parsing and serialization follow `application/x-www-form-urlencoded`
//! rules, so values containing `&`, `=` or `?` survive a round trip.
//! Parsed pairs keep their original text and are written back unchanged;
//! only appended pairs are freshly encoded.

use serde::de::Deserializer;
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::{form_urlencoded, Url};

use crate::error::QueryError;
use crate::Result;

#[derive(Debug, Clone)]
struct QueryPair {
    key: String,
    value: String,
    /// Segment as it appeared in the URL, `None` for appended pairs
    raw: Option<String>,
}

impl QueryPair {
    fn encoded(&self) -> String {
        match &self.raw {
            Some(raw) => raw.clone(),
            None => form_urlencoded::Serializer::new(String::new())
                .append_pair(&self.key, &self.value)
                .finish(),
        }
    }
}

/// Decoded query pairs in URL order
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pairs: Vec<QueryPair>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string. A leading `?` is ignored and empty
    /// segments (`a=1&&b=2`) are dropped.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|segment| !segment.is_empty())
            .filter_map(|segment| {
                let (key, value) = form_urlencoded::parse(segment.as_bytes()).next()?;
                Some(QueryPair {
                    key: key.into_owned(),
                    value: value.into_owned(),
                    raw: Some(segment.to_string()),
                })
            })
            .collect();

        Self { pairs }
    }

    pub fn from_url(url: &Url) -> Self {
        url.query().map(Self::parse).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of pairs, counting repeated keys
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|p| p.key == key)
    }

    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    /// All values for `key`, in URL order
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|p| p.key == key)
            .map(|p| p.value.as_str())
            .collect()
    }

    pub fn contains_value(&self, key: &str, value: &str) -> bool {
        self.pairs.iter().any(|p| p.key == key && p.value == value)
    }

    /// Append a pair after all existing ones
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push(QueryPair {
            key: key.into(),
            value: value.into(),
            raw: None,
        });
    }

    /// Remove every `key=value` pair, returning how many were removed
    pub fn remove_value(&mut self, key: &str, value: &str) -> usize {
        let before = self.pairs.len();
        self.pairs.retain(|p| !(p.key == key && p.value == value));
        before - self.pairs.len()
    }

    /// Keep only the first occurrence of each value under `key`, returning
    /// how many repeats were removed
    pub fn dedup_values(&mut self, key: &str) -> usize {
        let before = self.pairs.len();
        let mut seen = std::collections::HashSet::new();
        self.pairs
            .retain(|p| p.key != key || seen.insert(p.value.clone()));
        before - self.pairs.len()
    }

    /// Remove every pair with `key`, returning how many were removed
    pub fn remove_key(&mut self, key: &str) -> usize {
        let before = self.pairs.len();
        self.pairs.retain(|p| p.key != key);
        before - self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|p| (p.key.as_str(), p.value.as_str()))
    }

    /// Encoded query string without the leading `?`
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(QueryPair::encoded)
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Replace the query of `url` with these pairs. An empty map removes the
    /// `?` entirely.
    pub fn apply_to(&self, url: &mut Url) {
        if self.pairs.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&self.to_query_string()));
        }
    }
}

/// Equality is on decoded pairs; the original encoding does not matter
impl PartialEq for QueryParams {
    fn eq(&self, other: &Self) -> bool {
        self.pairs.len() == other.pairs.len()
            && self
                .pairs
                .iter()
                .zip(&other.pairs)
                .all(|(a, b)| a.key == b.key && a.value == b.value)
    }
}

impl Eq for QueryParams {}

impl Serialize for QueryParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.pairs.len()))?;
        for pair in self.iter() {
            seq.serialize_element(&pair)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for QueryParams {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let pairs = Vec::<(String, String)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_query_string())
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.append(key, value);
        }
        params
    }
}

pub fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| QueryError::InvalidUrl(format!("{}: {}", url, e)))
}

/// Rebuild `url` with `params` as its query, keeping path and fragment.
pub fn with_query(url: &str, params: &QueryParams) -> Result<String> {
    let mut parsed = parse_url(url)?;
    params.apply_to(&mut parsed);
    Ok(parsed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repeated_keys() {
        let params = QueryParams::parse("?id=a&tab=2&id=b&id=c");

        assert_eq!(params.len(), 4);
        assert_eq!(params.get_all("id"), vec!["a", "b", "c"]);
        assert_eq!(params.get("tab"), Some("2"));
        assert!(params.contains_key("id"));
        assert!(!params.contains_key("missing"));
    }

    #[test]
    fn test_parse_drops_empty_segments() {
        let params = QueryParams::parse("id=a&&id=b&");
        assert_eq!(params.get_all("id"), vec!["a", "b"]);

        assert!(QueryParams::parse("").is_empty());
        assert!(QueryParams::parse("?").is_empty());
    }

    #[test]
    fn test_untouched_pairs_keep_original_encoding() {
        let mut params = QueryParams::parse("debug&q=a%20b&id=a");
        assert_eq!(params.get("debug"), Some(""));
        assert_eq!(params.get("q"), Some("a b"));

        params.append("id", "b c");
        assert_eq!(params.to_query_string(), "debug&q=a%20b&id=a&id=b+c");
    }

    #[test]
    fn test_equality_ignores_encoding() {
        assert_eq!(QueryParams::parse("q=a%20b"), QueryParams::parse("q=a+b"));
        assert_ne!(QueryParams::parse("q=a"), QueryParams::parse("q=b"));
    }

    #[test]
    fn test_remove_value_keeps_order() {
        let mut params = QueryParams::parse("id=a&id=b&tab=2&id=c");

        assert_eq!(params.remove_value("id", "b"), 1);
        assert_eq!(params.to_query_string(), "id=a&tab=2&id=c");

        assert_eq!(params.remove_value("id", "missing"), 0);
        assert_eq!(params.to_query_string(), "id=a&tab=2&id=c");
    }

    #[test]
    fn test_dedup_values_keeps_first_occurrence() {
        let mut params = QueryParams::parse("id=a&tab=1&id=b&id=a&tab=1&id=b");

        assert_eq!(params.dedup_values("id"), 2);
        assert_eq!(params.to_query_string(), "id=a&tab=1&id=b&tab=1");
        assert_eq!(params.dedup_values("id"), 0);
    }

    #[test]
    fn test_remove_key() {
        let mut params = QueryParams::parse("id=a&tab=2&id=b");
        assert_eq!(params.remove_key("id"), 2);
        assert_eq!(params.to_query_string(), "tab=2");
    }

    #[test]
    fn test_special_characters_round_trip() {
        let mut params = QueryParams::new();
        params.append("id", "a&b=c?d");
        params.append("id", "with space");

        let encoded = params.to_query_string();
        assert!(!encoded.contains('?'));
        assert_eq!(encoded.matches('&').count(), 1);

        let reparsed = QueryParams::parse(&encoded);
        assert_eq!(reparsed.get_all("id"), vec!["a&b=c?d", "with space"]);
    }

    #[test]
    fn test_apply_to_empty_removes_question_mark() {
        let mut url = Url::parse("https://app.test/items?id=a#panel").unwrap();
        QueryParams::new().apply_to(&mut url);
        assert_eq!(url.as_str(), "https://app.test/items#panel");
    }

    #[test]
    fn test_with_query_keeps_path_and_fragment() {
        let params: QueryParams = [("id", "a"), ("id", "b")].into_iter().collect();
        let url = with_query("https://app.test/items?old=1#panel", &params).unwrap();
        assert_eq!(url, "https://app.test/items?id=a&id=b#panel");
    }

    #[test]
    fn test_with_query_invalid_url() {
        let result = with_query("not a url", &QueryParams::new());
        assert!(matches!(result, Err(QueryError::InvalidUrl(_))));
    }

    #[test]
    fn test_serde_shape() {
        let params = QueryParams::parse("id=a&tab=2");
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"[["id","a"],["tab","2"]]"#);

        let back: QueryParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
