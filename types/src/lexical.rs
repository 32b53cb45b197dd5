//! Lexical helpers for column-definition phrases
//!
//! Small string primitives shared by the data type and column parsers. They
//! only know about the handful of keywords they are asked to look for; there
//! is no tokenizer and no notion of word boundaries.
//!
//! # Examples
//!
//! ```
//! use armored_types::lexical::{Nullability, split_nullability};
//!
//! let (rest, marker) = split_nullability("varchar( 20 ) not null");
//! assert_eq!(rest, "varchar( 20 )");
//! assert_eq!(marker, Nullability::NotNull);
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

/// Collapse every whitespace run to a single space and trim both ends.
#[must_use]
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase a phrase, leaving single-quoted literals untouched.
///
/// Quotes only protect text when they are balanced. With an odd number of
/// `'` the whole phrase is lowercased, so keywords after a stray apostrophe
/// are still found.
///
/// ```
/// use armored_types::lexical::lowercase_unquoted;
///
/// assert_eq!(lowercase_unquoted("VARCHAR DEFAULT 'Empty'"), "varchar default 'Empty'");
/// ```
#[must_use]
pub fn lowercase_unquoted(value: &str) -> String {
    if value.matches('\'').count() % 2 != 0 {
        return value.to_lowercase();
    }
    let mut quoted = false;
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch == '\'' {
            quoted = !quoted;
        }
        if quoted {
            out.push(ch);
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

// =============================================================================
// Keyword extraction
// =============================================================================

/// Remove every occurrence of `key` from `phrase`.
///
/// Occurrences are replaced with `replacement` (empty when `None`), then the
/// whitespace is collapsed. Returns the new phrase and `Some(key)` when the
/// key was found; otherwise the phrase unchanged and `None`.
///
/// ```
/// use armored_types::lexical::extract_keyword;
///
/// let (rest, found) = extract_keyword("integer unique not null", "unique", None);
/// assert_eq!(rest, "integer not null");
/// assert_eq!(found, Some("unique"));
/// ```
#[must_use]
pub fn extract_keyword<'k>(
    phrase: &str,
    key: &'k str,
    replacement: Option<&str>,
) -> (String, Option<&'k str>) {
    if key.is_empty() || !phrase.contains(key) {
        return (phrase.to_string(), None);
    }
    let replaced = phrase.replace(key, replacement.unwrap_or(""));
    (collapse_whitespace(&replaced), Some(key))
}

/// Boolean flavour of [`extract_keyword`].
#[must_use]
pub fn extract_keyword_flag(phrase: &str, key: &str, replacement: Option<&str>) -> (String, bool) {
    let (rest, found) = extract_keyword(phrase, key, replacement);
    (rest, found.is_some())
}

// =============================================================================
// Nullability
// =============================================================================

/// Nullability marker found in a phrase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Nullability {
    /// `null`, also reported when no marker is present
    #[default]
    #[serde(rename = "null")]
    Null,
    /// `not null`
    #[serde(rename = "not null")]
    NotNull,
}

impl Nullability {
    /// Marker text as it appears in a phrase
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::NotNull => "not null",
        }
    }

    /// `true` unless the marker is `not null`
    #[must_use]
    pub const fn is_nullable(self) -> bool {
        matches!(self, Self::Null)
    }
}

impl core::fmt::Display for Nullability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// `not null` must be checked before `null`, and every matching rule strips its
// needle and overwrites the marker.
const NULLABILITY_RULES: [(&str, Nullability); 2] = [
    ("not null", Nullability::NotNull),
    ("null", Nullability::Null),
];

/// Split a phrase into its core part and its nullability marker.
///
/// The core part is lowercased (outside single-quoted literals) and
/// whitespace-collapsed. When both `not null` and a bare `null` are present,
/// both are stripped and the bare `null` wins because its rule runs last.
///
/// ```
/// use armored_types::lexical::{Nullability, split_nullability};
///
/// assert_eq!(split_nullability("string null"), ("string".to_string(), Nullability::Null));
/// assert_eq!(
///     split_nullability("string not null null"),
///     ("string".to_string(), Nullability::Null)
/// );
/// ```
#[must_use]
pub fn split_nullability(phrase: &str) -> (String, Nullability) {
    let mut remaining = lowercase_unquoted(phrase);
    let mut marker = Nullability::default();
    for (needle, rule) in NULLABILITY_RULES {
        if remaining.contains(needle) {
            marker = rule;
            remaining = remaining.replace(needle, "");
        }
    }
    (collapse_whitespace(&remaining), marker)
}

// =============================================================================
// Alias selection
// =============================================================================

/// Pick the alias to read a logical field from.
///
/// If exactly one accepted alias is present among `candidates` it is used;
/// otherwise the first alias (in `aliases` order) that is present. When none
/// is present, the first alias is returned if `default_if_ambiguous`, else
/// `None`.
///
/// ```
/// use armored_types::lexical::select_aliased_key;
///
/// let aliases = ["dtype", "DataType", "datatype"];
/// assert_eq!(select_aliased_key(["name", "DataType"], &aliases, false), Some("DataType"));
/// assert_eq!(select_aliased_key(["name"], &aliases, false), None);
/// assert_eq!(select_aliased_key(["name"], &aliases, true), Some("dtype"));
/// ```
pub fn select_aliased_key<'a, I, A>(
    candidates: I,
    aliases: &'a [A],
    default_if_ambiguous: bool,
) -> Option<&'a str>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    A: AsRef<str>,
{
    let candidates: Vec<I::Item> = candidates.into_iter().collect();
    let mut present: Vec<&'a str> = Vec::new();
    for alias in aliases.iter().map(AsRef::as_ref) {
        if !present.contains(&alias) && candidates.iter().any(|c| c.as_ref() == alias) {
            present.push(alias);
        }
    }

    match present.as_slice() {
        [only] => Some(*only),
        [first, ..] => Some(*first),
        [] if default_if_ambiguous => aliases.first().map(AsRef::as_ref),
        [] => None,
    }
}

// =============================================================================
// Type phrase decomposition
// =============================================================================

static TYPE_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<type>\w+)(?:\s?\(\s?(?P<first>\d+)(?:,\s?(?P<second>\d+))?\s?\))?")
        .expect("type phrase pattern compiles")
});

/// A `name( a, b )` phrase split into its parts.
///
/// Arguments stay as the raw digit strings; coercion to integers happens when
/// a [`DataType`](crate::DataType) is built from them.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TypePhrase {
    /// Type name token, case preserved
    pub type_name: String,
    /// First argument of non-numeric, non-temporal types
    pub max_length: Option<String>,
    /// First argument of `numeric`/`decimal`/`timestamp`/`time`
    pub precision: Option<String>,
    /// Second argument of `numeric`/`decimal`
    pub scale: Option<String>,
}

impl TypePhrase {
    /// Render as a `{type, max_length | precision, scale}` mapping.
    ///
    /// Numeric arguments become JSON numbers when they fit an `i64`. A
    /// `numeric( P )` phrase reports `scale` as `-1`.
    #[must_use]
    pub fn to_mapping(&self) -> Map<String, Value> {
        fn number(raw: &str) -> Value {
            raw.parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::from(raw))
        }

        let mut map = Map::new();
        map.insert("type".into(), Value::from(self.type_name.as_str()));
        if let Some(raw) = &self.max_length {
            map.insert("max_length".into(), number(raw));
        }
        if let Some(raw) = &self.precision {
            map.insert("precision".into(), number(raw));
            if is_exact_numeric(&self.type_name) {
                let scale = self.scale.as_deref().map_or(Value::from(-1), number);
                map.insert("scale".into(), scale);
            }
        }
        map
    }

    /// `true` when the phrase carried parenthesized arguments
    #[must_use]
    pub fn has_arguments(&self) -> bool {
        self.max_length.is_some() || self.precision.is_some()
    }
}

fn is_exact_numeric(name: &str) -> bool {
    matches!(name, "numeric" | "decimal")
}

fn is_temporal(name: &str) -> bool {
    matches!(name, "timestamp" | "time")
}

/// Decompose `name` optionally followed by `( a )` or `( a, b )`.
///
/// `numeric`/`decimal` map the arguments to precision and scale,
/// `timestamp`/`time` map the first one to precision, every other type maps
/// the first one to `max_length`. A phrase with no word at all comes back as
/// its own type name.
///
/// ```
/// use armored_types::lexical::decompose_type_phrase;
///
/// let phrase = decompose_type_phrase("numeric(19, 2)");
/// assert_eq!(phrase.type_name, "numeric");
/// assert_eq!(phrase.precision.as_deref(), Some("19"));
/// assert_eq!(phrase.scale.as_deref(), Some("2"));
/// ```
#[must_use]
pub fn decompose_type_phrase(phrase: &str) -> TypePhrase {
    let trimmed = phrase.trim();
    let Some(caps) = TYPE_PHRASE.captures(trimmed) else {
        return TypePhrase {
            type_name: phrase.to_string(),
            ..TypePhrase::default()
        };
    };

    let type_name = caps["type"].to_string();
    let first = caps.name("first").map(|m| m.as_str().to_string());
    let second = caps.name("second").map(|m| m.as_str().to_string());

    if is_exact_numeric(&type_name) {
        TypePhrase {
            type_name,
            precision: first,
            scale: second,
            ..TypePhrase::default()
        }
    } else if is_temporal(&type_name) {
        TypePhrase {
            type_name,
            precision: first,
            ..TypePhrase::default()
        }
    } else {
        TypePhrase {
            type_name,
            max_length: first,
            ..TypePhrase::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_keyword_present() {
        let (rest, found) = extract_keyword("serial  primary key", "serial", Some("integer"));
        assert_eq!(rest, "integer primary key");
        assert_eq!(found, Some("serial"));
    }

    #[test]
    fn test_extract_keyword_absent_keeps_phrase() {
        let (rest, found) = extract_keyword("varchar(  10 )", "unique", None);
        assert_eq!(rest, "varchar(  10 )");
        assert_eq!(found, None);

        let (_, flag) = extract_keyword_flag("varchar", "unique", None);
        assert!(!flag);
    }

    #[test]
    fn test_extract_keyword_is_plain_substring() {
        // no word boundaries: `uniqueness` still matches `unique`
        let (rest, flag) = extract_keyword_flag("text uniqueness", "unique", None);
        assert_eq!(rest, "text ness");
        assert!(flag);
    }

    #[test]
    fn test_extract_keyword_replaces_all_occurrences() {
        let (rest, flag) = extract_keyword_flag("unique integer unique", "unique", None);
        assert_eq!(rest, "integer");
        assert!(flag);
    }

    #[test]
    fn test_split_nullability() {
        assert_eq!(
            split_nullability("string null"),
            ("string".to_string(), Nullability::Null)
        );
        assert_eq!(
            split_nullability("string not null"),
            ("string".to_string(), Nullability::NotNull)
        );
        assert_eq!(
            split_nullability("string not null null"),
            ("string".to_string(), Nullability::Null)
        );
        assert_eq!(
            split_nullability("string null null"),
            ("string".to_string(), Nullability::Null)
        );
    }

    #[test]
    fn test_split_nullability_without_marker() {
        assert_eq!(
            split_nullability("  Varchar( 10 )  unique "),
            ("varchar( 10 ) unique".to_string(), Nullability::Null)
        );
    }

    #[test]
    fn test_split_nullability_is_case_insensitive_outside_literals() {
        let (rest, marker) = split_nullability("VARCHAR NOT NULL DEFAULT 'Empty'");
        assert_eq!(rest, "varchar default 'Empty'");
        assert_eq!(marker, Nullability::NotNull);
    }

    #[test]
    fn test_lowercase_unquoted_handles_escaped_quotes() {
        assert_eq!(lowercase_unquoted("A 'It''S' B"), "a 'It''S' b");
    }

    #[test]
    fn test_unbalanced_quote_lowercases_everything() {
        assert_eq!(
            lowercase_unquoted("TEXT DEFAULT O'Brien NOT NULL"),
            "text default o'brien not null"
        );
        assert_eq!(
            split_nullability("text default O'Brien NOT NULL"),
            split_nullability("text default o'brien not null")
        );
        assert_eq!(
            split_nullability("text default O'Brien NOT NULL").1,
            Nullability::NotNull
        );
    }

    #[test]
    fn test_select_aliased_key() {
        let aliases = ["dtype", "DataType", "datatype"];
        assert_eq!(select_aliased_key(["DataType"], &aliases, false), Some("DataType"));
        assert_eq!(select_aliased_key(["foo", "bar"], &aliases, false), None);
        assert_eq!(select_aliased_key(["foo"], &aliases, true), Some("dtype"));
        // several present: alias order decides
        assert_eq!(
            select_aliased_key(["datatype", "DataType"], &aliases, false),
            Some("DataType")
        );
    }

    #[test]
    fn test_select_aliased_key_duplicate_candidates() {
        let aliases = ["a", "b", "c"];
        assert_eq!(select_aliased_key(["a", "a", "b"], &aliases, true), Some("a"));
        assert_eq!(select_aliased_key(["d", "f"], &aliases, true), Some("a"));
    }

    #[test]
    fn test_select_aliased_key_empty_aliases() {
        let aliases: [&str; 0] = [];
        assert_eq!(select_aliased_key(["dtype"], &aliases, true), None);
    }

    #[test]
    fn test_decompose_varchar() {
        let phrase = decompose_type_phrase("varchar( 100 )");
        assert_eq!(phrase.type_name, "varchar");
        assert_eq!(phrase.max_length.as_deref(), Some("100"));
        assert_eq!(
            Value::Object(phrase.to_mapping()),
            json!({"type": "varchar", "max_length": 100})
        );
    }

    #[test]
    fn test_decompose_numeric() {
        let phrase = decompose_type_phrase("numeric(19, 2)");
        assert_eq!(
            Value::Object(phrase.to_mapping()),
            json!({"type": "numeric", "precision": 19, "scale": 2})
        );

        let phrase = decompose_type_phrase("decimal( 10 )");
        assert_eq!(
            Value::Object(phrase.to_mapping()),
            json!({"type": "decimal", "precision": 10, "scale": -1})
        );
    }

    #[test]
    fn test_decompose_timestamp_discards_second_argument() {
        let phrase = decompose_type_phrase("timestamp(3, 4)");
        assert_eq!(phrase.precision.as_deref(), Some("3"));
        assert_eq!(phrase.scale, None);
        assert_eq!(phrase.max_length, None);
    }

    #[test]
    fn test_decompose_without_arguments() {
        let phrase = decompose_type_phrase("integer");
        assert!(!phrase.has_arguments());
        assert_eq!(Value::Object(phrase.to_mapping()), json!({"type": "integer"}));
    }

    #[test]
    fn test_decompose_fallback_returns_phrase() {
        let phrase = decompose_type_phrase(" ( ) ");
        assert_eq!(phrase.type_name, " ( ) ");
        assert!(!phrase.has_arguments());
    }
}
