//! Column-definition phrase pipeline
//!
//! A phrase follows the loose grammar
//!
//! ```text
//! DATATYPE [UNIQUE] [NULL|NOT NULL] [DEFAULT value] [PRIMARY KEY] [CHECK(expr)]
//! ```
//!
//! Modifiers are pulled out one at a time; whatever is left is the datatype
//! phrase. `DEFAULT value` takes everything after the keyword, so it has to
//! come after every other modifier except `CHECK`.

use std::sync::LazyLock;

use armored_types::lexical::{
    Nullability, extract_keyword, extract_keyword_flag, split_nullability,
};
use regex::Regex;
use serde::Serialize;

use crate::error::{ColumnError, Result};

/// Default synthesized for `serial` columns
pub const SERIAL_DEFAULT: &str = "nextval('tablename_colname_seq')";

// One level of nested parentheses is allowed inside the clause.
static CHECK_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"check\s?\((?P<check>[^()]*(?:\(.*\))*[^()]*)\)").expect("check pattern compiles")
});

/// Fields recovered from a phrase, before the data type is built
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize)]
pub struct ParsedPhrase {
    /// What is left once every modifier is removed, e.g. `varchar( 100 )`
    pub dtype: String,
    /// Raw nullability marker
    pub nullability: Nullability,
    pub nullable: bool,
    pub unique: bool,
    pub pk: bool,
    /// Default literal, kept as text
    pub default: Option<String>,
    /// Check clause including its `check(...)` wrapper
    pub check: Option<String>,
}

/// Decompose a column-definition phrase.
///
/// Nullability resolves in this order: a `default` forces non-null; a
/// `serial` type forces non-null and gets [`SERIAL_DEFAULT`]; a primary key
/// stays non-null; otherwise the `null` / `not null` marker decides.
///
/// ```
/// use armored_core::column::parse_phrase;
///
/// let parsed = parse_phrase("serial primary key").unwrap();
/// assert_eq!(parsed.dtype, "integer");
/// assert!(parsed.pk);
/// assert!(!parsed.nullable);
/// ```
///
/// # Errors
///
/// [`ColumnError::MalformedCheckClause`] when `check` appears without a
/// parenthesized clause.
pub fn parse_phrase(phrase: &str) -> Result<ParsedPhrase> {
    let (working, nullability) = split_nullability(phrase);
    let (working, unique) = extract_keyword_flag(&working, "unique", None);
    let (working, pk) = extract_keyword_flag(&working, "primary key", None);
    let (mut working, serial) = extract_keyword_flag(&working, "serial", Some("integer"));

    let mut check = None;
    if working.contains("check") {
        let clause = CHECK_CLAUSE
            .find(&working)
            .ok_or_else(|| ColumnError::MalformedCheckClause(phrase.to_string()))?
            .as_str()
            .to_string();
        let (rest, _) = extract_keyword(&working, &clause, None);
        working = rest;
        check = Some(clause);
    }

    let mut parsed = ParsedPhrase {
        nullability,
        unique,
        pk,
        check,
        ..ParsedPhrase::default()
    };

    if let Some((dtype, default)) = working.split_once("default") {
        parsed.dtype = dtype.trim().to_string();
        parsed.default = Some(default.trim().to_string());
    } else {
        parsed.dtype = working;
        if serial {
            parsed.default = Some(SERIAL_DEFAULT.to_string());
        } else if !pk {
            parsed.nullable = nullability.is_nullable();
        }
    }

    crate::armored_trace_phrase!(phrase, &parsed.dtype);
    Ok(parsed)
}
