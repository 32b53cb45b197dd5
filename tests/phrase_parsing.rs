//! Phrase parsing tests
//!
//! End-to-end checks of the lexical helpers and the column phrase pipeline
//! through the public facade.

use armored::column::SERIAL_DEFAULT;
use armored::lexical::{decompose_type_phrase, select_aliased_key, split_nullability};
use armored::parse_phrase;
use armored::prelude::*;
use serde_json::json;

const DTYPE_ALIASES: &[&str] = &["dtype", "DataType", "datatype"];

// =============================================================================
// Lexical helpers
// =============================================================================

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
        split_nullability("string"),
        ("string".to_string(), Nullability::Null)
    );
}

#[test]
fn test_decompose_type_phrase() {
    assert_eq!(
        serde_json::Value::Object(decompose_type_phrase("varchar( 100 )").to_mapping()),
        json!({"type": "varchar", "max_length": 100})
    );
    assert_eq!(
        serde_json::Value::Object(decompose_type_phrase("numeric(19, 2)").to_mapping()),
        json!({"type": "numeric", "precision": 19, "scale": 2})
    );
    assert_eq!(
        serde_json::Value::Object(decompose_type_phrase("text").to_mapping()),
        json!({"type": "text"})
    );
}

#[test]
fn test_select_aliased_key() {
    assert_eq!(
        select_aliased_key(["DataType"], DTYPE_ALIASES, false),
        Some("DataType")
    );
    assert_eq!(select_aliased_key(["name"], DTYPE_ALIASES, false), None);
    assert_eq!(
        select_aliased_key(["name"], DTYPE_ALIASES, true),
        Some("dtype")
    );
    assert_eq!(
        select_aliased_key(["datatype", "dtype"], DTYPE_ALIASES, false),
        Some("dtype")
    );
}

// =============================================================================
// Phrase pipeline
// =============================================================================

#[test]
fn test_full_phrase() {
    let parsed =
        parse_phrase("varchar( 100 ) not null default 'Empty' check( <name> <> 'test' )").unwrap();
    assert_eq!(parsed.dtype, "varchar( 100 )");
    assert!(!parsed.nullable);
    assert!(!parsed.unique);
    assert!(!parsed.pk);
    assert_eq!(parsed.default.as_deref(), Some("'Empty'"));
    assert_eq!(parsed.check.as_deref(), Some("check( <name> <> 'test' )"));
}

#[test]
fn test_serial_primary_key() {
    let parsed = parse_phrase("serial primary key").unwrap();
    assert_eq!(parsed.dtype, "integer");
    assert!(parsed.pk);
    assert!(!parsed.nullable);
    assert_eq!(parsed.default.as_deref(), Some(SERIAL_DEFAULT));
    assert_eq!(SERIAL_DEFAULT, "nextval('tablename_colname_seq')");
}

#[test]
fn test_malformed_check_is_an_error() {
    assert!(matches!(
        parse_phrase("integer check x > 0"),
        Err(ColumnError::MalformedCheckClause(_))
    ));
}

// =============================================================================
// Data types
// =============================================================================

#[test]
fn test_data_type_round_trip() {
    let phrases = [
        "base",
        "string",
        "string( 20 )",
        "char( 1 )",
        "varchar",
        "varchar( 255 )",
        "text",
        "integer",
        "int",
        "smallint",
        "bigint",
        "numeric",
        "numeric( 10 )",
        "numeric(19, 2)",
        "decimal( 8, 3 )",
        "timestamp",
        "timestamp( 3 )",
        "timestamp( 6 ) with time zone",
    ];
    for phrase in phrases {
        let dtype = DataType::parse(phrase).unwrap();
        let rendered = dtype.to_string();
        assert_eq!(
            DataType::parse(&rendered).unwrap(),
            dtype,
            "{phrase} rendered as {rendered}"
        );
    }
}

#[test]
fn test_unknown_type_from_text_is_base() {
    assert_eq!(DataType::parse("geometry").unwrap(), DataType::default());
    assert_eq!(DataType::parse("geometry").unwrap().kind(), "base");
}

#[test]
fn test_unknown_type_from_mapping_keeps_tag() {
    let dtype: DataType = serde_json::from_value(json!({"type": "geometry"})).unwrap();
    assert_eq!(dtype, DataType::Base("geometry".into()));
}

#[test]
fn test_timestamp_precision_range() {
    assert!(matches!(
        DataType::parse("timestamp( 7 )"),
        Err(DataTypeError::OutOfRange { .. })
    ));
}
