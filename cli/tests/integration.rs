//! End-to-end integration tests for the armored CLI

use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

/// Get the armored CLI binary, run from an empty directory
fn armored_cli(dir: &TempDir) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("armored"));
    cmd.current_dir(dir.path());
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

mod dtype {
    use super::*;

    #[test]
    fn dtype_prints_mapping_and_canonical_form() {
        let temp = TempDir::new().unwrap();
        let output = armored_cli(&temp)
            .args(["dtype", "numeric(19, 2)"])
            .output()
            .unwrap();
        assert!(output.status.success());
        assert_eq!(
            stdout_json(&output),
            json!({
                "canonical": "numeric( 19, 2 )",
                "dtype": {"type": "numeric", "precision": 19, "scale": 2},
            })
        );
    }

    #[test]
    fn dtype_out_of_range_fails() {
        let temp = TempDir::new().unwrap();
        armored_cli(&temp)
            .args(["dtype", "timestamp( 9 )"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid data type"));
    }

    #[test]
    fn compact_output_is_single_line() {
        let temp = TempDir::new().unwrap();
        armored_cli(&temp)
            .args(["--compact", "dtype", "text"])
            .assert()
            .success()
            .stdout(predicate::str::diff(
                "{\"canonical\":\"text\",\"dtype\":{\"type\":\"text\"}}\n",
            ));
    }
}

mod column {
    use super::*;

    #[test]
    fn column_from_phrase() {
        let temp = TempDir::new().unwrap();
        let output = armored_cli(&temp)
            .args([
                "column",
                "varchar( 100 ) not null default 'Empty' check( <name> <> 'test' )",
                "--name",
                "title",
            ])
            .output()
            .unwrap();
        assert!(output.status.success());
        assert_eq!(
            stdout_json(&output),
            json!({
                "name": "title",
                "dtype": {"type": "varchar", "max_length": 100},
                "nullable": false,
                "unique": false,
                "default": "'Empty'",
                "check": "check( <name> <> 'test' )",
                "pk": false,
                "fk": {},
            })
        );
    }

    #[test]
    fn malformed_check_fails() {
        let temp = TempDir::new().unwrap();
        armored_cli(&temp)
            .args(["column", "integer check x > 0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid column"))
            .stderr(predicate::str::contains("check"));
    }
}

mod phrase {
    use super::*;

    #[test]
    fn phrase_keeps_dtype_as_text() {
        let temp = TempDir::new().unwrap();
        let output = armored_cli(&temp)
            .args(["phrase", "serial primary key"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let value = stdout_json(&output);
        assert_eq!(value["dtype"], json!("integer"));
        assert_eq!(value["pk"], json!(true));
        assert_eq!(value["nullable"], json!(false));
        assert_eq!(value["default"], json!("nextval('tablename_colname_seq')"));
        assert_eq!(value["nullability"], json!("null"));
    }
}

mod table {
    use super::*;

    const DOCUMENT: &str = r#"{
        "name": "orders",
        "schemas": [
            {"name": "id", "dtype": "serial primary key"},
            {"name": "user_id", "dtype": "integer not null", "fk": {"table": "users", "column": "id"}}
        ]
    }"#;

    #[test]
    fn table_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("orders.json");
        std::fs::write(&path, DOCUMENT).unwrap();

        let output = armored_cli(&temp)
            .arg("table")
            .arg(&path)
            .output()
            .unwrap();
        assert!(output.status.success());
        let value = stdout_json(&output);
        assert_eq!(value["pk"], json!({"name": "id_pk", "columns": ["id"]}));
        assert_eq!(value["fk"][0]["name"], json!("user_id_users_id_fk"));
        assert_eq!(value["schemas"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn table_from_stdin() {
        let temp = TempDir::new().unwrap();
        armored_cli(&temp)
            .args(["--compact", "table", "-"])
            .write_stdin(DOCUMENT)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"name\":\"orders\""));
    }

    #[test]
    fn missing_file_fails() {
        let temp = TempDir::new().unwrap();
        armored_cli(&temp)
            .args(["table", "missing.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("missing.json"));
    }

    #[test]
    fn duplicate_column_fails() {
        let temp = TempDir::new().unwrap();
        armored_cli(&temp)
            .args(["table", "-"])
            .write_stdin(
                r#"{"name": "t", "schemas": [
                    {"name": "a", "dtype": "text"},
                    {"name": "a", "dtype": "integer"}
                ]}"#,
            )
            .assert()
            .failure()
            .stderr(predicate::str::contains("duplicate column `a`"));
    }
}

mod config {
    use super::*;

    #[test]
    fn discovered_settings_reject_nullable_pk() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("armored.toml"),
            "[column]\npk_nullable = \"reject\"\n",
        )
        .unwrap();

        armored_cli(&temp)
            .args(["table", "-"])
            .write_stdin(r#"{"name": "t", "schemas": [{"name": "id", "dtype": "integer", "pk": true}]}"#)
            .assert()
            .failure()
            .stderr(predicate::str::contains("`pk` and `nullable` cannot be true together"));
    }

    #[test]
    fn custom_aliases_from_config_flag() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        std::fs::write(&path, "[column]\ndtype_aliases = [\"type\"]\n").unwrap();

        let output = armored_cli(&temp)
            .arg("--config")
            .arg(&path)
            .args(["table", "-"])
            .write_stdin(r#"{"name": "t", "schemas": [{"name": "a", "type": "bigint"}]}"#)
            .output()
            .unwrap();
        assert!(output.status.success());
        assert_eq!(
            stdout_json(&output)["schemas"][0]["dtype"],
            json!({"type": "bigint"})
        );
    }

    #[test]
    fn invalid_config_fails() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("armored.toml"), "[column]\ndtype_aliases = []\n")
            .unwrap();

        armored_cli(&temp)
            .args(["dtype", "text"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Configuration error"));
    }
}
