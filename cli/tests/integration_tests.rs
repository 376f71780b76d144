use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;

const BIN: &str = env!("CARGO_BIN_EXE_datamodel-overrides");

const SCHEMA: &str = r#"
datasource db {
  provider = "sqlite"
  url      = "file:./dev.db"
}

datasource archive {
  provider = "sqlite"
  url      = "file:../archive/old.db"
}

model User {
  id Int @id
}
"#;

fn run(args: &[&str]) -> Output {
    std::process::Command::new(BIN)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run datamodel-overrides")
}

/// Writes `schema.prisma` under `<root>/prisma` and returns its path.
fn write_schema(root: &Path, contents: &str) -> PathBuf {
    let dir = root.join("prisma");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("schema.prisma");
    fs::write(&path, contents).unwrap();
    path
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ---------------------------------------------------------------------------
// overrides
// ---------------------------------------------------------------------------

#[test]
fn overrides_relative_to_output_dir() {
    let root = tempfile::tempdir().unwrap();
    let schema = write_schema(root.path(), SCHEMA);
    let generated = root.path().join("generated");

    let output = run(&[
        "overrides",
        "--schema",
        schema.to_str().unwrap(),
        "--output-dir",
        generated.to_str().unwrap(),
    ]);

    let json = stdout_json(&output);
    assert_eq!(
        json,
        serde_json::json!([
            { "name": "db", "url": "../prisma/dev.db" },
            { "name": "archive", "url": "../archive/old.db" },
        ])
    );
}

#[test]
fn overrides_with_explicit_cwd() {
    let root = tempfile::tempdir().unwrap();
    let schema = write_schema(root.path(), SCHEMA);
    let cwd = root.path().join("app").join("data");

    let output = run(&[
        "overrides",
        "--schema",
        schema.to_str().unwrap(),
        "--cwd",
        cwd.to_str().unwrap(),
    ]);

    // Output dir defaults to --cwd, so URLs stay relative to it.
    let json = stdout_json(&output);
    assert_eq!(
        json,
        serde_json::json!([
            { "name": "db", "url": "dev.db" },
            { "name": "archive", "url": "../archive/old.db" },
        ])
    );
}

#[test]
fn overrides_explicit_cwd_in_absolute_mode() {
    let root = tempfile::tempdir().unwrap();
    let schema = write_schema(root.path(), SCHEMA);
    let cwd = root.path().join("app").join("data");

    let output = run(&[
        "overrides",
        "--schema",
        schema.to_str().unwrap(),
        "--cwd",
        cwd.to_str().unwrap(),
        "--absolute",
    ]);

    let json = stdout_json(&output);
    let expected = std::path::absolute(root.path().join("app").join("archive").join("old.db")).unwrap();
    assert_eq!(json[1]["url"], expected.to_str().unwrap());
}

#[test]
fn overrides_absolute() {
    let root = tempfile::tempdir().unwrap();
    let schema = write_schema(root.path(), SCHEMA);

    let output = run(&[
        "overrides",
        "--schema",
        schema.to_str().unwrap(),
        "--absolute",
    ]);

    let json = stdout_json(&output);
    let expected = std::path::absolute(root.path().join("prisma").join("dev.db")).unwrap();
    assert_eq!(json[0]["url"], expected.to_str().unwrap());
}

#[test]
fn overrides_yaml_format() {
    let root = tempfile::tempdir().unwrap();
    let schema = write_schema(root.path(), SCHEMA);

    let output = run(&[
        "overrides",
        "--schema",
        schema.to_str().unwrap(),
        "--format",
        "yaml",
    ]);
    assert!(output.status.success());

    let yaml: serde_yaml::Value = serde_yaml::from_slice(&output.stdout).unwrap();
    assert_eq!(yaml[0]["name"].as_str(), Some("db"));
    assert_eq!(yaml[0]["url"].as_str(), Some("dev.db"));
}

#[test]
fn overrides_unparseable_block_exits_nonzero() {
    let root = tempfile::tempdir().unwrap();
    let schema = write_schema(root.path(), "notadatasource foo {\n  url = \"file:./x.db\"\n}\n");

    let output = run(&["overrides", "--schema", schema.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error: Could not parse datamodel, line 1: `notadatasource foo {` is not parseable"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn overrides_missing_schema_file() {
    let root = tempfile::tempdir().unwrap();
    let missing = root.path().join("nope.prisma");

    let output = run(&["overrides", "--schema", missing.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}

// ---------------------------------------------------------------------------
// logging
// ---------------------------------------------------------------------------

#[test]
fn verbose_flag_logs_debug_events_to_stderr() {
    let root = tempfile::tempdir().unwrap();
    let schema = write_schema(root.path(), SCHEMA);

    let output = run(&["-v", "overrides", "--schema", schema.to_str().unwrap()]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("DEBUG"), "unexpected stderr: {stderr}");
    assert!(stderr.contains("Collected SQLite override"), "unexpected stderr: {stderr}");
    // stdout stays machine-readable
    serde_json::from_slice::<serde_json::Value>(&output.stdout).unwrap();
}

#[test]
fn default_log_level_hides_debug_events() {
    let root = tempfile::tempdir().unwrap();
    let schema = write_schema(root.path(), SCHEMA);

    let output = run(&["overrides", "--schema", schema.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stderr).contains("Collected SQLite override"));
}

#[test]
fn rust_log_overrides_verbose_flag() {
    let root = tempfile::tempdir().unwrap();
    let schema = write_schema(root.path(), SCHEMA);

    let output = std::process::Command::new(BIN)
        .args(["-v", "overrides", "--schema", schema.to_str().unwrap()])
        .env("RUST_LOG", "error")
        .output()
        .expect("failed to run datamodel-overrides");
    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stderr).contains("Collected SQLite override"));
}

// ---------------------------------------------------------------------------
// names
// ---------------------------------------------------------------------------

#[test]
fn names_lists_datasources_in_order() {
    let root = tempfile::tempdir().unwrap();
    let schema = write_schema(root.path(), SCHEMA);

    let output = run(&["names", "--schema", schema.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "db\narchive\n");
}

// ---------------------------------------------------------------------------
// bootstrap
// ---------------------------------------------------------------------------

#[test]
fn bootstrap_from_dir() {
    let root = tempfile::tempdir().unwrap();
    write_schema(root.path(), SCHEMA);

    let output = run(&["bootstrap", "--dir", root.path().to_str().unwrap()]);
    let json = stdout_json(&output);

    assert_eq!(json["datasource_names"], serde_json::json!(["db", "archive"]));
    assert_eq!(json["active_provider"], "sqlite");
    assert_eq!(json["generator"], serde_json::Value::Null);
    assert_eq!(json["relative_path"], "");
    assert_eq!(json["sqlite_datasource_overrides"][0]["url"], "dev.db");
    assert_eq!(json["client_version"], "client-test-version");
}

#[test]
fn bootstrap_with_config_file() {
    let root = tempfile::tempdir().unwrap();
    write_schema(root.path(), SCHEMA);
    let config = root.path().join("bootstrap.yml");
    fs::write(
        &config,
        format!(
            "schema_dir: {}\noutput_dir: {}\n",
            root.path().display(),
            root.path().join("generated").display()
        ),
    )
    .unwrap();

    let output = run(&["bootstrap", "--config", config.to_str().unwrap()]);
    let json = stdout_json(&output);

    assert_eq!(json["relative_path"], "../prisma");
    assert_eq!(json["sqlite_datasource_overrides"][0]["url"], "../prisma/dev.db");
}

#[test]
fn bootstrap_missing_schema() {
    let root = tempfile::tempdir().unwrap();

    let output = run(&["bootstrap", "--dir", root.path().to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("could not find a schema file"));
}
