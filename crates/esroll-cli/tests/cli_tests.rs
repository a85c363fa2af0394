//! Runs the `esroll` binary against projects on disk.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn esroll(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_esroll"))
        .args(args)
        .current_dir(cwd)
        .env_remove("ESROLL_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("run esroll")
}

fn write_project(root: &Path) {
    fs::create_dir_all(root.join("src")).expect("mkdir");
    fs::write(
        root.join("src/main.js"),
        "import { area } from './shapes';\nconsole.log(area(2));\n",
    )
    .expect("write main");
    fs::write(
        root.join("src/shapes.js"),
        "const PI = 3.14;\nexport function area(r) { return PI * r * r; }\nexport function perimeter(r) { return 2 * PI * r; }\n",
    )
    .expect("write shapes");
}

#[test]
fn prints_bundle_to_stdout() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_project(dir.path());
    let output = esroll(dir.path(), &["src/main.js"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "const PI = 3.14;\nfunction area(r) { return PI * r * r; }\nconsole.log(area(2));\n"
    );
}

#[test]
fn uses_config_file_in_working_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_project(dir.path());
    fs::write(
        dir.path().join("esroll.config.json"),
        r#"{ "entry": "src/main.js", "output": "dist/bundle.js" }"#,
    )
    .expect("write config");

    let output = esroll(dir.path(), &[]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let bundle = fs::read_to_string(dir.path().join("dist/bundle.js")).expect("bundle");
    assert!(bundle.ends_with("console.log(area(2));\n"));
    assert!(!bundle.contains("perimeter"));
}

#[test]
fn bundle_error_exits_with_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_project(dir.path());
    fs::write(dir.path().join("src/broken.js"), "import { missing } from './shapes';\nmissing();\n")
        .expect("write");

    let output = esroll(dir.path(), &["src/broken.js", "--pretty", "false"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("error: Module '"));
    assert!(stderr.contains("has no exported member 'missing'"));
}

#[test]
fn analyze_prints_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_project(dir.path());
    let output = esroll(dir.path(), &["src/shapes.js", "--analyze"]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["statements"][1]["dependsOn"], serde_json::json!(["PI"]));
}

#[test]
fn missing_entry_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = esroll(dir.path(), &[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no entry module"));
}
