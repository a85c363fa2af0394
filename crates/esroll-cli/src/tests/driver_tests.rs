use crate::args::CliArgs;
use crate::driver::{RunOutcome, analyze, run};
use esroll::{BundleOptions, Bundler};
use esroll::BundleError;
use std::fs;
use std::path::{Path, PathBuf};

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("main.js"),
        "import { double } from './math';\nconsole.log(double(21));\n",
    )
    .expect("write main");
    fs::write(
        dir.path().join("math.js"),
        "export function double(n) { return n * 2; }\nexport function triple(n) { return n * 3; }\n",
    )
    .expect("write math");
    dir
}

fn args_for(entry: &str) -> CliArgs {
    CliArgs {
        entry: Some(PathBuf::from(entry)),
        ..CliArgs::default()
    }
}

const EXPECTED: &str = "function double(n) { return n * 2; }\nconsole.log(double(21));\n";

#[test]
fn test_run_prints_bundle() {
    let dir = project();
    match run(&args_for("main.js"), dir.path()).expect("run") {
        RunOutcome::Printed(code) => assert_eq!(code, EXPECTED),
        other => panic!("expected printed bundle, got {other:?}"),
    }
}

#[test]
fn test_run_writes_output_file() {
    let dir = project();
    let args = CliArgs {
        output: Some(PathBuf::from("dist/bundle.js")),
        ..args_for("main.js")
    };
    let outcome = run(&args, dir.path()).expect("run");
    let written = dir.path().join("dist/bundle.js");
    assert!(matches!(&outcome, RunOutcome::Written(path) if path == &written));
    assert_eq!(fs::read_to_string(&written).expect("read"), EXPECTED);
}

#[test]
fn test_run_reports_bundle_errors_as_outcome() {
    let dir = project();
    fs::write(dir.path().join("bad.js"), "import { nope } from './math';\nnope();\n").expect("write");
    match run(&args_for("bad.js"), dir.path()).expect("run") {
        RunOutcome::Failed(BundleError::ExportNotFound { name, .. }) => assert_eq!(name, "nope"),
        other => panic!("expected export error, got {other:?}"),
    }
}

#[test]
fn test_analyze_prints_statement_json() {
    let dir = project();
    let args = CliArgs {
        analyze: true,
        ..args_for("math.js")
    };
    let RunOutcome::Printed(json) = run(&args, dir.path()).expect("run") else {
        panic!("expected analysis output");
    };
    let value: serde_json::Value = serde_json::from_str(&json).expect("json");
    let statements = value["statements"].as_array().expect("statements");
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0]["defines"], serde_json::json!(["double"]));
    assert_eq!(statements[0]["isExportDeclaration"], true);
    assert_eq!(value["exports"]["triple"]["localName"], "triple");
    assert_eq!(
        Path::new(value["path"].as_str().expect("path")),
        dir.path().join("math.js")
    );
}

#[test]
fn test_analyze_borrows_module_tables() {
    let dir = project();
    let entry = dir.path().join("math.js");
    let mut bundler = Bundler::new(BundleOptions::new(&entry));
    let analysis = analyze(&mut bundler, &entry).expect("analyze");
    assert_eq!(analysis.path, entry.as_path());
    assert!(analysis.imports.is_empty());
    assert_eq!(
        analysis.exports.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["double", "triple"]
    );
    assert_eq!(analysis.statements[1].defines, vec!["triple".to_string()]);
}

#[test]
fn test_analyze_missing_entry_fails() {
    let dir = project();
    let args = CliArgs {
        analyze: true,
        ..args_for("absent.js")
    };
    let outcome = run(&args, dir.path()).expect("run");
    assert!(matches!(outcome, RunOutcome::Failed(BundleError::NotFound { .. })));
}
