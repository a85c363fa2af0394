use crate::args::CliArgs;
use crate::config::*;
use std::fs;
use std::path::PathBuf;

#[test]
fn test_parse_config() {
    let config = parse_config(r#"{ "entry": "src/main.js", "output": "dist/out.js" }"#)
        .expect("config");
    assert_eq!(config.entry, Some(PathBuf::from("src/main.js")));
    assert_eq!(config.output, Some(PathBuf::from("dist/out.js")));
    assert_eq!(parse_config("{}").expect("empty"), ConfigFile::default());
}

#[test]
fn test_parse_config_rejects_unknown_keys() {
    assert!(parse_config(r#"{ "entry": "a.js", "minify": true }"#).is_err());
}

#[test]
fn test_load_config_resolves_against_config_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("project");
    fs::create_dir_all(&nested).expect("mkdir");
    let path = nested.join(CONFIG_FILE_NAME);
    fs::write(&path, r#"{ "entry": "src/main.js" }"#).expect("write");

    let config = load_config(&path).expect("load");
    assert_eq!(config.entry, Some(nested.join("src/main.js")));
    assert!(config.output.is_none());
}

#[test]
fn test_flags_override_discovered_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        r#"{ "entry": "from-config.js", "output": "config-out.js" }"#,
    )
    .expect("write");

    let from_file = resolve_options(&CliArgs::default(), dir.path()).expect("options");
    assert_eq!(from_file.entry, dir.path().join("from-config.js"));
    assert_eq!(from_file.output, Some(dir.path().join("config-out.js")));

    let args = CliArgs {
        entry: Some(PathBuf::from("cli.js")),
        ..CliArgs::default()
    };
    let overridden = resolve_options(&args, dir.path()).expect("options");
    assert_eq!(overridden.entry, dir.path().join("cli.js"));
    assert_eq!(overridden.output, Some(dir.path().join("config-out.js")));
}

#[test]
fn test_missing_entry_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(find_config(dir.path()).is_none());
    let error = resolve_options(&CliArgs::default(), dir.path()).expect_err("no entry");
    assert!(error.to_string().contains("no entry module"));
}

#[test]
fn test_explicit_config_must_exist() {
    let dir = tempfile::tempdir().expect("tempdir");
    let args = CliArgs {
        config: Some(PathBuf::from("missing.json")),
        ..CliArgs::default()
    };
    let error = resolve_options(&args, dir.path()).expect_err("missing config");
    assert!(error.to_string().contains("failed to read config"));
}
