use crate::args::CliArgs;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parses_all_flags() {
    let args = CliArgs::try_parse_from([
        "esroll",
        "src/main.js",
        "-o",
        "dist/bundle.js",
        "--config",
        "custom.json",
        "--analyze",
        "--pretty",
        "false",
    ])
    .expect("args");
    assert_eq!(args.entry, Some(PathBuf::from("src/main.js")));
    assert_eq!(args.output, Some(PathBuf::from("dist/bundle.js")));
    assert_eq!(args.config, Some(PathBuf::from("custom.json")));
    assert!(args.analyze);
    assert_eq!(args.pretty, Some(false));
}

#[test]
fn test_entry_is_optional() {
    let args = CliArgs::try_parse_from(["esroll", "-c", "esroll.config.json"]).expect("args");
    assert!(args.entry.is_none());
    assert!(!args.analyze);
    assert!(args.pretty.is_none());
}

#[test]
fn test_pretty_requires_boolean() {
    assert!(CliArgs::try_parse_from(["esroll", "--pretty", "sometimes"]).is_err());
}
