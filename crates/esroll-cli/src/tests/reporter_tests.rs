use crate::reporter::Reporter;
use esroll::BundleError;
use std::path::PathBuf;

#[test]
fn test_parse_error_with_snippet() {
    let mut reporter = Reporter::new(false);
    reporter.add_source("/p/lib.js", "export const a = 1;\nexport const = 2;\n");
    let error = BundleError::Parse {
        file: PathBuf::from("/p/lib.js"),
        line: 2,
        column: 14,
        message: "Identifier expected.".to_string(),
    };
    assert_eq!(
        reporter.render(&error),
        "/p/lib.js:2:14 - error: Identifier expected.\n\n    2   export const = 2;\n                     ~"
    );
}

#[test]
fn test_parse_error_without_source() {
    let mut reporter = Reporter::new(false);
    let error = BundleError::Parse {
        file: PathBuf::from("/definitely/not/here.js"),
        line: 1,
        column: 1,
        message: "Invalid character.".to_string(),
    };
    assert_eq!(
        reporter.render(&error),
        "/definitely/not/here.js:1:1 - error: Invalid character."
    );
}

#[test]
fn test_other_errors_use_display() {
    let mut reporter = Reporter::new(false);
    let error = BundleError::ExportNotFound {
        module: PathBuf::from("/p/lib.js"),
        name: "x".to_string(),
    };
    assert_eq!(
        reporter.render(&error),
        "error: Module '/p/lib.js' has no exported member 'x'."
    );
}
