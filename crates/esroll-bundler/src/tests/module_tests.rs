use crate::error::BundleError;
use crate::module::*;
use esroll_common::ModuleId;
use std::path::PathBuf;

fn parse(source: &str) -> Module {
    Module::parse(ModuleId(0), PathBuf::from("/m.js"), source.to_string()).expect("module")
}

fn import(source: &str, name: &str) -> ImportBinding {
    ImportBinding {
        source: source.to_string(),
        name: name.to_string(),
    }
}

#[test]
fn test_import_table() {
    let module = parse(
        "import a, { b as c, d } from './x';\nimport * as ns from './y';\nimport './side';",
    );
    assert_eq!(module.imports.len(), 4);
    assert_eq!(module.imports["a"], import("./x", "default"));
    assert_eq!(module.imports["c"], import("./x", "b"));
    assert_eq!(module.imports["d"], import("./x", "d"));
    assert_eq!(module.imports["ns"], import("./y", "*"));
}

#[test]
fn test_duplicate_import_is_fatal() {
    let result = Module::parse(
        ModuleId(0),
        PathBuf::from("/m.js"),
        "import { a } from './x';\nimport { b as a } from './y';".to_string(),
    );
    match result {
        Err(BundleError::DuplicateBinding { module, name }) => {
            assert_eq!(module, PathBuf::from("/m.js"));
            assert_eq!(name, "a");
        }
        other => panic!("expected duplicate binding, got {other:?}"),
    }
}

#[test]
fn test_export_table() {
    let module = parse(
        "export const x = 1, { y } = o;\n\
         export function f() {}\n\
         export class C {}\n\
         export { x as z };\n\
         export { q as r } from './q';\n\
         export * from './all';\n\
         export * as ns from './ns';",
    );
    let local = |name: &str, statement: Option<u32>| ExportBinding {
        local_name: name.to_string(),
        target: ExportTarget::Local { statement },
    };
    assert_eq!(module.exports["x"], local("x", Some(0)));
    assert_eq!(module.exports["y"], local("y", Some(0)));
    assert_eq!(module.exports["f"], local("f", Some(1)));
    assert_eq!(module.exports["C"], local("C", Some(2)));
    assert_eq!(module.exports["z"], local("x", None));
    assert_eq!(
        module.exports["r"].target,
        ExportTarget::Reexport {
            source: "./q".to_string(),
            name: "q".to_string(),
        }
    );
    assert_eq!(
        module.exports["ns"].target,
        ExportTarget::Namespace {
            source: "./ns".to_string(),
        }
    );
    assert_eq!(module.star_exports, vec!["./all".to_string()]);
    // re-exported names become resolvable inside the module
    assert_eq!(module.imports["q"], import("./q", "q"));
}

#[test]
fn test_reexport_does_not_override_explicit_import() {
    let module = parse("import { q } from './a';\nexport { q } from './b';");
    assert_eq!(module.imports["q"], import("./a", "q"));
}

#[test]
fn test_default_export_of_expression_is_a_definition() {
    let module = parse("const base = 40;\nexport default base + 2;");
    assert_eq!(module.exports["default"].local_name, "default");
    assert_eq!(module.definitions.get("default"), Some(&1));
    assert_eq!(module.definitions.get("base"), Some(&0));
}

#[test]
fn test_default_export_of_named_function_keeps_name() {
    let module = parse("export default function named() {}");
    assert_eq!(module.exports["default"].local_name, "named");
    assert_eq!(module.definitions.get("named"), Some(&0));
    assert!(module.definitions.get("default").is_none());
}

#[test]
fn test_anonymous_default_function_is_default_definition() {
    let module = parse("export default function () {}");
    assert_eq!(module.exports["default"].local_name, "default");
    assert_eq!(module.definitions.get("default"), Some(&0));
}

#[test]
fn test_later_definition_wins() {
    let module = parse("var a = 1;\nvar a = 2;");
    assert_eq!(module.definitions.get("a"), Some(&1));
}

#[test]
fn test_emitted_text_strips_export_keywords() {
    let module = parse(
        "export const x = 1;\n\
         export default function bar() { return x; }\n\
         export default 42;\n\
         let plain = 2;",
    );
    assert_eq!(module.emitted_text(0).as_deref(), Some("const x = 1;"));
    assert_eq!(module.emitted_text(1).as_deref(), Some("function bar() { return x; }"));
    assert_eq!(module.emitted_text(2).as_deref(), Some("export default 42;"));
    assert_eq!(module.emitted_text(3).as_deref(), Some("let plain = 2;"));
    assert_eq!(module.emitted_text(4), None);
}

#[test]
fn test_declaration_only_statements() {
    let module = parse(
        "import a from './a';\nexport { a };\nexport * from './b';\nexport const c = a;\na;",
    );
    let flags: Vec<bool> = (0..5).map(|i| module.is_declaration_only(i)).collect();
    assert_eq!(flags, vec![true, true, true, false, false]);
}

#[test]
fn test_parse_error_has_location() {
    let result = Module::parse(
        ModuleId(0),
        PathBuf::from("/broken.js"),
        "const a = 1;\nconst b = ;".to_string(),
    );
    match result {
        Err(BundleError::Parse {
            file, line, column, ..
        }) => {
            assert_eq!(file, PathBuf::from("/broken.js"));
            assert_eq!((line, column), (2, 11));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}
