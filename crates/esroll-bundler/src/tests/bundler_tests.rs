use crate::bundler::*;
use crate::error::BundleError;
use crate::resolver::{MemoryReader, PathResolver};
use esroll_common::ModuleId;
use std::path::Path;

fn bundler(files: &[(&str, &str)]) -> Bundler {
    let mut reader = MemoryReader::new();
    for (path, source) in files {
        reader.insert(*path, *source);
    }
    Bundler::with_io(BundleOptions::new(files[0].0), PathResolver, reader)
}

#[test]
fn test_entry_id_is_used_unchanged() {
    let mut bundler = bundler(&[("/p/main", "run();")]);
    let id = bundler.fetch_module("/p/main", None).expect("fetch");
    assert_eq!(id, ModuleId(0));
    assert!(bundler.module_by_path(Path::new("/p/main")).is_some());
}

#[test]
fn test_fetch_module_caches_by_resolved_id() {
    let mut bundler = bundler(&[("/p/main.js", ""), ("/p/lib.js", "export const a = 1;")]);
    let main = bundler.fetch_module("/p/main.js", None).expect("main");
    let first = bundler
        .fetch_module("./lib", Some(Path::new("/p/main.js")))
        .expect("lib");
    let second = bundler
        .fetch_module("./lib.js", Some(Path::new("/p/main.js")))
        .expect("lib again");
    assert_ne!(main, first);
    assert_eq!(first, second);
    assert_eq!(bundler.module_count(), 2);
}

#[test]
fn test_define_external_name_is_empty() {
    let mut bundler = bundler(&[("/p/main.js", "console.log(1);")]);
    let main = bundler.fetch_module("/p/main.js", None).expect("main");
    assert!(bundler.define(main, "console").expect("define").is_empty());
}

#[test]
fn test_define_local_name_expands_dependencies_first() {
    let mut bundler = bundler(&[("/p/main.js", "const a = 1;\nconst b = a + 1;\nconst c = 3;")]);
    let main = bundler.fetch_module("/p/main.js", None).expect("main");
    let statements = bundler.define(main, "b").expect("define");
    let indices: Vec<u32> = statements.iter().map(|s| s.index).collect();
    assert_eq!(indices, vec![0, 1]);
}

#[test]
fn test_expand_statement_skips_already_emitted() {
    let mut bundler = bundler(&[("/p/main.js", "const a = 1;\nuse(a);\nuse(a, a);")]);
    let main = bundler.fetch_module("/p/main.js", None).expect("main");
    let first = bundler
        .expand_statement(StatementRef { module: main, index: 1 })
        .expect("first");
    let second = bundler
        .expand_statement(StatementRef { module: main, index: 2 })
        .expect("second");
    assert_eq!(first.iter().map(|s| s.index).collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(second.iter().map(|s| s.index).collect::<Vec<_>>(), vec![2]);
}

#[test]
fn test_expand_all_statements_skips_imports_and_export_lists() {
    let mut bundler = bundler(&[
        ("/p/main.js", "import { a } from './lib';\nexport { a };\nexport * from './lib';\nlog(a);"),
        ("/p/lib.js", "export const a = 1;"),
    ]);
    let main = bundler.fetch_module("/p/main.js", None).expect("main");
    let statements = bundler.expand_all_statements(main).expect("expand");
    assert_eq!(
        statements,
        vec![
            StatementRef { module: ModuleId(1), index: 0 },
            StatementRef { module: main, index: 3 },
        ]
    );
}

#[test]
fn test_generate_joins_with_newlines() {
    let mut bundler = bundler(&[("/p/main.js", "export function f() {}\nf();")]);
    let main = bundler.fetch_module("/p/main.js", None).expect("main");
    let code = bundler
        .generate(&[
            StatementRef { module: main, index: 0 },
            StatementRef { module: main, index: 1 },
        ])
        .expect("generate");
    assert_eq!(code, "function f() {}\nf();\n");
}

#[test]
fn test_missing_entry_is_not_found() {
    let mut bundler = Bundler::with_io(
        BundleOptions::new("/p/nowhere.js"),
        PathResolver,
        MemoryReader::new(),
    );
    assert!(matches!(bundler.build(), Err(BundleError::NotFound { .. })));
}

#[test]
fn test_options_output_is_carried() {
    let options = BundleOptions::new("/p/main.js").with_output("/p/out.js");
    let bundler = Bundler::with_io(options.clone(), PathResolver, MemoryReader::new());
    assert_eq!(bundler.options(), &options);
}
