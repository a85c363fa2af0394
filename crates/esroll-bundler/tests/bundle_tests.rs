//! End-to-end bundling over in-memory module graphs.

use esroll_bundler::{BundleError, BundleOptions, Bundler, FileReader, MemoryReader, PathResolver};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

fn build(files: &[(&str, &str)]) -> Result<String, BundleError> {
    let mut reader = MemoryReader::new();
    for (path, source) in files {
        reader.insert(*path, *source);
    }
    Bundler::with_io(BundleOptions::new(files[0].0), PathResolver, reader).build()
}

/// Counts reads per module id.
struct CountingReader {
    inner: MemoryReader,
    reads: Rc<RefCell<BTreeMap<PathBuf, usize>>>,
}

impl FileReader for CountingReader {
    fn read(&self, id: &Path) -> Result<String, BundleError> {
        *self.reads.borrow_mut().entry(id.to_path_buf()).or_default() += 1;
        self.inner.read(id)
    }
}

#[test]
fn transitive_dependency_is_emitted_without_export_keyword() {
    let code = build(&[
        ("/p/main.js", "import { f } from './A';\nconsole.log(f());\n"),
        ("/p/A.js", "export const x = 1;\nexport function f() { return x; }\n"),
    ])
    .expect("build");
    assert_eq!(
        code,
        "const x = 1;\nfunction f() { return x; }\nconsole.log(f());\n"
    );
    assert!(!code.contains("export"));
}

#[test]
fn reexported_definition_precedes_usage() {
    let code = build(&[
        ("/p/C.js", "import { y } from './B';\nconsole.log(y);"),
        ("/p/B.js", "export { x as y } from './A';"),
        ("/p/A.js", "export const x = 1;"),
    ])
    .expect("build");
    assert_eq!(code, "const x = 1;\nconsole.log(y);\n");
}

#[test]
fn multi_hop_reexport_chain_reaches_definition() {
    let code = build(&[
        ("/p/main.js", "import { renamed } from './D';\nconsole.log(renamed);"),
        ("/p/D.js", "export * from './C';"),
        ("/p/C.js", "export { value as renamed } from './B';"),
        ("/p/B.js", "import { value } from './A';\nexport { value };"),
        ("/p/A.js", "export const value = 42;\nexport const other = 0;"),
    ])
    .expect("build");
    assert_eq!(code, "const value = 42;\nconsole.log(renamed);\n");
}

#[test]
fn export_function_is_unwrapped_and_default_keeps_name() {
    let code = build(&[
        ("/p/main.js", "import bar, { foo } from './lib';\nbar();\nfoo();"),
        (
            "/p/lib.js",
            "export function foo() { return 1; }\nexport default function bar() { return foo(); }",
        ),
    ])
    .expect("build");
    assert_eq!(
        code,
        "function foo() { return 1; }\nfunction bar() { return foo(); }\nbar();\nfoo();\n"
    );
}

#[test]
fn unused_statements_are_shaken_out() {
    let code = build(&[
        ("/p/main.js", "import { used } from './lib';\nlog(used);"),
        (
            "/p/lib.js",
            "export const used = helper();\nexport const unused = 2;\nconst internal = 3;\nfunction helper() { return 1; }",
        ),
    ])
    .expect("build");
    assert_eq!(
        code,
        "function helper() { return 1; }\nconst used = helper();\nlog(used);\n"
    );
}

#[test]
fn shared_dependency_is_emitted_once() {
    let code = build(&[
        ("/p/main.js", "import { x } from './lib';\nconsole.log(x);\nconsole.log(x + 1);"),
        ("/p/lib.js", "export const x = 1;"),
    ])
    .expect("build");
    assert_eq!(code, "const x = 1;\nconsole.log(x);\nconsole.log(x + 1);\n");
}

#[test]
fn diamond_graph_reads_each_module_once() {
    let reads = Rc::new(RefCell::new(BTreeMap::new()));
    let inner = MemoryReader::new()
        .with_file("/p/main.js", "import { a } from './a';\nimport { b } from './b';\nrun(a, b);")
        .with_file("/p/a.js", "import { s } from './shared';\nexport const a = s + 1;")
        .with_file("/p/b.js", "import { s } from './shared.js';\nexport const b = s + 2;")
        .with_file("/p/shared.js", "export const s = 0;");
    let reader = CountingReader {
        inner,
        reads: Rc::clone(&reads),
    };
    let mut bundler = Bundler::with_io(BundleOptions::new("/p/main.js"), PathResolver, reader);
    let code = bundler.build().expect("build");

    assert_eq!(
        code,
        "const s = 0;\nconst a = s + 1;\nconst b = s + 2;\nrun(a, b);\n"
    );
    assert_eq!(bundler.module_count(), 4);
    assert!(reads.borrow().values().all(|count| *count == 1));
    assert_eq!(reads.borrow().len(), 4);
}

#[test]
fn mutually_recursive_functions_are_emitted_once() {
    let code = build(&[
        ("/p/main.js", "import { isEven } from './lib';\nconsole.log(isEven(4));"),
        (
            "/p/lib.js",
            "export function isEven(n) { return n === 0 ? true : isOdd(n - 1); }\n\
             export function isOdd(n) { return n === 0 ? false : isEven(n - 1); }",
        ),
    ])
    .expect("build");
    assert_eq!(
        code,
        "function isOdd(n) { return n === 0 ? false : isEven(n - 1); }\n\
         function isEven(n) { return n === 0 ? true : isOdd(n - 1); }\n\
         console.log(isEven(4));\n"
    );
}

#[test]
fn alias_cycle_is_an_error() {
    let result = build(&[
        ("/p/main.js", "import { a } from './a';\nuse(a);"),
        ("/p/a.js", "export { a } from './b';"),
        ("/p/b.js", "export { a } from './a';"),
    ]);
    match result {
        Err(BundleError::CircularReexport { name, .. }) => assert_eq!(name, "a"),
        other => panic!("expected circular re-export, got {other:?}"),
    }
}

#[test]
fn namespace_import_is_unsupported() {
    let result = build(&[
        ("/p/main.js", "import * as ns from './lib';\nns.x;"),
        ("/p/lib.js", "export const x = 1;"),
    ]);
    assert!(matches!(
        result,
        Err(BundleError::UnsupportedNamespace { name, .. }) if name == "ns"
    ));
}

#[test]
fn namespace_reexport_is_unsupported() {
    let result = build(&[
        ("/p/main.js", "import { ns } from './barrel';\nns.x;"),
        ("/p/barrel.js", "export * as ns from './lib';"),
        ("/p/lib.js", "export const x = 1;"),
    ]);
    assert!(matches!(
        result,
        Err(BundleError::UnsupportedNamespace { name, .. }) if name == "ns"
    ));
}

#[test]
fn missing_export_is_an_error() {
    let result = build(&[
        ("/p/main.js", "import { missing } from './lib';\nmissing();"),
        ("/p/lib.js", "export const x = 1;\nexport * from './more';"),
        ("/p/more.js", "export const y = 2;"),
    ]);
    match result {
        Err(BundleError::ExportNotFound { module, name }) => {
            assert_eq!(module, PathBuf::from("/p/lib.js"));
            assert_eq!(name, "missing");
        }
        other => panic!("expected missing export, got {other:?}"),
    }
}

#[test]
fn unused_imports_are_never_fetched() {
    let mut bundler = Bundler::with_io(
        BundleOptions::new("/p/main.js"),
        PathResolver,
        MemoryReader::new().with_file("/p/main.js", "import './polyfill';\nimport { a } from './a';\nrun();"),
    );
    assert_eq!(bundler.build().expect("build"), "run();\n");
    assert_eq!(bundler.module_count(), 1);
}

#[test]
fn missing_dependency_is_not_found() {
    let result = build(&[("/p/main.js", "import { a } from './missing';\na();")]);
    assert!(matches!(
        result,
        Err(BundleError::NotFound { path }) if path == Path::new("/p/missing.js")
    ));
}

#[test]
fn parse_error_in_dependency_names_the_file() {
    let result = build(&[
        ("/p/main.js", "import { a } from './lib';\na();"),
        ("/p/lib.js", "export const a = 1;\nexport const = 2;"),
    ]);
    match result {
        Err(BundleError::Parse { file, line, .. }) => {
            assert_eq!(file, PathBuf::from("/p/lib.js"));
            assert_eq!(line, 2);
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn duplicate_import_in_entry_is_an_error() {
    let result = build(&[("/p/main.js", "import { a } from './x';\nimport { a } from './y';")]);
    assert!(matches!(result, Err(BundleError::DuplicateBinding { .. })));
}

#[test]
fn entry_exports_are_kept_as_code() {
    let code = build(&[("/p/main.js", "export const a = 1;\nexport { a as b };\nexport class K {}")])
        .expect("build");
    assert_eq!(code, "const a = 1;\nclass K {}\n");
}

#[test]
fn default_expression_export_is_emitted_verbatim() {
    let code = build(&[
        ("/p/main.js", "import d from './l';\nuse(d);\n"),
        ("/p/l.js", "const foo = 1;\nexport default foo + 1;\n"),
    ])
    .expect("build");
    assert_eq!(code, "const foo = 1;\nexport default foo + 1;\nuse(d);\n");
}
