//! Bundling files on disk.

use esroll_bundler::{BundleError, BundleOptions, Bundler};
use std::fs;

#[test]
fn bundles_a_project_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    fs::create_dir_all(root.join("src/utils")).expect("mkdir");
    fs::write(
        root.join("src/main.js"),
        "import { greet } from './utils/greet';\nconsole.log(greet('world'));\n",
    )
    .expect("write main");
    fs::write(
        root.join("src/utils/greet.js"),
        "import { prefix } from '../config.js';\nexport function greet(name) { return prefix + name; }\nexport function unused() {}\n",
    )
    .expect("write greet");
    fs::write(root.join("src/config.js"), "export const prefix = 'hello ';\n").expect("write config");

    let mut bundler = Bundler::new(BundleOptions::new(root.join("src/main.js")));
    let code = bundler.build().expect("build");
    assert_eq!(
        code,
        "const prefix = 'hello ';\nfunction greet(name) { return prefix + name; }\nconsole.log(greet('world'));\n"
    );
    assert_eq!(bundler.module_count(), 3);
}

#[test]
fn missing_file_on_disk_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let entry = dir.path().join("main.js");
    fs::write(&entry, "import { a } from './gone';\na;").expect("write");
    let result = Bundler::new(BundleOptions::new(&entry)).build();
    match result {
        Err(BundleError::NotFound { path }) => assert_eq!(path, dir.path().join("gone.js")),
        other => panic!("expected not found, got {other:?}"),
    }
}
