use anyhow::{Context, Result};
use esroll::bundler::{ExportBinding, ImportBinding, NameMap};
use esroll::{BundleError, Bundler, StatementSummary};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::args::CliArgs;
use crate::config::resolve_options;

/// What a run produced. Bundle errors are returned as a value so the caller
/// can render them; setup failures (bad config, unwritable output) are `Err`.
#[derive(Debug)]
pub enum RunOutcome {
    /// Text for stdout.
    Printed(String),
    /// The bundle was written to this file.
    Written(PathBuf),
    Failed(BundleError),
}

pub fn run(args: &CliArgs, cwd: &Path) -> Result<RunOutcome> {
    let options = resolve_options(args, cwd)?;
    debug!(entry = %options.entry.display(), analyze = args.analyze, "resolved options");

    if args.analyze {
        let mut bundler = Bundler::new(options.clone());
        let analysis = match analyze(&mut bundler, &options.entry) {
            Ok(analysis) => analysis,
            Err(error) => return Ok(RunOutcome::Failed(error)),
        };
        let mut json = serde_json::to_string_pretty(&analysis)
            .context("failed to serialize module analysis")?;
        json.push('\n');
        return Ok(RunOutcome::Printed(json));
    }

    let code = match Bundler::new(options.clone()).build() {
        Ok(code) => code,
        Err(error) => return Ok(RunOutcome::Failed(error)),
    };
    match options.output {
        Some(path) => {
            write_bundle(&path, &code)?;
            Ok(RunOutcome::Written(path))
        }
        None => Ok(RunOutcome::Printed(code)),
    }
}

fn write_bundle(path: &Path, code: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory: {}", parent.display()))?;
    }
    std::fs::write(path, code)
        .with_context(|| format!("failed to write bundle: {}", path.display()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleAnalysis<'a> {
    pub path: &'a Path,
    pub imports: &'a NameMap<ImportBinding>,
    pub exports: &'a NameMap<ExportBinding>,
    pub star_exports: &'a [String],
    pub statements: Vec<StatementSummary>,
}

/// Fetch `entry` and collect its import/export tables and per-statement
/// analysis.
pub fn analyze<'a>(bundler: &'a mut Bundler, entry: &Path) -> Result<ModuleAnalysis<'a>, BundleError> {
    let id = bundler.fetch_module(&entry.to_string_lossy(), None)?;
    let bundler: &'a Bundler = bundler;
    let Some(module) = bundler.module(id) else {
        return Err(BundleError::NotFound {
            path: entry.to_path_buf(),
        });
    };

    Ok(ModuleAnalysis {
        path: &module.path,
        imports: &module.imports,
        exports: &module.exports,
        star_exports: &module.star_exports,
        statements: module.statements.iter().map(|s| s.summary()).collect(),
    })
}
