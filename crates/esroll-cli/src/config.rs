use anyhow::{Context, Result, anyhow, bail};
use esroll::BundleOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::args::CliArgs;

pub const CONFIG_FILE_NAME: &str = "esroll.config.json";

/// Contents of `esroll.config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub entry: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
}

pub fn parse_config(source: &str) -> Result<ConfigFile> {
    serde_json::from_str(source).context("invalid esroll config")
}

/// Read a config file. Relative paths inside it are resolved against the
/// file's directory.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let mut config = parse_config(&source)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;
    let base = path
        .parent()
        .ok_or_else(|| anyhow!("config has no parent directory"))?;
    config.entry = config.entry.map(|entry| base.join(entry));
    config.output = config.output.map(|output| base.join(output));
    Ok(config)
}

/// `esroll.config.json` in `cwd`, if it exists.
pub fn find_config(cwd: &Path) -> Option<PathBuf> {
    let candidate = cwd.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Merge the config file (explicit or discovered) with command-line flags.
/// Flags win; paths given on the command line are relative to `cwd`.
pub fn resolve_options(args: &CliArgs, cwd: &Path) -> Result<BundleOptions> {
    let config_path = match &args.config {
        Some(path) => Some(cwd.join(path)),
        None => find_config(cwd),
    };
    let config = match config_path {
        Some(path) => load_config(&path)?,
        None => ConfigFile::default(),
    };

    let entry = match (&args.entry, config.entry) {
        (Some(entry), _) => cwd.join(entry),
        (None, Some(entry)) => entry,
        (None, None) => {
            bail!("no entry module: pass an ENTRY argument or set \"entry\" in {CONFIG_FILE_NAME}")
        }
    };
    let output = args
        .output
        .as_ref()
        .map(|output| cwd.join(output))
        .or(config.output);

    Ok(BundleOptions { entry, output })
}
