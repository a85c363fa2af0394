use colored::Colorize;
use esroll::BundleError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct Reporter {
    color: bool,
    sources: HashMap<PathBuf, String>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            sources: HashMap::new(),
        }
    }

    /// Seed the source of a file so snippets do not hit the filesystem.
    pub fn add_source(&mut self, path: impl Into<PathBuf>, source: impl Into<String>) {
        self.sources.insert(path.into(), source.into());
    }

    pub fn render(&mut self, error: &BundleError) -> String {
        let category = if self.color {
            "error".red().bold().to_string()
        } else {
            "error".to_string()
        };

        let BundleError::Parse {
            file,
            line,
            column,
            message,
        } = error
        else {
            return format!("{category}: {error}");
        };

        let location = format!("{}:{line}:{column}", file.display());
        let location = if self.color {
            location.cyan().to_string()
        } else {
            location
        };
        let mut output = format!("{location} - {category}: {message}");
        if let Some(snippet) = self.format_snippet(file, *line, *column) {
            output.push_str(&snippet);
        }
        output
    }

    /// The offending source line with a marker under `column`.
    ///   2   export const = 2;
    ///                    ~
    fn format_snippet(&mut self, file: &Path, line: u32, column: u32) -> Option<String> {
        let color = self.color;
        let source = self.ensure_source(file)?;
        let line_text = source.lines().nth(line.checked_sub(1)? as usize)?;

        let mut underline = String::new();
        for ch in line_text.chars().take(column.saturating_sub(1) as usize) {
            underline.push(if ch == '\t' { '\t' } else { ' ' });
        }
        underline.push('~');

        let underline = if color {
            underline.red().to_string()
        } else {
            underline
        };
        Some(format!("\n\n  {line:>3}   {line_text}\n        {underline}"))
    }

    fn ensure_source(&mut self, file: &Path) -> Option<&str> {
        if !self.sources.contains_key(file) {
            let contents = std::fs::read_to_string(file).ok()?;
            self.sources.insert(file.to_path_buf(), contents);
        }
        self.sources.get(file).map(String::as_str)
    }
}
