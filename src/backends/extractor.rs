//! External text extraction
//!
//! Each document is handed to an external extractor program that prints the
//! document's text on stdout (`pdftotext <file> -` by default). The program
//! may be overridden through `PDFSEEK_EXTRACTOR`, which is also how the test
//! suite substitutes a plain-text extractor.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::{Command, Stdio};

pub const DEFAULT_EXTRACTOR: &str = "pdftotext";

/// Environment override for the extractor program.
pub const EXTRACTOR_ENV: &str = "PDFSEEK_EXTRACTOR";

/// The extractor program to invoke.
pub fn extractor_command() -> String {
    std::env::var(EXTRACTOR_ENV)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_EXTRACTOR.to_string())
}

/// Extract one document's text as lines. Blocks until the extractor exits.
pub fn extract_lines(command: &str, path: &Path) -> Result<Vec<String>> {
    let output = Command::new(command)
        .arg(path)
        .arg("-")
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("failed to run '{}'", command))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "'{}' reported {}: {}",
            command,
            output.status,
            stderr.trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect())
}
