//! Report delivery
//!
//! Routes the finished report to the pager, a named file, or stdout. The
//! pager path goes through an exclusively created temp file named after the
//! process id; a same-named leftover is a hard failure rather than something
//! to silently reuse. The save path re-verifies exclusivity at write time
//! with `create_new`, since the destination was only checked before the scan.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::error::Error;
use crate::core::model::{Intent, OutputTarget};
use crate::core::render::HEADER_ANCHOR;

pub const DEFAULT_PAGER: &str = "less";

/// Environment override for the pager program.
pub const PAGER_ENV: &str = "PDFSEEK_PAGER";

/// The pager program to invoke.
pub fn pager_command() -> String {
    std::env::var(PAGER_ENV)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_PAGER.to_string())
}

/// Pager arguments up to (but not including) the report file: `-I` for
/// case-insensitive searches, plus the initial-position hint matching either
/// the pattern or the report header.
fn pager_args(intent: &Intent) -> Vec<String> {
    let mut args = Vec::new();
    if intent.case_insensitive {
        args.push("-I".to_string());
    }
    args.push("-p".to_string());
    args.push(format!("{}|{}", intent.pattern, HEADER_ANCHOR));
    args
}

/// Candidate directories for the temporary report file, tried in order.
fn temp_candidates() -> Vec<PathBuf> {
    vec![PathBuf::from("/dev/shm"), std::env::temp_dir()]
}

fn temp_file_name() -> String {
    format!(".pdfseek.{}", std::process::id())
}

/// Create the temporary report file exclusively. A pre-existing same-named
/// file in a usable candidate directory is a hard failure; an unusable
/// candidate is skipped.
fn create_temp_report(text: &str) -> Result<PathBuf> {
    let name = temp_file_name();
    for dir in temp_candidates() {
        if !dir.is_dir() {
            continue;
        }
        let path = dir.join(&name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(text.as_bytes())
                    .with_context(|| format!("cannot write '{}'", path.display()))?;
                return Ok(path);
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                return Err(Error::TempResource(format!(
                    "Temporary file '{}' already exists.",
                    path.display()
                ))
                .into());
            }
            Err(_) => continue,
        }
    }
    Err(Error::TempResource("Couldn't create a temporary file for the report.".to_string()).into())
}

fn page_report(text: &str, intent: &Intent) -> Result<()> {
    let temp_path = create_temp_report(text)?;

    let status = Command::new(pager_command())
        .args(pager_args(intent))
        .arg(&temp_path)
        .status();

    // The temp file never outlives the pager, success or not.
    let _ = std::fs::remove_file(&temp_path);

    let status = status.with_context(|| format!("failed to run '{}'", pager_command()))?;
    if !status.success() {
        anyhow::bail!("'{}' reported {}", pager_command(), status);
    }
    Ok(())
}

fn save_report(text: &str, path: &Path) -> Result<()> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            return Err(Error::OutputCollision(path.to_path_buf()).into());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("cannot create '{}'", path.display()));
        }
    };
    file.write_all(text.as_bytes())
        .with_context(|| format!("cannot write '{}'", path.display()))
}

/// Deliver the rendered report to the destination resolved in the intent.
pub fn deliver(text: &str, intent: &Intent) -> Result<()> {
    match &intent.output {
        None => page_report(text, intent),
        Some(OutputTarget::File(path)) => save_report(text, path),
        Some(OutputTarget::Stdout) => {
            print!("{}", text);
            std::io::stdout().flush().context("cannot write to stdout")
        }
    }
}
