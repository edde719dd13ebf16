//! File set construction
//!
//! Expands directory arguments into document paths (flat or recursive),
//! merges them with explicitly named documents, deduplicates, applies the
//! exclusion mask, and orders the result with the injected collation
//! comparator. Unreadable directories are reported and skipped; they must
//! not abort the run.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::model::{is_document_name, FileEntry};

fn has_document_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(is_document_name)
        .unwrap_or(false)
}

fn expand_flat(dir: &Path, found: &mut HashSet<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            eprintln!("Cannot read directory '{}': {}.", dir.display(), err);
            return;
        }
    };
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                eprintln!("Cannot read an entry of '{}': {}.", dir.display(), err);
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && has_document_name(&path) {
            found.insert(path);
        }
    }
}

fn expand_recursive(dir: &Path, found: &mut HashSet<PathBuf>) {
    // follow_links makes walkdir detect symlink loops and surface them as
    // traversal errors instead of recursing forever.
    for entry in WalkDir::new(dir).follow_links(true).min_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                eprintln!("Cannot read below '{}': {}.", dir.display(), err);
                continue;
            }
        };
        if entry.file_type().is_file() && has_document_name(entry.path()) {
            found.insert(entry.into_path());
        }
    }
}

/// Build the final ordered, deduplicated, filtered list of documents.
pub fn build_file_set(
    files: &[PathBuf],
    dirs: &[PathBuf],
    recursive: bool,
    exclude_mask: Option<&str>,
    collate: impl Fn(&str, &str) -> Ordering,
) -> Vec<FileEntry> {
    let mut found: HashSet<PathBuf> = HashSet::new();

    for dir in dirs {
        if recursive {
            expand_recursive(dir, &mut found);
        } else {
            expand_flat(dir, &mut found);
        }
    }
    found.extend(files.iter().cloned());

    let mut entries: Vec<FileEntry> = found
        .into_iter()
        .map(FileEntry::new)
        .filter(|entry| match exclude_mask {
            Some(mask) => !entry.name.starts_with(mask),
            None => true,
        })
        .collect();

    entries.sort_by(|a, b| collate(&a.name, &b.name));
    entries
}
