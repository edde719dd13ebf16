//! Search data model
//!
//! The resolved command line (`Intent`), the files it expands to
//! (`FileEntry`), and the accumulated match report (`Report`). Each stage
//! builds its value once and hands it to the next stage unchanged.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where the finished report goes. `None` on the `Intent` means the pager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to a file that must not exist yet.
    File(PathBuf),
    /// Write to standard output (`-s -`).
    Stdout,
}

/// How matching lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Line prefixed with its position percentage: `(42%) ...` (default).
    Position,
    /// The matching line verbatim (`-c`).
    Clean,
    /// Each match isolated to its word boundaries, one term per entry (`-t`).
    TermOnly,
}

/// Fully resolved, immutable configuration derived from the raw arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Intent {
    pub pattern: String,
    pub case_insensitive: bool,
    pub clean_lines: bool,
    pub term_only: bool,
    pub recursive: bool,
    pub quiet: bool,
    pub exclude_mask: Option<String>,
    pub output: Option<OutputTarget>,
    pub files: Vec<PathBuf>,
    pub dirs: Vec<PathBuf>,
}

impl Intent {
    /// The rendering mode, decided once. `-t` implies clean lines.
    pub fn render_mode(&self) -> RenderMode {
        if self.term_only {
            RenderMode::TermOnly
        } else if self.clean_lines {
            RenderMode::Clean
        } else {
            RenderMode::Position
        }
    }

    /// True when term-only output goes to stdout: the report degrades to bare
    /// terms suitable for further piping.
    pub fn simple_output(&self) -> bool {
        self.term_only && self.output == Some(OutputTarget::Stdout)
    }
}

/// A document selected for searching, with its display labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    /// Base file name.
    pub name: String,
    /// Containing-directory label, "" for a bare file name.
    pub dir: String,
}

impl FileEntry {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_string_lossy().into_owned(),
            _ => String::new(),
        };
        Self { path, name, dir }
    }
}

/// One scanned file's raw search output: total match count and the rendered
/// lines (or terms) that carried at least one match.
#[derive(Debug, Clone, Default)]
pub struct LineMatches {
    pub hits: usize,
    pub rendered: Vec<String>,
}

/// Aggregated matches of a single document, as shown in the report.
#[derive(Debug, Clone)]
pub struct PerFileResult {
    pub name: String,
    pub dir: String,
    pub hits: usize,
    pub lines: Vec<String>,
}

/// The whole run's result: totals plus per-file sections in file order.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub total_hits: usize,
    pub total_lines: usize,
    pub files: Vec<PerFileResult>,
    pub elapsed: Duration,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file's matches into the report. Files with zero hits are
    /// omitted entirely; appending order must equal file-processing order.
    pub fn add_file(&mut self, entry: &FileEntry, matches: LineMatches) {
        if matches.hits == 0 {
            return;
        }
        self.total_hits += matches.hits;
        self.total_lines += matches.rendered.len();
        self.files.push(PerFileResult {
            name: entry.name.clone(),
            dir: entry.dir.clone(),
            hits: matches.hits,
            lines: matches.rendered,
        });
    }
}

/// True when `name` looks like a PDF document: `.pdf` suffix, ASCII case
/// insensitive, at least one character before the extension.
pub fn is_document_name(name: &str) -> bool {
    const EXT: &str = ".pdf";
    name.len() > EXT.len()
        && name
            .get(name.len() - EXT.len()..)
            .map(|tail| tail.eq_ignore_ascii_case(EXT))
            .unwrap_or(false)
}

/// True when `path` is an existing regular file with a document name.
pub fn is_document_file(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .map(is_document_name)
            .unwrap_or(false)
}
