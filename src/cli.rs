//! CLI surface and run orchestration
//!
//! Owns the usage text and drives a run end to end: classify the arguments,
//! compile the pattern, verify prerequisites, build the file set, scan each
//! document through the external extractor, then hand the formatted report
//! to the output router.

use anyhow::Result;
use regex::{Regex, RegexBuilder};
use std::time::Instant;

use crate::backends::extractor::{extract_lines, extractor_command};
use crate::backends::fileset::build_file_set;
use crate::backends::output::{deliver, pager_command};
use crate::core::collate;
use crate::core::error::Error;
use crate::core::intent::{classify, Classified};
use crate::core::model::{Intent, OutputTarget, Report};
use crate::core::render::format_report;
use crate::core::search::scan_lines;
use crate::core::util::command_exists;

const HELP: &str = r#"
    Search PDF documents for occurrences of a pattern, count them and browse
    the resulting report in the 'less' pager. Expects 'pdftotext' and 'less'
    to be present on your system.

    Usage:
        pdfseek -h
        pdfseek [-i] [-c|-t] [-r] [-q] [file1.pdf] [...] [dir1] [...]
                [not exclude-mask] [-s file|-] {[-p] pattern}

    Options and parameters:
        The order of parameters is mostly irrelevant, apart from the obvious
        pairs '{[-p] pattern}', '[not exclude-mask]' and '[-s file|-]'.
        -h:         prints this help and exits.
        -i:         makes the search case insensitive; it is case sensitive
                    by default.
        -c:         prints matching lines verbatim, without the position
                    percentage label.
        -t:         prints each match as an isolated term expanded to its word
                    boundaries; implies -c, and the report goes to standard
                    output unless -s says otherwise.
        -r:         descends into subdirectories of any directory argument.
        -q:         stays silent when nothing is found.
        -p:         optionally marks the next argument as the search pattern,
                    e.g. when you need to search for the reserved word 'not'.
        -s file|-:  writes the report to 'file' (which must not exist yet)
                    or to standard output ('-') instead of the pager.

        fileN.pdf:  file to be searched in, may be repeated.
        dirN:       directory to be searched in; every PDF file in it (the
                    .pdf suffix is case insensitive, so 'dir/file.PDF' counts
                    as well) is included. Without -r only the directory itself
                    is listed.
        At least one PDF file or a directory containing one must be given.

        not exclude-mask:
                    'not' is a reserved word after which must come exactly one
                    argument 'exclude-mask'. It may appear in this capacity
                    once at most; any other occurrence is treated normally,
                    i.e. as a file, directory or search pattern.
                    'exclude-mask' means the beginning of PDF file names to be
                    excluded from the search.
        pattern:    the search pattern, must occur exactly once, may contain a
                    regexp, may be introduced with '-p'.

    Examples:
        pdfseek "my text" file.pdf
            Searches for 'my text' in the 'file.pdf' file.

        pdfseek file.pdf some/directory "reflex[eí]" -i other/directory
            Searches case insensitively for the regexp "reflex[eí]" in
            'file.pdf' (which must exist, otherwise the token would be taken
            as the search pattern) and in every PDF found in the two
            directories.

        pdfseek not/ not not -p not
            Searches for the pattern 'not' in PDFs in the directory 'not'
            (note the trailing slash distinguishing it from both the pattern
            and the reserved word), excluding any PDF whose name begins
            with 'not'.

        pdfseek -t -r knihovna "slov"
            Prints every matched term (e.g. 'slovník', 'slovo') found
            anywhere below the 'knihovna' directory, one per line.
"#;

fn compile_pattern(intent: &Intent) -> Result<Regex, Error> {
    RegexBuilder::new(&intent.pattern)
        .case_insensitive(intent.case_insensitive)
        .build()
        .map_err(|err| Error::usage(format!("Invalid search pattern: {}", err)))
}

fn check_prerequisites(intent: &Intent, extractor: &str) -> Result<(), Error> {
    if !command_exists(extractor) {
        return Err(Error::MissingPrerequisite(extractor.to_string()));
    }
    if intent.output.is_none() {
        let pager = pager_command();
        if !command_exists(&pager) {
            return Err(Error::MissingPrerequisite(pager));
        }
    }
    Ok(())
}

/// Run the program for the given raw arguments.
pub fn run(args: &[String]) -> Result<()> {
    let intent = match classify(args)? {
        Classified::Help => {
            println!("{}", HELP);
            return Ok(());
        }
        Classified::Run(intent) => intent,
    };

    let pattern = compile_pattern(&intent)?;

    // Reject a doomed save destination before any extraction work; the write
    // itself re-verifies with an exclusive create.
    if let Some(OutputTarget::File(path)) = &intent.output {
        if path.exists() {
            return Err(Error::OutputCollision(path.clone()).into());
        }
    }

    let extractor = extractor_command();
    check_prerequisites(&intent, &extractor)?;

    let entries = build_file_set(
        &intent.files,
        &intent.dirs,
        intent.recursive,
        intent.exclude_mask.as_deref(),
        collate::compare,
    );
    if entries.is_empty() {
        return Err(Error::usage("Search where?").into());
    }

    let mode = intent.render_mode();
    let started = Instant::now();
    let mut report = Report::new();
    for entry in &entries {
        match extract_lines(&extractor, &entry.path) {
            Ok(lines) => report.add_file(entry, scan_lines(&pattern, &lines, mode)),
            Err(err) => eprintln!("Skipping '{}': {:#}.", entry.path.display(), err),
        }
    }
    report.elapsed = started.elapsed();

    if report.total_hits == 0 {
        if !intent.quiet {
            println!("No hits.");
        }
        return Ok(());
    }

    deliver(&format_report(&report, &intent), &intent)
}
