//! Argument classification
//!
//! Resolves the raw, mostly order-free argument sequence into an `Intent` in
//! a single left-to-right pass. Three "expect-next" latches cover the
//! order-sensitive pairs (`-p` + pattern, `not` + exclude mask, `-s` +
//! destination); an armed latch always consumes exactly the next token,
//! whatever its shape. Everything else is classified by the most specific
//! interpretation that verifies: flag, existing document file, existing
//! directory, and only then the fallback search pattern.

use std::path::{Path, PathBuf};

use crate::core::error::Error;
use crate::core::model::{is_document_file, Intent, OutputTarget};

/// The reserved exclusion keyword. Special at most once; any later
/// occurrence is an ordinary token again.
const EXCLUDE_KEYWORD: &str = "not";

/// Outcome of classification: either the help request or a runnable intent.
#[derive(Debug, PartialEq, Eq)]
pub enum Classified {
    Help,
    Run(Intent),
}

#[derive(Default)]
struct Classifier {
    intent: Intent,
    pattern: Option<String>,
    expect_pattern: bool,
    expect_exclude: bool,
    expect_output: bool,
}

impl Classifier {
    fn set_pattern(&mut self, token: &str) -> Result<(), Error> {
        if token.is_empty() {
            return Err(Error::usage("Cannot search for an empty pattern."));
        }
        if self.pattern.is_some() {
            return Err(Error::usage("The search pattern may only be given once."));
        }
        self.pattern = Some(token.to_string());
        self.expect_pattern = false;
        Ok(())
    }

    fn set_exclude_mask(&mut self, token: &str) {
        self.intent.exclude_mask = Some(token.to_string());
        self.expect_exclude = false;
    }

    fn set_output(&mut self, token: &str) {
        self.intent.output = Some(if token == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(PathBuf::from(token))
        });
        self.expect_output = false;
    }

    fn classify_token(&mut self, token: &str) -> Result<Option<Classified>, Error> {
        // Armed latches win over every other reading of the token.
        if self.expect_pattern {
            self.set_pattern(token)?;
            return Ok(None);
        }
        if self.expect_exclude {
            self.set_exclude_mask(token);
            return Ok(None);
        }
        if self.expect_output {
            self.set_output(token);
            return Ok(None);
        }

        match token {
            "-h" => return Ok(Some(Classified::Help)),
            "-i" => self.intent.case_insensitive = true,
            "-c" => self.intent.clean_lines = true,
            "-t" => self.intent.term_only = true,
            "-r" => self.intent.recursive = true,
            "-q" => self.intent.quiet = true,
            "-p" => self.expect_pattern = true,
            "-s" => {
                if self.intent.output.is_some() {
                    return Err(Error::usage("The report destination may only be given once."));
                }
                self.expect_output = true;
            }
            _ if token == EXCLUDE_KEYWORD && self.intent.exclude_mask.is_none() => {
                self.expect_exclude = true;
            }
            _ if is_document_file(Path::new(token)) => {
                self.intent.files.push(PathBuf::from(token));
            }
            _ if Path::new(token).is_dir() => {
                self.intent.dirs.push(PathBuf::from(token));
            }
            _ if self.pattern.is_none() => self.set_pattern(token)?,
            _ => {
                return Err(Error::usage(format!("Unrecognized parameter '{}'.", token)));
            }
        }
        Ok(None)
    }

    fn finish(mut self) -> Result<Intent, Error> {
        if self.expect_exclude {
            return Err(Error::usage(
                "The reserved word 'not' must be followed by an exclude mask.",
            ));
        }
        if self.expect_output {
            return Err(Error::usage(
                "The '-s' option must be followed by a file name or '-'.",
            ));
        }
        // A trailing '-p' leaves the pattern unset and resolves here.
        let pattern = self.pattern.ok_or_else(|| Error::usage("Search for what?"))?;
        if pattern.contains('\n') {
            return Err(Error::usage("Multiline search patterns are not supported."));
        }
        self.intent.pattern = pattern;

        // Term lists are meant for piping, not for an annotated paged view.
        if self.intent.term_only && self.intent.output.is_none() {
            self.intent.output = Some(OutputTarget::Stdout);
        }
        Ok(self.intent)
    }
}

/// Classify the raw argument sequence into a `Classified` outcome.
///
/// Fails with a usage error when no pattern resolves, the pattern is empty or
/// multi-line, a marker has no following value, or a token fits no category.
pub fn classify<S: AsRef<str>>(tokens: &[S]) -> Result<Classified, Error> {
    let mut classifier = Classifier::default();
    for token in tokens {
        if let Some(outcome) = classifier.classify_token(token.as_ref())? {
            return Ok(outcome);
        }
    }
    classifier.finish().map(Classified::Run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn run(tokens: &[&str]) -> Result<Intent, Error> {
        match classify(tokens)? {
            Classified::Run(intent) => Ok(intent),
            Classified::Help => panic!("unexpected help outcome"),
        }
    }

    fn usage_message(result: Result<Intent, Error>) -> String {
        match result {
            Err(Error::Usage(msg)) => msg,
            other => panic!("expected usage error, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_token_becomes_pattern() {
        let intent = run(&["needle"]).unwrap();
        assert_eq!(intent.pattern, "needle");
        assert!(intent.files.is_empty());
        assert!(intent.dirs.is_empty());
    }

    #[test]
    fn test_flags_set_fields_in_any_order() {
        let intent = run(&["-i", "needle", "-r", "-q", "-c"]).unwrap();
        assert!(intent.case_insensitive);
        assert!(intent.recursive);
        assert!(intent.quiet);
        assert!(intent.clean_lines);
        assert_eq!(intent.pattern, "needle");
    }

    #[test]
    fn test_help_wins_immediately() {
        assert_eq!(classify(&["-h"]).unwrap(), Classified::Help);
        // Even with otherwise broken arguments after it.
        assert_eq!(classify(&["-h", "-s"]).unwrap(), Classified::Help);
    }

    #[test]
    fn test_help_after_pattern_marker_is_the_pattern() {
        let intent = run(&["-p", "-h"]).unwrap();
        assert_eq!(intent.pattern, "-h");
    }

    #[test]
    fn test_pattern_marker_takes_file_shaped_token() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("a.pdf");
        fs::write(&file, "x").unwrap();
        let file_arg = file.to_str().unwrap().to_string();

        // Without -p the existing file classifies as a file...
        let intent = run(&[file_arg.as_str(), "needle"]).unwrap();
        assert_eq!(intent.files.len(), 1);

        // ...with -p the very same token is the pattern.
        let intent = run(&["-p", file_arg.as_str()]).unwrap();
        assert_eq!(intent.pattern, file_arg);
        assert!(intent.files.is_empty());
    }

    #[test]
    fn test_existing_file_needs_document_extension() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("notes.txt");
        fs::write(&file, "x").unwrap();
        let file_arg = file.to_str().unwrap();

        // An existing non-PDF file falls through to the pattern rule.
        let intent = run(&[file_arg]).unwrap();
        assert_eq!(intent.pattern, file_arg);
        assert!(intent.files.is_empty());
    }

    #[test]
    fn test_directory_token_is_collected() {
        let temp = tempdir().unwrap();
        let dir_arg = temp.path().to_str().unwrap().to_string();
        let intent = run(&[dir_arg.as_str(), "needle"]).unwrap();
        assert_eq!(intent.dirs, vec![temp.path().to_path_buf()]);
        assert_eq!(intent.pattern, "needle");
    }

    #[test]
    fn test_not_keyword_arms_once() {
        let temp = tempdir().unwrap();
        let dir_arg = temp.path().to_str().unwrap().to_string();

        // First 'not' consumes a mask, second 'not' is an ordinary token and
        // becomes the pattern.
        let intent = run(&["not", "draft", "not", dir_arg.as_str()]).unwrap();
        assert_eq!(intent.exclude_mask.as_deref(), Some("draft"));
        assert_eq!(intent.pattern, "not");
        assert_eq!(intent.dirs.len(), 1);
    }

    #[test]
    fn test_not_mask_may_itself_be_not() {
        let intent = run(&["not", "not", "-p", "needle"]).unwrap();
        assert_eq!(intent.exclude_mask.as_deref(), Some("not"));
        assert_eq!(intent.pattern, "needle");
    }

    #[test]
    fn test_trailing_not_fails() {
        let msg = usage_message(run(&["needle", "not"]));
        assert!(msg.contains("'not'"));
    }

    #[test]
    fn test_trailing_output_marker_fails() {
        let msg = usage_message(run(&["needle", "-s"]));
        assert!(msg.contains("'-s'"));
    }

    #[test]
    fn test_trailing_pattern_marker_resolves_to_missing_pattern() {
        let msg = usage_message(run(&["-p"]));
        assert_eq!(msg, "Search for what?");
    }

    #[test]
    fn test_missing_pattern() {
        let msg = usage_message(run(&[] as &[&str]));
        assert_eq!(msg, "Search for what?");
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let msg = usage_message(run(&["-p", ""]));
        assert_eq!(msg, "Cannot search for an empty pattern.");
    }

    #[test]
    fn test_multiline_pattern_rejected() {
        let msg = usage_message(run(&["-p", "a\nb"]));
        assert_eq!(msg, "Multiline search patterns are not supported.");
    }

    #[test]
    fn test_second_pattern_is_unrecognized() {
        let msg = usage_message(run(&["first", "second"]));
        assert_eq!(msg, "Unrecognized parameter 'second'.");
    }

    #[test]
    fn test_explicit_second_pattern_rejected() {
        let msg = usage_message(run(&["first", "-p", "second"]));
        assert_eq!(msg, "The search pattern may only be given once.");
    }

    #[test]
    fn test_second_destination_rejected() {
        let msg = usage_message(run(&["x", "-s", "-", "-s", "other"]));
        assert_eq!(msg, "The report destination may only be given once.");
    }

    #[test]
    fn test_output_stdout_sentinel() {
        let intent = run(&["x", "-s", "-"]).unwrap();
        assert_eq!(intent.output, Some(OutputTarget::Stdout));
    }

    #[test]
    fn test_output_file_taken_verbatim() {
        let intent = run(&["x", "-s", "-r"]).unwrap();
        assert_eq!(
            intent.output,
            Some(OutputTarget::File(PathBuf::from("-r")))
        );
        assert!(!intent.recursive);
    }

    #[test]
    fn test_term_only_defaults_to_stdout() {
        let intent = run(&["-t", "x"]).unwrap();
        assert!(intent.term_only);
        assert_eq!(intent.output, Some(OutputTarget::Stdout));
    }

    #[test]
    fn test_term_only_keeps_explicit_destination() {
        let intent = run(&["-t", "x", "-s", "out.txt"]).unwrap();
        assert_eq!(
            intent.output,
            Some(OutputTarget::File(PathBuf::from("out.txt")))
        );
    }

    #[test]
    fn test_pager_default_when_no_destination() {
        let intent = run(&["x"]).unwrap();
        assert_eq!(intent.output, None);
    }
}
