//! Text search engine
//!
//! Scans a document's extracted lines with the compiled pattern and renders
//! matching lines according to the active mode. In term-only mode each match
//! is expanded to its full word boundaries and emitted on its own, so a
//! pattern matching a sub-word fragment still recovers the whole word.

use regex::Regex;

use crate::core::model::{LineMatches, RenderMode};

/// Letters counted as word characters beyond ASCII `[A-Za-z0-9_]`.
const WORD_EXTRAS: &str =
    "áàâäčçďéèêëěíìîïňñóòôöřšťúùûüůýžÁÀÂÄČÇĎÉÈÊËĚÍÌÎÏŇÑÓÒÔÖŘŠŤÚÙÛÜŮÝŽ";

fn is_term_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || WORD_EXTRAS.contains(c)
}

/// Expand a match's byte range to the enclosing run of word characters.
fn expand_term(line: &str, start: usize, end: usize) -> (usize, usize) {
    let mut true_start = start;
    while let Some(prev) = line[..true_start].chars().next_back() {
        if !is_term_char(prev) {
            break;
        }
        true_start -= prev.len_utf8();
    }
    let mut true_end = end;
    while let Some(next) = line[true_end..].chars().next() {
        if !is_term_char(next) {
            break;
        }
        true_end += next.len_utf8();
    }
    (true_start, true_end)
}

/// Pull every boundary-expanded term out of one line. Scanning resumes after
/// each expanded end, so overlapping raw matches inside one word collapse
/// into a single term.
fn extract_terms(re: &Regex, line: &str, out: &mut Vec<String>) -> usize {
    let mut count = 0;
    let mut pos = 0;
    while pos < line.len() {
        let found = match re.find(&line[pos..]) {
            Some(m) => m,
            None => break,
        };
        if found.start() == found.end() {
            // Zero-width match yields no term; step one character and rescan.
            let at = pos + found.start();
            pos = at
                + line[at..]
                    .chars()
                    .next()
                    .map(|c| c.len_utf8())
                    .unwrap_or(1);
            continue;
        }
        let (start, end) = expand_term(line, pos + found.start(), pos + found.end());
        out.push(line[start..end].to_string());
        count += 1;
        pos = end;
    }
    count
}

fn position_label(index: usize, total: usize) -> String {
    format!("({}%) ", 100 * index / total)
}

/// Scan a document's lines, counting all non-overlapping matches and
/// rendering each matching line (or each isolated term) per `mode`.
pub fn scan_lines(re: &Regex, lines: &[String], mode: RenderMode) -> LineMatches {
    let mut result = LineMatches::default();
    let total = lines.len();

    for (index, line) in lines.iter().enumerate() {
        match mode {
            RenderMode::TermOnly => {
                result.hits += extract_terms(re, line, &mut result.rendered);
            }
            RenderMode::Position | RenderMode::Clean => {
                let count = re.find_iter(line).count();
                if count == 0 {
                    continue;
                }
                result.hits += count;
                result.rendered.push(match mode {
                    RenderMode::Position => format!("{}{}", position_label(index, total), line),
                    _ => line.clone(),
                });
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::RegexBuilder;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn pattern(p: &str) -> Regex {
        Regex::new(p).unwrap()
    }

    #[test]
    fn test_position_labeled_scan() {
        let result = scan_lines(
            &pattern("cat"),
            &lines(&["a cat sat", "category theory"]),
            RenderMode::Position,
        );
        assert_eq!(result.hits, 2);
        assert_eq!(
            result.rendered,
            vec!["(0%) a cat sat", "(50%) category theory"]
        );
    }

    #[test]
    fn test_clean_scan_renders_verbatim() {
        let result = scan_lines(
            &pattern("cat"),
            &lines(&["a cat sat", "no match here"]),
            RenderMode::Clean,
        );
        assert_eq!(result.hits, 1);
        assert_eq!(result.rendered, vec!["a cat sat"]);
    }

    #[test]
    fn test_term_only_expands_to_word_boundaries() {
        let result = scan_lines(
            &pattern("cat"),
            &lines(&["a cat sat", "category theory"]),
            RenderMode::TermOnly,
        );
        assert_eq!(result.hits, 2);
        assert_eq!(result.rendered, vec!["cat", "category"]);
    }

    #[test]
    fn test_term_only_two_disjoint_matches_on_one_line() {
        let result = scan_lines(
            &pattern("cat"),
            &lines(&["cat and catalog"]),
            RenderMode::TermOnly,
        );
        assert_eq!(result.hits, 2);
        assert_eq!(result.rendered, vec!["cat", "catalog"]);
    }

    #[test]
    fn test_term_expansion_crosses_accented_letters() {
        let result = scan_lines(
            &pattern("reflex"),
            &lines(&["slovní reflexí pokus"]),
            RenderMode::TermOnly,
        );
        assert_eq!(result.rendered, vec!["reflexí"]);
    }

    #[test]
    fn test_term_expansion_backwards() {
        let result = scan_lines(
            &pattern("flexí"),
            &lines(&["slovní reflexí pokus"]),
            RenderMode::TermOnly,
        );
        assert_eq!(result.rendered, vec!["reflexí"]);
    }

    #[test]
    fn test_overlapping_raw_matches_collapse_into_one_term() {
        // "an" matches twice inside "banana" but the first expansion swallows
        // the whole word; scanning resumes after it.
        let result = scan_lines(&pattern("an"), &lines(&["banana"]), RenderMode::TermOnly);
        assert_eq!(result.hits, 1);
        assert_eq!(result.rendered, vec!["banana"]);
    }

    #[test]
    fn test_multiple_hits_one_rendered_line() {
        let result = scan_lines(
            &pattern("a"),
            &lines(&["banana"]),
            RenderMode::Position,
        );
        assert_eq!(result.hits, 3);
        assert_eq!(result.rendered.len(), 1);
    }

    #[test]
    fn test_single_line_document_labels_zero() {
        let result = scan_lines(&pattern("x"), &lines(&["x"]), RenderMode::Position);
        assert_eq!(result.rendered, vec!["(0%) x"]);
    }

    #[test]
    fn test_percentage_is_monotonic() {
        let doc: Vec<String> = (0..7).map(|i| format!("x line {}", i)).collect();
        let result = scan_lines(&pattern("x"), &doc, RenderMode::Position);
        let percents: Vec<usize> = result
            .rendered
            .iter()
            .map(|l| {
                let end = l.find('%').unwrap();
                l[1..end].parse().unwrap()
            })
            .collect();
        assert_eq!(percents[0], 0);
        assert!(percents.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_empty_line_list_contributes_nothing() {
        let result = scan_lines(&pattern("x"), &[], RenderMode::Position);
        assert_eq!(result.hits, 0);
        assert!(result.rendered.is_empty());
    }

    #[test]
    fn test_case_sensitivity_is_a_compile_property() {
        let sensitive = pattern("Cat");
        let result = scan_lines(&sensitive, &lines(&["a cat sat"]), RenderMode::Clean);
        assert_eq!(result.hits, 0);

        let insensitive = RegexBuilder::new("Cat")
            .case_insensitive(true)
            .build()
            .unwrap();
        let result = scan_lines(&insensitive, &lines(&["a cat sat"]), RenderMode::Clean);
        assert_eq!(result.hits, 1);
    }

    #[test]
    fn test_is_term_char_table() {
        assert!(is_term_char('a'));
        assert!(is_term_char('Z'));
        assert!(is_term_char('7'));
        assert!(is_term_char('_'));
        assert!(is_term_char('č'));
        assert!(is_term_char('Ř'));
        assert!(!is_term_char(' '));
        assert!(!is_term_char('-'));
        assert!(!is_term_char('.'));
    }
}
