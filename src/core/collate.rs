//! Locale-aware file name ordering
//!
//! The file set is sorted with an injected comparator so no process-global
//! locale state is ever touched. The production comparator folds diacritics
//! to their base letters, so "čas.pdf" sorts next to "cas.pdf" instead of
//! after "z". Ties break on the case-folded form with accents kept, then on
//! the raw string.

use once_cell::sync::Lazy;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Accented Latin letters and their base letters, lowercase only; input is
/// case-folded before lookup.
const FOLD_PAIRS: &[(char, char)] = &[
    ('á', 'a'),
    ('à', 'a'),
    ('â', 'a'),
    ('ä', 'a'),
    ('č', 'c'),
    ('ç', 'c'),
    ('ď', 'd'),
    ('é', 'e'),
    ('è', 'e'),
    ('ê', 'e'),
    ('ë', 'e'),
    ('ě', 'e'),
    ('í', 'i'),
    ('ì', 'i'),
    ('î', 'i'),
    ('ï', 'i'),
    ('ň', 'n'),
    ('ñ', 'n'),
    ('ó', 'o'),
    ('ò', 'o'),
    ('ô', 'o'),
    ('ö', 'o'),
    ('ř', 'r'),
    ('š', 's'),
    ('ť', 't'),
    ('ú', 'u'),
    ('ù', 'u'),
    ('û', 'u'),
    ('ü', 'u'),
    ('ů', 'u'),
    ('ý', 'y'),
    ('ž', 'z'),
];

static FOLD: Lazy<HashMap<char, char>> = Lazy::new(|| FOLD_PAIRS.iter().copied().collect());

fn case_fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn base_fold(c: char) -> char {
    let lower = case_fold(c);
    FOLD.get(&lower).copied().unwrap_or(lower)
}

/// Collation key: the diacritic-folded form first, the case-folded form as a
/// tie breaker.
fn sort_key(s: &str) -> (String, String) {
    (s.chars().map(base_fold).collect(), s.chars().map(case_fold).collect())
}

/// Locale-aware comparison of two file names.
pub fn compare(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b)).then_with(|| a.cmp(b))
}
