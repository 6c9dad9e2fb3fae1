use once_cell::sync::Lazy;
use regex::Regex;

/// Field separator: result tables align columns with runs of two or more
/// spaces, while values themselves (names, cities) may contain single spaces.
static FIELD_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

/// Token rows for one raw table plus the maximum token count observed, which
/// drives schema inference downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
    pub width: usize,
}

/// Splits raw `<pre>` text into token rows. Blank lines are dropped entirely.
/// Each remaining line is split on 2+ whitespace runs with every token
/// trimmed. Lines are indented on the site, so position 0 of a data row is an
/// empty marker token; it is kept here (it counts toward the width) and
/// discarded during column assignment. Trailing whitespace is stripped before
/// splitting so no phantom token appears past the last column.
pub fn tokenize(text: &str) -> RawTable {
    let mut rows = Vec::new();
    let mut width = 0;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let tokens: Vec<String> = FIELD_SPLIT_RE
            .split(line.trim_end())
            .map(|token| token.trim().to_string())
            .collect();
        width = width.max(tokens.len());
        rows.push(tokens);
    }

    RawTable { rows, width }
}
