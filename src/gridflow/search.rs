//! Regex find and replace over a text.
//!
//! Patterns are user input. A pattern that fails to compile is treated as
//! matching nothing: `find_all` returns an empty list and `replace` returns the
//! text untouched. Spans are half-open `(start, end)` character offsets.
//!
//! Replacement strings use the `regex` crate expansion syntax (`$1`, `${name}`,
//! `$$` for a literal dollar).

use regex::{Regex, RegexBuilder};

pub type Span = (usize, usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub text: String,
    pub count: usize,
}

/// Stateless apart from remembering the last pattern and case sensitivity,
/// which a UI may read back to pre-fill its search box.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    last_search: String,
    case_sensitive: bool,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_search(&self) -> &str {
        &self.last_search
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.case_sensitive = case_sensitive;
    }

    pub fn find_all(&mut self, text: &str, pattern: &str, case_sensitive: bool) -> Vec<Span> {
        self.remember(pattern, case_sensitive);
        match compile(pattern, case_sensitive) {
            Some(regex) => char_spans(&regex, text),
            None => Vec::new(),
        }
    }

    /// First match starting at or after `from_position`.
    pub fn find_next(
        &mut self,
        text: &str,
        pattern: &str,
        from_position: usize,
        case_sensitive: bool,
    ) -> Option<Span> {
        self.find_all(text, pattern, case_sensitive)
            .into_iter()
            .find(|(start, _)| *start >= from_position)
    }

    /// Replace the first match, or every match when `replace_all` is set.
    ///
    /// `count` is the number of substitutions performed, so replacing `a` with
    /// `aa` in `"aaa"` reports 3.
    pub fn replace(
        &mut self,
        text: &str,
        pattern: &str,
        replacement: &str,
        replace_all: bool,
        case_sensitive: bool,
    ) -> Replacement {
        self.remember(pattern, case_sensitive);
        let Some(regex) = compile(pattern, case_sensitive) else {
            return Replacement {
                text: text.to_string(),
                count: 0,
            };
        };

        let count = if replace_all {
            regex.find_iter(text).count()
        } else {
            usize::from(regex.is_match(text))
        };
        if count == 0 {
            return Replacement {
                text: text.to_string(),
                count,
            };
        }

        let replaced = if replace_all {
            regex.replace_all(text, replacement)
        } else {
            regex.replacen(text, 1, replacement)
        };
        Replacement {
            text: replaced.into_owned(),
            count,
        }
    }

    fn remember(&mut self, pattern: &str, case_sensitive: bool) {
        self.last_search = pattern.to_string();
        self.case_sensitive = case_sensitive;
    }
}

/// Whether `pattern` compiles. Lets a caller tell "no match" from "bad pattern".
pub fn is_valid_pattern(pattern: &str) -> bool {
    Regex::new(pattern).is_ok()
}

fn compile(pattern: &str, case_sensitive: bool) -> Option<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|e| tracing::debug!(pattern, error = %e, "ignoring invalid search pattern"))
        .ok()
}

/// Match spans converted from byte to character offsets in one left-to-right pass.
fn char_spans(regex: &Regex, text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut byte_pos = 0;
    let mut char_pos = 0;
    for m in regex.find_iter(text) {
        let start = char_pos + text[byte_pos..m.start()].chars().count();
        let end = start + m.as_str().chars().count();
        spans.push((start, end));
        byte_pos = m.end();
        char_pos = end;
    }
    spans
}
