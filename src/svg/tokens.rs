//! Tokenizing path data and number lists.

use std::sync::OnceLock;

use regex::Regex;

/// A token of SVG path data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PathToken {
    Command(char),
    Number(f64),
}

fn re_path_token() -> &'static Regex {
    static ONCE: OnceLock<Regex> = OnceLock::new();
    ONCE.get_or_init(|| {
        Regex::new(r"[MmLlHhVvCcSsQqTtAaZz]|[+-]?(?:\d+\.\d*|\.\d+|\d+)(?:[eE][+-]?\d+)?")
            .expect("path token pattern is valid")
    })
}

/// Iterator over the tokens of a path `d` attribute.
///
/// Anything that is neither a command letter nor a number (commas,
/// whitespace, stray characters) is a separator.
pub(crate) struct PathTokens<'a> {
    inner: regex::Matches<'static, 'a>,
}

impl<'a> PathTokens<'a> {
    pub(crate) fn new(d: &'a str) -> Self {
        Self {
            inner: re_path_token().find_iter(d),
        }
    }
}

impl Iterator for PathTokens<'_> {
    type Item = PathToken;

    fn next(&mut self) -> Option<PathToken> {
        for m in self.inner.by_ref() {
            let s = m.as_str();
            let mut chars = s.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                if c.is_ascii_alphabetic() {
                    return Some(PathToken::Command(c));
                }
            }
            if let Ok(v) = s.parse::<f64>() {
                return Some(PathToken::Number(v));
            }
        }
        None
    }
}

/// Every number in `s`, in order.
pub(crate) fn numbers(s: &str) -> Vec<f64> {
    PathTokens::new(s)
        .filter_map(|t| match t {
            PathToken::Number(v) => Some(v),
            PathToken::Command(_) => None,
        })
        .collect()
}
