//! Pattern compilation.
//!
//! A pattern is a space-separated list of words:
//!
//! - `[name]` - open capture, binds any token. Spaces inside the brackets are
//!   part of the name and stored as underscores (`[first name]` binds
//!   `first_name`).
//! - `name:regex` - typed capture, binds a token the regex fully matches.
//! - anything else - literal, the token must be equal.

use std::collections::HashMap;

use regex::Regex;
use tracing::warn;

/// One compiled word of a pattern.
#[derive(Debug, Clone)]
pub enum Word {
    Literal(String),
    Capture(String),
    /// `regex` is `None` when the expression failed to compile; such a word
    /// never matches.
    Typed { name: String, regex: Option<Regex> },
}

impl Word {
    fn parse(segment: &str) -> Self {
        if segment.len() >= 2 && segment.starts_with('[') && segment.ends_with(']') {
            let inner = &segment[1..segment.len() - 1];
            return Word::Capture(inner.replace(' ', "_"));
        }

        if let Some((name, expr)) = segment.split_once(':') {
            let regex = match Regex::new(&format!("^(?:{expr})$")) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!(word = segment, error = %e, "typed capture can never match");
                    None
                }
            };
            return Word::Typed {
                name: name.to_string(),
                regex,
            };
        }

        Word::Literal(segment.to_string())
    }

    /// Binding name for captures, `None` for literals.
    pub fn binding(&self) -> Option<&str> {
        match self {
            Word::Literal(_) => None,
            Word::Capture(name) | Word::Typed { name, .. } => Some(name.as_str()),
        }
    }

    fn accepts(&self, token: &str) -> bool {
        match self {
            Word::Literal(text) => text == token,
            Word::Capture(_) => true,
            Word::Typed { regex, .. } => regex.as_ref().is_some_and(|re| re.is_match(token)),
        }
    }

    fn display(&self, segment: &str) -> String {
        match self {
            Word::Typed { name, .. } => format!("{{{name}}}"),
            _ => segment.to_string(),
        }
    }
}

/// Capture bindings produced by a successful match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures(HashMap<String, String>);

impl Captures {
    /// Look up a binding. A name containing spaces also tries its underscored
    /// form, so `get("first name")` finds the `[first name]` capture.
    pub fn get(&self, name: &str) -> Option<&str> {
        if let Some(value) = self.0.get(name) {
            return Some(value.as_str());
        }
        if name.contains(' ') {
            return self.0.get(&name.replace(' ', "_")).map(String::as_str);
        }
        None
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn bind(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_string(), value.to_string());
    }
}

/// A compiled pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    display: String,
    words: Vec<Word>,
}

impl Pattern {
    pub fn compile(source: &str) -> Self {
        let segments = split_segments(source);
        let words: Vec<Word> = segments.iter().map(|s| Word::parse(s)).collect();
        let display = words
            .iter()
            .zip(&segments)
            .map(|(word, segment)| word.display(segment))
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            source: source.to_string(),
            display,
            words,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Usage form: typed captures shown as `{name}`.
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Match positional tokens (command name and flags already removed).
    ///
    /// Counts must agree; then every word must accept its token.
    pub fn match_tokens(&self, positional: &[&str]) -> Option<Captures> {
        if self.words.len() != positional.len() {
            return None;
        }

        let mut captures = Captures::default();
        for (word, token) in self.words.iter().zip(positional) {
            if !word.accepts(token) {
                return None;
            }
            if let Some(name) = word.binding() {
                captures.bind(name, token);
            }
        }
        Some(captures)
    }
}

/// Split on spaces outside `[...]` groups, dropping empty segments.
fn split_segments(source: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_brackets = false;

    for ch in source.chars() {
        match ch {
            '[' => {
                in_brackets = true;
                current.push(ch);
            }
            ']' => {
                in_brackets = false;
                current.push(ch);
            }
            ' ' if !in_brackets => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_word_kinds() {
        let pattern = Pattern::compile(r"deploy [target] n:^\d+$");
        let words = pattern.words();
        assert_eq!(words.len(), 3);
        assert!(matches!(&words[0], Word::Literal(t) if t == "deploy"));
        assert!(matches!(&words[1], Word::Capture(n) if n == "target"));
        assert!(matches!(&words[2], Word::Typed { name, regex: Some(_) } if name == "n"));
    }

    #[test]
    fn bracket_group_is_one_word() {
        let pattern = Pattern::compile("add [first name] to [group]");
        let words = pattern.words();
        assert_eq!(words.len(), 4);
        assert_eq!(words[1].binding(), Some("first_name"));
        assert_eq!(words[3].binding(), Some("group"));
    }

    #[test]
    fn typed_capture_binds_digits() {
        let pattern = Pattern::compile(r"n:^\d+$");
        let captures = pattern.match_tokens(&["42"]).expect("digits match");
        assert_eq!(captures.get("n"), Some("42"));
        assert!(pattern.match_tokens(&["abc"]).is_none());
    }

    #[test]
    fn typed_capture_must_match_whole_token() {
        let pattern = Pattern::compile(r"n:\d+");
        assert!(pattern.match_tokens(&["123"]).is_some());
        assert!(pattern.match_tokens(&["12ab"]).is_none());
    }

    #[test]
    fn typed_capture_splits_on_first_colon() {
        let pattern = Pattern::compile("at:[0-9]+:[0-9]+");
        let captures = pattern.match_tokens(&["10:30"]).expect("time matches");
        assert_eq!(captures.get("at"), Some("10:30"));
    }

    #[test]
    fn invalid_regex_never_matches() {
        let pattern = Pattern::compile("n:(unclosed");
        assert!(matches!(&pattern.words()[0], Word::Typed { regex: None, .. }));
        assert!(pattern.match_tokens(&["(unclosed"]).is_none());
        assert!(pattern.match_tokens(&["n:(unclosed"]).is_none());
    }

    #[test]
    fn word_count_mismatch_fails() {
        let pattern = Pattern::compile("greet [name]");
        assert!(pattern.match_tokens(&["greet"]).is_none());
        assert!(pattern.match_tokens(&["greet", "a", "b"]).is_none());
    }

    #[test]
    fn literal_mismatch_fails() {
        let pattern = Pattern::compile("greet [name]");
        assert!(pattern.match_tokens(&["great", "bob"]).is_none());
    }

    #[test]
    fn empty_pattern_matches_no_tokens() {
        let pattern = Pattern::compile("");
        assert!(pattern.words().is_empty());
        assert!(pattern.match_tokens(&[]).is_some());
        assert!(pattern.match_tokens(&["x"]).is_none());
    }

    #[test]
    fn repeated_spaces_are_ignored() {
        let pattern = Pattern::compile("  list   all ");
        assert_eq!(pattern.words().len(), 2);
    }

    #[test]
    fn display_braces_typed_captures() {
        let pattern = Pattern::compile(r"count n:^\d+$ [first name]");
        assert_eq!(pattern.display(), "count {n} [first name]");
    }

    #[test]
    fn captures_fall_back_to_underscored_name() {
        let pattern = Pattern::compile("add [first name]");
        let captures = pattern.match_tokens(&["add", "Ada"]).expect("matches");
        assert_eq!(captures.get("first name"), Some("Ada"));
        assert_eq!(captures.get("first_name"), Some("Ada"));
        assert_eq!(captures.get("last name"), None);
    }
}
