//! Flag parsing.
//!
//! Splits an argument vector into flags and leaves positional tokens for the
//! router. Parsing is permissive: unknown flags are accepted silently and a
//! repeated flag overwrites its earlier value.
//!
//! ```text
//! --foo=bar          foo = "bar"
//! -v                 v   = "1"
//! --out file.txt     out = "file.txt"
//! ```

use std::collections::HashMap;

/// Value recorded for a flag given without a value.
pub const PRESENT: &str = "1";

/// Short alias (as typed, e.g. `-v`) to long flag name (dashes stripped).
pub type Aliases = HashMap<String, String>;

/// Parsed flags keyed by name with dashes stripped and aliases resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags(HashMap<String, String>);

impl Flags {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
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

    fn set(&mut self, name: String, value: String) {
        self.0.insert(name, value);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Flags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Flags(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// One entry of the flag definition table shown in usage output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    pub name: String,
    pub description: String,
    pub default: Option<String>,
}

pub fn strip_dashes(token: &str) -> &str {
    token.trim_start_matches('-')
}

pub fn is_flag(token: &str) -> bool {
    token.starts_with('-')
}

fn resolve<'a>(token: &'a str, aliases: &'a Aliases) -> &'a str {
    match aliases.get(token) {
        Some(long) => strip_dashes(long),
        None => strip_dashes(token),
    }
}

/// Parse flags out of `tokens`, resolving short aliases through `aliases`.
///
/// A bare flag is recorded as [`PRESENT`] and then waits for a value: the next
/// non-flag token, if any, replaces it. Tokens that are not consumed this way
/// are positional and ignored here.
pub fn parse_flags<S: AsRef<str>>(tokens: &[S], aliases: &Aliases) -> Flags {
    let mut flags = Flags::default();
    let mut awaiting: Option<String> = None;

    for token in tokens.iter().map(AsRef::as_ref) {
        if is_flag(token) {
            if let Some((key, value)) = token.split_once('=') {
                flags.set(resolve(key, aliases).to_string(), value.to_string());
                awaiting = None;
                continue;
            }

            let name = resolve(token, aliases).to_string();
            flags.set(name.clone(), PRESENT.to_string());
            awaiting = Some(name);
            continue;
        }

        if let Some(name) = awaiting.take() {
            flags.set(name, token.to_string());
        }
    }

    flags
}

/// Tokens the router matches against: everything after the first token that
/// does not look like a flag.
///
/// Flag values (`--out file.txt`) are not removed; patterns must account for
/// them.
pub fn positional_tokens<S: AsRef<str>>(tokens: &[S]) -> Vec<&str> {
    tokens
        .iter()
        .skip(1)
        .map(AsRef::as_ref)
        .filter(|token| !is_flag(token))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases(pairs: &[(&str, &str)]) -> Aliases {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn key_value_flag() {
        let flags = parse_flags(&["--foo=bar"], &Aliases::new());
        assert_eq!(flags, Flags::from_iter([("foo", "bar")]));
    }

    #[test]
    fn bare_flag_is_present() {
        let flags = parse_flags(&["-v"], &Aliases::new());
        assert_eq!(flags, Flags::from_iter([("v", "1")]));
    }

    #[test]
    fn bare_flag_takes_next_token() {
        let flags = parse_flags(&["--out", "file.txt"], &Aliases::new());
        assert_eq!(flags, Flags::from_iter([("out", "file.txt")]));
    }

    #[test]
    fn value_splits_on_first_equals_only() {
        let flags = parse_flags(&["--query=a=b"], &Aliases::new());
        assert_eq!(flags.get("query"), Some("a=b"));
    }

    #[test]
    fn only_one_token_is_consumed_as_value() {
        let flags = parse_flags(&["prog", "--out", "a.txt", "b.txt"], &Aliases::new());
        assert_eq!(flags.get("out"), Some("a.txt"));
        assert_eq!(flags.len(), 1);
    }

    #[test]
    fn leading_positional_is_ignored() {
        let flags = parse_flags(&["prog", "build"], &Aliases::new());
        assert!(flags.is_empty());
    }

    #[test]
    fn aliases_resolve_for_both_forms() {
        let table = aliases(&[("-v", "verbose"), ("-o", "--output")]);
        let flags = parse_flags(&["-v", "-o=out.txt"], &table);
        assert_eq!(flags.get("verbose"), Some("1"));
        assert_eq!(flags.get("output"), Some("out.txt"));
        assert!(!flags.contains("v"));
    }

    #[test]
    fn repeated_flag_overwrites() {
        let flags = parse_flags(&["--level=1", "--level=3"], &Aliases::new());
        assert_eq!(flags.get("level"), Some("3"));
    }

    #[test]
    fn key_value_flag_clears_pending_value() {
        let flags = parse_flags(&["-v", "--mode=fast", "target"], &Aliases::new());
        assert_eq!(flags.get("v"), Some("1"));
        assert_eq!(flags.get("mode"), Some("fast"));
    }

    #[test]
    fn unknown_flags_are_accepted() {
        let flags = parse_flags(&["--whatever", "---triple"], &Aliases::new());
        assert_eq!(flags.get("whatever"), Some("1"));
        assert_eq!(flags.get("triple"), Some("1"));
    }

    #[test]
    fn positional_tokens_skip_command_and_flags() {
        let tokens = ["prog", "greet", "-v", "--out", "file.txt", "bob"];
        assert_eq!(positional_tokens(&tokens), vec!["greet", "file.txt", "bob"]);
    }

    #[test]
    fn positional_tokens_of_empty_input() {
        let tokens: [&str; 0] = [];
        assert!(positional_tokens(&tokens).is_empty());
    }
}
