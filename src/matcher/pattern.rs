//! Wildcard ignore pattern.

use std::fmt;

const WILDCARD: char = '*';

/// A classified ignore pattern.
///
/// Supported forms, in priority order:
/// - `*text*` matches any URL containing `text`;
/// - `text*` matches any URL starting with `text`;
/// - `*text` matches any URL ending with `text`;
/// - anything else matches the URL exactly.
///
/// A bare `*` or `**` matches every URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnorePattern {
    Contains(String),
    Prefix(String),
    Suffix(String),
    Exact(String),
}

impl IgnorePattern {
    /// Classifies the raw pattern once so matching never re-parses it.
    pub fn parse(pattern: &str) -> Self {
        let leading = pattern.starts_with(WILDCARD);
        let trailing = pattern.ends_with(WILDCARD);

        // A single '*' is both leading and trailing but cannot lose two chars.
        if leading && trailing && pattern.len() >= 2 {
            return Self::Contains(pattern[1..pattern.len() - 1].to_string());
        }
        if trailing {
            return Self::Prefix(pattern[..pattern.len() - 1].to_string());
        }
        if leading {
            return Self::Suffix(pattern[1..].to_string());
        }
        Self::Exact(pattern.to_string())
    }

    /// Reports whether the URL is covered by this pattern.
    pub fn matches(&self, url: &str) -> bool {
        match self {
            Self::Contains(needle) => url.contains(needle.as_str()),
            Self::Prefix(prefix) => url.starts_with(prefix.as_str()),
            Self::Suffix(suffix) => url.ends_with(suffix.as_str()),
            Self::Exact(literal) => url == literal,
        }
    }

    /// True when the pattern covers every possible URL.
    pub fn is_catch_all(&self) -> bool {
        match self {
            Self::Contains(s) | Self::Prefix(s) | Self::Suffix(s) => s.is_empty(),
            Self::Exact(_) => false,
        }
    }
}

impl fmt::Display for IgnorePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contains(s) => write!(f, "*{}*", s),
            Self::Prefix(s) => write!(f, "{}*", s),
            Self::Suffix(s) => write!(f, "*{}", s),
            Self::Exact(s) => f.write_str(s),
        }
    }
}

/// Decides whether `url` should bypass tracing under `pattern`.
pub fn should_ignore(pattern: &str, url: &str) -> bool {
    IgnorePattern::parse(pattern).matches(url)
}
