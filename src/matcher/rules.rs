//! Compiled set of ignore patterns.

use std::collections::HashMap;
use tracing::warn;

use super::pattern::IgnorePattern;

/// Patterns skipped when no ignore configuration is supplied.
pub const DEFAULT_IGNORE_PATTERNS: [&str; 2] = ["/fib/*", "/world"];

/// IgnoreRules is resolved once at setup and shared by reference
/// between concurrent requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreRules {
    patterns: Vec<IgnorePattern>,
}

impl IgnoreRules {
    /// Creates a rule set from raw patterns, preserving their order.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns: Vec<IgnorePattern> = patterns
            .into_iter()
            .map(|p| IgnorePattern::parse(p.as_ref()))
            .collect();

        for pattern in patterns.iter().filter(|p| p.is_catch_all()) {
            warn!(
                component = "matcher",
                event = "catch_all_pattern",
                pattern = %pattern,
                "ignore pattern matches every url, tracing is effectively disabled"
            );
        }

        Self { patterns }
    }

    /// Builds the rule set from a `pattern -> enabled` map.
    /// Disabled entries are dropped; the rest are sorted for stable evaluation.
    pub fn from_map(map: &HashMap<String, bool>) -> Self {
        let mut enabled: Vec<&str> = map
            .iter()
            .filter(|(_, on)| **on)
            .map(|(pattern, _)| pattern.as_str())
            .collect();
        enabled.sort_unstable();
        Self::new(enabled)
    }

    /// The literal rule set used when nothing is configured.
    pub fn defaults() -> Self {
        Self::new(DEFAULT_IGNORE_PATTERNS)
    }

    /// A rule set that never skips.
    pub fn none() -> Self {
        Self::default()
    }

    /// True if any rule matches the URL.
    pub fn matches(&self, url: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(url))
    }

    pub fn patterns(&self) -> &[IgnorePattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
