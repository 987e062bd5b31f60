//! URL ignore rules: decides which requests bypass tracing.

pub mod pattern;
pub mod rules;

#[cfg(test)]
mod rules_test;

pub use pattern::{should_ignore, IgnorePattern};
pub use rules::IgnoreRules;
