#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::matcher::{IgnorePattern, IgnoreRules};

    /// Test that the default rule set skips the two literal routes only.
    #[test]
    fn test_defaults() {
        let rules = IgnoreRules::defaults();
        assert_eq!(rules.len(), 2);
        assert!(rules.matches("/fib/10"));
        assert!(rules.matches("/world"));
        assert!(!rules.matches("/hello"));
        assert!(!rules.matches("/world2"));
    }

    /// Test that disabled map entries are dropped and the rest sorted.
    #[test]
    fn test_from_map_drops_disabled_entries() {
        let mut map = HashMap::new();
        map.insert("/world".to_string(), true);
        map.insert("/fib/*".to_string(), true);
        map.insert("*".to_string(), false);

        let rules = IgnoreRules::from_map(&map);

        assert_eq!(
            rules.patterns(),
            &[
                IgnorePattern::Prefix("/fib/".into()),
                IgnorePattern::Exact("/world".into()),
            ]
        );
        assert!(!rules.matches("/hello"), "disabled catch-all must not apply");
    }

    /// Test that an empty rule set never skips.
    #[test]
    fn test_none_never_matches() {
        let rules = IgnoreRules::none();
        assert!(rules.is_empty());
        assert!(!rules.matches("/fib/1"));
        assert!(!rules.matches(""));
    }

    /// Test that any single matching rule is enough.
    #[test]
    fn test_any_rule_matches() {
        let rules = IgnoreRules::new(["/exact", "*.ico", "/static/*"]);
        assert!(rules.matches("/exact"));
        assert!(rules.matches("/favicon.ico"));
        assert!(rules.matches("/static/app.js"));
        assert!(!rules.matches("/api/v1"));
    }
}
