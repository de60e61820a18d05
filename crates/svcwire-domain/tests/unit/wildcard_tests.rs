//! Unit tests for wildcard name patterns

#[cfg(test)]
mod tests {
    use svcwire_domain::value_objects::WildcardPattern;

    #[test]
    fn test_suffix_wildcard() {
        let pattern = WildcardPattern::new("*Service").unwrap();

        assert!(pattern.is_match("FooService"));
        assert!(pattern.is_match("Service"));
        assert!(!pattern.is_match("ServiceFoo"));
    }

    #[test]
    fn test_alternatives() {
        let pattern = WildcardPattern::new("*First*,*Second*").unwrap();

        assert!(pattern.is_match("App.MyFirstService"));
        assert!(pattern.is_match("App.SecondHandler"));
        assert!(!pattern.is_match("App.ThirdService"));
    }

    #[test]
    fn test_pattern_is_anchored_and_literal() {
        let pattern = WildcardPattern::new("App.Foo").unwrap();

        assert!(pattern.is_match("App.Foo"));
        assert!(!pattern.is_match("AppXFoo"));
        assert!(!pattern.is_match("My.App.Foo"));
    }

    #[test]
    fn test_optional_skips_blank_filters() {
        assert!(WildcardPattern::optional(None).unwrap().is_none());
        assert!(WildcardPattern::optional(Some("  ")).unwrap().is_none());
        assert_eq!(
            WildcardPattern::optional(Some("*Repo")).unwrap().unwrap().as_str(),
            "*Repo"
        );
    }

    #[test]
    fn test_equality_follows_source() {
        let a = WildcardPattern::new("*Service").unwrap();
        let b = WildcardPattern::new("*Service").unwrap();
        let c = WildcardPattern::new("*Handler").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_string(), "*Service");
    }
}
