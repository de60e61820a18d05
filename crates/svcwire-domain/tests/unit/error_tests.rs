//! Unit tests for domain errors

#[cfg(test)]
mod tests {
    use svcwire_domain::error::Error;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::cyclic_inheritance("App.A").to_string(),
            "Cyclic inheritance detected at App.A"
        );
        assert_eq!(
            Error::depth_exceeded("App.Deep", 4).to_string(),
            "Inheritance depth of App.Deep exceeds limit of 4"
        );
        assert_eq!(
            Error::configuration("bad value").to_string(),
            "Configuration error: bad value"
        );
        assert_eq!(Error::unresolved_type("App.X").to_string(), "Unresolved type: App.X");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: Error = io.into();

        assert!(matches!(error, Error::IoSimple { .. }));
    }

    #[test]
    fn test_error_source_chain() {
        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json.into();

        assert!(matches!(error, Error::Json { .. }));
        assert!(std::error::Error::source(&error).is_some());
        assert!(std::error::Error::source(&Error::configuration("plain")).is_none());
    }
}
