//! Unit tests for diagnostics

#[cfg(test)]
mod tests {
    use svcwire_domain::value_objects::{Diagnostic, DiagnosticKind, Severity, SourceLocation};

    #[test]
    fn test_only_empty_result_is_a_warning() {
        let warning = Diagnostic::new(DiagnosticKind::NoMatchingTypesFound, SourceLocation::default());
        let error = Diagnostic::new(DiagnosticKind::MissingSearchCriteria, SourceLocation::default());

        assert_eq!(warning.severity, Severity::Warning);
        assert!(!warning.is_error());
        assert!(error.is_error());
    }

    #[test]
    fn test_diagnostic_ids_are_unique() {
        let kinds = [
            DiagnosticKind::NotPartialDefinition,
            DiagnosticKind::WrongReturnType,
            DiagnosticKind::WrongMethodParameters,
            DiagnosticKind::MissingSearchCriteria,
            DiagnosticKind::NoMatchingTypesFound,
            DiagnosticKind::KeySelectorMethodNotFound,
            DiagnosticKind::KeySelectorMethodHasIncorrectSignature,
            DiagnosticKind::OnlyOneCustomHandlerAllowed,
            DiagnosticKind::WrongReturnTypeForCustomHandler,
            DiagnosticKind::CantMixRegularAndCustomHandlerRegistrations,
            DiagnosticKind::CustomHandlerMethodHasIncorrectSignature,
            DiagnosticKind::CustomHandlerMethodNotFound,
            DiagnosticKind::CantUseBothFromAssemblyOfAndAssemblyNameFilter,
        ];

        let mut ids: Vec<_> = kinds.iter().map(|k| k.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), kinds.len());
        assert!(kinds.iter().all(|k| !k.message().is_empty()));
    }

    #[test]
    fn test_display_includes_id_and_location() {
        let diagnostic = Diagnostic::new(
            DiagnosticKind::WrongReturnType,
            SourceLocation::new("Startup.cs", 12, 30),
        );

        let rendered = diagnostic.to_string();
        assert!(rendered.starts_with("ERROR SW0002 at Startup.cs[12..30]"));
        assert!(rendered.ends_with(DiagnosticKind::WrongReturnType.message()));
    }
}
