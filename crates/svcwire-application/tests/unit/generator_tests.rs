//! Unit tests for per-insertion-point generation

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use svcwire_application::{
        GenerationOutcome, QueryEvaluator, RegistrationGenerator, ScanEvaluator, TypeCatalog,
    };
    use svcwire_domain::value_objects::{
        Diagnostic, DiagnosticKind, QueryAttribute, QueryOutcome, QuerySpecification,
    };

    use crate::test_utils::*;

    /// Scan evaluator that counts calls
    #[derive(Default)]
    struct CountingEvaluator {
        calls: AtomicUsize,
    }

    impl QueryEvaluator for CountingEvaluator {
        fn evaluate(&self, catalog: &TypeCatalog, spec: &QuerySpecification) -> QueryOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ScanEvaluator.evaluate(catalog, spec)
        }
    }

    /// Evaluator failing every query with the given diagnostic
    struct FailingEvaluator(DiagnosticKind);

    impl QueryEvaluator for FailingEvaluator {
        fn evaluate(&self, _catalog: &TypeCatalog, spec: &QuerySpecification) -> QueryOutcome {
            QueryOutcome::from_diagnostic(Diagnostic::new(self.0, spec.source_location.clone()))
        }
    }

    fn catalog() -> TypeCatalog {
        TestFeed::new("App")
            .with_types(
                "App",
                "App",
                vec![
                    interface("IService"),
                    interface("IRepository"),
                    class("MyService").implements("App.IService"),
                ],
            )
            .catalog()
    }

    fn scan_generator() -> RegistrationGenerator {
        RegistrationGenerator::new(Arc::new(ScanEvaluator::new()))
    }

    #[test]
    fn test_generate_collects_registrations() {
        let catalog = catalog();
        let point = services_point(vec![assignable_attribute("App.IService")]);

        let outcome = scan_generator().generate(&catalog, &point);

        let GenerationOutcome::Generated(implementation) = &outcome else {
            panic!("expected generated code, got {outcome:?}");
        };
        assert_eq!(implementation.registrations.len(), 1);
        assert_eq!(implementation.registrations[0].implementation_type_name, "App.MyService");
        assert!(implementation.dispatches.is_empty());
        assert!(implementation.warning.is_none());
    }

    #[test]
    fn test_warning_keeps_sibling_registrations() {
        let catalog = catalog();
        let point = services_point(vec![
            assignable_attribute("App.IRepository"),
            assignable_attribute("App.IService"),
        ]);

        let outcome = scan_generator().generate(&catalog, &point);

        let GenerationOutcome::Generated(implementation) = &outcome else {
            panic!("expected generated code, got {outcome:?}");
        };
        assert_eq!(implementation.registrations.len(), 1);
        assert_eq!(
            implementation.warning.as_ref().map(|w| w.kind),
            Some(DiagnosticKind::NoMatchingTypesFound)
        );
        assert_eq!(
            outcome.diagnostic().map(|d| d.kind),
            Some(DiagnosticKind::NoMatchingTypesFound)
        );
    }

    #[test]
    fn test_error_aborts_insertion_point() {
        let catalog = catalog();
        let point = services_point(vec![assignable_attribute("App.IService")]);
        let generator = RegistrationGenerator::new(Arc::new(FailingEvaluator(
            DiagnosticKind::CustomHandlerMethodHasIncorrectSignature,
        )));

        let outcome = generator.generate(&catalog, &point);

        let GenerationOutcome::Failed(diagnostic) = &outcome else {
            panic!("expected a failure, got {outcome:?}");
        };
        assert_eq!(diagnostic.kind, DiagnosticKind::CustomHandlerMethodHasIncorrectSignature);
    }

    #[test]
    fn test_validation_failure_skips_evaluation() {
        let catalog = catalog();
        let evaluator = Arc::new(CountingEvaluator::default());
        let generator = RegistrationGenerator::new(evaluator.clone());
        let mut point = services_point(vec![assignable_attribute("App.IService")]);
        point.is_partial_definition = false;

        let outcome = generator.generate(&catalog, &point);

        assert_eq!(
            outcome.diagnostic().map(|d| d.kind),
            Some(DiagnosticKind::NotPartialDefinition)
        );
        assert_eq!(evaluator.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_suppressed_point_reports_nothing() {
        let catalog = catalog();
        let attribute = QueryAttribute {
            has_errors: true,
            ..assignable_attribute("App.IService")
        };
        let point = services_point(vec![attribute]);

        let outcome = scan_generator().generate(&catalog, &point);

        assert_eq!(outcome, GenerationOutcome::Suppressed);
        assert!(outcome.diagnostic().is_none());
    }

    #[test]
    fn test_every_query_is_evaluated_once() {
        let catalog = catalog();
        let evaluator = Arc::new(CountingEvaluator::default());
        let generator = RegistrationGenerator::new(evaluator.clone());
        let point = services_point(vec![
            assignable_attribute("App.IService"),
            assignable_attribute("App.IRepository"),
            assignable_attribute("App.IService"),
        ]);

        generator.generate(&catalog, &point);

        assert_eq!(evaluator.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_custom_handler_point_produces_dispatches() {
        let catalog = catalog();
        let attribute = QueryAttribute {
            custom_handler: Some("Register".to_string()),
            ..assignable_attribute("App.IService")
        };
        let mut point = services_point(vec![attribute]);
        point.return_type = None;
        point.static_methods = vec![static_method("Register", &["T"], &[SERVICES], None)];

        let outcome = scan_generator().generate(&catalog, &point);

        let GenerationOutcome::Generated(implementation) = &outcome else {
            panic!("expected generated code, got {outcome:?}");
        };
        assert!(implementation.registrations.is_empty());
        assert_eq!(implementation.dispatches.len(), 1);
        assert_eq!(implementation.dispatches[0].type_arguments, ["App.MyService"]);
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(GenerationOutcome::Suppressed).unwrap();
        assert_eq!(json, serde_json::json!({"status": "suppressed"}));

        let catalog = catalog();
        let point = services_point(vec![assignable_attribute("App.IService")]);
        let outcome = scan_generator().generate(&catalog, &point);

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "generated");
        assert_eq!(json["registrations"][0]["service_type_name"], "App.IService");
        let back: GenerationOutcome = serde_json::from_value(json).unwrap();
        assert_eq!(back, outcome);
    }
}
