//! Unit tests for registration derivation

#[cfg(test)]
mod tests {
    use svcwire_application::TypeCatalog;
    use svcwire_application::matching::evaluate;
    use svcwire_application::registration::{derive, derive_dispatches, derive_registrations};
    use svcwire_domain::value_objects::{
        CustomDispatchRef, DiagnosticKind, KeyExpression, KeySelectorKind, KeySelectorRef,
        Lifetime, OutputShape, QuerySpecification, RegistrationRecord,
    };

    use crate::test_utils::*;

    fn catalog() -> TypeCatalog {
        TestFeed::new("App")
            .with_types(
                "App",
                "App",
                vec![
                    interface("IReader"),
                    interface("IWriter"),
                    interface("IStore").implements("App.IReader").implements("App.IWriter"),
                    class("FileStore")
                        .implements("App.IStore")
                        .implements("System.IDisposable"),
                    interface("IHandler").generic(&["T"]),
                    class("Handler").generic(&["T"]).implements("App.IHandler<T>"),
                    interface("IPair").generic(&["TFirst", "TSecond"]),
                    class("A"),
                    class("PairHandler").implements("App.IPair<App.A, int>"),
                ],
            )
            .catalog()
    }

    fn summary(records: &[RegistrationRecord]) -> Vec<(&str, &str, bool)> {
        records
            .iter()
            .map(|r| {
                (
                    r.service_type_name.as_str(),
                    r.implementation_type_name.as_str(),
                    r.resolve_via_self,
                )
            })
            .collect()
    }

    fn registrations(catalog: &TypeCatalog, spec: &QuerySpecification) -> Vec<RegistrationRecord> {
        let matches = evaluate(catalog, spec).unwrap();
        derive_registrations(catalog, spec, &matches)
    }

    #[test]
    fn test_matched_type_only() {
        let catalog = catalog();
        let spec = assignable_spec(&catalog, "App.IStore");

        let records = registrations(&catalog, &spec);

        assert_eq!(summary(&records), [("App.IStore", "App.FileStore", false)]);
    }

    #[test]
    fn test_self_only() {
        let catalog = catalog();
        let mut spec = assignable_spec(&catalog, "App.IStore");
        spec.output_shape = OutputShape::SelfOnly;
        spec.lifetime = Lifetime::Singleton;

        let records = registrations(&catalog, &spec);

        assert_eq!(summary(&records), [("App.FileStore", "App.FileStore", false)]);
        assert_eq!(records[0].lifetime, Lifetime::Singleton);
    }

    #[test]
    fn test_implemented_interfaces_skip_deny_list() {
        let catalog = catalog();
        let mut spec = assignable_spec(&catalog, "App.IStore");
        spec.output_shape = OutputShape::ImplementedInterfaces;

        let records = registrations(&catalog, &spec);

        assert_eq!(
            summary(&records),
            [
                ("App.IStore", "App.FileStore", false),
                ("App.IReader", "App.FileStore", false),
                ("App.IWriter", "App.FileStore", false),
            ]
        );
    }

    #[test]
    fn test_self_and_interfaces_forward_to_self() {
        let catalog = catalog();
        let mut spec = assignable_spec(&catalog, "App.IStore");
        spec.output_shape = OutputShape::SelfAndInterfaces;
        spec.lifetime = Lifetime::Scoped;

        let records = registrations(&catalog, &spec);

        assert_eq!(
            summary(&records),
            [
                ("App.FileStore", "App.FileStore", false),
                ("App.IStore", "App.FileStore", true),
                ("App.IReader", "App.FileStore", true),
                ("App.IWriter", "App.FileStore", true),
            ]
        );
        assert!(records.iter().all(|r| r.lifetime == Lifetime::Scoped));
        assert!(records.iter().all(|r| !r.is_open_generic));
    }

    #[test]
    fn test_open_generic_implementation() {
        let catalog = catalog();
        let spec = assignable_spec(&catalog, "App.IHandler<>");

        let records = registrations(&catalog, &spec);

        assert_eq!(summary(&records), [("App.IHandler<>", "App.Handler<>", false)]);
        assert!(records[0].is_open_generic);
    }

    #[test]
    fn test_open_generic_never_forwards() {
        let catalog = catalog();
        let mut spec = assignable_spec(&catalog, "App.IHandler<>");
        spec.output_shape = OutputShape::SelfAndInterfaces;

        let records = registrations(&catalog, &spec);

        assert_eq!(
            summary(&records),
            [
                ("App.Handler<>", "App.Handler<>", false),
                ("App.IHandler<>", "App.Handler<>", false),
            ]
        );
    }

    #[test]
    fn test_keyed_records_carry_key_expression() {
        let catalog = catalog();
        let mut spec = assignable_spec(&catalog, "App.IStore");
        spec.output_shape = OutputShape::SelfAndInterfaces;
        spec.key_selector = Some(KeySelectorRef {
            name: "GetKey".to_string(),
            kind: KeySelectorKind::GenericMethod,
        });

        let records = registrations(&catalog, &spec);

        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| r.key_expression
            == Some(KeyExpression::GenericMethod {
                method: "GetKey".to_string()
            })));
    }

    #[test]
    fn test_dispatch_passes_matched_type_arguments() {
        let catalog = catalog();
        let spec = assignable_spec(&catalog, "App.IPair<,>");
        let matches = evaluate(&catalog, &spec).unwrap();
        let handler = CustomDispatchRef {
            handler: "Register".to_string(),
            type_parameter_count: 3,
        };

        let dispatches = derive_dispatches(&handler, &spec, &matches).unwrap();

        assert_eq!(dispatches.len(), 1);
        assert_eq!(dispatches[0].handler_reference, "Register");
        assert_eq!(dispatches[0].implementation_type_name, "App.PairHandler");
        assert_eq!(dispatches[0].type_arguments, ["App.PairHandler", "App.A", "int"]);
    }

    #[test]
    fn test_dispatch_single_type_parameter_ignores_arguments() {
        let catalog = catalog();
        let spec = assignable_spec(&catalog, "App.IPair<,>");
        let matches = evaluate(&catalog, &spec).unwrap();
        let handler = CustomDispatchRef {
            handler: "Register".to_string(),
            type_parameter_count: 1,
        };

        let dispatches = derive_dispatches(&handler, &spec, &matches).unwrap();

        assert_eq!(dispatches[0].type_arguments, ["App.PairHandler"]);
    }

    #[test]
    fn test_dispatch_arity_mismatch_is_an_error() {
        let catalog = catalog();
        let spec = assignable_spec(&catalog, "App.IPair<,>");
        let matches = evaluate(&catalog, &spec).unwrap();
        let handler = CustomDispatchRef {
            handler: "Register".to_string(),
            type_parameter_count: 2,
        };

        let diagnostic = derive_dispatches(&handler, &spec, &matches).unwrap_err();

        assert_eq!(diagnostic.kind, DiagnosticKind::CustomHandlerMethodHasIncorrectSignature);
        assert_eq!(diagnostic.location, location());
    }

    #[test]
    fn test_derive_routes_custom_handler_queries_to_dispatches() {
        let catalog = catalog();
        let mut spec = assignable_spec(&catalog, "App.IStore");
        spec.custom_dispatch = Some(CustomDispatchRef {
            handler: "Register".to_string(),
            type_parameter_count: 1,
        });
        let matches = evaluate(&catalog, &spec).unwrap();

        let outcome = derive(&catalog, &spec, &matches).unwrap();

        assert!(outcome.registrations.is_empty());
        assert_eq!(outcome.dispatches.len(), 1);
    }
}
