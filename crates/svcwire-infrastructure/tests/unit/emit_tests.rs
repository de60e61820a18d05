//! Unit tests for statement rendering

#[cfg(test)]
mod tests {
    use svcwire_application::generator::MethodImplementation;
    use svcwire_domain::value_objects::{
        CustomDispatchRecord, InsertionPoint, KeyExpression, Lifetime, ParameterFact, QueryAttribute,
        RegistrationRecord,
    };
    use svcwire_infrastructure::emit::{
        render_dispatch, render_key, render_method_body, render_registration,
    };

    use crate::test_utils::*;

    fn record(service: &str, implementation: &str) -> RegistrationRecord {
        RegistrationRecord {
            lifetime: Lifetime::Scoped,
            service_type_name: service.to_string(),
            implementation_type_name: implementation.to_string(),
            resolve_via_self: false,
            is_open_generic: false,
            key_expression: None,
        }
    }

    fn member_key() -> Option<KeyExpression> {
        Some(KeyExpression::TypeMember {
            member: "Key".to_string(),
        })
    }

    fn dispatch(implementation: &str, extra: &[&str]) -> CustomDispatchRecord {
        let mut type_arguments = vec![implementation.to_string()];
        type_arguments.extend(extra.iter().map(ToString::to_string));
        CustomDispatchRecord {
            handler_reference: "Handle".to_string(),
            implementation_type_name: implementation.to_string(),
            type_arguments,
        }
    }

    fn handler_point() -> InsertionPoint {
        let attribute = QueryAttribute {
            custom_handler: Some("Handle".to_string()),
            ..assignable_attribute("App.IService", 0)
        };
        let mut point = services_point("AddHandlers", vec![attribute]);
        point.parameters.push(ParameterFact::new("options", "App.Options"));
        point
    }

    #[test]
    fn test_render_key_forms() {
        assert_eq!(
            render_key(
                &KeyExpression::GenericMethod {
                    method: "GetKey".to_string()
                },
                "App.Svc"
            ),
            "GetKey<App.Svc>()"
        );
        assert_eq!(
            render_key(
                &KeyExpression::TypeObjectMethod {
                    method: "KeyOf".to_string()
                },
                "App.Svc"
            ),
            "KeyOf(typeof(App.Svc))"
        );
        assert_eq!(render_key(&member_key().unwrap(), "App.Svc"), "App.Svc.Key");
    }

    #[test]
    fn test_render_plain_registration() {
        let plain = record("App.IService", "App.MyService");
        assert_eq!(render_registration(&plain), ".AddScoped<App.IService, App.MyService>()");

        let singleton = RegistrationRecord {
            lifetime: Lifetime::Singleton,
            ..record("App.MyService", "App.MyService")
        };
        assert_eq!(
            render_registration(&singleton),
            ".AddSingleton<App.MyService, App.MyService>()"
        );
    }

    #[test]
    fn test_render_open_generic_registration() {
        let open = RegistrationRecord {
            is_open_generic: true,
            ..record("App.IHandler<>", "App.Handler<>")
        };

        assert_eq!(
            render_registration(&open),
            ".AddScoped(typeof(App.IHandler<>), typeof(App.Handler<>))"
        );
    }

    #[test]
    fn test_render_forwarding_registration() {
        let forwarding = RegistrationRecord {
            resolve_via_self: true,
            ..record("App.IService", "App.MyService")
        };

        assert_eq!(
            render_registration(&forwarding),
            ".AddScoped<App.IService>(s => s.GetRequiredService<App.MyService>())"
        );
    }

    #[test]
    fn test_render_keyed_registrations() {
        let keyed = RegistrationRecord {
            key_expression: member_key(),
            ..record("App.IService", "App.MyService")
        };
        assert_eq!(
            render_registration(&keyed),
            ".AddKeyedScoped<App.IService, App.MyService>(App.MyService.Key)"
        );

        let keyed_open = RegistrationRecord {
            is_open_generic: true,
            key_expression: member_key(),
            ..record("App.IHandler<>", "App.Handler<>")
        };
        assert_eq!(
            render_registration(&keyed_open),
            ".AddKeyedScoped(typeof(App.IHandler<>), App.Handler<>.Key, typeof(App.Handler<>))"
        );

        let keyed_forwarding = RegistrationRecord {
            resolve_via_self: true,
            key_expression: member_key(),
            ..record("App.IService", "App.MyService")
        };
        assert_eq!(
            render_registration(&keyed_forwarding),
            ".AddKeyedScoped<App.IService>(App.MyService.Key, (s, _) => s.GetRequiredKeyedService<App.MyService>(App.MyService.Key))"
        );
    }

    #[test]
    fn test_render_dispatch_passes_parameters() {
        let point = handler_point();

        assert_eq!(
            render_dispatch(&dispatch("App.PairHandler", &["App.A", "int"]), &point),
            "Handle<App.PairHandler, App.A, int>(services, options);"
        );
    }

    #[test]
    fn test_regular_body_chains_registrations() {
        let point = services_point("AddServices", vec![assignable_attribute("App.IService", 0)]);
        let implementation = MethodImplementation {
            registrations: vec![
                record("App.IService", "App.MyService1"),
                record("App.IService", "App.MyService2"),
            ],
            ..MethodImplementation::default()
        };

        assert_eq!(
            render_method_body(&point, &implementation),
            "return services\n    .AddScoped<App.IService, App.MyService1>()\n    .AddScoped<App.IService, App.MyService2>();"
        );
    }

    #[test]
    fn test_void_regular_body() {
        let mut point = services_point("AddServices", vec![assignable_attribute("App.IService", 0)]);
        point.return_type = None;
        let implementation = MethodImplementation {
            registrations: vec![record("App.IService", "App.MyService1")],
            ..MethodImplementation::default()
        };

        assert_eq!(
            render_method_body(&point, &implementation),
            "services\n    .AddScoped<App.IService, App.MyService1>();"
        );
    }

    #[test]
    fn test_empty_regular_body() {
        let mut point = services_point("AddServices", vec![assignable_attribute("App.IService", 0)]);
        let empty = MethodImplementation::default();

        assert_eq!(render_method_body(&point, &empty), "return services;");

        point.return_type = None;
        assert_eq!(render_method_body(&point, &empty), "");
    }

    #[test]
    fn test_custom_handler_body() {
        let mut point = handler_point();
        let implementation = MethodImplementation {
            dispatches: vec![dispatch("App.First", &[]), dispatch("App.Second", &[])],
            ..MethodImplementation::default()
        };

        assert_eq!(
            render_method_body(&point, &implementation),
            "Handle<App.First>(services, options);\nHandle<App.Second>(services, options);\nreturn services;"
        );

        point.return_type = None;
        assert_eq!(
            render_method_body(&point, &implementation),
            "Handle<App.First>(services, options);\nHandle<App.Second>(services, options);"
        );
    }
}
