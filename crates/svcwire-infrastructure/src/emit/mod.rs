//! Statement rendering
//!
//! Turns registration and dispatch records into the statements of a
//! generated method body. Registrations render as one fluent chain on the
//! services parameter; dispatches render as one handler call each.
//!
//! | Record | Statement |
//! |--------|-----------|
//! | plain | `.AddScoped<S, I>()` |
//! | open generic | `.AddScoped(typeof(S), typeof(I))` |
//! | keyed | `.AddKeyedScoped<S, I>(key)` |
//! | forwarding | `.AddScoped<S>(s => s.GetRequiredService<I>())` |
//! | dispatch | `Handle<I, A>(services, value);` |

use svcwire_application::generator::MethodImplementation;
use svcwire_domain::value_objects::{
    CustomDispatchRecord, InsertionPoint, KeyExpression, RegistrationRecord,
};

use crate::constants::{PROVIDER_LAMBDA_PARAMETER, STATEMENT_INDENT};

/// Key argument of a keyed registration for `implementation`
pub fn render_key(key: &KeyExpression, implementation: &str) -> String {
    match key {
        KeyExpression::GenericMethod { method } => format!("{method}<{implementation}>()"),
        KeyExpression::TypeObjectMethod { method } => format!("{method}(typeof({implementation}))"),
        KeyExpression::TypeMember { member } => format!("{implementation}.{member}"),
    }
}

/// One fluent registration call, starting with `.`
pub fn render_registration(record: &RegistrationRecord) -> String {
    let lifetime = record.lifetime.as_str();
    let service = &record.service_type_name;
    let implementation = &record.implementation_type_name;
    let s = PROVIDER_LAMBDA_PARAMETER;

    match &record.key_expression {
        None if record.is_open_generic => {
            format!(".Add{lifetime}(typeof({service}), typeof({implementation}))")
        }
        None if record.resolve_via_self => format!(
            ".Add{lifetime}<{service}>({s} => {s}.GetRequiredService<{implementation}>())"
        ),
        None => format!(".Add{lifetime}<{service}, {implementation}>()"),
        Some(key) => {
            let key = render_key(key, implementation);
            if record.is_open_generic {
                format!(".AddKeyed{lifetime}(typeof({service}), {key}, typeof({implementation}))")
            } else if record.resolve_via_self {
                format!(
                    ".AddKeyed{lifetime}<{service}>({key}, ({s}, _) => {s}.GetRequiredKeyedService<{implementation}>({key}))"
                )
            } else {
                format!(".AddKeyed{lifetime}<{service}, {implementation}>({key})")
            }
        }
    }
}

/// One handler call passing the insertion point's arguments through
pub fn render_dispatch(record: &CustomDispatchRecord, point: &InsertionPoint) -> String {
    let arguments = point
        .parameters
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{}<{}>({arguments});",
        record.handler_reference,
        record.type_arguments.join(", ")
    )
}

/// Body statements generated for `point`, one per line
///
/// Regular insertion points get a single chained expression on the
/// services parameter, returned unless the method is void. Custom handler
/// insertion points get one call per dispatch, followed by returning the
/// first parameter for non-void methods.
pub fn render_method_body(point: &InsertionPoint, implementation: &MethodImplementation) -> String {
    let first_parameter = point.parameters.first().map(|p| p.name.as_str());
    let returns = point.return_type.is_some();
    let mut lines = Vec::new();

    if point.uses_custom_handler() {
        lines.extend(
            implementation
                .dispatches
                .iter()
                .map(|dispatch| render_dispatch(dispatch, point)),
        );
        if let (true, Some(parameter)) = (returns, first_parameter) {
            lines.push(format!("return {parameter};"));
        }
        return lines.join("\n");
    }

    let services = first_parameter.unwrap_or("services");
    let head = if returns {
        format!("return {services}")
    } else {
        services.to_string()
    };

    if implementation.registrations.is_empty() {
        if returns {
            lines.push(format!("{head};"));
        }
        return lines.join("\n");
    }

    lines.push(head);
    lines.extend(
        implementation
            .registrations
            .iter()
            .map(|record| format!("{STATEMENT_INDENT}{}", render_registration(record))),
    );
    if let Some(last) = lines.last_mut() {
        last.push(';');
    }
    lines.join("\n")
}
