//! Naming conventions and error openness. Both produce warnings only.

use super::{Finding, Rule, route_subject, type_subject, union_of};
use crate::Registry;
use crate::types::TypeDef;

fn is_camel_case(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

fn is_snake_case(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && !name.ends_with('_')
        && !name.contains("__")
}

pub(super) fn naming(registry: &Registry, out: &mut Vec<Finding>) {
    for ns in registry.namespaces() {
        if !is_snake_case(&ns.name) {
            out.push(Finding::new(
                Rule::Naming,
                ns.name.clone(),
                "namespace names are snake_case",
            ));
        }
    }

    for (ns, def) in registry.types() {
        let subject = type_subject(&ns.name, def);
        if !is_camel_case(def.name()) {
            out.push(Finding::new(Rule::Naming, subject.clone(), "type names are CamelCase"));
        }
        let members: Vec<&str> = match def {
            TypeDef::Struct(s) => s.fields.iter().map(|f| f.name.as_str()).collect(),
            TypeDef::Union(u) => u.variants.iter().map(|v| v.name.as_str()).collect(),
            TypeDef::Alias(_) => Vec::new(),
        };
        for member in members.into_iter().filter(|m| !is_snake_case(m)) {
            out.push(Finding::new(
                Rule::Naming,
                subject.clone(),
                format!("'{}' should be snake_case", member),
            ));
        }
    }

    for (ns, route) in registry.routes() {
        if let Some(segment) = route.name.split('/').find(|s| !is_snake_case(s)) {
            out.push(Finding::new(
                Rule::Naming,
                route_subject(&ns.name, route),
                format!("route segment '{}' should be lowercase snake_case", segment),
            ));
        }
    }
}

pub(super) fn open_errors(registry: &Registry, out: &mut Vec<Finding>) {
    for (ns, route) in registry.routes() {
        let Some((name, shape)) = union_of(registry, &ns.name, &route.error) else {
            continue;
        };
        if shape.closed {
            out.push(Finding::new(
                Rule::OpenErrors,
                route_subject(&ns.name, route),
                format!("error union '{}' is closed; new error tags would break clients", name),
            ));
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
