//! Reference resolution and extends chains.

use super::{Finding, Rule, route_subject, type_subject};
use crate::types::{DataType, TypeDef};
use crate::{DeclError, Registry, TypeRef};

pub(super) fn unresolved_references(registry: &Registry, out: &mut Vec<Finding>) {
    for (ns, def) in registry.types() {
        let subject = type_subject(&ns.name, def);
        if let Some(parent) = def.extends() {
            report_unresolved(registry, &ns.name, parent, &subject, "extends", out);
        }
        for data_type in def.data_types() {
            for reference in data_type.references() {
                report_unresolved(registry, &ns.name, reference, &subject, "refers to", out);
            }
        }
    }

    for (ns, route) in registry.routes() {
        let subject = route_subject(&ns.name, route);
        let parts: [(&str, &DataType); 3] = [
            ("arg", &route.arg),
            ("result", &route.result),
            ("error", &route.error),
        ];
        for (part, data_type) in parts {
            for reference in data_type.references() {
                report_unresolved(registry, &ns.name, reference, &subject, part, out);
            }
        }
    }
}

fn report_unresolved(
    registry: &Registry,
    namespace: &str,
    reference: &TypeRef,
    subject: &str,
    context: &str,
    out: &mut Vec<Finding>,
) {
    if registry.resolve(namespace, reference).is_err() {
        out.push(Finding::new(
            Rule::UnresolvedReference,
            subject,
            format!("{} unknown type '{}'", context, reference.absolute(namespace)),
        ));
    }
}

pub(super) fn extends_chains(registry: &Registry, out: &mut Vec<Finding>) {
    for (ns, def) in registry.types() {
        if let TypeDef::Alias(alias) = def {
            alias_chain(registry, &ns.name, &alias.name, out);
            continue;
        }
        if def.extends().is_none() {
            continue;
        }
        let subject = type_subject(&ns.name, def);
        match registry.extends_chain(&ns.name, &TypeRef::local(def.name())) {
            Ok(_) => {}
            // Reported by the reference rule.
            Err(DeclError::Unresolved(_)) => {}
            Err(DeclError::KindMismatch {
                name,
                expected,
                found,
            }) => out.push(Finding::new(
                Rule::ExtendsChain,
                subject,
                format!("a {} cannot extend '{}', which is a {}", expected, name, found),
            )),
            Err(e) => out.push(Finding::new(Rule::ExtendsChain, subject, e.to_string())),
        }
    }
}

/// Aliases must bottom out in a non-alias type.
fn alias_chain(registry: &Registry, namespace: &str, name: &str, out: &mut Vec<Finding>) {
    let start = DataType::Named(TypeRef::local(name));
    if let Err(e @ DeclError::AliasCycle(_)) = registry.unalias(namespace, &start) {
        out.push(Finding::new(
            Rule::ExtendsChain,
            format!("{}.{}", namespace, name),
            e.to_string(),
        ));
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::checks::{Rule, run_checks};
    use crate::namespace::Namespace;
    use crate::route::Route;
    use crate::types::{AliasDef, DataType, Field, StructDef, UnionDef, Variant};
    use crate::wire::WireErrorKind;
    use crate::{Registry, Validator};

    fn registry_with(ns: Namespace) -> Registry {
        let mut r = Registry::new();
        r.insert(ns).expect("insert");
        r
    }

    #[test]
    fn missing_field_type_is_reported() {
        let mut ns = Namespace::new("demo");
        ns.declare(StructDef::new("Holder").field(Field::new("x", DataType::named("Missing"))))
            .expect("declare");
        let report = run_checks(&registry_with(ns));
        let found: Vec<_> = report.by_rule(Rule::UnresolvedReference).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].subject, "demo.Holder");
        assert!(found[0].message.contains("demo.Missing"));
    }

    #[test]
    fn missing_route_error_is_reported() {
        let mut ns = Namespace::new("demo");
        ns.route(Route::new(
            "ping",
            DataType::Void,
            DataType::Void,
            DataType::named("other_ns.PingError"),
        ))
        .expect("route");
        let report = run_checks(&registry_with(ns));
        let found: Vec<_> = report.by_rule(Rule::UnresolvedReference).collect();
        assert_eq!(found.len(), 1);
        assert!(found[0].message.starts_with("error"));
    }

    #[test]
    fn struct_extending_union_is_a_kind_mismatch() {
        let mut ns = Namespace::new("demo");
        ns.declare(UnionDef::open("Base").variant(Variant::void("a")))
            .expect("declare");
        ns.declare(StructDef::new("Child").extends("Base")).expect("declare");
        let report = run_checks(&registry_with(ns));
        let found: Vec<_> = report.by_rule(Rule::ExtendsChain).collect();
        assert_eq!(found.len(), 1);
        assert!(found[0].message.contains("union"));
    }

    #[test]
    fn extends_cycle_is_reported_for_each_member() {
        let mut ns = Namespace::new("demo");
        ns.declare(StructDef::new("A").extends("B")).expect("declare");
        ns.declare(StructDef::new("B").extends("A")).expect("declare");
        let report = run_checks(&registry_with(ns));
        assert_eq!(report.by_rule(Rule::ExtendsChain).count(), 2);
        assert!(!report.is_clean());
    }

    #[test]
    fn alias_cycle_is_reported() {
        let mut ns = Namespace::new("demo");
        ns.declare(AliasDef::new("A", DataType::named("B"))).expect("declare");
        ns.declare(AliasDef::new("B", DataType::named("A"))).expect("declare");
        ns.declare(StructDef::new("Holder").field(Field::new("x", DataType::named("A"))))
            .expect("declare");
        let registry = registry_with(ns);

        let report = run_checks(&registry);
        let found: Vec<_> = report.by_rule(Rule::ExtendsChain).collect();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|f| f.message.contains("alias")));
        assert!(!report.is_clean());

        let err = Validator::new(&registry)
            .validate_type("demo.Holder", &serde_json::json!({"x": "s"}))
            .expect_err("cyclic alias");
        assert_eq!(err.path, "$.x");
        assert!(!matches!(err.kind, WireErrorKind::TooDeep));
    }

    #[test]
    fn alias_chain_to_a_struct_is_clean() {
        let mut ns = Namespace::new("demo");
        ns.declare(StructDef::new("Target")).expect("declare");
        ns.declare(AliasDef::new("Inner", DataType::named("Target"))).expect("declare");
        ns.declare(AliasDef::new("Outer", DataType::named("Inner"))).expect("declare");
        let report = run_checks(&registry_with(ns));
        assert_eq!(report.by_rule(Rule::ExtendsChain).count(), 0);
    }
}
