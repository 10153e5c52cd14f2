//! Wire conventions routes rely on: pagination, launch/poll, optimistic
//! updates and deprecation targets.

use super::{Finding, Rule, named_target, route_subject, struct_of, union_of};
use crate::namespace::Namespace;
use crate::registry::Scoped;
use crate::route::Route;
use crate::types::{DataType, Field, Variant};
use crate::{Registry, TypeRef};

const ASYNC_NS: &str = "async";
const LAUNCH_BASE: &str = "LaunchResultBase";
const POLL_RESULT_BASE: &str = "PollResultBase";
const POLL_ARG: &str = "PollArg";
const POLL_ERROR: &str = "PollError";
const COMPLETE_TAG: &str = "complete";
const REVISION_MISMATCH_TAG: &str = "revision_mismatch";

fn async_ref(name: &str) -> TypeRef {
    TypeRef::qualified(ASYNC_NS, name)
}

/// Whether `data_type` denotes `ancestor` or a union/struct extending it.
fn denotes_or_extends(registry: &Registry, namespace: &str, data_type: &DataType, ancestor: &TypeRef) -> bool {
    named_target(registry, namespace, data_type)
        .is_some_and(|(scope, reference)| registry.is_or_extends(scope, reference, ancestor))
}

// =============================================================================
// PAGINATION
// =============================================================================

pub(super) fn pagination(registry: &Registry, out: &mut Vec<Finding>) {
    for (ns, route) in registry.routes() {
        let subject = route_subject(&ns.name, route);

        if let Some(fields) = struct_of(registry, &ns.name, &route.result) {
            let has_more = fields.iter().find(|f| f.item.name == "has_more");
            let has_cursor = fields.iter().any(|f| f.item.name == "cursor");
            match (has_more, has_cursor) {
                (Some(_), false) => out.push(Finding::new(
                    Rule::Pagination,
                    subject.clone(),
                    "result carries 'has_more' but no 'cursor'",
                )),
                (None, true) => out.push(Finding::new(
                    Rule::Pagination,
                    subject.clone(),
                    "result carries 'cursor' but no 'has_more'",
                )),
                _ => {}
            }
            if let Some(flag) = has_more {
                if !is_boolean_flag(registry, flag) {
                    out.push(Finding::new(
                        Rule::Pagination,
                        subject.clone(),
                        "'has_more' must be a non-nullable Boolean",
                    ));
                }
            }
        }

        if let Some(base) = route.continuation_of() {
            check_continuation(registry, ns, route, base, &subject, out);
        }
    }
}

fn is_boolean_flag(registry: &Registry, field: &Scoped<'_, Field>) -> bool {
    registry
        .unalias(field.namespace, &field.item.data_type)
        .is_ok_and(|(_, t)| matches!(t, DataType::Boolean))
}

/// A page result: a struct with a `cursor` and a Boolean `has_more`.
fn is_page(registry: &Registry, namespace: &str, data_type: &DataType) -> bool {
    struct_of(registry, namespace, data_type).is_some_and(|fields| {
        fields.iter().any(|f| f.item.name == "cursor")
            && fields
                .iter()
                .any(|f| f.item.name == "has_more" && is_boolean_flag(registry, f))
    })
}

fn check_continuation(
    registry: &Registry,
    ns: &Namespace,
    route: &Route,
    base: &str,
    subject: &str,
    out: &mut Vec<Finding>,
) {
    let siblings: Vec<&Route> = ns.routes().filter(|r| r.name == base).collect();
    if siblings.is_empty() {
        out.push(Finding::new(
            Rule::Pagination,
            subject,
            format!("continues '{}', which is not declared", base),
        ));
    } else if !siblings
        .iter()
        .any(|s| Registry::same_type(&s.result, &ns.name, &route.result, &ns.name))
    {
        out.push(Finding::new(
            Rule::Pagination,
            subject,
            format!("no version of '{}' returns the same result type", base),
        ));
    }

    if !is_page(registry, &ns.name, &route.result) {
        out.push(Finding::new(
            Rule::Pagination,
            subject,
            "continue result must carry 'cursor' and a Boolean 'has_more'",
        ));
    }

    let takes_cursor = struct_of(registry, &ns.name, &route.arg)
        .is_some_and(|fields| fields.iter().any(|f| f.item.name == "cursor"));
    if !takes_cursor {
        out.push(Finding::new(
            Rule::Pagination,
            subject,
            "continue arg has no 'cursor' field",
        ));
    }

    let cursor_error = union_of(registry, &ns.name, &route.error)
        .is_some_and(|(_, shape)| shape.variants.iter().any(|v| v.item.name.contains("cursor")));
    if !cursor_error {
        out.push(Finding::new(
            Rule::Pagination,
            subject,
            "continue error has no cursor-related tag",
        ));
    }
}

// =============================================================================
// LAUNCH / POLL
// =============================================================================

pub(super) fn launch_poll(registry: &Registry, out: &mut Vec<Finding>) {
    let launch_base = async_ref(LAUNCH_BASE);
    for (ns, route) in registry.routes() {
        let subject = route_subject(&ns.name, route);

        if let Some(launched) = route.poll_of() {
            if !ns.routes().any(|r| r.name == launched) {
                out.push(Finding::new(
                    Rule::LaunchPoll,
                    subject.clone(),
                    format!("polls '{}', which is not declared", launched),
                ));
            }
        }

        if !denotes_or_extends(registry, &ns.name, &route.result, &launch_base) {
            continue;
        }
        let poll_name = format!("{}/check", route.name);
        let Some(poll) = ns.routes().find(|r| r.name == poll_name) else {
            out.push(Finding::new(
                Rule::LaunchPoll,
                subject,
                format!("launches a job but '{}' is not declared", poll_name),
            ));
            continue;
        };
        check_poll(registry, &ns.name, route, poll, &subject, out);
    }
}

fn check_poll(
    registry: &Registry,
    namespace: &str,
    launch: &Route,
    poll: &Route,
    subject: &str,
    out: &mut Vec<Finding>,
) {
    let poll_arg = DataType::Named(async_ref(POLL_ARG));
    if !Registry::same_type(&poll.arg, namespace, &poll_arg, namespace) {
        out.push(Finding::new(
            Rule::LaunchPoll,
            subject,
            format!("poll route '{}' must take {}", poll.id(), poll_arg),
        ));
    }

    if !denotes_or_extends(registry, namespace, &poll.error, &async_ref(POLL_ERROR)) {
        out.push(Finding::new(
            Rule::LaunchPoll,
            subject,
            format!("poll route '{}' must error with async.PollError or an extension of it", poll.id()),
        ));
    }

    if !denotes_or_extends(registry, namespace, &poll.result, &async_ref(POLL_RESULT_BASE)) {
        out.push(Finding::new(
            Rule::LaunchPoll,
            subject,
            format!("poll route '{}' must return an extension of async.PollResultBase", poll.id()),
        ));
        return;
    }

    let launched = union_of(registry, namespace, &launch.result).and_then(|(_, s)| s.find(COMPLETE_TAG));
    let polled = union_of(registry, namespace, &poll.result).and_then(|(_, s)| s.find(COMPLETE_TAG));
    match (launched, polled) {
        (Some(a), Some(b)) if same_payload(a, b) => {}
        (None, None) => {}
        (Some(_), None) => out.push(Finding::new(
            Rule::LaunchPoll,
            subject,
            format!("poll route '{}' has no 'complete' tag", poll.id()),
        )),
        _ => out.push(Finding::new(
            Rule::LaunchPoll,
            subject,
            format!("'complete' payload differs between launch and poll route '{}'", poll.id()),
        )),
    }
}

fn same_payload(a: Scoped<'_, Variant>, b: Scoped<'_, Variant>) -> bool {
    match (&a.item.payload, &b.item.payload) {
        (Some(x), Some(y)) => Registry::same_type(x, a.namespace, y, b.namespace),
        _ => a.item.is_void() && b.item.is_void(),
    }
}

// =============================================================================
// OPTIMISTIC UPDATE
// =============================================================================

pub(super) fn optimistic_update(registry: &Registry, out: &mut Vec<Finding>) {
    for (ns, route) in registry.routes() {
        let mismatch = union_of(registry, &ns.name, &route.error)
            .is_some_and(|(_, shape)| shape.find(REVISION_MISMATCH_TAG).is_some());
        if !mismatch {
            continue;
        }
        let revision = struct_of(registry, &ns.name, &route.arg)
            .and_then(|fields| fields.into_iter().find(|f| f.item.name == "revision"));
        let ok = revision.is_some_and(|field| {
            !field.item.data_type.is_nullable()
                && registry
                    .unalias(field.namespace, &field.item.data_type)
                    .is_ok_and(|(_, t)| matches!(t, DataType::Integer { .. }))
        });
        if !ok {
            out.push(Finding::new(
                Rule::OptimisticUpdate,
                route_subject(&ns.name, route),
                "error declares 'revision_mismatch' but the arg has no required integer 'revision' field",
            ));
        }
    }
}

// =============================================================================
// DEPRECATION
// =============================================================================

pub(super) fn deprecation(registry: &Registry, out: &mut Vec<Finding>) {
    for (ns, route) in registry.routes() {
        let Some(by) = route.deprecated.as_ref().and_then(|d| d.by.as_deref()) else {
            continue;
        };
        let subject = route_subject(&ns.name, route);
        let target = ns
            .get_route(by)
            .or_else(|| registry.route(by).ok().map(|(_, r)| r));
        match target {
            None => out.push(Finding::new(
                Rule::Deprecation,
                subject,
                format!("deprecated by unknown route '{}'", by),
            )),
            Some(t) if t.name == route.name && t.version == route.version => out.push(
                Finding::new(Rule::Deprecation, subject, "deprecated by itself"),
            ),
            Some(_) => {}
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::checks::{Rule, run_checks};
    use crate::decls::async_job;
    use crate::namespace::Namespace;
    use crate::route::Route;
    use crate::types::{DataType, Field, IntKind, StructDef, UnionDef, Variant};
    use crate::Registry;

    fn findings(ns: Namespace, rule: Rule) -> Vec<String> {
        let mut r = Registry::new();
        r.insert(async_job::namespace().expect("async")).expect("insert");
        r.insert(ns).expect("insert");
        run_checks(&r)
            .by_rule(rule)
            .map(|f| format!("{}: {}", f.subject, f.message))
            .collect()
    }

    fn listing(ns: &mut Namespace) {
        ns.declare(
            StructDef::new("ListResult")
                .field(Field::new("items", DataType::list(DataType::string())))
                .field(Field::new("cursor", DataType::string()))
                .field(Field::new("has_more", DataType::boolean())),
        )
        .expect("declare");
        ns.declare(StructDef::new("ContinueArg").field(Field::new("cursor", DataType::string())))
            .expect("declare");
        ns.declare(UnionDef::open("ContinueError").variant(Variant::void("invalid_cursor")))
            .expect("declare");
    }

    #[test]
    fn paired_listing_passes() {
        let mut ns = Namespace::new("demo");
        listing(&mut ns);
        ns.route(Route::new("items/list", DataType::Void, DataType::named("ListResult"), DataType::Void))
            .expect("route");
        ns.route(Route::new(
            "items/list/continue",
            DataType::named("ContinueArg"),
            DataType::named("ListResult"),
            DataType::named("ContinueError"),
        ))
        .expect("route");
        assert!(findings(ns, Rule::Pagination).is_empty());
    }

    #[test]
    fn orphan_continue_route() {
        let mut ns = Namespace::new("demo");
        listing(&mut ns);
        ns.route(Route::new(
            "items/list/continue",
            DataType::named("ContinueArg"),
            DataType::named("ListResult"),
            DataType::named("ContinueError"),
        ))
        .expect("route");
        let found = findings(ns, Rule::Pagination);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("not declared"));
    }

    #[test]
    fn continue_without_cursor_error() {
        let mut ns = Namespace::new("demo");
        listing(&mut ns);
        ns.declare(UnionDef::open("PlainError").variant(Variant::void("access_denied")))
            .expect("declare");
        ns.route(Route::new("items/list", DataType::Void, DataType::named("ListResult"), DataType::Void))
            .expect("route");
        ns.route(Route::new(
            "items/list/continue",
            DataType::named("ContinueArg"),
            DataType::named("ListResult"),
            DataType::named("PlainError"),
        ))
        .expect("route");
        let found = findings(ns, Rule::Pagination);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("cursor-related tag"));
    }

    #[test]
    fn has_more_without_cursor() {
        let mut ns = Namespace::new("demo");
        ns.declare(StructDef::new("Page").field(Field::new("has_more", DataType::boolean())))
            .expect("declare");
        ns.route(Route::new("page", DataType::Void, DataType::named("Page"), DataType::Void))
            .expect("route");
        let found = findings(ns, Rule::Pagination);
        assert_eq!(found, vec!["demo/page: result carries 'has_more' but no 'cursor'".to_string()]);
    }

    #[test]
    fn continued_result_without_page_fields() {
        let mut ns = Namespace::new("demo");
        listing(&mut ns);
        ns.declare(
            StructDef::new("Page").field(Field::new("items", DataType::list(DataType::string()))),
        )
        .expect("declare");
        ns.route(Route::new("items/list", DataType::Void, DataType::named("Page"), DataType::Void))
            .expect("route");
        ns.route(Route::new(
            "items/list/continue",
            DataType::named("ContinueArg"),
            DataType::named("Page"),
            DataType::named("ContinueError"),
        ))
        .expect("route");
        let found = findings(ns, Rule::Pagination);
        assert_eq!(
            found,
            vec!["demo/items/list/continue: continue result must carry 'cursor' and a Boolean 'has_more'"
                .to_string()]
        );
    }

    #[test]
    fn continued_result_with_nullable_has_more() {
        let mut ns = Namespace::new("demo");
        listing(&mut ns);
        ns.declare(
            StructDef::new("LoosePage")
                .field(Field::new("cursor", DataType::string()))
                .field(Field::new("has_more", DataType::boolean().nullable())),
        )
        .expect("declare");
        ns.route(Route::new("items/list", DataType::Void, DataType::named("LoosePage"), DataType::Void))
            .expect("route");
        ns.route(Route::new(
            "items/list/continue",
            DataType::named("ContinueArg"),
            DataType::named("LoosePage"),
            DataType::named("ContinueError"),
        ))
        .expect("route");
        let found = findings(ns, Rule::Pagination);
        assert!(found.iter().any(|f| f.contains("continue result must carry")));
    }

    fn launch_types(ns: &mut Namespace, poll_payload: DataType) {
        ns.declare(StructDef::new("Done").field(Field::new("id", DataType::string())))
            .expect("declare");
        ns.declare(StructDef::new("Other").field(Field::new("id", DataType::string())))
            .expect("declare");
        ns.declare(
            UnionDef::open("Launch")
                .extends("async.LaunchResultBase")
                .variant(Variant::with("complete", DataType::named("Done"))),
        )
        .expect("declare");
        ns.declare(
            UnionDef::open("JobStatus")
                .extends("async.PollResultBase")
                .variant(Variant::with("complete", poll_payload)),
        )
        .expect("declare");
    }

    #[test]
    fn launch_without_poll_route() {
        let mut ns = Namespace::new("demo");
        launch_types(&mut ns, DataType::named("Done"));
        ns.route(Route::new("job", DataType::Void, DataType::named("Launch"), DataType::Void))
            .expect("route");
        let found = findings(ns, Rule::LaunchPoll);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("'job/check' is not declared"));
    }

    #[test]
    fn poll_route_must_match_launch() {
        let mut ns = Namespace::new("demo");
        launch_types(&mut ns, DataType::named("Other"));
        ns.route(Route::new("job", DataType::Void, DataType::named("Launch"), DataType::Void))
            .expect("route");
        ns.route(Route::new(
            "job/check",
            DataType::named("async.PollArg"),
            DataType::named("JobStatus"),
            DataType::named("async.PollError"),
        ))
        .expect("route");
        let found = findings(ns, Rule::LaunchPoll);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("payload differs"));
    }

    #[test]
    fn well_formed_launch_and_poll() {
        let mut ns = Namespace::new("demo");
        launch_types(&mut ns, DataType::named("demo.Done"));
        ns.route(Route::new("job", DataType::Void, DataType::named("Launch"), DataType::Void))
            .expect("route");
        ns.route(Route::new(
            "job/check",
            DataType::named("async.PollArg"),
            DataType::named("JobStatus"),
            DataType::named("async.PollError"),
        ))
        .expect("route");
        assert!(findings(ns, Rule::LaunchPoll).is_empty());
    }

    #[test]
    fn revision_mismatch_requires_revision() {
        let mut ns = Namespace::new("demo");
        ns.declare(UnionDef::open("UpdateError").variant(Variant::void("revision_mismatch")))
            .expect("declare");
        ns.declare(StructDef::new("LooseArg").field(Field::new("revision", DataType::int(IntKind::Int64).nullable())))
            .expect("declare");
        ns.declare(StructDef::new("StrictArg").field(Field::new("revision", DataType::int(IntKind::Int64))))
            .expect("declare");
        ns.route(Route::new("loose", DataType::named("LooseArg"), DataType::Void, DataType::named("UpdateError")))
            .expect("route");
        ns.route(Route::new("strict", DataType::named("StrictArg"), DataType::Void, DataType::named("UpdateError")))
            .expect("route");
        let found = findings(ns, Rule::OptimisticUpdate);
        assert_eq!(found.len(), 1);
        assert!(found[0].starts_with("demo/loose"));
    }

    #[test]
    fn deprecation_target_must_exist() {
        let mut ns = Namespace::new("demo");
        ns.route(Route::new("list", DataType::Void, DataType::Void, DataType::Void).deprecated_by(Some("list:2")))
            .expect("route");
        ns.route(Route::new("old", DataType::Void, DataType::Void, DataType::Void).deprecated_by(Some("list:3")))
            .expect("route");
        ns.route(Route::new("list", DataType::Void, DataType::Void, DataType::Void).version(2))
            .expect("route");
        let found = findings(ns, Rule::Deprecation);
        assert_eq!(found, vec!["demo/old: deprecated by unknown route 'list:3'".to_string()]);
    }
}
