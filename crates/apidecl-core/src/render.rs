//! # Render Module
//!
//! IDL-style text rendering of declarations, as used by `apidecl show` and
//! `apidecl export --format stone`.
//!
//! ```text
//! union DocLookupError extends PaperApiBaseError
//!
//!     doc_not_found
//!         "The required doc was not found."
//! ```
//!
//! Output is deterministic: namespaces, types and routes are emitted in the
//! registry's sorted order.

use crate::route::{AuthMode, Host, RouteStyle};
use crate::types::{AliasDef, StructDef, TypeDef, UnionDef};
use crate::{Namespace, Registry, Route};

const INDENT: &str = "    ";
const DOC_WIDTH: usize = 76;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Every namespace, separated by a blank line.
pub fn render_registry(registry: &Registry) -> String {
    registry
        .namespaces()
        .map(render_namespace)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_namespace(ns: &Namespace) -> String {
    let mut out = format!("namespace {}\n", ns.name);
    push_doc(&mut out, &ns.doc, "");
    for def in ns.types() {
        out.push('\n');
        out.push_str(&render_type(def));
    }
    for route in ns.routes() {
        out.push('\n');
        out.push_str(&render_route(route));
    }
    out
}

pub fn render_type(def: &TypeDef) -> String {
    match def {
        TypeDef::Struct(s) => render_struct(s),
        TypeDef::Union(u) => render_union(u),
        TypeDef::Alias(a) => render_alias(a),
    }
}

pub fn render_route(route: &Route) -> String {
    let mut out = format!(
        "route {} ({}, {}, {})",
        route.id(),
        route.arg,
        route.result,
        route.error
    );
    if let Some(deprecation) = &route.deprecated {
        out.push_str(" deprecated");
        if let Some(by) = &deprecation.by {
            out.push_str(&format!(" by {}", by));
        }
    }
    out.push('\n');
    push_doc(&mut out, &route.doc, INDENT);

    let attrs = route_attrs(route);
    if !attrs.is_empty() {
        out.push('\n');
        out.push_str(&format!("{}attrs\n", INDENT));
        for (key, value) in attrs {
            out.push_str(&format!("{0}{0}{1} = {2}\n", INDENT, key, value));
        }
    }
    out
}

// =============================================================================
// DECLARATIONS
// =============================================================================

fn render_struct(s: &StructDef) -> String {
    let mut out = header("struct", &s.name, s.extends.as_ref().map(ToString::to_string));
    push_doc(&mut out, &s.doc, INDENT);
    if !s.fields.is_empty() {
        out.push('\n');
    }
    for field in &s.fields {
        out.push_str(&format!("{}{} {}", INDENT, field.name, field.data_type));
        if let Some(default) = &field.default {
            out.push_str(&format!(" = {}", default));
        }
        out.push('\n');
        push_doc(&mut out, &field.doc, &INDENT.repeat(2));
    }
    out
}

fn render_union(u: &UnionDef) -> String {
    let keyword = if u.closed { "union_closed" } else { "union" };
    let mut out = header(keyword, &u.name, u.extends.as_ref().map(ToString::to_string));
    push_doc(&mut out, &u.doc, INDENT);
    if !u.variants.is_empty() {
        out.push('\n');
    }
    for variant in &u.variants {
        match &variant.payload {
            Some(payload) if !payload.is_void() => {
                out.push_str(&format!("{}{} {}\n", INDENT, variant.name, payload));
            }
            _ => out.push_str(&format!("{}{}\n", INDENT, variant.name)),
        }
        push_doc(&mut out, &variant.doc, &INDENT.repeat(2));
    }
    out
}

fn render_alias(a: &AliasDef) -> String {
    let mut out = format!("alias {} = {}\n", a.name, a.target);
    push_doc(&mut out, &a.doc, INDENT);
    out
}

fn header(keyword: &str, name: &str, extends: Option<String>) -> String {
    match extends {
        Some(parent) => format!("{} {} extends {}\n", keyword, name, parent),
        None => format!("{} {}\n", keyword, name),
    }
}

/// Non-default attributes, in a fixed order.
fn route_attrs(route: &Route) -> Vec<(&'static str, String)> {
    let a = &route.attrs;
    let mut attrs = Vec::new();
    if a.auth != AuthMode::default() {
        attrs.push(("auth", quoted(&a.auth.to_string())));
    }
    if a.host != Host::default() {
        attrs.push(("host", quoted(&a.host.to_string())));
    }
    if a.style != RouteStyle::default() {
        attrs.push(("style", quoted(&a.style.to_string())));
    }
    if a.is_preview {
        attrs.push(("is_preview", "true".to_string()));
    }
    if let Some(owner) = &a.owner {
        attrs.push(("owner", quoted(owner)));
    }
    if let Some(scope) = &a.scope {
        attrs.push(("scope", quoted(scope)));
    }
    if let Some(mode) = &a.select_admin_mode {
        attrs.push(("select_admin_mode", quoted(mode)));
    }
    attrs
}

// =============================================================================
// DOC STRINGS
// =============================================================================

fn quoted(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Append `doc` as a quoted block wrapped at [`DOC_WIDTH`]. Empty docs add nothing.
fn push_doc(out: &mut String, doc: &str, indent: &str) {
    let doc = doc.trim();
    if doc.is_empty() {
        return;
    }
    let escaped = doc.replace('\\', "\\\\").replace('"', "\\\"");
    let lines = wrap(&escaped, DOC_WIDTH.saturating_sub(indent.len()));
    let last = lines.len().saturating_sub(1);
    for (i, line) in lines.iter().enumerate() {
        let open = if i == 0 { "\"" } else { "" };
        let close = if i == last { "\"" } else { "" };
        out.push_str(&format!("{}{}{}{}\n", indent, open, line, close));
    }
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len().saturating_add(word.len()) >= width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decls::standard_registry;
    use crate::types::{DataType, DefaultValue, Field, Variant};

    #[test]
    fn struct_with_default_and_doc() {
        let def = TypeDef::Struct(
            StructDef::new("ListArg")
                .doc("Arguments for listing.")
                .field(
                    Field::new("limit", DataType::int(crate::IntKind::UInt32))
                        .default(DefaultValue::UInt(1000)),
                ),
        );
        assert_eq!(
            render_type(&def),
            "struct ListArg\n    \"Arguments for listing.\"\n\n    limit UInt32 = 1000\n"
        );
    }

    #[test]
    fn closed_union_with_payload() {
        let def = TypeDef::Union(
            UnionDef::closed("Item")
                .extends("Base")
                .variant(Variant::void("id_not_found"))
                .variant(Variant::with("metadata", DataType::named("Meta"))),
        );
        assert_eq!(
            render_type(&def),
            "union_closed Item extends Base\n\n    id_not_found\n    metadata Meta\n"
        );
    }

    #[test]
    fn long_docs_wrap_and_escape() {
        let mut out = String::new();
        let doc = format!("{} \"quoted\"", "word ".repeat(30));
        push_doc(&mut out, &doc, INDENT);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.len() <= DOC_WIDTH + 2));
        assert!(lines[0].starts_with("    \""));
        assert!(out.trim_end().ends_with("\\\"quoted\\\"\""));
    }

    #[test]
    fn deprecated_route_and_attrs() {
        let registry = standard_registry().expect("declarations build");
        let (_, list) = registry.route("file_requests/list").expect("declared");
        let text = render_route(list);
        assert!(text.starts_with("route list (Void, ListFileRequestsResult, ListFileRequestsError) deprecated by list:2\n"));

        let (_, archive) = registry.route("team/team_folder/archive").expect("declared");
        let text = render_route(archive);
        assert!(text.contains("    attrs\n        auth = \"team\"\n"));
    }

    #[test]
    fn registry_rendering_is_stable() {
        let registry = standard_registry().expect("declarations build");
        let first = render_registry(&registry);
        assert_eq!(first, render_registry(&registry));
        let async_at = first.find("namespace async").expect("async rendered");
        let team_at = first.find("namespace team").expect("team rendered");
        assert!(async_at < team_at);
        assert!(first.contains("route docs/update (PaperDocUpdateArgs, PaperDocCreateUpdateResult, PaperDocUpdateError)"));
    }
}
