//! # Structural Checks
//!
//! Rules over a resolved [`Registry`]. Each rule walks the declarations and
//! records [`Finding`]s; nothing is mutated and the order of findings is the
//! registry's deterministic iteration order.
//!
//! Errors mean the declarations contradict the wire conventions they rely
//! on (a `.../continue` route without a cursor, a revision mismatch error on
//! a route that takes no revision). Warnings are style.

mod conventions;
mod hierarchy;
mod references;
mod style;

use crate::registry::{Scoped, UnionShape};
use crate::types::{DataType, Field, TypeDef};
use crate::{Registry, Route, TypeRef};
use serde::Serialize;
use std::fmt;

// =============================================================================
// RULES
// =============================================================================

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// The rules, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    UnresolvedReference,
    ExtendsChain,
    UnionSuperset,
    StructFields,
    Pagination,
    LaunchPoll,
    OptimisticUpdate,
    Deprecation,
    Naming,
    OpenErrors,
}

impl Rule {
    pub const ALL: [Rule; 10] = [
        Rule::UnresolvedReference,
        Rule::ExtendsChain,
        Rule::UnionSuperset,
        Rule::StructFields,
        Rule::Pagination,
        Rule::LaunchPoll,
        Rule::OptimisticUpdate,
        Rule::Deprecation,
        Rule::Naming,
        Rule::OpenErrors,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::UnresolvedReference => "unresolved_reference",
            Self::ExtendsChain => "extends_chain",
            Self::UnionSuperset => "union_superset",
            Self::StructFields => "struct_fields",
            Self::Pagination => "pagination",
            Self::LaunchPoll => "launch_poll",
            Self::OptimisticUpdate => "optimistic_update",
            Self::Deprecation => "deprecation",
            Self::Naming => "naming",
            Self::OpenErrors => "open_errors",
        }
    }

    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            Self::Naming | Self::OpenErrors => Severity::Warning,
            _ => Severity::Error,
        }
    }

    fn run(self, registry: &Registry, out: &mut Vec<Finding>) {
        match self {
            Self::UnresolvedReference => references::unresolved_references(registry, out),
            Self::ExtendsChain => references::extends_chains(registry, out),
            Self::UnionSuperset => hierarchy::union_supersets(registry, out),
            Self::StructFields => hierarchy::struct_fields(registry, out),
            Self::Pagination => conventions::pagination(registry, out),
            Self::LaunchPoll => conventions::launch_poll(registry, out),
            Self::OptimisticUpdate => conventions::optimistic_update(registry, out),
            Self::Deprecation => conventions::deprecation(registry, out),
            Self::Naming => style::naming(registry, out),
            Self::OpenErrors => style::open_errors(registry, out),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =============================================================================
// FINDINGS
// =============================================================================

/// One violation of one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub rule: Rule,
    pub severity: Severity,
    /// `ns.Type` or `ns/route`.
    pub subject: String,
    pub message: String,
}

impl Finding {
    #[must_use]
    pub fn new(rule: Rule, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule,
            severity: rule.severity(),
            subject: subject.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}: {}",
            self.severity, self.rule, self.subject, self.message
        )
    }
}

/// Outcome of running every rule over a registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub namespaces: usize,
    pub types: usize,
    pub routes: usize,
    pub findings: Vec<Finding>,
}

impl CheckReport {
    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
    }

    /// No errors. Warnings are allowed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors().next().is_none()
    }

    /// Whether the report passes, treating warnings as errors when `strict`.
    #[must_use]
    pub fn passes(&self, strict: bool) -> bool {
        if strict {
            self.findings.is_empty()
        } else {
            self.is_clean()
        }
    }

    /// Findings raised by one rule.
    pub fn by_rule(&self, rule: Rule) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.rule == rule)
    }

    /// Render the report for a terminal.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str("┌─────────────────────────────────────┐\n");
        output.push_str(&format!(
            "│ CHECKED {} namespaces, {} types, {} routes\n",
            self.namespaces, self.types, self.routes
        ));
        output.push_str("├─────────────────────────────────────┤\n");
        output.push_str("│ ERRORS                              │\n");
        push_findings(&mut output, self.errors());
        output.push_str("├─────────────────────────────────────┤\n");
        output.push_str("│ WARNINGS                            │\n");
        push_findings(&mut output, self.warnings());
        output.push_str("├─────────────────────────────────────┤\n");
        output.push_str(&format!(
            "│ {} error(s), {} warning(s)\n",
            self.errors().count(),
            self.warnings().count()
        ));
        output.push_str("└─────────────────────────────────────┘\n");

        output
    }
}

fn push_findings<'a>(output: &mut String, findings: impl Iterator<Item = &'a Finding>) {
    let mut any = false;
    for finding in findings {
        any = true;
        output.push_str(&format!(
            "│ - {} {}: {}\n",
            finding.rule, finding.subject, finding.message
        ));
    }
    if !any {
        output.push_str("│ - (none)                            │\n");
    }
}

// =============================================================================
// ENTRY POINT
// =============================================================================

/// Run every rule over `registry`.
#[must_use]
pub fn run_checks(registry: &Registry) -> CheckReport {
    let mut findings = Vec::new();
    for rule in Rule::ALL {
        rule.run(registry, &mut findings);
    }
    CheckReport {
        namespaces: registry.namespaces().count(),
        types: registry.type_count(),
        routes: registry.route_count(),
        findings,
    }
}

// =============================================================================
// SHARED HELPERS
// =============================================================================

fn type_subject(namespace: &str, def: &TypeDef) -> String {
    format!("{}.{}", namespace, def.name())
}

fn route_subject(namespace: &str, route: &Route) -> String {
    format!("{}/{}", namespace, route.id())
}

/// The named type `data_type` denotes after aliases, with its scope.
fn named_target<'a>(
    registry: &'a Registry,
    namespace: &'a str,
    data_type: &'a DataType,
) -> Option<(&'a str, &'a TypeRef)> {
    let (scope, base) = registry.unalias(namespace, data_type).ok()?;
    match base {
        DataType::Named(reference) => Some((scope, reference)),
        _ => None,
    }
}

/// Effective fields when `data_type` denotes a struct.
fn struct_of<'a>(
    registry: &'a Registry,
    namespace: &'a str,
    data_type: &'a DataType,
) -> Option<Vec<Scoped<'a, Field>>> {
    let (scope, reference) = named_target(registry, namespace, data_type)?;
    registry.struct_fields(scope, reference).ok()
}

/// Effective tag set when `data_type` denotes a union.
fn union_of<'a>(
    registry: &'a Registry,
    namespace: &'a str,
    data_type: &'a DataType,
) -> Option<(TypeRef, UnionShape<'a>)> {
    let (scope, reference) = named_target(registry, namespace, data_type)?;
    let shape = registry.union_shape(scope, reference).ok()?;
    Some((reference.absolute(scope), shape))
}

// =============================================================================
// TESTS
// =============================================================================
