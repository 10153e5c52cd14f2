//! # apidecl-core - The Declarations
//!
//! Typed, static declarations of a remote API surface: team folder management,
//! file requests and Paper document operations.
//!
//! Nothing here dispatches a request. The crate holds the interface surface as
//! data (namespaces of structs, unions, aliases and routes), resolves it into a
//! [`Registry`], and checks it structurally:
//!
//! - every error union that extends another is a superset of it
//! - every paginated result carries a cursor and `has_more`
//! - every optimistic update requires a revision
//! - every launch route has a matching poll route
//!
//! ## Layout
//!
//! ```text
//! types / route / namespace   meta-model
//! registry                    resolution, extends chains, dependency traversal
//! decls                       the declared namespaces (static data)
//! checks                      structural rules -> CheckReport
//! wire                        JSON payload validation against declared types
//! models                      serde bindings for the principal entities
//! formats                     canonical bundle + JSON export/import
//! render                      IDL-style text rendering
//! ```

pub mod cache;
pub mod checks;
pub mod decls;
pub mod formats;
pub mod models;
pub mod namespace;
pub mod registry;
pub mod render;
pub mod route;
pub mod types;
pub mod wire;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use checks::{CheckReport, Finding, Rule, Severity, run_checks};
pub use decls::standard_registry;
pub use namespace::Namespace;
pub use registry::Registry;
pub use route::{AuthMode, Deprecation, Host, Route, RouteAttrs, RouteStyle};
pub use types::{
    AliasDef, DataType, DefaultValue, Field, IntKind, StructDef, TypeDef, UnionDef, Variant,
};
pub use wire::{Validator, WireError, WireErrorKind};

// =============================================================================
// LIMITS
// =============================================================================

/// Maximum length of an extends chain before it is treated as a cycle.
pub const MAX_EXTENDS_DEPTH: usize = 32;

/// Maximum depth for dependency traversal over type references.
pub const MAX_DEPENDENCY_DEPTH: usize = 16;

/// Maximum nesting depth accepted by wire validation.
pub const MAX_WIRE_DEPTH: usize = 64;

/// Implicit tag of every open union.
pub const CATCH_ALL_TAG: &str = "other";

/// Key carrying the tag of a union value on the wire.
pub const TAG_KEY: &str = ".tag";

// =============================================================================
// TYPE REFERENCE
// =============================================================================

/// A reference to a named type.
///
/// A `None` namespace means "the namespace that declares this reference".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    pub namespace: Option<String>,
    pub name: String,
}

impl TypeRef {
    /// Reference a type in the declaring namespace.
    #[must_use]
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
        }
    }

    /// Reference a type in an explicit namespace.
    #[must_use]
    pub fn qualified(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    /// Parse `ns.Name` or `Name`.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text.split_once('.') {
            Some((ns, name)) => Self::qualified(ns, name),
            None => Self::local(text),
        }
    }

    /// Make the reference absolute, using `from_ns` when it is local.
    #[must_use]
    pub fn absolute(&self, from_ns: &str) -> Self {
        Self {
            namespace: Some(
                self.namespace
                    .clone()
                    .unwrap_or_else(|| from_ns.to_string()),
            ),
            name: self.name.clone(),
        }
    }

    /// Namespace of the reference, resolved against `from_ns`.
    #[must_use]
    pub fn namespace_or<'a>(&'a self, from_ns: &'a str) -> &'a str {
        self.namespace.as_deref().unwrap_or(from_ns)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}.{}", ns, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Errors raised while declaring or resolving types and routes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclError {
    #[error("namespace '{0}' is already registered")]
    DuplicateNamespace(String),

    #[error("type '{name}' is declared twice in namespace '{namespace}'")]
    DuplicateType { namespace: String, name: String },

    #[error("route '{route}' is declared twice in namespace '{namespace}'")]
    DuplicateRoute { namespace: String, route: String },

    #[error("unknown namespace '{0}'")]
    UnknownNamespace(String),

    #[error("unresolved type reference '{0}'")]
    Unresolved(TypeRef),

    #[error("unknown route '{0}'")]
    UnknownRoute(String),

    #[error("'{name}' is a {found}, expected a {expected}")]
    KindMismatch {
        name: TypeRef,
        expected: &'static str,
        found: &'static str,
    },

    #[error("extends chain of '{0}' is cyclic or deeper than the allowed limit")]
    ExtendsCycle(TypeRef),

    #[error("alias '{0}' is cyclic or nested deeper than the allowed limit")]
    AliasCycle(TypeRef),
}

// =============================================================================
// TESTS
// =============================================================================
