//! # Registry
//!
//! The resolved collection of namespaces.
//!
//! The registry answers the questions the checks, the wire validator and the
//! CLI all ask: what does a reference point to, which fields does a struct
//! have once its parents are included, which tags does a union accept, and
//! which types does a declaration depend on. All maps are `BTreeMap` so
//! answers come back in the same order on every run.

use crate::namespace::Namespace;
use crate::route::{Route, split_route_key};
use crate::types::{DataType, Field, StructDef, TypeDef, UnionDef, Variant};
use crate::{CATCH_ALL_TAG, DeclError, MAX_DEPENDENCY_DEPTH, MAX_EXTENDS_DEPTH, TypeRef};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

// =============================================================================
// SCOPED VIEWS
// =============================================================================

/// An item together with the namespace that declares it.
///
/// Local references inside the item resolve against `namespace`.
#[derive(Debug, PartialEq, Eq)]
pub struct Scoped<'a, T> {
    pub namespace: &'a str,
    pub item: &'a T,
}

// Written by hand: a derive would require `T: Copy`.
impl<T> Clone for Scoped<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Scoped<'_, T> {}

impl<'a, T> Scoped<'a, T> {
    fn new(namespace: &'a str, item: &'a T) -> Self {
        Self { namespace, item }
    }
}

/// The effective tag set of a union, parents first.
#[derive(Debug, Clone)]
pub struct UnionShape<'a> {
    pub variants: Vec<Scoped<'a, Variant>>,
    pub closed: bool,
}

impl<'a> UnionShape<'a> {
    /// Find a declared tag (the catch-all is not a declared tag).
    #[must_use]
    pub fn find(&self, tag: &str) -> Option<Scoped<'a, Variant>> {
        self.variants.iter().find(|v| v.item.name == tag).copied()
    }

    /// Whether `tag` is accepted, counting the catch-all of open unions.
    #[must_use]
    pub fn accepts(&self, tag: &str) -> bool {
        self.find(tag).is_some() || (!self.closed && tag == CATCH_ALL_TAG)
    }

    /// Declared tags plus the catch-all when the union is open.
    #[must_use]
    pub fn tag_names(&self) -> Vec<&'a str> {
        let mut names: Vec<&'a str> = self.variants.iter().map(|v| v.item.name.as_str()).collect();
        if !self.closed && !names.contains(&CATCH_ALL_TAG) {
            names.push(CATCH_ALL_TAG);
        }
        names
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// The full set of declared namespaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    namespaces: BTreeMap<String, Namespace>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a namespace. Fails if one with the same name is present.
    pub fn insert(&mut self, namespace: Namespace) -> Result<(), DeclError> {
        if self.namespaces.contains_key(&namespace.name) {
            return Err(DeclError::DuplicateNamespace(namespace.name));
        }
        self.namespaces.insert(namespace.name.clone(), namespace);
        Ok(())
    }

    #[must_use]
    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.get(name)
    }

    /// Namespaces in name order.
    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.namespaces.values()
    }

    /// Every route with its namespace, namespace order then route key order.
    pub fn routes(&self) -> impl Iterator<Item = (&Namespace, &Route)> {
        self.namespaces
            .values()
            .flat_map(|ns| ns.routes().map(move |r| (ns, r)))
    }

    /// Every type with its namespace.
    pub fn types(&self) -> impl Iterator<Item = (&Namespace, &TypeDef)> {
        self.namespaces
            .values()
            .flat_map(|ns| ns.types().map(move |t| (ns, t)))
    }

    #[must_use]
    pub fn type_count(&self) -> usize {
        self.namespaces.values().map(Namespace::type_count).sum()
    }

    #[must_use]
    pub fn route_count(&self) -> usize {
        self.namespaces.values().map(Namespace::route_count).sum()
    }

    // -------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------

    /// Resolve a reference made from inside `from_ns`.
    pub fn resolve<'a>(
        &'a self,
        from_ns: &str,
        reference: &TypeRef,
    ) -> Result<Scoped<'a, TypeDef>, DeclError> {
        let ns_name = reference.namespace_or(from_ns);
        let ns = self
            .namespaces
            .get(ns_name)
            .ok_or_else(|| DeclError::Unresolved(reference.absolute(from_ns)))?;
        let def = ns
            .get_type(&reference.name)
            .ok_or_else(|| DeclError::Unresolved(reference.absolute(from_ns)))?;
        Ok(Scoped::new(&ns.name, def))
    }

    /// Resolve an absolute `ns.Name` path.
    pub fn resolve_path(&self, path: &str) -> Result<Scoped<'_, TypeDef>, DeclError> {
        let reference = TypeRef::parse(path);
        match reference.namespace {
            Some(_) => self.resolve("", &reference),
            None => Err(DeclError::Unresolved(reference)),
        }
    }

    /// Resolve a reference that must name a struct.
    pub fn resolve_struct<'a>(
        &'a self,
        from_ns: &str,
        reference: &TypeRef,
    ) -> Result<Scoped<'a, StructDef>, DeclError> {
        let scoped = self.resolve(from_ns, reference)?;
        match scoped.item {
            TypeDef::Struct(s) => Ok(Scoped::new(scoped.namespace, s)),
            other => Err(DeclError::KindMismatch {
                name: reference.absolute(from_ns),
                expected: "struct",
                found: other.kind(),
            }),
        }
    }

    /// Resolve a reference that must name a union.
    pub fn resolve_union<'a>(
        &'a self,
        from_ns: &str,
        reference: &TypeRef,
    ) -> Result<Scoped<'a, UnionDef>, DeclError> {
        let scoped = self.resolve(from_ns, reference)?;
        match scoped.item {
            TypeDef::Union(u) => Ok(Scoped::new(scoped.namespace, u)),
            other => Err(DeclError::KindMismatch {
                name: reference.absolute(from_ns),
                expected: "union",
                found: other.kind(),
            }),
        }
    }

    /// Look through aliases until a non-alias type is reached.
    ///
    /// Returns the underlying type and the namespace its local references
    /// resolve against.
    pub fn unalias<'a>(
        &'a self,
        from_ns: &'a str,
        data_type: &'a DataType,
    ) -> Result<(&'a str, &'a DataType), DeclError> {
        let mut scope = from_ns;
        let mut current = data_type;
        let mut seen = BTreeSet::new();
        loop {
            let DataType::Named(reference) = current else {
                return Ok((scope, current));
            };
            let resolved = self.resolve(scope, reference)?;
            let TypeDef::Alias(alias) = resolved.item else {
                return Ok((scope, current));
            };
            let absolute = reference.absolute(scope);
            if !seen.insert(absolute.clone()) || seen.len() > MAX_EXTENDS_DEPTH {
                return Err(DeclError::AliasCycle(absolute));
            }
            scope = resolved.namespace;
            current = &alias.target;
        }
    }

    // -------------------------------------------------------------------------
    // Extends chains
    // -------------------------------------------------------------------------

    /// The declaration followed by its ancestors, most derived first.
    pub fn extends_chain<'a>(
        &'a self,
        from_ns: &str,
        reference: &TypeRef,
    ) -> Result<Vec<Scoped<'a, TypeDef>>, DeclError> {
        let start = reference.absolute(from_ns);
        let mut chain = Vec::new();
        let mut seen = BTreeSet::new();
        let mut current = start.clone();

        loop {
            if !seen.insert(current.clone()) || chain.len() >= MAX_EXTENDS_DEPTH {
                return Err(DeclError::ExtendsCycle(start));
            }
            let scoped = self.resolve("", &current)?;
            if let Some(child) = chain.last() {
                let child: &Scoped<'_, TypeDef> = child;
                if std::mem::discriminant(child.item) != std::mem::discriminant(scoped.item) {
                    return Err(DeclError::KindMismatch {
                        name: current,
                        expected: child.item.kind(),
                        found: scoped.item.kind(),
                    });
                }
            }
            let next = scoped.item.extends().map(|p| p.absolute(scoped.namespace));
            chain.push(scoped);
            match next {
                Some(parent) => current = parent,
                None => return Ok(chain),
            }
        }
    }

    /// All fields of a struct, inherited fields first.
    pub fn struct_fields<'a>(
        &'a self,
        from_ns: &str,
        reference: &TypeRef,
    ) -> Result<Vec<Scoped<'a, Field>>, DeclError> {
        self.resolve_struct(from_ns, reference)?;
        let chain = self.extends_chain(from_ns, reference)?;
        let mut fields = Vec::new();
        for link in chain.iter().rev() {
            if let TypeDef::Struct(s) = link.item {
                fields.extend(s.fields.iter().map(|f| Scoped::new(link.namespace, f)));
            }
        }
        Ok(fields)
    }

    /// The effective tag set of a union, inherited tags first.
    ///
    /// Openness is taken from the most derived union.
    pub fn union_shape<'a>(
        &'a self,
        from_ns: &str,
        reference: &TypeRef,
    ) -> Result<UnionShape<'a>, DeclError> {
        let own = self.resolve_union(from_ns, reference)?;
        let chain = self.extends_chain(from_ns, reference)?;
        let mut variants = Vec::new();
        for link in chain.iter().rev() {
            if let TypeDef::Union(u) = link.item {
                variants.extend(u.variants.iter().map(|v| Scoped::new(link.namespace, v)));
            }
        }
        Ok(UnionShape {
            variants,
            closed: own.item.closed,
        })
    }

    /// Whether `reference` is `ancestor` or extends it, directly or not.
    #[must_use]
    pub fn is_or_extends(&self, from_ns: &str, reference: &TypeRef, ancestor: &TypeRef) -> bool {
        let target = ancestor.absolute(from_ns);
        self.extends_chain(from_ns, reference)
            .map(|chain| {
                chain
                    .iter()
                    .any(|link| TypeRef::qualified(link.namespace, link.item.name()) == target)
            })
            .unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Type comparison
    // -------------------------------------------------------------------------

    /// Rewrite every local reference of `data_type` as absolute.
    #[must_use]
    pub fn qualify(data_type: &DataType, from_ns: &str) -> DataType {
        match data_type {
            DataType::Named(r) => DataType::Named(r.absolute(from_ns)),
            DataType::List {
                item,
                min_items,
                max_items,
            } => DataType::List {
                item: Box::new(Self::qualify(item, from_ns)),
                min_items: *min_items,
                max_items: *max_items,
            },
            DataType::Nullable(inner) => DataType::Nullable(Box::new(Self::qualify(inner, from_ns))),
            other => other.clone(),
        }
    }

    /// Structural equality of two types declared in (possibly) different namespaces.
    #[must_use]
    pub fn same_type(a: &DataType, a_ns: &str, b: &DataType, b_ns: &str) -> bool {
        Self::qualify(a, a_ns) == Self::qualify(b, b_ns)
    }

    // -------------------------------------------------------------------------
    // Routes
    // -------------------------------------------------------------------------

    /// Look up `ns/route/name[:version]`.
    pub fn route(&self, path: &str) -> Result<(&Namespace, &Route), DeclError> {
        let path = path.trim_start_matches('/');
        let (ns_name, key) = path
            .split_once('/')
            .ok_or_else(|| DeclError::UnknownRoute(path.to_string()))?;
        let ns = self
            .namespaces
            .get(ns_name)
            .ok_or_else(|| DeclError::UnknownNamespace(ns_name.to_string()))?;
        let (name, version) = split_route_key(key);
        ns.routes()
            .find(|r| r.name == name && r.version == version)
            .map(|r| (ns, r))
            .ok_or_else(|| DeclError::UnknownRoute(path.to_string()))
    }

    // -------------------------------------------------------------------------
    // Dependencies
    // -------------------------------------------------------------------------

    /// Types reachable from `reference` through fields, payloads, parents and
    /// alias targets, breadth first, up to `depth` hops.
    ///
    /// The starting type is not included. Unresolvable references are
    /// reported as errors rather than skipped.
    pub fn dependencies(
        &self,
        from_ns: &str,
        reference: &TypeRef,
        depth: usize,
    ) -> Result<Vec<TypeRef>, DeclError> {
        let depth = depth.min(MAX_DEPENDENCY_DEPTH);
        let start = reference.absolute(from_ns);
        self.resolve("", &start)?;

        let mut visited = BTreeSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::new();
        visited.insert(start.clone());
        queue.push_back((start, 0usize));

        while let Some((current, current_depth)) = queue.pop_front() {
            if current_depth >= depth {
                continue;
            }
            let scoped = self.resolve("", &current)?;

            let mut edges: Vec<TypeRef> = Vec::new();
            if let Some(parent) = scoped.item.extends() {
                edges.push(parent.absolute(scoped.namespace));
            }
            for data_type in scoped.item.data_types() {
                edges.extend(
                    data_type
                        .references()
                        .into_iter()
                        .map(|r| r.absolute(scoped.namespace)),
                );
            }

            for next in edges {
                if visited.insert(next.clone()) {
                    self.resolve("", &next)?;
                    order.push(next.clone());
                    queue.push_back((next, current_depth.saturating_add(1)));
                }
            }
        }

        Ok(order)
    }
}

// =============================================================================
// SERIALIZATION SUPPORT
// =============================================================================

/// Serializable representation of the registry for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableRegistry {
    pub namespaces: Vec<Namespace>,
}

impl From<&Registry> for SerializableRegistry {
    fn from(registry: &Registry) -> Self {
        Self {
            namespaces: registry.namespaces.values().cloned().collect(),
        }
    }
}

impl TryFrom<SerializableRegistry> for Registry {
    type Error = DeclError;

    fn try_from(sr: SerializableRegistry) -> Result<Self, Self::Error> {
        let mut registry = Registry::new();
        for ns in sr.namespaces {
            registry.insert(ns)?;
        }
        Ok(registry)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AliasDef, IntKind};

    fn sample() -> Registry {
        let mut base = Namespace::new("async");
        let _ = base.declare(AliasDef::new("AsyncJobId", DataType::string_with(Some(1), None, None)));
        let _ = base.declare(
            UnionDef::open("PollResultBase").variant(Variant::void("in_progress")),
        );
        let _ = base.declare(
            StructDef::new("PollArg").field(Field::new("async_job_id", DataType::named("AsyncJobId"))),
        );

        let mut team = Namespace::new("team");
        let _ = team.declare(
            StructDef::new("TeamFolderIdArg").field(Field::new("team_folder_id", DataType::string())),
        );
        let _ = team.declare(
            StructDef::new("TeamFolderRenameArg")
                .extends("TeamFolderIdArg")
                .field(Field::new("name", DataType::string())),
        );
        let _ = team.declare(
            UnionDef::open("TeamFolderArchiveJobStatus")
                .extends("async.PollResultBase")
                .variant(Variant::with("complete", DataType::named("TeamFolderIdArg"))),
        );
        let _ = team.declare(StructDef::new("Loop").extends("Loop"));
        let _ = team.declare(
            StructDef::new("Counter").field(Field::new("n", DataType::int(IntKind::UInt64))),
        );

        let mut registry = Registry::new();
        let _ = registry.insert(base);
        let _ = registry.insert(team);
        registry
    }

    #[test]
    fn duplicate_namespace_is_rejected() {
        let mut registry = sample();
        assert_eq!(
            registry.insert(Namespace::new("team")),
            Err(DeclError::DuplicateNamespace("team".to_string()))
        );
    }

    #[test]
    fn inherited_fields_come_first() {
        let registry = sample();
        let fields = registry
            .struct_fields("team", &TypeRef::local("TeamFolderRenameArg"))
            .map(|fs| fs.iter().map(|f| f.item.name.clone()).collect::<Vec<_>>());
        assert_eq!(
            fields,
            Ok(vec!["team_folder_id".to_string(), "name".to_string()])
        );
    }

    #[test]
    fn union_shape_spans_namespaces() {
        let registry = sample();
        let shape = registry
            .union_shape("team", &TypeRef::local("TeamFolderArchiveJobStatus"))
            .expect("union resolves");
        assert_eq!(shape.tag_names(), vec!["in_progress", "complete", "other"]);
        assert_eq!(shape.find("in_progress").map(|v| v.namespace), Some("async"));
        assert!(shape.accepts("other"));
        assert!(!shape.accepts("failed"));
    }

    #[test]
    fn scoped_variants_are_copy() {
        let registry = sample();
        let shape = registry
            .union_shape("team", &TypeRef::local("TeamFolderArchiveJobStatus"))
            .expect("union resolves");
        let found = shape.find("complete").expect("declared tag");
        let copy = found;
        assert_eq!(found.namespace, copy.namespace);
        assert_eq!(found.item.name, "complete");
    }

    #[test]
    fn self_extension_is_a_cycle() {
        let registry = sample();
        let result = registry.extends_chain("team", &TypeRef::local("Loop"));
        assert_eq!(
            result.map(|c| c.len()),
            Err(DeclError::ExtendsCycle(TypeRef::qualified("team", "Loop")))
        );
    }

    #[test]
    fn kind_mismatch_is_reported() {
        let registry = sample();
        let result = registry.resolve_union("team", &TypeRef::local("Counter"));
        assert!(matches!(
            result,
            Err(DeclError::KindMismatch {
                expected: "union",
                found: "struct",
                ..
            })
        ));
    }

    #[test]
    fn unalias_follows_alias_scope() {
        let registry = sample();
        let field_type = DataType::named("async.AsyncJobId");
        let resolved = registry.unalias("team", &field_type);
        assert_eq!(
            resolved,
            Ok(("async", &DataType::string_with(Some(1), None, None)))
        );
    }

    #[test]
    fn alias_cycle_is_reported() {
        let mut ns = Namespace::new("demo");
        let _ = ns.declare(AliasDef::new("A", DataType::named("B")));
        let _ = ns.declare(AliasDef::new("B", DataType::named("A")));
        let mut registry = Registry::new();
        let _ = registry.insert(ns);

        let field_type = DataType::named("A");
        assert_eq!(
            registry.unalias("demo", &field_type),
            Err(DeclError::AliasCycle(TypeRef::qualified("demo", "A")))
        );
    }

    #[test]
    fn subtype_check() {
        let registry = sample();
        assert!(registry.is_or_extends(
            "team",
            &TypeRef::local("TeamFolderArchiveJobStatus"),
            &TypeRef::qualified("async", "PollResultBase"),
        ));
        assert!(!registry.is_or_extends(
            "team",
            &TypeRef::local("TeamFolderIdArg"),
            &TypeRef::qualified("async", "PollResultBase"),
        ));
    }

    #[test]
    fn dependencies_are_breadth_first() {
        let registry = sample();
        let deps = registry.dependencies("team", &TypeRef::local("TeamFolderArchiveJobStatus"), 4);
        assert_eq!(
            deps,
            Ok(vec![
                TypeRef::qualified("async", "PollResultBase"),
                TypeRef::qualified("team", "TeamFolderIdArg"),
            ])
        );
    }

    #[test]
    fn dependencies_respect_depth() {
        let registry = sample();
        let deps = registry.dependencies("async", &TypeRef::local("PollArg"), 0);
        assert_eq!(deps, Ok(vec![]));
    }

    #[test]
    fn same_type_qualifies_local_references() {
        let a = DataType::list(DataType::named("TeamFolderIdArg"));
        let b = DataType::list(DataType::named("team.TeamFolderIdArg"));
        assert!(Registry::same_type(&a, "team", &b, "paper"));
        assert!(!Registry::same_type(&a, "paper", &b, "paper"));
    }

    #[test]
    fn serializable_roundtrip() {
        let registry = sample();
        let sr = SerializableRegistry::from(&registry);
        let restored = Registry::try_from(sr);
        assert_eq!(restored.as_ref().map(Registry::type_count), Ok(registry.type_count()));
    }
}
