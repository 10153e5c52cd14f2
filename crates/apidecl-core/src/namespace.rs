//! # Namespace Module
//!
//! A namespace groups type declarations and routes under one name
//! (`team`, `file_requests`, `paper`, ...).

use crate::DeclError;
use crate::route::Route;
use crate::types::TypeDef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named group of declarations.
///
/// Types are keyed by name, routes by `name[:version]`. Both maps are
/// `BTreeMap` so iteration order is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
    pub doc: String,
    types: BTreeMap<String, TypeDef>,
    routes: BTreeMap<String, Route>,
}

impl Namespace {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Declare a type. Fails if the name is already taken.
    pub fn declare(&mut self, def: impl Into<TypeDef>) -> Result<(), DeclError> {
        let def = def.into();
        let name = def.name().to_string();
        if self.types.contains_key(&name) {
            return Err(DeclError::DuplicateType {
                namespace: self.name.clone(),
                name,
            });
        }
        self.types.insert(name, def);
        Ok(())
    }

    /// Declare a route. Fails if `name[:version]` is already taken.
    pub fn route(&mut self, route: Route) -> Result<(), DeclError> {
        let key = route.id();
        if self.routes.contains_key(&key) {
            return Err(DeclError::DuplicateRoute {
                namespace: self.name.clone(),
                route: key,
            });
        }
        self.routes.insert(key, route);
        Ok(())
    }

    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    /// Route by namespace-local key (`name` or `name:version`).
    #[must_use]
    pub fn get_route(&self, key: &str) -> Option<&Route> {
        self.routes.get(key)
    }

    /// Every version of the route called `name`, lowest version first.
    pub fn route_versions<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Route> + 'a {
        self.routes.values().filter(move |r| r.name == name)
    }

    /// All types in name order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    /// All routes in key order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, StructDef, UnionDef};

    #[test]
    fn duplicate_type_is_rejected() {
        let mut ns = Namespace::new("paper");
        assert!(ns.declare(StructDef::new("Folder")).is_ok());
        let err = ns.declare(UnionDef::open("Folder"));
        assert_eq!(
            err,
            Err(DeclError::DuplicateType {
                namespace: "paper".to_string(),
                name: "Folder".to_string(),
            })
        );
        assert_eq!(ns.type_count(), 1);
    }

    #[test]
    fn routes_are_keyed_by_version() {
        let mut ns = Namespace::new("file_requests");
        let v1 = Route::new("list", DataType::Void, DataType::Void, DataType::Void);
        let v2 = v1.clone().version(2);
        assert!(ns.route(v1.clone()).is_ok());
        assert!(ns.route(v2).is_ok());
        assert!(ns.route(v1).is_err());

        assert_eq!(ns.route_count(), 2);
        assert!(ns.get_route("list:2").is_some());
        let versions: Vec<u32> = ns.route_versions("list").map(|r| r.version).collect();
        assert_eq!(versions, vec![1, 2]);
    }

    #[test]
    fn types_iterate_in_name_order() {
        let mut ns = Namespace::new("team");
        for name in ["TeamFolderStatus", "BaseTeamFolderError", "TeamFolderIdArg"] {
            assert!(ns.declare(StructDef::new(name)).is_ok());
        }
        let names: Vec<&str> = ns.types().map(TypeDef::name).collect();
        assert_eq!(
            names,
            vec!["BaseTeamFolderError", "TeamFolderIdArg", "TeamFolderStatus"]
        );
    }
}
