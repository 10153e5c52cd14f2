//! # Declarations
//!
//! The declared namespaces, one file each. Every file exposes a `NAMESPACE`
//! name and a `namespace()` constructor; [`standard_registry`] assembles them.

pub mod async_job;
pub mod file_requests;
pub mod files;
pub mod paper;
pub mod sharing;
pub mod team_folders;

use crate::{DeclError, Registry};

/// Build the registry holding every declared namespace.
pub fn standard_registry() -> Result<Registry, DeclError> {
    let mut registry = Registry::new();
    registry.insert(async_job::namespace()?)?;
    registry.insert(files::namespace()?)?;
    registry.insert(sharing::namespace()?)?;
    registry.insert(team_folders::namespace()?)?;
    registry.insert(file_requests::namespace()?)?;
    registry.insert(paper::namespace()?)?;
    Ok(registry)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeRef;
    use crate::checks::run_checks;

    fn registry() -> Registry {
        standard_registry().expect("declarations build")
    }

    #[test]
    fn all_namespaces_present() {
        let r = registry();
        let names: Vec<&str> = r.namespaces().map(|ns| ns.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["async", "file_requests", "files", "paper", "sharing", "team"]
        );
    }

    #[test]
    fn declared_registry_checks_clean() {
        let report = run_checks(&registry());
        assert!(report.is_clean(), "{}", report.to_text());
        assert_eq!(report.warnings().count(), 0, "{}", report.to_text());
    }

    #[test]
    fn every_reference_resolves() {
        let r = registry();
        for (ns, def) in r.types() {
            for data_type in def.data_types() {
                for reference in data_type.references() {
                    assert!(
                        r.resolve(&ns.name, reference).is_ok(),
                        "{}.{} -> {}",
                        ns.name,
                        def.name(),
                        reference
                    );
                }
            }
        }
    }

    #[test]
    fn team_folder_routes_use_team_auth() {
        let r = registry();
        let ns = r.namespace(team_folders::NAMESPACE).expect("team namespace");
        assert!(ns.route_count() >= 10);
        assert!(ns.routes().all(|route| route.attrs.auth == crate::AuthMode::Team));
    }

    #[test]
    fn list_v1_is_deprecated_by_v2() {
        let r = registry();
        let (_, v1) = r.route("file_requests/list").expect("v1");
        let (_, v2) = r.route("file_requests/list:2").expect("v2");
        assert!(v1.is_deprecated());
        assert!(!v2.is_deprecated());
        assert_eq!(v2.endpoint_path("file_requests"), "/2/file_requests/list_v2");
    }

    #[test]
    fn update_error_hierarchy_reaches_base() {
        let r = registry();
        let base = TypeRef::qualified("paper", "PaperApiBaseError");
        assert!(r.is_or_extends("paper", &TypeRef::local("PaperDocUpdateError"), &base));
        let shape = r
            .union_shape("paper", &TypeRef::local("PaperDocUpdateError"))
            .expect("union");
        let tags = shape.tag_names();
        assert_eq!(tags.first(), Some(&"insufficient_permissions"));
        assert!(tags.contains(&"doc_not_found"));
        assert!(tags.contains(&"revision_mismatch"));
        assert_eq!(tags.last(), Some(&"other"));
    }

    #[test]
    fn archive_arg_inherits_team_folder_id() {
        let r = registry();
        let fields = r
            .struct_fields("team", &TypeRef::local("TeamFolderArchiveArg"))
            .expect("struct");
        let names: Vec<&str> = fields.iter().map(|f| f.item.name.as_str()).collect();
        assert_eq!(names, vec!["team_folder_id", "force_async_off"]);
    }
}
