//! JSON export/import of the serializable registry.

use super::FormatError;
use crate::Registry;
use crate::registry::SerializableRegistry;

/// Pretty JSON of `sr`, with a trailing newline.
pub fn registry_to_json(sr: &SerializableRegistry) -> Result<String, FormatError> {
    let mut text = serde_json::to_string_pretty(sr)?;
    text.push('\n');
    Ok(text)
}

pub fn registry_from_json(text: &str) -> Result<Registry, FormatError> {
    let sr: SerializableRegistry = serde_json::from_str(text)?;
    Ok(Registry::try_from(sr)?)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decls::standard_registry;
    use crate::formats::snapshot;
    use crate::{DeclError, Namespace};

    #[test]
    fn json_roundtrip() {
        let registry = standard_registry().expect("declarations build");
        let text = registry_to_json(&SerializableRegistry::from(&registry)).expect("encodes");
        assert!(text.ends_with('\n'));
        let restored = registry_from_json(&text).expect("decodes");
        assert_eq!(restored.route_count(), registry.route_count());
        assert_eq!(restored.type_count(), registry.type_count());
    }

    #[test]
    fn single_namespace_export() {
        let registry = standard_registry().expect("declarations build");
        let sr = snapshot(&registry, Some("paper")).expect("paper is declared");
        assert_eq!(sr.namespaces.len(), 1);
        let text = registry_to_json(&sr).expect("encodes");
        assert!(text.contains("\"PaperDocUpdateArgs\""));
        assert!(!text.contains("\"TeamFolderMetadata\""));

        assert!(matches!(
            snapshot(&registry, Some("nope")),
            Err(FormatError::UnknownNamespace(_))
        ));
    }

    #[test]
    fn duplicate_namespaces_are_rejected() {
        let sr = SerializableRegistry {
            namespaces: vec![Namespace::new("paper"), Namespace::new("paper")],
        };
        let text = registry_to_json(&sr).expect("encodes");
        assert!(matches!(
            registry_from_json(&text),
            Err(FormatError::Declaration(DeclError::DuplicateNamespace(_)))
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(registry_from_json("{"), Err(FormatError::Json(_))));
    }
}
