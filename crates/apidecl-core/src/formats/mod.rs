//! # Formats Module
//!
//! Serialization of a [`Registry`] for export and re-import.
//!
//! - `bundle`: canonical binary format (header + checksum + postcard payload)
//! - `json`: pretty JSON of the same serializable form
//!
//! File I/O stays in the app layer (apps/apidecl). This module only converts
//! between a registry and bytes or text.

mod bundle;
mod json;

pub use bundle::{
    BUNDLE_MAGIC, BUNDLE_VERSION, HEADER_LEN, checksum, decode_bundle, encode_bundle,
};
pub use json::{registry_from_json, registry_to_json};

use crate::DeclError;
use crate::Registry;
use crate::registry::SerializableRegistry;
use thiserror::Error;

/// Errors raised while encoding or decoding a registry.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("not a canonical bundle (bad magic)")]
    BadMagic,

    #[error("unsupported bundle version {found} (expected {expected})")]
    UnsupportedVersion { found: u16, expected: u16 },

    #[error("bundle truncated: expected {expected} bytes, found {found}")]
    Truncated { expected: u64, found: u64 },

    #[error("{0} trailing bytes after bundle payload")]
    TrailingBytes(u64),

    #[error("checksum mismatch: header says {expected:#018x}, payload hashes to {found:#018x}")]
    ChecksumMismatch { expected: u64, found: u64 },

    #[error("postcard: {0}")]
    Postcard(#[from] postcard::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown namespace '{0}'")]
    UnknownNamespace(String),

    #[error(transparent)]
    Declaration(#[from] DeclError),
}

/// The serializable form of `registry`, optionally restricted to one namespace.
///
/// A restricted export is not guaranteed to re-import on its own: references
/// into other namespaces stay unresolved until those are loaded too.
pub fn snapshot(registry: &Registry, namespace: Option<&str>) -> Result<SerializableRegistry, FormatError> {
    let mut sr = SerializableRegistry::from(registry);
    if let Some(name) = namespace {
        sr.namespaces.retain(|ns| ns.name == name);
        if sr.namespaces.is_empty() {
            return Err(FormatError::UnknownNamespace(name.to_string()));
        }
    }
    Ok(sr)
}
