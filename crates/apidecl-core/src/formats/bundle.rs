//! Canonical binary bundle.
//!
//! ```text
//! offset  size  field
//! 0       8     magic "APIDECL\0"
//! 8       2     format version (u16 LE)
//! 10      8     payload length (u64 LE)
//! 18      8     payload checksum (u64 LE)
//! 26      n     postcard(SerializableRegistry)
//! ```
//!
//! Namespaces, types and routes are stored in `BTreeMap`s, so encoding the
//! same registry always yields the same bytes.

use super::FormatError;
use crate::Registry;
use crate::registry::SerializableRegistry;

pub const BUNDLE_MAGIC: [u8; 8] = *b"APIDECL\0";
pub const BUNDLE_VERSION: u16 = 1;
pub const HEADER_LEN: usize = 26;

// =============================================================================
// CHECKSUM
// =============================================================================

#[cfg(not(feature = "crypto-hash"))]
const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
#[cfg(not(feature = "crypto-hash"))]
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a 64 of the payload.
#[cfg(not(feature = "crypto-hash"))]
#[must_use]
pub fn checksum(payload: &[u8]) -> u64 {
    payload.iter().fold(FNV_OFFSET, |hash, &byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// First 8 bytes of the BLAKE3 hash of the payload, little endian.
#[cfg(feature = "crypto-hash")]
#[must_use]
pub fn checksum(payload: &[u8]) -> u64 {
    let hash = blake3::hash(payload);
    let mut head = [0u8; 8];
    head.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(head)
}

// =============================================================================
// ENCODE / DECODE
// =============================================================================

/// Encode `sr` as a canonical bundle.
pub fn encode_bundle(sr: &SerializableRegistry) -> Result<Vec<u8>, FormatError> {
    let payload = postcard::to_allocvec(sr)?;
    let mut out = Vec::with_capacity(HEADER_LEN.saturating_add(payload.len()));
    out.extend_from_slice(&BUNDLE_MAGIC);
    out.extend_from_slice(&BUNDLE_VERSION.to_le_bytes());
    out.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    out.extend_from_slice(&checksum(&payload).to_le_bytes());
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Verify and decode a canonical bundle into a registry.
///
/// The header, length and checksum are checked before the payload is
/// decoded, and the decoded namespaces go through [`Registry::insert`].
pub fn decode_bundle(bytes: &[u8]) -> Result<Registry, FormatError> {
    let header = bytes.get(..HEADER_LEN).ok_or(FormatError::Truncated {
        expected: HEADER_LEN as u64,
        found: bytes.len() as u64,
    })?;
    if header.get(..8) != Some(&BUNDLE_MAGIC[..]) {
        return Err(FormatError::BadMagic);
    }

    let version = u16::from_le_bytes(le_array(header, 8));
    if version != BUNDLE_VERSION {
        return Err(FormatError::UnsupportedVersion {
            found: version,
            expected: BUNDLE_VERSION,
        });
    }

    let declared_len = u64::from_le_bytes(le_array(header, 10));
    let declared_sum = u64::from_le_bytes(le_array(header, 18));

    let body = bytes.get(HEADER_LEN..).unwrap_or_default();
    let body_len = body.len() as u64;
    if body_len < declared_len {
        return Err(FormatError::Truncated {
            expected: declared_len,
            found: body_len,
        });
    }
    if body_len > declared_len {
        return Err(FormatError::TrailingBytes(body_len.saturating_sub(declared_len)));
    }

    let actual_sum = checksum(body);
    if actual_sum != declared_sum {
        return Err(FormatError::ChecksumMismatch {
            expected: declared_sum,
            found: actual_sum,
        });
    }

    let sr: SerializableRegistry = postcard::from_bytes(body)?;
    Ok(Registry::try_from(sr)?)
}

/// `N` bytes of `header` starting at `at`. Callers stay inside the header.
fn le_array<const N: usize>(header: &[u8], at: usize) -> [u8; N] {
    let mut out = [0u8; N];
    if let Some(slice) = header.get(at..at.saturating_add(N)) {
        out.copy_from_slice(slice);
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================
