//! Versioned envelope for the persisted cart.
//!
//! ```json
//! {"state":{"items":[{"productId":"1","quantity":2}]},"version":1}
//! ```
//!
//! Version 0 is the unversioned envelope written by the earlier browser build.
//! Its `state` has the same shape, so it is read as-is and rewritten as the
//! current version on the next save.

use serde::{Deserialize, Serialize};

use super::CartSnapshot;
use crate::error::StorageError;

/// Version written by [`encode`].
pub const CURRENT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    state: &'a CartSnapshot,
    version: u32,
}

#[derive(Deserialize)]
struct EnvelopeRaw {
    state: serde_json::Value,
    #[serde(default)]
    version: u32,
}

/// Serialize a snapshot into the current envelope.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode(snapshot: &CartSnapshot) -> Result<String, StorageError> {
    let envelope = EnvelopeRef {
        state: snapshot,
        version: CURRENT_VERSION,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Parse a persisted envelope.
///
/// The version is checked before the state is interpreted, so a newer format
/// is reported as [`StorageError::UnsupportedVersion`] rather than a parse
/// failure.
///
/// # Errors
///
/// Returns an error if the value is not valid JSON, carries an unsupported
/// version, or its state is not a cart snapshot.
pub fn decode(raw: &str) -> Result<CartSnapshot, StorageError> {
    let envelope: EnvelopeRaw = serde_json::from_str(raw)?;
    if envelope.version > CURRENT_VERSION {
        return Err(StorageError::UnsupportedVersion {
            found: envelope.version,
            supported: CURRENT_VERSION,
        });
    }
    Ok(serde_json::from_value(envelope.state)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use storefront_core::CartLineItem;

    use super::*;

    #[test]
    fn test_encode_writes_current_version() {
        let snapshot = CartSnapshot::new(vec![CartLineItem::new("1", 2)]);
        let raw = encode(&snapshot).unwrap();
        assert_eq!(
            raw,
            r#"{"state":{"items":[{"productId":"1","quantity":2}]},"version":1}"#
        );
    }

    #[test]
    fn test_decode_reads_legacy_browser_envelope() {
        let raw = r#"{"state":{"items":[{"productId":"1","quantity":3,"variant":{"Taille":"L"}}]},"version":0}"#;
        let snapshot = decode(raw).unwrap();
        assert_eq!(snapshot.items.len(), 1);
        let item = snapshot.items.first().unwrap();
        assert_eq!(item.quantity, 3);
        assert!(item.variant_selection.is_some());
    }

    #[test]
    fn test_decode_missing_version_is_legacy() {
        let snapshot = decode(r#"{"state":{"items":[]}}"#).unwrap();
        assert!(snapshot.items.is_empty());
    }

    #[test]
    fn test_decode_rejects_newer_version() {
        let err = decode(r#"{"state":{"lines":"anything"},"version":2}"#).unwrap_err();
        assert!(matches!(
            err,
            StorageError::UnsupportedVersion {
                found: 2,
                supported: 1
            }
        ));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode("not json"),
            Err(StorageError::Serialization(_))
        ));
        assert!(matches!(
            decode(r#"{"state":{"items":[{"quantity":1}]},"version":1}"#),
            Err(StorageError::Serialization(_))
        ));
    }
}
