//! Merge-on-write for `wpacceptance.json`.

use serde_json::{Map, Value};

use super::emptiness::is_empty_value;

/// Overlay in-memory values onto the on-disk map.
///
/// The on-disk key set is authoritative: a key is replaced only when memory
/// holds a non-empty value for it, and keys that exist only in memory are
/// dropped. On-disk key order is preserved.
pub fn merge_onto_disk(
    mut disk: Map<String, Value>,
    memory: &Map<String, Value>,
) -> Map<String, Value> {
    for (key, value) in &mut disk {
        if let Some(overlay) = memory.get(key).filter(|overlay| !is_empty_value(overlay)) {
            *value = overlay.clone();
        }
    }
    disk
}
