//! Persisted scope regions.
//!
//! A marked scope is stored on the buffer as exactly two zero-width markers (start and end) so
//! the host keeps it anchored while the text changes. Anything else under the key is treated as
//! "no scope" and purged.

use crate::host::BufferHost;
use crate::region::Region;
use log::debug;

/// Read the marked scope region stored under `key`.
///
/// Dangling markers (fewer than two) are erased and `None` is returned.
pub fn read_marked_scope<B: BufferHost + ?Sized>(buffer: &mut B, key: &str) -> Option<Region> {
    let markers = buffer.markers(key);
    if markers.len() < 2 {
        if !markers.is_empty() {
            debug!("purging {} dangling scope marker(s)", markers.len());
            buffer.erase_markers(key);
        }
        return None;
    }

    let begin = markers.iter().map(|m| m.begin()).min()?;
    let end = markers.iter().map(|m| m.begin()).max()?;
    Some(Region::new(begin, end))
}

/// Persist `region` as a start marker and an end marker under `key`.
pub fn write_marked_scope<B: BufferHost + ?Sized>(buffer: &mut B, key: &str, region: Region) {
    buffer.add_markers(
        key,
        vec![Region::caret(region.begin()), Region::caret(region.end())],
    );
}

/// Remove the marked scope stored under `key`.
pub fn clear_marked_scope<B: BufferHost + ?Sized>(buffer: &mut B, key: &str) {
    buffer.erase_markers(key);
}
