//! Bounded portrait and background gallery.
//!
//! Newest-first insertion with deduplication and a hard cap: generated
//! images are large base64 blobs, so only the most recent handful are
//! kept and the oldest are evicted on insert.

use babai_types::PlayerState;
use tracing::debug;

/// Insert an image at the front of the gallery, evicting past the cap.
///
/// Duplicates are ignored. Returns whether the gallery changed.
pub fn add(state: &mut PlayerState, url: impl Into<String>, cap: usize) -> bool {
    let url = url.into();
    if url.is_empty() || state.gallery.contains(&url) {
        return false;
    }
    state.gallery.insert(0, url);
    state.gallery.truncate(cap);
    true
}

/// Truncate an oversized gallery down to the cap.
///
/// Used by save-file migration: older saves carried more entries than
/// the current cap allows. Returns the number of entries evicted.
pub fn enforce_cap(state: &mut PlayerState, cap: usize) -> usize {
    let before = state.gallery.len();
    state.gallery.truncate(cap);
    let evicted = before.saturating_sub(state.gallery.len());
    if evicted > 0 {
        debug!(evicted, cap, "gallery truncated to cap");
    }
    evicted
}
