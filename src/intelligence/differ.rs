// Cheap frame comparison.
//
// This is a proxy for visual change, not a motion detector: it never decodes
// the image, it just compares the encoded payloads. Two re-encodes of a
// static scene produce near-identical strings; real scene changes shift the
// payload length and scramble the leading bytes. Good enough to run on every
// capture tick, and wrong in ways the downstream prompt can absorb.

// How many leading characters to probe for a mismatch
const PREFIX_PROBE_LEN: usize = 1000;

// Flat penalty added when the probed prefixes differ
const PREFIX_MISMATCH_PENALTY: u64 = 500;

/// Difference score between two frame payloads.
///
/// Returns 0 when either payload is absent (empty) or when both are
/// identical. Otherwise: absolute length difference, plus a flat penalty if
/// the first 1000 characters differ. Total and panic-free for any input.
pub fn frame_difference(a: &str, b: &str) -> u64 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    if a == b {
        return 0;
    }

    let length_delta = (a.len() as i64 - b.len() as i64).unsigned_abs();

    let prefix_penalty = if prefixes_differ(a, b) {
        PREFIX_MISMATCH_PENALTY
    } else {
        0
    };

    length_delta + prefix_penalty
}

// Character-wise comparison of the leading slice, no indexing so there is
// nothing to panic on.
fn prefixes_differ(a: &str, b: &str) -> bool {
    a.chars().take(PREFIX_PROBE_LEN).ne(b.chars().take(PREFIX_PROBE_LEN))
}
