// One captured frame.
//
// The payload is whatever the capture side produced (in practice a base64
// data string). We never decode it - comparisons work on the raw text.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single captured frame payload
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub payload: String,
    pub captured_at: DateTime<Utc>,
}

impl FrameSnapshot {
    /// Create a snapshot stamped with the current time
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            captured_at: Utc::now(),
        }
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// True when the capture side handed us nothing usable
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
