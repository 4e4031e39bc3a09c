/// Frame history module
///
/// The rolling buffer of captured frames that the capture side appends to
/// and the analysis side reads. Payloads are opaque encoded strings; nothing
/// in here knows or cares about the image format.

pub mod history;
pub mod snapshot;

pub use history::{FrameHistory, HISTORY_CAPACITY};
pub use snapshot::FrameSnapshot;
