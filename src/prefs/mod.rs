/// Preference store module
///
/// Read-only access to user preferences, injected into the analysis
/// components so they never touch ambient global state.

pub mod file;
pub mod store;

pub use file::JsonFileStore;
pub use store::{MemoryStore, PreferenceStore};
