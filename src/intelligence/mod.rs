/// Intelligence module
///
/// Handles movement classification and sensitivity resolution over the
/// rolling frame history.

pub mod analyzer;
pub mod classifier;
pub mod differ;
pub mod sensitivity;

pub use analyzer::{SceneAnalyzer, SceneReport};
pub use classifier::{MovementClassifier, MovementLevel, TemporalAnalysis};
pub use differ::frame_difference;
pub use sensitivity::{ResolvedSensitivity, Sensitivity, SensitivityResolver, SENSITIVITY_KEY};
