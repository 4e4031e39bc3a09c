/// Main analyzer orchestrator
///
/// Coordinates movement classification and prompt composition.

use crate::frames::FrameHistory;
use crate::intelligence::{MovementClassifier, SensitivityResolver, TemporalAnalysis};
use crate::prefs::PreferenceStore;
use crate::prompt::PromptComposer;
use serde::Serialize;
use std::sync::Arc;

/// Main analyzer
pub struct SceneAnalyzer {
    classifier: MovementClassifier,
    composer: PromptComposer,
}

impl SceneAnalyzer {
    /// Create a new analyzer over an injected preference store
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        let classifier = MovementClassifier::new(SensitivityResolver::new(Arc::clone(&store)));
        let composer = PromptComposer::new(SensitivityResolver::new(store));

        Self {
            classifier,
            composer,
        }
    }

    /// Run a full analysis pass
    ///
    /// Classifies movement in the history and composes the instruction text
    /// that embeds the classification
    pub fn analyze(&self, history: &FrameHistory) -> SceneReport {
        let analysis = self.classifier.analyze(history);
        let prompt = self.composer.compose(Some(&analysis));

        SceneReport { analysis, prompt }
    }

    /// Compose an instruction without temporal context (one-off snapshot)
    pub fn snapshot_prompt(&self) -> String {
        self.composer.compose(None)
    }
}

/// Analysis report
#[derive(Debug, Clone, Serialize)]
pub struct SceneReport {
    pub analysis: TemporalAnalysis,
    pub prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::FrameSnapshot;
    use crate::intelligence::sensitivity::SENSITIVITY_KEY;
    use crate::intelligence::MovementLevel;
    use crate::prefs::MemoryStore;

    fn setup(sensitivity: &str) -> SceneAnalyzer {
        let mut store = MemoryStore::new();
        store.set(SENSITIVITY_KEY, sensitivity);
        SceneAnalyzer::new(Arc::new(store))
    }

    #[test]
    fn test_report_embeds_classification() {
        let analyzer = setup("medium");

        let mut history = FrameHistory::new();
        for payload in ["frame-a", "frame-a", "frame-a"] {
            history.push(FrameSnapshot::new(payload));
        }

        let report = analyzer.analyze(&history);

        assert_eq!(report.analysis.level, MovementLevel::Minimal);
        assert!(report.prompt.contains("Detected movement level: minimal."));
        assert!(report.prompt.contains(&report.analysis.context));
    }

    #[test]
    fn test_both_components_read_the_same_store() {
        let analyzer = setup("maximum");

        let mut history = FrameHistory::new();
        history.push(FrameSnapshot::new("a".repeat(100)));
        history.push(FrameSnapshot::new("b".repeat(1200)));

        let report = analyzer.analyze(&history);

        // Maximum sensitivity shrinks the threshold and turns on the
        // high-sensitivity clause at the same time
        assert_eq!(report.analysis.level, MovementLevel::High);
        assert!(report.prompt.contains("HIGH SENSITIVITY"));
        assert!(report.prompt.contains("fast or sudden changes"));
    }

    #[test]
    fn test_snapshot_prompt_has_no_temporal_block() {
        let analyzer = setup("medium");
        let prompt = analyzer.snapshot_prompt();

        assert!(!prompt.contains("TEMPORAL CONTEXT"));
        assert!(prompt.contains("BALANCED MODE"));
    }
}
