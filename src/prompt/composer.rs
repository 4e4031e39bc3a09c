/// Prompt composition
///
/// Assembles the final instruction text: base block, then a sensitivity
/// clause picked from the current multiplier, then the temporal-context
/// block when a movement analysis is available. Deterministic given the
/// analysis and the stored preference.

use crate::intelligence::{MovementLevel, SensitivityResolver, TemporalAnalysis};
use crate::prompt::templates::{
    BALANCED_CLAUSE, HIGH_MOVEMENT_CLAUSE, HIGH_SENSITIVITY_CLAUSE, LOW_SENSITIVITY_CLAUSE,
    SCENE_ANALYSIS_PROMPT,
};

// Multipliers outside this inclusive band get the high/low sensitivity clause
const BALANCED_BAND_LOW: f64 = 0.8;
const BALANCED_BAND_HIGH: f64 = 1.2;

/// Composes the instruction text for the scene-understanding service
#[derive(Clone)]
pub struct PromptComposer {
    resolver: SensitivityResolver,
}

impl PromptComposer {
    /// Create a composer over a sensitivity resolver
    pub fn new(resolver: SensitivityResolver) -> Self {
        Self { resolver }
    }

    /// Build the full instruction text.
    ///
    /// # Arguments
    /// * `temporal` - The latest movement analysis, or `None` when the frame
    ///   is being analyzed without history (e.g. a one-off snapshot)
    pub fn compose(&self, temporal: Option<&TemporalAnalysis>) -> String {
        let mut prompt = String::from(SCENE_ANALYSIS_PROMPT);

        prompt.push_str("\n\n");
        prompt.push_str(self.sensitivity_clause());

        if let Some(analysis) = temporal {
            prompt.push_str("\n\nTEMPORAL CONTEXT: ");
            prompt.push_str(&analysis.context);
            prompt.push_str(&format!("\nDetected movement level: {}.", analysis.level));

            if analysis.level == MovementLevel::High {
                prompt.push('\n');
                prompt.push_str(HIGH_MOVEMENT_CLAUSE);
            }
        }

        prompt
    }

    fn sensitivity_clause(&self) -> &'static str {
        let multiplier = self.resolver.multiplier();

        if multiplier > BALANCED_BAND_HIGH {
            HIGH_SENSITIVITY_CLAUSE
        } else if multiplier < BALANCED_BAND_LOW {
            LOW_SENSITIVITY_CLAUSE
        } else {
            BALANCED_CLAUSE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelligence::sensitivity::SENSITIVITY_KEY;
    use crate::prefs::MemoryStore;
    use std::sync::Arc;

    fn composer_with(sensitivity: Option<&str>) -> PromptComposer {
        let mut store = MemoryStore::new();
        if let Some(level) = sensitivity {
            store.set(SENSITIVITY_KEY, level);
        }
        PromptComposer::new(SensitivityResolver::new(Arc::new(store)))
    }

    fn analysis(level: MovementLevel, context: &str) -> TemporalAnalysis {
        TemporalAnalysis {
            level,
            context: context.to_string(),
            average_difference: Some(120.0),
            total_frames: Some(3),
            confidence: 0.667,
            degraded: false,
        }
    }

    #[test]
    fn test_base_block_always_present() {
        let prompt = composer_with(None).compose(None);

        assert!(prompt.contains("ONLY valid JSON"));
        assert!(prompt.contains("Baby | Pet | Dog | Cat | Person"));
        assert!(prompt.contains("Safe | Warning | Danger"));
    }

    #[test]
    fn test_high_sensitivity_clause() {
        // high (1.3) and maximum (1.6) sit above the balanced band
        for level in ["high", "maximum"] {
            let prompt = composer_with(Some(level)).compose(None);
            assert!(prompt.contains("HIGH SENSITIVITY"), "level: {level}");
            assert!(!prompt.contains("BALANCED MODE"), "level: {level}");
        }
    }

    #[test]
    fn test_low_sensitivity_clause() {
        let prompt = composer_with(Some("low")).compose(None);

        assert!(prompt.contains("LOW SENSITIVITY"));
        assert!(!prompt.contains("HIGH SENSITIVITY"));
    }

    #[test]
    fn test_balanced_clause_for_medium_and_default() {
        for store_value in [Some("medium"), None, Some("garbage")] {
            let prompt = composer_with(store_value).compose(None);
            assert!(prompt.contains("BALANCED MODE"), "store: {store_value:?}");
            assert!(!prompt.contains("HIGH SENSITIVITY"));
            assert!(!prompt.contains("LOW SENSITIVITY"));
        }
    }

    #[test]
    fn test_temporal_block_embeds_context_and_level() {
        let temporal = analysis(MovementLevel::Minimal, "Very quiet nursery.");
        let prompt = composer_with(None).compose(Some(&temporal));

        assert!(prompt.contains("TEMPORAL CONTEXT: Very quiet nursery."));
        assert!(prompt.contains("Detected movement level: minimal."));
        assert!(!prompt.contains(HIGH_MOVEMENT_CLAUSE));
    }

    #[test]
    fn test_high_movement_adds_fast_change_instruction() {
        let temporal = analysis(MovementLevel::High, "Lots of change.");
        let prompt = composer_with(None).compose(Some(&temporal));

        assert!(prompt.contains("Detected movement level: high."));
        assert!(prompt.contains("fast or sudden changes"));
    }

    #[test]
    fn test_unknown_level_still_embedded() {
        let temporal = TemporalAnalysis::degraded();
        let prompt = composer_with(None).compose(Some(&temporal));

        assert!(prompt.contains("Detected movement level: unknown."));
    }

    #[test]
    fn test_no_temporal_block_without_analysis() {
        let prompt = composer_with(None).compose(None);
        assert!(!prompt.contains("TEMPORAL CONTEXT"));
    }

    #[test]
    fn test_composition_is_deterministic() {
        let composer = composer_with(Some("high"));
        let temporal = analysis(MovementLevel::Moderate, "Some shuffling.");

        assert_eq!(
            composer.compose(Some(&temporal)),
            composer.compose(Some(&temporal))
        );
    }
}
