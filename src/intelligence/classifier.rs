// Movement classification over the rolling frame history
//
// Compares consecutive frames, averages the differences, scales the verdict
// by the user's sensitivity threshold. Stateless: every call stands alone,
// and no input can make it panic or return an error - bad data degrades to
// an explicit unknown verdict instead.

use crate::frames::FrameHistory;
use crate::intelligence::differ::frame_difference;
use crate::intelligence::sensitivity::SensitivityResolver;
use serde::Serialize;
use std::fmt;

// Ratio bands against the movement threshold
const MINIMAL_BAND: f64 = 0.3;
const LOW_BAND: f64 = 0.7;
const MODERATE_BAND: f64 = 1.0;

// Above the moderate band, the whole-window difference decides between
// moderate and high
const MULTI_FRAME_CEILING: f64 = 2000.0;

// Comparisons needed for full confidence
const FULL_CONFIDENCE_COMPARISONS: f64 = 3.0;

/// Discrete movement verdict for the monitored scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementLevel {
    None,
    Minimal,
    Low,
    Moderate,
    High,
    Unknown,
}

impl fmt::Display for MovementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovementLevel::None => write!(f, "none"),
            MovementLevel::Minimal => write!(f, "minimal"),
            MovementLevel::Low => write!(f, "low"),
            MovementLevel::Moderate => write!(f, "moderate"),
            MovementLevel::High => write!(f, "high"),
            MovementLevel::Unknown => write!(f, "unknown"),
        }
    }
}

/// Result of one temporal analysis pass
#[derive(Debug, Clone, Serialize)]
pub struct TemporalAnalysis {
    pub level: MovementLevel,
    pub context: String,
    pub average_difference: Option<f64>,
    pub total_frames: Option<usize>,
    pub confidence: f64,
    pub degraded: bool,
}

impl TemporalAnalysis {
    fn simple(level: MovementLevel, context: &str, confidence: f64) -> Self {
        Self {
            level,
            context: context.to_string(),
            average_difference: None,
            total_frames: None,
            confidence,
            degraded: false,
        }
    }

    /// The fail-safe verdict substituted when analysis itself breaks
    pub fn degraded() -> Self {
        Self {
            level: MovementLevel::Unknown,
            context: "Error occurred during temporal analysis.".to_string(),
            average_difference: None,
            total_frames: None,
            confidence: 0.1,
            degraded: true,
        }
    }
}

/// Classifies movement from the frame history
#[derive(Clone)]
pub struct MovementClassifier {
    resolver: SensitivityResolver,
}

impl MovementClassifier {
    /// Create a classifier over a sensitivity resolver
    pub fn new(resolver: SensitivityResolver) -> Self {
        Self { resolver }
    }

    /// Analyze the frame history for movement.
    ///
    /// Never panics and never errors: anything that goes wrong inside the
    /// pipeline is converted into the degraded unknown verdict.
    pub fn analyze(&self, history: &FrameHistory) -> TemporalAnalysis {
        match self.try_analyze(history) {
            Ok(analysis) => analysis,
            Err(reason) => {
                tracing::warn!(%reason, "temporal analysis failed, degrading to unknown");
                TemporalAnalysis::degraded()
            }
        }
    }

    fn try_analyze(&self, history: &FrameHistory) -> Result<TemporalAnalysis, String> {
        if history.len() < 2 {
            return Ok(TemporalAnalysis::simple(
                MovementLevel::None,
                "Single frame analysis - no temporal comparison available.",
                0.5,
            ));
        }

        // Pairwise pass over consecutive frames. A pair with an absent
        // payload on either side is skipped entirely: it contributes 0 and
        // does not count as a comparison.
        let mut total_difference: u64 = 0;
        let mut comparisons: u32 = 0;

        let frames: Vec<_> = history.iter().collect();
        for pair in frames.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if prev.is_empty() || next.is_empty() {
                continue;
            }

            total_difference += frame_difference(&prev.payload, &next.payload);
            comparisons += 1;
        }

        if comparisons == 0 {
            return Ok(TemporalAnalysis::simple(
                MovementLevel::None,
                "Unable to compare frames for temporal analysis.",
                0.3,
            ));
        }

        let average_difference = total_difference as f64 / comparisons as f64;
        let threshold = self.resolver.movement_threshold() as f64;
        let ratio = average_difference / threshold;

        if !ratio.is_finite() {
            return Err(format!(
                "non-finite movement ratio (average {average_difference}, threshold {threshold})"
            ));
        }

        let (level, context) = classify_ratio(ratio, average_difference, threshold, history.len());
        let confidence = (f64::from(comparisons) / FULL_CONFIDENCE_COMPARISONS).min(1.0);

        Ok(TemporalAnalysis {
            level,
            context,
            average_difference: Some(average_difference),
            total_frames: Some(history.len()),
            confidence,
            degraded: false,
        })
    }
}

// Band the threshold ratio into a verdict. At or above the moderate band,
// the difference summed across the whole window breaks the tie between
// "still moderate" and "high".
fn classify_ratio(
    ratio: f64,
    average_difference: f64,
    threshold: f64,
    frame_count: usize,
) -> (MovementLevel, String) {
    if ratio < MINIMAL_BAND {
        return (
            MovementLevel::Minimal,
            "Minimal movement detected - very stable scene.".to_string(),
        );
    }

    if ratio < LOW_BAND {
        return (
            MovementLevel::Low,
            "Low movement detected - some movement, generally stable scene.".to_string(),
        );
    }

    if ratio < MODERATE_BAND {
        return (
            MovementLevel::Moderate,
            "Scene shows moderate movement between frames.".to_string(),
        );
    }

    let multi_frame_diff = average_difference * frame_count as f64;
    if multi_frame_diff > threshold * 2.0 || multi_frame_diff > MULTI_FRAME_CEILING {
        (
            MovementLevel::High,
            "High movement detected - significant changes across multiple frames.".to_string(),
        )
    } else {
        (
            MovementLevel::Moderate,
            "Scene shows notable movement, not sustained across the window.".to_string(),
        )
    }
}
