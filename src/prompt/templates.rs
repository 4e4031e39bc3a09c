//! Instruction-text constants for the scene-understanding service.
//!
//! The JSON structure below is the contract with the reply parser on the
//! other side of the AI call. Do not reword the field names or the allowed
//! values without updating that parser.

/// Base instruction block: describe the scene, list subjects, assess safety.
///
/// The reply must be JSON only, subjects are restricted to the closed set of
/// types the monitor cares about, and the safety level is one of exactly
/// three values.
pub const SCENE_ANALYSIS_PROMPT: &str = r#"You are analyzing a still frame from a home monitoring camera.

Respond with ONLY valid JSON in exactly this structure. No prose, no markdown, no explanation.
{
  "scene": "<one or two sentences describing what the camera sees>",
  "subjects": [
    {
      "type": "<Baby | Pet | Dog | Cat | Person>",
      "state": "<what the subject is doing, e.g. sleeping, sitting up, walking>",
      "confidence": <float 0.0-1.0>
    }
  ],
  "safety": {
    "level": "<Safe | Warning | Danger>",
    "reason": "<one sentence explaining the assessment>"
  }
}

Rules:
1. "subjects" lists every monitored subject visible in the frame; use an empty list if none are visible.
2. "type" MUST be one of: Baby, Pet, Dog, Cat, Person. Never invent other types.
3. "safety.level" MUST be exactly Safe, Warning or Danger.
4. Base the safety assessment only on what is visible in this frame."#;

/// Appended when the sensitivity multiplier is above the balanced band
pub const HIGH_SENSITIVITY_CLAUSE: &str =
    "HIGH SENSITIVITY MODE: Report even subtle changes, small movements or minor posture shifts.";

/// Appended when the sensitivity multiplier is below the balanced band
pub const LOW_SENSITIVITY_CLAUSE: &str =
    "LOW SENSITIVITY MODE: Only report significant or clearly notable findings; ignore minor variations.";

/// Appended inside the balanced band
pub const BALANCED_CLAUSE: &str =
    "BALANCED MODE: Use standard detection thresholds when deciding what to report.";

/// Appended after the temporal block when movement is classified high
pub const HIGH_MOVEMENT_CLAUSE: &str =
    "Pay extra attention to fast or sudden changes between frames.";
