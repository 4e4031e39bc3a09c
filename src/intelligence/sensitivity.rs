/// Sensitivity preference resolution
///
/// Maps the user's stored sensitivity level to a numeric multiplier and a
/// movement threshold. Every path through here falls back to the medium
/// default rather than failing - a broken settings store must never stop
/// the monitoring loop.

use crate::prefs::PreferenceStore;
use std::fmt;
use std::sync::Arc;

/// Preference store key holding the user's sensitivity level
pub const SENSITIVITY_KEY: &str = "monitor_sensitivity";

// Unscaled movement threshold at medium sensitivity
const BASE_THRESHOLD: f64 = 1000.0;

/// User-selectable sensitivity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sensitivity {
    Low,
    Medium,
    High,
    Maximum,
}

impl Sensitivity {
    /// Parse a stored preference value.
    ///
    /// # Returns
    /// * `Some(Sensitivity)` - For the four recognized levels (case-insensitive)
    /// * `None` - For anything else
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "low" => Some(Sensitivity::Low),
            "medium" => Some(Sensitivity::Medium),
            "high" => Some(Sensitivity::High),
            "maximum" => Some(Sensitivity::Maximum),
            _ => None,
        }
    }

    /// Threshold scale factor for this level.
    ///
    /// Higher sensitivity means a larger multiplier, which shrinks the
    /// movement threshold: round(1000 / multiplier).
    pub fn multiplier(&self) -> f64 {
        match self {
            Sensitivity::Low => 0.7,
            Sensitivity::Medium => 1.0,
            Sensitivity::High => 1.3,
            Sensitivity::Maximum => 1.6,
        }
    }
}

impl Default for Sensitivity {
    fn default() -> Self {
        Sensitivity::Medium
    }
}

impl fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sensitivity::Low => write!(f, "low"),
            Sensitivity::Medium => write!(f, "medium"),
            Sensitivity::High => write!(f, "high"),
            Sensitivity::Maximum => write!(f, "maximum"),
        }
    }
}

/// Outcome of a preference read.
///
/// `degraded` distinguishes "the user never chose a level, medium is the
/// right answer" (false) from "something was stored but we could not use
/// it" (true).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSensitivity {
    pub sensitivity: Sensitivity,
    pub multiplier: f64,
    pub degraded: bool,
}

impl ResolvedSensitivity {
    fn clean(sensitivity: Sensitivity) -> Self {
        Self {
            sensitivity,
            multiplier: sensitivity.multiplier(),
            degraded: false,
        }
    }

    fn fallback() -> Self {
        Self {
            degraded: true,
            ..Self::clean(Sensitivity::default())
        }
    }
}

/// Resolves the sensitivity preference into multiplier and threshold
#[derive(Clone)]
pub struct SensitivityResolver {
    store: Arc<dyn PreferenceStore>,
}

impl SensitivityResolver {
    /// Create a resolver over an injected preference store
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Read and resolve the current sensitivity preference.
    ///
    /// Never panics: a missing key resolves to the medium default, a
    /// malformed value resolves to the medium default with `degraded` set.
    pub fn resolve(&self) -> ResolvedSensitivity {
        match self.store.get(SENSITIVITY_KEY) {
            None => ResolvedSensitivity::clean(Sensitivity::default()),
            Some(raw) => match Sensitivity::parse(&raw) {
                Some(level) => ResolvedSensitivity::clean(level),
                None => {
                    tracing::warn!(
                        value = %raw,
                        "unrecognized sensitivity preference, falling back to medium"
                    );
                    ResolvedSensitivity::fallback()
                }
            },
        }
    }

    /// Current sensitivity multiplier
    pub fn multiplier(&self) -> f64 {
        self.resolve().multiplier
    }

    /// Movement threshold scaled by the current multiplier.
    ///
    /// round(1000 / multiplier), strictly decreasing in the multiplier. If
    /// the scaled value is somehow unusable, returns the unscaled base.
    pub fn movement_threshold(&self) -> u32 {
        let multiplier = self.multiplier();
        let scaled = BASE_THRESHOLD / multiplier;

        if scaled.is_finite() && scaled >= 1.0 {
            scaled.round() as u32
        } else {
            BASE_THRESHOLD as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryStore;

    fn resolver_with(value: Option<&str>) -> SensitivityResolver {
        let mut store = MemoryStore::new();
        if let Some(v) = value {
            store.set(SENSITIVITY_KEY, v);
        }
        SensitivityResolver::new(Arc::new(store))
    }

    #[test]
    fn test_multiplier_mapping_is_exhaustive() {
        assert_eq!(resolver_with(Some("low")).multiplier(), 0.7);
        assert_eq!(resolver_with(Some("medium")).multiplier(), 1.0);
        assert_eq!(resolver_with(Some("high")).multiplier(), 1.3);
        assert_eq!(resolver_with(Some("maximum")).multiplier(), 1.6);
    }

    #[test]
    fn test_missing_value_defaults_to_medium() {
        let resolved = resolver_with(None).resolve();
        assert_eq!(resolved.sensitivity, Sensitivity::Medium);
        assert_eq!(resolved.multiplier, 1.0);
        assert!(!resolved.degraded);
    }

    #[test]
    fn test_malformed_value_is_degraded_medium() {
        for garbage in ["extreme", "", "42", "HIGHEST", "med ium"] {
            let resolved = resolver_with(Some(garbage)).resolve();
            assert_eq!(resolved.sensitivity, Sensitivity::Medium, "input: {garbage:?}");
            assert_eq!(resolved.multiplier, 1.0);
            assert!(resolved.degraded, "input: {garbage:?}");
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Sensitivity::parse("  MAXIMUM "), Some(Sensitivity::Maximum));
        assert_eq!(Sensitivity::parse("High"), Some(Sensitivity::High));
    }

    #[test]
    fn test_thresholds_per_level() {
        assert_eq!(resolver_with(Some("low")).movement_threshold(), 1429);
        assert_eq!(resolver_with(Some("medium")).movement_threshold(), 1000);
        assert_eq!(resolver_with(Some("high")).movement_threshold(), 769);
        assert_eq!(resolver_with(Some("maximum")).movement_threshold(), 625);
    }

    #[test]
    fn test_threshold_decreases_as_multiplier_grows() {
        let thresholds: Vec<u32> = ["low", "medium", "high", "maximum"]
            .iter()
            .map(|level| resolver_with(Some(level)).movement_threshold())
            .collect();

        for pair in thresholds.windows(2) {
            assert!(pair[0] > pair[1]);
        }
    }
}
