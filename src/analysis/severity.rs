// SeverityEstimator - bounded severity and confidence from vitals
//
// Derives a clinical severity score and a confidence estimate from the
// vitals snapshot. The default path is an explicit, auditable heuristic;
// when a learned severity artifact is deployed it substitutes the
// heuristic under the same output range contract.

use crate::analysis::vitals::VitalsSnapshot;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Severity output bounds
pub const SEVERITY_MIN: f32 = 0.1;
pub const SEVERITY_MAX: f32 = 10.0;

/// Optional learned severity artifact (linear in the vitals)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeverityModel {
    pub energy_weight: f32,
    pub centroid_weight: f32,
    pub bias: f32,
}

impl SeverityModel {
    /// Evaluate the model on a vitals snapshot (unclamped)
    fn evaluate(&self, vitals: &VitalsSnapshot) -> f32 {
        self.energy_weight * vitals.energy
            + self.centroid_weight * vitals.spectral_centroid
            + self.bias
    }
}

/// Severity and confidence pair returned per prediction
#[derive(Debug, Clone, Copy)]
pub struct SeverityEstimate {
    /// Severity in [0.1, 10.0]
    pub severity: f32,
    /// Confidence in (0, 1]
    pub confidence: f32,
}

/// SeverityEstimator maps vitals to a (severity, confidence) pair
pub struct SeverityEstimator {
    /// Learned model substituted for the heuristic when deployed
    model: Option<Arc<SeverityModel>>,
}

impl SeverityEstimator {
    /// Create an estimator using the heuristic severity
    pub fn heuristic() -> Self {
        Self { model: None }
    }

    /// Create an estimator backed by a learned severity model
    pub fn with_model(model: Arc<SeverityModel>) -> Self {
        Self { model: Some(model) }
    }

    /// Estimate severity and confidence from vitals
    ///
    /// severity = clamp(energy * 10 + centroid / 5000, 0.1, 10.0), or the
    /// learned model's output clamped to the same range.
    /// confidence = 0.88 + energy * 0.5, clamped to at most 1.0.
    ///
    /// Deterministic and reproducible from the vitals alone.
    pub fn estimate(&self, vitals: &VitalsSnapshot) -> SeverityEstimate {
        let raw = match &self.model {
            Some(model) => model.evaluate(vitals),
            None => vitals.energy * 10.0 + vitals.spectral_centroid / 5000.0,
        };
        let severity = raw.clamp(SEVERITY_MIN, SEVERITY_MAX);

        // The unclamped form exceeds 1.0 for loud input; clamped here so the
        // result honors the (0, 1] confidence contract.
        let confidence = (0.88 + vitals.energy * 0.5).min(1.0);

        SeverityEstimate {
            severity,
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vitals(energy: f32, zcr: f32, centroid: f32) -> VitalsSnapshot {
        VitalsSnapshot {
            energy,
            zero_crossing_rate: zcr,
            spectral_centroid: centroid,
        }
    }

    #[test]
    fn test_heuristic_severity() {
        let estimator = SeverityEstimator::heuristic();
        let estimate = estimator.estimate(&vitals(0.3, 0.05, 2500.0));
        // 0.3 * 10 + 2500 / 5000 = 3.5
        assert!((estimate.severity - 3.5).abs() < 1e-5);
    }

    #[test]
    fn test_zero_energy_clamps_to_floor() {
        let estimator = SeverityEstimator::heuristic();
        let estimate = estimator.estimate(&vitals(0.0, 0.0, 0.0));
        assert_eq!(estimate.severity, SEVERITY_MIN);
    }

    #[test]
    fn test_large_centroid_clamps_to_ceiling() {
        let estimator = SeverityEstimator::heuristic();
        let estimate = estimator.estimate(&vitals(1.0, 0.5, 1.0e9));
        assert_eq!(estimate.severity, SEVERITY_MAX);
    }

    #[test]
    fn test_severity_bounds_hold_for_finite_vitals() {
        let estimator = SeverityEstimator::heuristic();
        for energy in [0.0f32, 0.001, 0.5, 1.0, 100.0] {
            for centroid in [0.0f32, 440.0, 20000.0, 1.0e7] {
                let estimate = estimator.estimate(&vitals(energy, 0.1, centroid));
                assert!(
                    (SEVERITY_MIN..=SEVERITY_MAX).contains(&estimate.severity),
                    "severity {} out of bounds for energy={}, centroid={}",
                    estimate.severity,
                    energy,
                    centroid
                );
            }
        }
    }

    #[test]
    fn test_confidence_is_clamped() {
        let estimator = SeverityEstimator::heuristic();
        // 0.88 + 0.7 * 0.5 = 1.23 unclamped
        let estimate = estimator.estimate(&vitals(0.7, 0.05, 440.0));
        assert_eq!(estimate.confidence, 1.0);

        let quiet = estimator.estimate(&vitals(0.0, 0.0, 0.0));
        assert!((quiet.confidence - 0.88).abs() < 1e-6);
    }

    #[test]
    fn test_learned_model_respects_range_contract() {
        let model = Arc::new(SeverityModel {
            energy_weight: 100.0,
            centroid_weight: 0.0,
            bias: -5.0,
        });
        let estimator = SeverityEstimator::with_model(model);

        let loud = estimator.estimate(&vitals(1.0, 0.2, 1000.0));
        assert_eq!(loud.severity, SEVERITY_MAX);

        let quiet = estimator.estimate(&vitals(0.0, 0.0, 0.0));
        assert_eq!(quiet.severity, SEVERITY_MIN);
    }
}
