// ClassificationService - decode, extract, classify, score
//
// Orchestrates one inference: decode the file, extract the classifier
// feature vector and the vitals snapshot, run the classifier, and combine
// everything into a single PredictionResult. Every fault inside predict
// is converted into an Error-status result; the caller never sees an
// unhandled fault, so the API boundary has one uniform shape to render.

use crate::analysis::{
    FeatureExtractor, SeverityEstimator, VitalsExtractor, VitalsSnapshot,
};
use crate::audio::{decode_file, AudioSignal};
use crate::config::AppConfig;
use crate::error::{log_decode_error, ErrorCode, ModelError};
use crate::model::{ModelRegistry, Readiness};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Outcome status of one prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Success,
    Error,
}

/// Structured verdict for one cry recording
///
/// Serialized as-is by the API layer; the persistence gateway assigns the
/// durable identifier and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub status: PredictionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vitals: Option<VitalsSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl PredictionResult {
    /// Build a Success result
    pub fn success(
        cause: String,
        confidence: f32,
        severity: f32,
        vitals: VitalsSnapshot,
    ) -> Self {
        Self {
            status: PredictionStatus::Success,
            cause: Some(cause),
            confidence: Some(confidence),
            severity: Some(severity),
            vitals: Some(vitals),
            error_detail: None,
        }
    }

    /// Build an Error result carrying the failure description
    pub fn error(detail: String) -> Self {
        Self {
            status: PredictionStatus::Error,
            cause: None,
            confidence: None,
            severity: None,
            vitals: None,
            error_detail: Some(detail),
        }
    }

    /// True when the prediction succeeded
    pub fn is_success(&self) -> bool {
        self.status == PredictionStatus::Success
    }
}

/// Classification service wiring registry, extractors, and estimator
pub struct ClassificationService {
    config: AppConfig,
    registry: Arc<ModelRegistry>,
}

impl ClassificationService {
    /// Create a service over a shared model registry
    pub fn new(config: AppConfig, registry: Arc<ModelRegistry>) -> Self {
        Self { config, registry }
    }

    /// Shared registry handle
    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    /// Predict the cry cause for an audio file
    ///
    /// Decode failures are reported as Error results, same as any fault
    /// inside the inference pipeline.
    pub fn predict_file(&self, path: &Path) -> PredictionResult {
        match decode_file(path, self.config.audio.max_duration_secs) {
            Ok(signal) => self.predict(&signal),
            Err(err) => {
                log_decode_error(&err, "predict");
                PredictionResult::error(err.message())
            }
        }
    }

    /// Predict the cry cause for a decoded signal
    ///
    /// 1. Ensure artifacts are loaded; NotReady is a configuration fault
    ///    reported with the missing artifact names.
    /// 2. Extract the feature vector and the vitals snapshot.
    /// 3. Classify and decode the label code to a cause.
    /// 4. Estimate severity and confidence from the vitals.
    pub fn predict(&self, signal: &AudioSignal) -> PredictionResult {
        match self.registry.ensure_loaded() {
            Readiness::Ready => {}
            Readiness::NotReady { problems } => {
                return PredictionResult::error(format!(
                    "Models not loaded: {}",
                    problems.join("; ")
                ));
            }
        }

        match self.run_inference(signal) {
            Ok(result) => result,
            Err(err) => PredictionResult::error(err.message()),
        }
    }

    fn run_inference(&self, signal: &AudioSignal) -> Result<PredictionResult, ModelError> {
        let extractor = FeatureExtractor::new(signal.sample_rate, &self.config.features);
        let features = extractor.extract(signal);

        let vitals = VitalsExtractor::new(&self.config.features).extract(signal);

        // Ready was just observed, but the accessors stay fallible
        let classifier =
            self.registry
                .classifier()
                .ok_or_else(|| ModelError::ArtifactMissing {
                    artifact: "classifier".to_string(),
                    path: self.config.model.classifier_path(),
                })?;
        let encoding =
            self.registry
                .label_encoding()
                .ok_or_else(|| ModelError::ArtifactMissing {
                    artifact: "label encoder".to_string(),
                    path: self.config.model.label_encoder_path(),
                })?;

        let code = classifier.predict(features.as_slice())?;
        let cause = encoding.decode(code)?.to_string();

        let estimator = match self.registry.severity_model() {
            Some(model) => SeverityEstimator::with_model(model),
            None => SeverityEstimator::heuristic(),
        };
        let estimate = estimator.estimate(&vitals);

        log::debug!(
            "Predicted cause '{}' (confidence {:.2}, severity {:.2})",
            cause,
            estimate.confidence,
            estimate.severity
        );

        Ok(PredictionResult::success(
            cause,
            estimate.confidence,
            estimate.severity,
            vitals,
        ))
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
