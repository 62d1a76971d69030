// Model artifact error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;
use std::path::PathBuf;

/// Model error code constants
///
/// Error code range: 1201-1205
pub struct ModelErrorCodes {}

impl ModelErrorCodes {
    /// Required artifact file is absent from the artifact directory
    pub const ARTIFACT_MISSING: i32 = 1201;

    /// Artifact file exists but cannot be deserialized
    pub const ARTIFACT_CORRUPT: i32 = 1202;

    /// Feature vector width disagrees with the classifier's input width
    pub const SHAPE_MISMATCH: i32 = 1203;

    /// Classifier and label encoder disagree on the number of classes
    pub const ENCODER_MISMATCH: i32 = 1204;

    /// Classifier emitted a label code outside the encoder's range
    pub const UNKNOWN_LABEL_CODE: i32 = 1205;
}

/// Log a model error with structured context
pub fn log_model_error(err: &ModelError, context: &str) {
    error!(
        "Model error in {}: code={}, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Model artifact and inference errors
///
/// `ArtifactMissing` and `ArtifactCorrupt` are configuration faults that
/// keep the registry NotReady. `ShapeMismatch` and `EncoderMismatch` are
/// fatal configuration inconsistencies between the deployed artifacts and
/// the feature contract; both carry the observed and expected values to
/// aid diagnosis.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Required artifact file is absent
    ArtifactMissing { artifact: String, path: PathBuf },

    /// Artifact file exists but cannot be deserialized
    ArtifactCorrupt { artifact: String, details: String },

    /// Feature vector width disagrees with the classifier's input width
    ShapeMismatch { observed: usize, expected: usize },

    /// Classifier and label encoder disagree on the number of classes
    EncoderMismatch {
        classifier_classes: usize,
        encoder_classes: usize,
    },

    /// Classifier emitted a label code outside the encoder's range
    UnknownLabelCode { code: usize, n_classes: usize },
}

impl ErrorCode for ModelError {
    fn code(&self) -> i32 {
        match self {
            ModelError::ArtifactMissing { .. } => ModelErrorCodes::ARTIFACT_MISSING,
            ModelError::ArtifactCorrupt { .. } => ModelErrorCodes::ARTIFACT_CORRUPT,
            ModelError::ShapeMismatch { .. } => ModelErrorCodes::SHAPE_MISMATCH,
            ModelError::EncoderMismatch { .. } => ModelErrorCodes::ENCODER_MISMATCH,
            ModelError::UnknownLabelCode { .. } => ModelErrorCodes::UNKNOWN_LABEL_CODE,
        }
    }

    fn message(&self) -> String {
        match self {
            ModelError::ArtifactMissing { artifact, path } => {
                format!("Artifact '{}' missing at {}", artifact, path.display())
            }
            ModelError::ArtifactCorrupt { artifact, details } => {
                format!("Artifact '{}' could not be loaded: {}", artifact, details)
            }
            ModelError::ShapeMismatch { observed, expected } => {
                format!(
                    "Feature vector width {} does not match classifier input width {}",
                    observed, expected
                )
            }
            ModelError::EncoderMismatch {
                classifier_classes,
                encoder_classes,
            } => {
                format!(
                    "Classifier predicts {} classes but label encoder defines {}",
                    classifier_classes, encoder_classes
                )
            }
            ModelError::UnknownLabelCode { code, n_classes } => {
                format!(
                    "Label code {} out of range for {} known classes",
                    code, n_classes
                )
            }
        }
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModelError (code {}): {}", self.code(), self.message())
    }
}

impl std::error::Error for ModelError {}
