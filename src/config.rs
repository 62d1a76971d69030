//! Configuration management for the classification core
//!
//! This module provides runtime configuration loading from JSON files,
//! enabling parameter changes without recompilation. Artifact locations,
//! feature extraction geometry, and decoding limits can all be adjusted
//! via the config file.

use crate::analysis::features::FeatureContract;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub features: FeatureConfig,
    pub audio: AudioConfig,
}

/// Model artifact locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Directory containing the serialized artifacts
    pub artifact_dir: PathBuf,
    /// Classifier artifact file name
    pub classifier_file: String,
    /// Label encoder artifact file name
    pub label_encoder_file: String,
    /// Optional learned severity model file name
    pub severity_model_file: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            artifact_dir: PathBuf::from("model"),
            classifier_file: "cry_model.json".to_string(),
            label_encoder_file: "label_encoder.json".to_string(),
            severity_model_file: "cry_severity_model.json".to_string(),
        }
    }
}

impl ModelConfig {
    /// Full path to the classifier artifact
    pub fn classifier_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.classifier_file)
    }

    /// Full path to the label encoder artifact
    pub fn label_encoder_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.label_encoder_file)
    }

    /// Full path to the optional severity model artifact
    pub fn severity_model_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.severity_model_file)
    }
}

/// Feature extraction geometry
///
/// The same values must be used when building the training dataset and at
/// inference time; the contract decides the vector's block composition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Feature-block contract shared by training and inference
    pub contract: FeatureContract,
    /// FFT window size in samples
    pub frame_size: usize,
    /// Hop size between analysis frames
    pub hop_size: usize,
    /// Number of MFCC coefficients
    pub n_mfcc: usize,
    /// Number of mel filterbank channels
    pub n_mels: usize,
    /// Number of octave bands for spectral contrast
    pub contrast_bands: usize,
    /// Base frequency for the first contrast band (Hz)
    pub contrast_fmin: f32,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            // The deployed classifier artifact is MFCC-only (width 40)
            contract: FeatureContract::MfccOnly,
            frame_size: 2048,
            hop_size: 512,
            n_mfcc: 40,
            n_mels: 64,
            contrast_bands: 6,
            contrast_fmin: 200.0,
        }
    }
}

impl FeatureConfig {
    /// Width of the feature vector under the configured contract
    pub fn vector_width(&self) -> usize {
        match self.contract {
            FeatureContract::MfccOnly => self.n_mfcc,
            FeatureContract::Full => {
                self.n_mfcc + crate::analysis::features::N_CHROMA + self.contrast_bands + 1
            }
        }
    }
}

/// Audio decoding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Cap on the analyzed duration in seconds; None analyzes the full file
    pub max_duration_secs: Option<f32>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            // Cries are short; five seconds is enough for a stable verdict
            max_duration_secs: Some(5.0),
        }
    }
}

impl Default for AppConfig {
    /// Default configuration values (fallback if config file not found)
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            features: FeatureConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// Loaded configuration, or defaults if the file is missing or invalid
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }
}
