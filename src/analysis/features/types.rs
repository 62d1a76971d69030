// Types module - data structures for the feature pipeline

use serde::{Deserialize, Serialize};

/// Feature-block composition of a feature vector
///
/// The contract fixes the length and block order of every vector fed to a
/// classifier. Training and inference must use the same contract value;
/// the registry verifies the extracted width against the loaded
/// classifier's expected input width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureContract {
    /// MFCC block only (n_mfcc values)
    MfccOnly,
    /// MFCC + chroma + spectral contrast, concatenated in that order
    Full,
}

/// A fixed-length feature vector extracted from one audio signal
///
/// Block layout under `FeatureContract::Full`:
/// [0, n_mfcc)                      MFCC means
/// [n_mfcc, n_mfcc + 12)            chroma means
/// [n_mfcc + 12, n_mfcc + 12 + 7)   spectral contrast means
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Concatenated feature values
    pub values: Vec<f32>,
    /// Contract the vector was extracted under
    pub contract: FeatureContract,
}

impl FeatureVector {
    /// Vector width
    pub fn width(&self) -> usize {
        self.values.len()
    }

    /// Values as a slice
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_serde_names() {
        let json = serde_json::to_string(&FeatureContract::MfccOnly).unwrap();
        assert_eq!(json, "\"mfcc_only\"");
        let back: FeatureContract = serde_json::from_str("\"full\"").unwrap();
        assert_eq!(back, FeatureContract::Full);
    }
}
