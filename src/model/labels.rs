// Labels - cause label encoding
//
// A bijection between cause labels (strings) and dense integer codes,
// fixed at training time. Inference only ever decodes; the fitting
// constructor exists for the training-side dataset builder.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Encoding between cause labels and dense integer codes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoding {
    /// Classes in code order; code = index
    pub classes: Vec<String>,
}

impl LabelEncoding {
    /// Fit an encoding from a set of labels (training-side)
    ///
    /// Classes are sorted and deduplicated so the code assignment is
    /// deterministic regardless of input order.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let classes: BTreeSet<String> = labels.into_iter().map(Into::into).collect();
        Self {
            classes: classes.into_iter().collect(),
        }
    }

    /// Load the label encoder artifact from disk
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let contents = fs::read_to_string(path).map_err(|_| ModelError::ArtifactMissing {
            artifact: "label encoder".to_string(),
            path: path.to_path_buf(),
        })?;

        serde_json::from_str(&contents).map_err(|e| ModelError::ArtifactCorrupt {
            artifact: "label encoder".to_string(),
            details: e.to_string(),
        })
    }

    /// Number of classes
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Encode a label to its integer code
    pub fn encode(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == label)
    }

    /// Decode an integer code back to its label
    pub fn decode(&self, code: usize) -> Result<&str, ModelError> {
        self.classes
            .get(code)
            .map(String::as_str)
            .ok_or(ModelError::UnknownLabelCode {
                code,
                n_classes: self.classes.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cry_labels() -> LabelEncoding {
        LabelEncoding::from_labels(["hungry", "belly_pain", "tired", "discomfort", "burping"])
    }

    #[test]
    fn test_round_trip_every_label() {
        let encoding = cry_labels();
        for label in &encoding.classes {
            let code = encoding.encode(label).expect("label must encode");
            assert_eq!(encoding.decode(code).unwrap(), label);
        }
    }

    #[test]
    fn test_fit_is_sorted_and_deduplicated() {
        let encoding = LabelEncoding::from_labels(["tired", "hungry", "tired", "hungry"]);
        assert_eq!(encoding.classes, vec!["hungry", "tired"]);
    }

    #[test]
    fn test_decode_out_of_range() {
        let encoding = cry_labels();
        let err = encoding.decode(99).unwrap_err();
        assert!(matches!(err, ModelError::UnknownLabelCode { code: 99, .. }));
    }

    #[test]
    fn test_json_roundtrip() {
        let encoding = cry_labels();
        let json = serde_json::to_string(&encoding).unwrap();
        let parsed: LabelEncoding = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.classes, encoding.classes);
    }
}
