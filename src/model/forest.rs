// Forest - serialized decision-forest classifier
//
// The classifier artifact is a JSON-serialized ensemble of decision trees
// produced by the offline training job. Each tree is a node arena rooted
// at index 0; a prediction walks each tree to a leaf and averages the
// per-class leaf distributions. The model is immutable after load and
// shared read-only across concurrent predictions.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One node of a decision tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal split: go left when feature value <= threshold
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    /// Leaf carrying a probability distribution over label codes
    Leaf { distribution: Vec<f32> },
}

/// A single decision tree (node arena, root at index 0)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Walk the tree for one feature vector and return the leaf distribution
    fn leaf_distribution<'a>(&'a self, features: &[f32]) -> &'a [f32] {
        static EMPTY: [f32; 0] = [];

        let mut index = 0usize;
        loop {
            match self.nodes.get(index) {
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = features.get(*feature).copied().unwrap_or(0.0);
                    index = if value <= *threshold { *left } else { *right };
                }
                Some(TreeNode::Leaf { distribution }) => return distribution,
                // Malformed arena index; treated as an uninformative leaf
                None => return &EMPTY,
            }
        }
    }
}

/// Trained cry-cause classifier
///
/// Opaque decision function mapping a feature vector to a label code and
/// a probability distribution over all label codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierModel {
    /// Expected feature vector width
    pub n_features: usize,
    /// Number of label codes the forest predicts over
    pub n_classes: usize,
    pub trees: Vec<DecisionTree>,
}

impl ClassifierModel {
    /// Load the classifier artifact from disk
    ///
    /// # Arguments
    /// * `path` - Path to the JSON artifact
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let contents = fs::read_to_string(path).map_err(|_| ModelError::ArtifactMissing {
            artifact: "classifier".to_string(),
            path: path.to_path_buf(),
        })?;

        serde_json::from_str(&contents).map_err(|e| ModelError::ArtifactCorrupt {
            artifact: "classifier".to_string(),
            details: e.to_string(),
        })
    }

    /// Probability distribution over label codes for one feature vector
    ///
    /// Averages the leaf distributions of all trees. Fails with
    /// `ShapeMismatch` when the vector width disagrees with the trained
    /// input width.
    pub fn predict_proba(&self, features: &[f32]) -> Result<Vec<f32>, ModelError> {
        if features.len() != self.n_features {
            return Err(ModelError::ShapeMismatch {
                observed: features.len(),
                expected: self.n_features,
            });
        }

        let mut probs = vec![0.0f32; self.n_classes];
        if self.trees.is_empty() {
            return Ok(probs);
        }

        for tree in &self.trees {
            let distribution = tree.leaf_distribution(features);
            for (p, &d) in probs.iter_mut().zip(distribution.iter()) {
                *p += d;
            }
        }

        let n_trees = self.trees.len() as f32;
        for p in probs.iter_mut() {
            *p /= n_trees;
        }

        Ok(probs)
    }

    /// Predicted label code (argmax over the class distribution)
    pub fn predict(&self, features: &[f32]) -> Result<usize, ModelError> {
        let probs = self.predict_proba(features)?;
        Ok(probs
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
            .unwrap_or(0))
    }
}
