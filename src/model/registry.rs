// ModelRegistry - at-most-once artifact loading
//
// Owns the trained classifier, the label encoder, and the optional
// severity model. Constructed once at process start and shared by Arc;
// the artifact read happens at most once per process lifetime, guarded so
// concurrent first callers either wait for the load or observe the fully
// initialized registry. A classifier is never visible without its
// matching label encoding.

use crate::analysis::SeverityModel;
use crate::config::ModelConfig;
use crate::error::{log_model_error, ErrorCode, ModelError};
use crate::model::{ClassifierModel, LabelEncoding};
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Whether the registry holds a usable classifier/encoder pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// Both required artifacts loaded and consistent
    Ready,
    /// One or more artifacts missing or inconsistent
    NotReady {
        /// Human-readable description of each missing/invalid artifact
        problems: Vec<String>,
    },
}

impl Readiness {
    /// True when predictions can be served
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

/// Outcome of the single load attempt, cached for the process lifetime
struct LoadedArtifacts {
    classifier: Option<Arc<ClassifierModel>>,
    labels: Option<Arc<LabelEncoding>>,
    severity: Option<Arc<SeverityModel>>,
    problems: Vec<String>,
}

/// Registry of trained model artifacts
pub struct ModelRegistry {
    config: ModelConfig,
    artifacts: OnceCell<LoadedArtifacts>,
}

impl ModelRegistry {
    /// Create a registry for the configured artifact directory
    ///
    /// No I/O happens here; artifacts load lazily on first use.
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            artifacts: OnceCell::new(),
        }
    }

    /// Load artifacts if not yet loaded and report readiness
    ///
    /// The first caller performs the load; concurrent callers block until
    /// it completes and then observe the same coherent state. The outcome
    /// (including a failed load) is cached: a misconfigured artifact
    /// directory stays NotReady until the process restarts.
    pub fn ensure_loaded(&self) -> Readiness {
        let artifacts = self.artifacts.get_or_init(|| self.load());

        if artifacts.problems.is_empty()
            && artifacts.classifier.is_some()
            && artifacts.labels.is_some()
        {
            Readiness::Ready
        } else {
            Readiness::NotReady {
                problems: artifacts.problems.clone(),
            }
        }
    }

    /// Loaded classifier, if ready
    pub fn classifier(&self) -> Option<Arc<ClassifierModel>> {
        self.artifacts.get().and_then(|a| a.classifier.clone())
    }

    /// Loaded label encoding, if ready
    pub fn label_encoding(&self) -> Option<Arc<LabelEncoding>> {
        self.artifacts.get().and_then(|a| a.labels.clone())
    }

    /// Loaded severity model, when the optional artifact is deployed
    pub fn severity_model(&self) -> Option<Arc<SeverityModel>> {
        self.artifacts.get().and_then(|a| a.severity.clone())
    }

    /// Perform the single artifact read
    fn load(&self) -> LoadedArtifacts {
        let mut problems = Vec::new();

        let classifier = match ClassifierModel::load(&self.config.classifier_path()) {
            Ok(model) => {
                log::info!(
                    "Loaded classifier from {:?} ({} trees, {} features, {} classes)",
                    self.config.classifier_path(),
                    model.trees.len(),
                    model.n_features,
                    model.n_classes
                );
                Some(Arc::new(model))
            }
            Err(err) => {
                log_model_error(&err, "registry load");
                problems.push(err.message());
                None
            }
        };

        let labels = match LabelEncoding::load(&self.config.label_encoder_path()) {
            Ok(encoding) => {
                log::info!(
                    "Loaded label encoder from {:?} ({} classes)",
                    self.config.label_encoder_path(),
                    encoding.n_classes()
                );
                Some(Arc::new(encoding))
            }
            Err(err) => {
                log_model_error(&err, "registry load");
                problems.push(err.message());
                None
            }
        };

        // Mismatched classifier/encoder versions are NotReady, not tolerated
        if let (Some(model), Some(encoding)) = (&classifier, &labels) {
            if model.n_classes != encoding.n_classes() {
                let err = ModelError::EncoderMismatch {
                    classifier_classes: model.n_classes,
                    encoder_classes: encoding.n_classes(),
                };
                log_model_error(&err, "registry load");
                problems.push(err.message());
            }
        }

        // The severity artifact is optional and never affects readiness
        let severity_path = self.config.severity_model_path();
        let severity = if severity_path.exists() {
            match std::fs::read_to_string(&severity_path)
                .map_err(|e| e.to_string())
                .and_then(|s| serde_json::from_str::<SeverityModel>(&s).map_err(|e| e.to_string()))
            {
                Ok(model) => {
                    log::info!("Loaded severity model from {:?}", severity_path);
                    Some(Arc::new(model))
                }
                Err(err) => {
                    log::warn!(
                        "Ignoring unreadable severity model {:?}: {}",
                        severity_path,
                        err
                    );
                    None
                }
            }
        } else {
            None
        };

        LoadedArtifacts {
            classifier,
            labels,
            severity,
            problems,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::forest::{DecisionTree, TreeNode};
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "cry2care_registry_{}_{}",
            std::process::id(),
            name
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_artifacts(dir: &PathBuf, n_classes: usize, encoder_classes: &[&str]) {
        let model = ClassifierModel {
            n_features: 40,
            n_classes,
            trees: vec![DecisionTree {
                nodes: vec![TreeNode::Leaf {
                    distribution: vec![1.0 / n_classes as f32; n_classes],
                }],
            }],
        };
        fs::write(
            dir.join("cry_model.json"),
            serde_json::to_string(&model).unwrap(),
        )
        .unwrap();

        let encoding = LabelEncoding::from_labels(encoder_classes.iter().copied());
        fs::write(
            dir.join("label_encoder.json"),
            serde_json::to_string(&encoding).unwrap(),
        )
        .unwrap();
    }

    fn registry_for(dir: PathBuf) -> ModelRegistry {
        ModelRegistry::new(ModelConfig {
            artifact_dir: dir,
            ..ModelConfig::default()
        })
    }

    #[test]
    fn test_ready_when_artifacts_present() {
        let dir = temp_dir("ready");
        write_artifacts(&dir, 2, &["hungry", "tired"]);

        let registry = registry_for(dir.clone());
        assert!(registry.ensure_loaded().is_ready());
        assert!(registry.classifier().is_some());
        assert!(registry.label_encoding().is_some());
        assert!(registry.severity_model().is_none());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_not_ready_names_missing_artifacts() {
        let dir = temp_dir("empty");
        let registry = registry_for(dir.clone());

        match registry.ensure_loaded() {
            Readiness::NotReady { problems } => {
                assert_eq!(problems.len(), 2);
                assert!(problems.iter().any(|p| p.contains("classifier")));
                assert!(problems.iter().any(|p| p.contains("label encoder")));
            }
            Readiness::Ready => panic!("registry must not be ready without artifacts"),
        }

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_encoder_mismatch_is_not_ready() {
        let dir = temp_dir("mismatch");
        // Classifier says 3 classes, encoder defines 2
        write_artifacts(&dir, 3, &["hungry", "tired"]);

        let registry = registry_for(dir.clone());
        match registry.ensure_loaded() {
            Readiness::NotReady { problems } => {
                assert!(problems.iter().any(|p| p.contains("3") && p.contains("2")));
            }
            Readiness::Ready => panic!("class-count mismatch must not be ready"),
        }

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_concurrent_first_use_observes_one_load() {
        let dir = temp_dir("concurrent");
        write_artifacts(&dir, 2, &["hungry", "tired"]);

        let registry = Arc::new(registry_for(dir.clone()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    let readiness = registry.ensure_loaded();
                    (readiness, registry.classifier().unwrap())
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        // Every caller sees the same readiness and the same loaded instance
        let (_, first_model) = &results[0];
        for (readiness, model) in &results {
            assert!(readiness.is_ready());
            assert!(
                Arc::ptr_eq(model, first_model),
                "all callers must observe the single loaded classifier"
            );
        }

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_severity_artifact_loaded_when_present() {
        let dir = temp_dir("severity");
        write_artifacts(&dir, 2, &["hungry", "tired"]);
        fs::write(
            dir.join("cry_severity_model.json"),
            r#"{"energy_weight": 9.0, "centroid_weight": 0.0002, "bias": 0.0}"#,
        )
        .unwrap();

        let registry = registry_for(dir.clone());
        assert!(registry.ensure_loaded().is_ready());
        assert!(registry.severity_model().is_some());

        fs::remove_dir_all(&dir).ok();
    }
}
