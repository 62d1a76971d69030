// Dataset builder - batch feature extraction for training
//
// Walks a labeled dataset tree (root/<label>/<file>) and accumulates
// (feature vector, label) pairs for the offline training driver. A file
// that cannot be decoded is counted and skipped; it never aborts the
// batch. The builder uses the same FeatureConfig as the inference path,
// so training and deployed vectors always agree in width.

use crate::analysis::FeatureExtractor;
use crate::audio::decode_file;
use crate::config::AppConfig;
use crate::error::{log_decode_error, DecodeError};
use crate::model::LabelEncoding;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

use crate::analysis::FeatureVector;

/// One extracted training sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSample {
    pub features: FeatureVector,
    pub label: String,
}

/// Outcome of a batch feature build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub samples: Vec<DatasetSample>,
    /// Files successfully decoded and extracted
    pub processed: usize,
    /// Files skipped because they could not be decoded
    pub skipped: usize,
}

impl DatasetSummary {
    /// Fit a label encoding over the collected labels
    pub fn label_encoding(&self) -> LabelEncoding {
        LabelEncoding::from_labels(self.samples.iter().map(|s| s.label.clone()))
    }
}

/// Batch feature builder over a labeled directory tree
pub struct DatasetBuilder {
    config: AppConfig,
}

impl DatasetBuilder {
    /// Create a builder sharing the inference feature configuration
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Extract the feature vector for a single file
    ///
    /// Returned per file so the batch loop can skip-and-continue on
    /// decode failures instead of aborting.
    pub fn extract_file(&self, path: &Path) -> Result<FeatureVector, DecodeError> {
        let signal = decode_file(path, self.config.audio.max_duration_secs)?;
        let extractor = FeatureExtractor::new(signal.sample_rate, &self.config.features);
        Ok(extractor.extract(&signal))
    }

    /// Build the dataset from `root/<label>/<file>`
    ///
    /// Each immediate subdirectory of `root` names a cause label; every
    /// file inside it is decoded and extracted. Unreadable files are
    /// counted in `skipped` and processing continues with the next file.
    ///
    /// # Arguments
    /// * `root` - Dataset root directory
    ///
    /// # Returns
    /// * `Ok(DatasetSummary)` - Collected samples plus processed/skipped tallies
    /// * `Err(io::Error)` - The directory tree itself could not be read
    pub fn build(&self, root: &Path) -> io::Result<DatasetSummary> {
        let mut samples = Vec::new();
        let mut processed = 0usize;
        let mut skipped = 0usize;

        let mut label_dirs: Vec<_> = std::fs::read_dir(root)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .collect();
        label_dirs.sort_by_key(|entry| entry.file_name());

        for label_dir in label_dirs {
            let label = label_dir.file_name().to_string_lossy().into_owned();
            log::info!("Processing label folder: {}", label);

            let mut files: Vec<_> = std::fs::read_dir(label_dir.path())?
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.path().is_file())
                .collect();
            files.sort_by_key(|entry| entry.file_name());

            for file in files {
                let path = file.path();
                match self.extract_file(&path) {
                    Ok(features) => {
                        samples.push(DatasetSample {
                            features,
                            label: label.clone(),
                        });
                        processed += 1;
                    }
                    Err(err) => {
                        log_decode_error(&err, "dataset build");
                        log::warn!("Skipping {}: format not supported", path.display());
                        skipped += 1;
                    }
                }
            }
        }

        log::info!(
            "Dataset build complete: {} processed, {} skipped",
            processed,
            skipped
        );

        Ok(DatasetSummary {
            samples,
            processed,
            skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use std::path::PathBuf;

    fn temp_root(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "cry2care_dataset_{}_{}",
            std::process::id(),
            name
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_wav(path: &Path, frequency: f32, duration_secs: f32) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        let n = (22050.0 * duration_secs) as usize;
        for i in 0..n {
            let t = i as f32 / 22050.0;
            let sample = (2.0 * std::f32::consts::PI * frequency * t).sin();
            writer
                .write_sample((sample * i16::MAX as f32 * 0.8) as i16)
                .unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_batch_skips_unreadable_file_and_continues() {
        let root = temp_root("skip");
        let hungry = root.join("hungry");
        let tired = root.join("tired");
        fs::create_dir_all(&hungry).unwrap();
        fs::create_dir_all(&tired).unwrap();

        write_wav(&hungry.join("hu-1.wav"), 440.0, 0.5);
        write_wav(&hungry.join("hu-2.wav"), 520.0, 0.5);
        write_wav(&tired.join("ti-1.wav"), 300.0, 0.5);

        // The classic unreadable payload in the middle of the corpus
        let mut bad = fs::File::create(hungry.join("hu-3.3gp")).unwrap();
        bad.write_all(b"not really audio").unwrap();
        drop(bad);

        let builder = DatasetBuilder::new(AppConfig::default());
        let summary = builder.build(&root).unwrap();

        assert_eq!(summary.processed, 3);
        assert_eq!(summary.skipped, 1, "exactly the one bad file is skipped");
        assert_eq!(summary.samples.len(), 3);

        // Every vector honors the configured contract width
        for sample in &summary.samples {
            assert_eq!(sample.features.width(), 40);
        }

        let encoding = summary.label_encoding();
        assert_eq!(encoding.classes, vec!["hungry", "tired"]);

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_missing_root_is_io_error() {
        let builder = DatasetBuilder::new(AppConfig::default());
        assert!(builder.build(Path::new("/nonexistent/dataset")).is_err());
    }
}
