// Analysis module - acoustic feature extraction and scoring
//
// Module organization:
// - features: classifier feature pipeline (MFCC, chroma, contrast)
// - vitals: interpretable acoustic descriptors for display and severity
// - severity: bounded severity/confidence estimation

pub mod features;
pub mod severity;
pub mod vitals;

pub use features::{FeatureContract, FeatureExtractor, FeatureVector};
pub use severity::{SeverityEstimate, SeverityEstimator, SeverityModel};
pub use vitals::{VitalsExtractor, VitalsSnapshot};
