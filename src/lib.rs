// Cry2Care Core - Infant Cry Classification Engine
// Offline audio decoding, feature extraction, and cause inference

// Module declarations
pub mod analysis;
pub mod audio;
pub mod config;
pub mod dataset;
pub mod error;
pub mod model;
pub mod service;

// Re-exports for convenience
pub use config::AppConfig;
pub use model::{ModelRegistry, Readiness};
pub use service::{ClassificationService, PredictionResult, PredictionStatus};
