// Model module - trained artifacts and their registry
//
// Module organization:
// - forest: decision-forest classifier artifact
// - labels: cause label encoding
// - registry: at-most-once artifact loading, readiness reporting

pub mod forest;
pub mod labels;
pub mod registry;

pub use forest::ClassifierModel;
pub use labels::LabelEncoding;
pub use registry::{ModelRegistry, Readiness};
