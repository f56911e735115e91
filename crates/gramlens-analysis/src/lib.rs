pub mod brand;
pub mod competitor;
mod vocab;

use thiserror::Error;

pub use brand::{analyze_brand, brand_keywords};
pub use competitor::analyze_competitors;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("cannot analyze an empty artifact set")]
    EmptyArtifactSet,
}
