pub mod analysis;
pub mod prompt;

pub use analysis::{AnalysisPipeline, ReviewTask};
