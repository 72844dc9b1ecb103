pub mod error;
pub mod logging;

pub mod accumulator;
pub mod batch;
pub mod extractor;
pub mod scopes;
pub mod walker;

pub use accumulator::{QueryId, UsageAccumulator};
pub use batch::{
    CompletionStage, ExtractionPipeline, ExtractionStage, FullMiningStage, PipelineStats,
};
pub use error::{ExtractionError, Result};
pub use extractor::{extract_all_queries, extract_for_method, extract_query};
