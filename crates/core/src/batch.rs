//! Batch extraction over many units.
//!
//! Engine precondition failures are per-unit: a malformed tree is logged,
//! counted and skipped, and the run continues. Committer failures abort
//! the run.

use rayon::prelude::*;
use usagescope_api::{Context, Query};

use crate::error::Result;
use crate::extractor;

/// A processing stage of the pipeline.
pub trait ExtractionStage: Send + Sync {
    /// Process one unit, yielding the records it contributes.
    fn process(&self, context: &Context) -> Result<Vec<Query>>;
}

/// Extracts the completion-point record of each unit.
pub struct CompletionStage;

impl ExtractionStage for CompletionStage {
    fn process(&self, context: &Context) -> Result<Vec<Query>> {
        Ok(extractor::extract_query(context)?.into_iter().collect())
    }
}

/// Mines every record of every method of each unit.
pub struct FullMiningStage;

impl ExtractionStage for FullMiningStage {
    fn process(&self, context: &Context) -> Result<Vec<Query>> {
        let mut queries = Vec::new();
        for method in &context.sst.methods {
            queries.extend(extractor::extract_all_queries(context, method)?);
        }
        Ok(queries)
    }
}

/// Counters for one pipeline run.
///
/// `extracted` counts committed records, `empty` counts units that yielded
/// none, `failed` counts units skipped after a precondition failure.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStats {
    pub extracted: usize,
    pub empty: usize,
    pub failed: usize,
}

/// Batch extraction engine.
pub struct ExtractionPipeline {
    batch_size: usize,
}

impl ExtractionPipeline {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: if batch_size == 0 { 100 } else { batch_size },
        }
    }

    /// Executes the pipeline: processes units in chunks, each chunk in
    /// parallel, and commits every chunk's yield in one call.
    pub fn execute<S, F>(
        &self,
        contexts: &[Context],
        stage: &S,
        mut committer: F,
    ) -> Result<PipelineStats>
    where
        S: ExtractionStage,
        F: FnMut(Vec<Query>) -> Result<()>,
    {
        let mut stats = PipelineStats::default();
        for chunk in contexts.chunks(self.batch_size) {
            // 1. Process the current batch
            let outcomes: Vec<Result<Vec<Query>>> = chunk
                .par_iter()
                .map(|context| stage.process(context))
                .collect();

            let mut yielded = Vec::new();
            for (context, outcome) in chunk.iter().zip(outcomes) {
                match outcome {
                    Ok(queries) if queries.is_empty() => stats.empty += 1,
                    Ok(queries) => {
                        stats.extracted += queries.len();
                        yielded.extend(queries);
                    }
                    Err(error) => {
                        stats.failed += 1;
                        tracing::warn!(
                            "skipping unit {}: {}",
                            context.sst.enclosing_type,
                            error
                        );
                    }
                }
            }

            // 2. Commit the batch's products
            if !yielded.is_empty() {
                committer(yielded)?;
            }
        }
        Ok(stats)
    }
}
