use std::path::PathBuf;

use log::info;
use sqlfs_fs::IdentityResolver;

use crate::{PipelineMetrics, Query, QueryError, QueryPipeline, ResultSet};

/// Options for a single query run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Workers for directory listing; `0` or `1` means sequential.
    pub jobs: usize,
    /// Replaces the detected home directory for `~/` expansion.
    pub home: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct EngineQueryResult {
    /// Parsed plan, for diagnostics.
    pub query: Query,
    /// Matching records keyed by path.
    pub results: ResultSet,
    /// Records seen before filtering.
    pub scanned: usize,
    /// Stage timings.
    pub metrics: Option<PipelineMetrics>,
}

/// Parse, collect and filter `query` in one go.
pub fn run_query(
    query: &str,
    resolver: &dyn IdentityResolver,
    opts: &RunOptions,
) -> Result<EngineQueryResult, QueryError> {
    let mut pipeline = QueryPipeline::new_timed(resolver).with_jobs(opts.jobs);
    if opts.home.is_some() {
        pipeline = pipeline.with_home(opts.home.clone());
    }

    let filtered = pipeline.parse(query)?.collect()?.filter()?;
    let scanned = filtered.scanned();

    let (query, results, metrics) = filtered.into_parts();
    info!("[query] {} of {scanned} entries matched", results.len());

    Ok(EngineQueryResult {
        query,
        results,
        scanned,
        metrics,
    })
}
