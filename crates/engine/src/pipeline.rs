use std::path::PathBuf;
use std::time::{Duration, Instant};

use log::debug;
use sqlfs_fs::{FileRecord, IdentityResolver, list_dir, resolve_path};
use sqlfs_runtime::{DEFAULT_JOBS, effective_jobs, home_dir};

use crate::{Query, QueryError, ResultSet, filter_records, parse_query};

/// Shared, state-independent pipeline context.
struct PipelineCtx<'a> {
    /// Owner/group name lookups for listed entries.
    resolver: &'a dyn IdentityResolver,
    /// Target of `~/` expansion; `None` if it could not be determined.
    home: Option<PathBuf>,
    /// Workers used to stat directory entries.
    jobs: usize,
    /// Original query string, if we parsed from text.
    query_str: Option<String>,
}

/// Initial state - pipeline created but no query parsed yet.
pub struct InitialState;

/// Query has been parsed, ready to collect records.
pub struct ParsedState {
    query: Query,
}

/// Directories listed, records materialized, ready for filtering.
pub struct CollectedState {
    query: Query,
    records: Vec<FileRecord>,
}

/// Conditions applied.
pub struct FilteredState {
    query: Query,
    results: ResultSet,
    /// Records seen before filtering.
    scanned: usize,
}

/// Stages for which we record timings.
#[derive(Copy, Clone, Debug)]
pub enum Stage {
    Parse,
    Collect,
    Filter,
}

/// Timing metrics collected during pipeline execution.
#[derive(Debug, Clone, Default)]
pub struct PipelineMetrics {
    /// Time spent parsing the query string.
    pub parse_time: Option<Duration>,
    /// Time spent resolving paths and listing directories.
    pub collect_time: Option<Duration>,
    /// Time spent evaluating conditions.
    pub filter_time: Option<Duration>,
}

impl PipelineMetrics {
    /// Total time across all measured stages.
    pub fn total(&self) -> Duration {
        self.parse_time.unwrap_or_default()
            + self.collect_time.unwrap_or_default()
            + self.filter_time.unwrap_or_default()
    }
}

/// Strategy trait for timing behavior.
pub trait Timer {
    /// Run `f`, optionally measuring and recording the duration for `stage`.
    fn measure<F, R>(&mut self, stage: Stage, f: F) -> R
    where
        F: FnOnce() -> R;

    /// Return metrics if timing is enabled.
    fn metrics(&self) -> Option<&PipelineMetrics> {
        None
    }
}

/// Timer implementation that does nothing
#[derive(Debug, Default)]
pub struct NoopTimer;

impl Timer for NoopTimer {
    #[inline]
    fn measure<F, R>(&mut self, _stage: Stage, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        f()
    }
}

/// Timer implementation that collects `PipelineMetrics`.
#[derive(Debug, Default)]
pub struct MetricsTimer {
    metrics: PipelineMetrics,
}

impl Timer for MetricsTimer {
    fn measure<F, R>(&mut self, stage: Stage, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        match stage {
            Stage::Parse => self.metrics.parse_time = Some(elapsed),
            Stage::Collect => self.metrics.collect_time = Some(elapsed),
            Stage::Filter => self.metrics.filter_time = Some(elapsed),
        }

        result
    }

    fn metrics(&self) -> Option<&PipelineMetrics> {
        Some(&self.metrics)
    }
}

/// A type-safe query execution pipeline.
///
/// Typestate enforces parse -> collect -> filter at compile time. Timing
/// behavior is controlled by the `Timer` strategy type parameter `T`:
///
/// - `T = NoopTimer`    => untimed pipeline
/// - `T = MetricsTimer` => timed pipeline
///
/// Every transition is fallible; a failure ends the run with no partial
/// result.
pub struct QueryPipeline<'a, S, T: Timer = NoopTimer> {
    ctx: PipelineCtx<'a>,
    state: S,
    timer: T,
}

fn initial_ctx(resolver: &dyn IdentityResolver) -> PipelineCtx<'_> {
    PipelineCtx {
        resolver,
        home: home_dir(),
        jobs: DEFAULT_JOBS,
        query_str: None,
    }
}

impl<'a> QueryPipeline<'a, InitialState, NoopTimer> {
    /// Create a new untimed pipeline.
    pub fn new(resolver: &'a dyn IdentityResolver) -> Self {
        Self {
            ctx: initial_ctx(resolver),
            state: InitialState,
            timer: NoopTimer,
        }
    }
}

impl<'a> QueryPipeline<'a, InitialState, MetricsTimer> {
    /// Create a new timed pipeline.
    pub fn new_timed(resolver: &'a dyn IdentityResolver) -> Self {
        Self {
            ctx: initial_ctx(resolver),
            state: InitialState,
            timer: MetricsTimer::default(),
        }
    }
}

impl<'a, S, T: Timer> QueryPipeline<'a, S, T> {
    /// Override the directory `~/` expands to.
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.ctx.home = home;
        self
    }

    /// Number of workers for directory listing, clamped to a sane range.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.ctx.jobs = effective_jobs(jobs);
        self
    }

    /// Access timing metrics, if enabled.
    pub fn metrics(&self) -> Option<&PipelineMetrics> {
        self.timer.metrics()
    }

    /// Get the original query string if this pipeline was created via `parse`.
    pub fn query_str(&self) -> Option<&str> {
        self.ctx.query_str.as_deref()
    }
}

impl<'a, T: Timer> QueryPipeline<'a, InitialState, T> {
    /// Parse a query string into a [Query] plan.
    pub fn parse(self, query_str: &str) -> Result<QueryPipeline<'a, ParsedState, T>, QueryError> {
        let QueryPipeline {
            mut ctx,
            state: InitialState,
            mut timer,
        } = self;

        let query = timer.measure(Stage::Parse, || parse_query(query_str))?;
        ctx.query_str = Some(query_str.to_string());

        Ok(QueryPipeline {
            ctx,
            state: ParsedState { query },
            timer,
        })
    }

    /// Use a pre-built query plan.
    pub fn with_query(self, query: Query) -> QueryPipeline<'a, ParsedState, T> {
        let QueryPipeline {
            ctx,
            state: InitialState,
            timer,
        } = self;

        QueryPipeline {
            ctx,
            state: ParsedState { query },
            timer,
        }
    }
}

impl<'a, T: Timer> QueryPipeline<'a, ParsedState, T> {
    /// Resolve every path, then list each directory.
    ///
    /// All paths are resolved before anything is listed, so a bad path
    /// fails the query without touching the others.
    pub fn collect(self) -> Result<QueryPipeline<'a, CollectedState, T>, QueryError> {
        let QueryPipeline {
            ctx,
            state: ParsedState { query },
            mut timer,
        } = self;

        let records = timer.measure(Stage::Collect, || collect_records(&ctx, &query))?;

        Ok(QueryPipeline {
            ctx,
            state: CollectedState { query, records },
            timer,
        })
    }

    /// Get a reference to the parsed query.
    pub fn query(&self) -> &Query {
        &self.state.query
    }
}

fn collect_records(ctx: &PipelineCtx<'_>, query: &Query) -> Result<Vec<FileRecord>, QueryError> {
    if query.paths().is_empty() {
        return Err(QueryError::NoPaths);
    }

    let dirs = query
        .paths()
        .iter()
        .map(|raw| {
            resolve_path(raw, ctx.home.as_deref()).map_err(|source| QueryError::Resolve {
                raw: raw.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut records = Vec::new();
    for dir in &dirs {
        let listed = list_dir(dir, ctx.resolver, ctx.jobs).map_err(QueryError::List)?;
        debug!("[collect] {} records from {}", listed.len(), dir.display());
        records.extend(listed);
    }
    Ok(records)
}

impl<'a, T: Timer> QueryPipeline<'a, CollectedState, T> {
    /// Apply the query's conditions to the collected records.
    pub fn filter(self) -> Result<QueryPipeline<'a, FilteredState, T>, QueryError> {
        let QueryPipeline {
            ctx,
            state: CollectedState { query, records },
            mut timer,
        } = self;

        let scanned = records.len();
        let results = timer.measure(Stage::Filter, || {
            filter_records(records, query.conditions())
        })?;

        Ok(QueryPipeline {
            ctx,
            state: FilteredState {
                query,
                results,
                scanned,
            },
            timer,
        })
    }

    /// Records listed so far, unfiltered.
    pub fn records(&self) -> &[FileRecord] {
        &self.state.records
    }
}

impl<'a, T: Timer> QueryPipeline<'a, FilteredState, T> {
    pub fn query(&self) -> &Query {
        &self.state.query
    }

    /// Matching records keyed by path.
    pub fn results(&self) -> &ResultSet {
        &self.state.results
    }

    /// Number of matching records.
    pub fn count(&self) -> usize {
        self.state.results.len()
    }

    /// Number of records seen before filtering.
    pub fn scanned(&self) -> usize {
        self.state.scanned
    }

    /// Consume the pipeline, returning the plan, the results and any metrics.
    pub fn into_parts(self) -> (Query, ResultSet, Option<PipelineMetrics>) {
        let metrics = self.timer.metrics().cloned();
        (self.state.query, self.state.results, metrics)
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
