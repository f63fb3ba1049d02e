mod dsl;
mod error;
mod eval;
mod pipeline;
mod query_runner;

pub use dsl::*;
pub use error::QueryError;
pub use eval::*;
pub use pipeline::*;
pub use query_runner::{EngineQueryResult, RunOptions, run_query};
