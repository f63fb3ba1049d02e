use sqlfs_fs::FsError;

use crate::{EvalError, ParseError};

/// Terminal failure of one query run, tagged with the phase that failed.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("parse query")]
    Parse(#[from] ParseError),

    #[error("query has no paths")]
    NoPaths,

    #[error("resolve path \"{raw}\"")]
    Resolve {
        raw: String,
        #[source]
        source: FsError,
    },

    #[error("list directory")]
    List(#[source] FsError),

    #[error("filter files")]
    Filter(#[from] EvalError),
}
