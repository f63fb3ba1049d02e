mod config;
pub mod logging;

pub use config::{
    DEFAULT_JOBS, MAX_JOBS, PROGRAM_LOG_LEVEL, PROGRAM_NAME, effective_jobs, home_dir,
};

pub use logging::init;
