use std::path::PathBuf;

pub const PROGRAM_NAME: &str = "sqlfs";
pub const PROGRAM_LOG_LEVEL: &str = "SQLFS_LOG_LEVEL";

/// Number of workers used to stat directory entries when none is requested.
pub const DEFAULT_JOBS: usize = 1;
/// Upper bound for `--jobs`; anything above this is clamped.
pub const MAX_JOBS: usize = 64;

/// Home directory of the invoking user, used to expand `~/` in query paths.
pub fn home_dir() -> Option<PathBuf> {
    dirs::home_dir().filter(|p| !p.as_os_str().is_empty())
}

/// Clamp a requested worker count into `1..=MAX_JOBS`.
pub fn effective_jobs(requested: usize) -> usize {
    requested.clamp(DEFAULT_JOBS, MAX_JOBS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_jobs_clamps_into_range() {
        let cases: &[(usize, usize)] = &[(0, 1), (1, 1), (8, 8), (MAX_JOBS, MAX_JOBS), (1000, MAX_JOBS)];

        for (requested, expected) in cases {
            assert_eq!(
                effective_jobs(*requested),
                *expected,
                "effective_jobs({requested})"
            );
        }
    }
}
