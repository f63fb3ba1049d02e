use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FsError {
    #[error("cannot determine the home directory of the current user")]
    HomeDirUnavailable,

    #[error("check file exists: \"{}\" does not exist", .0.display())]
    PathNotFound(PathBuf),

    #[error("read dir \"{}\"", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("file status \"{}\"", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, FsError>;
