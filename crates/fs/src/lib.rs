mod config;
mod error;
mod identity;
mod listing;
mod mode;
mod record;
mod resolve;

pub use error::{FsError, Result};
pub use identity::{IdentityResolver, SystemIdentityResolver};
pub use listing::list_dir;
pub use mode::FileMode;
pub use record::{FileKind, FileRecord, TIMESTAMP_FORMAT, format_timestamp};
pub use resolve::resolve_path;
