use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};

use crate::mode::FileMode;

/// Canonical text form of record timestamps, used for output and for `=`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    File,
    Dir,
    Symlink,
}

impl FileKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::File => "file",
            FileKind::Dir => "dir",
            FileKind::Symlink => "symlink",
        }
    }
}

/// Metadata for one directory entry, built once per query run.
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    /// File name
    pub name: String,
    /// Directory joined with the name, as listed
    pub path: String,
    /// Text after the last dot without the dot, empty when absent
    pub extension: String,
    #[serde(rename = "lastmod", serialize_with = "serialize_timestamp")]
    pub modified: DateTime<Local>,
    /// Birth time where the platform reports one, otherwise `modified`.
    /// This is the real creation time when known, never a plain copy of
    /// the modification time on platforms that have one.
    #[serde(rename = "createdt", serialize_with = "serialize_timestamp")]
    pub created: DateTime<Local>,
    pub owner: String,
    pub group: String,
    /// File size in bytes
    pub size: u64,
    #[serde(skip)]
    pub kind: FileKind,
    #[serde(skip)]
    pub mode: FileMode,
    /// Hard link count (1 on platforms without the notion)
    #[serde(skip)]
    pub links: u64,
}

impl FileRecord {
    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Dir
    }
}

pub fn format_timestamp(ts: &DateTime<Local>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Local>, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&ts.format(TIMESTAMP_FORMAT))
}
