use std::{
    fs::{self, DirEntry, Metadata},
    path::Path,
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::{SystemTime, UNIX_EPOCH},
};

use chrono::{DateTime, Local};
use crossbeam::channel::{self, Receiver, Sender};
use log::debug;

use crate::{
    config::BATCH_SIZE,
    error::{FsError, Result},
    identity::IdentityResolver,
    mode::FileMode,
    record::{FileKind, FileRecord},
};

/// List the immediate entries of `dir` and build a record for each one.
///
/// With `jobs > 1` the per-entry stat and owner lookups run on a scoped
/// worker pool. Either way the first failing entry fails the whole listing;
/// callers key the records by path, so the returned order is unspecified.
pub fn list_dir(
    dir: &Path,
    resolver: &dyn IdentityResolver,
    jobs: usize,
) -> Result<Vec<FileRecord>> {
    let read_err = |source| FsError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let entries = fs::read_dir(dir)
        .map_err(read_err)?
        .collect::<std::io::Result<Vec<DirEntry>>>()
        .map_err(read_err)?;

    debug!(
        "[list_dir] {} entries in {:?} (jobs={jobs})",
        entries.len(),
        dir
    );

    if jobs <= 1 || entries.len() < 2 {
        entries
            .iter()
            .map(|entry| inspect_entry(entry, resolver))
            .collect()
    } else {
        inspect_parallel(entries, resolver, jobs)
    }
}

fn inspect_parallel(
    entries: Vec<DirEntry>,
    resolver: &dyn IdentityResolver,
    jobs: usize,
) -> Result<Vec<FileRecord>> {
    let total = entries.len();
    let (work_tx, work_rx) = channel::unbounded::<DirEntry>();
    let (out_tx, out_rx) = channel::unbounded::<Result<Vec<FileRecord>>>();

    for entry in entries {
        let _ = work_tx.send(entry);
    }
    // Workers stop once the queue is drained.
    drop(work_tx);

    let failed = AtomicBool::new(false);

    thread::scope(|s| {
        for _ in 0..jobs.min(total) {
            let work_rx = work_rx.clone();
            let out_tx = out_tx.clone();
            let failed = &failed;

            s.spawn(move || worker_loop(work_rx, out_tx, resolver, failed));
        }
    });
    drop(out_tx);

    let mut records = Vec::with_capacity(total);
    for batch in out_rx.iter() {
        records.extend(batch?);
    }
    Ok(records)
}

/// Stat entries from the queue and send them back in batches.
/// Stops early once any worker has reported a failure.
fn worker_loop(
    work_rx: Receiver<DirEntry>,
    out_tx: Sender<Result<Vec<FileRecord>>>,
    resolver: &dyn IdentityResolver,
    failed: &AtomicBool,
) {
    let mut batch = Vec::with_capacity(BATCH_SIZE);

    for entry in work_rx.iter() {
        if failed.load(Ordering::Acquire) {
            return;
        }

        match inspect_entry(&entry, resolver) {
            Ok(record) => {
                batch.push(record);
                if batch.len() >= BATCH_SIZE {
                    let to_send = std::mem::take(&mut batch);
                    if out_tx.send(Ok(to_send)).is_err() {
                        return;
                    }
                }
            }
            Err(e) => {
                failed.store(true, Ordering::Release);
                let _ = out_tx.send(Err(e));
                return;
            }
        }
    }

    if !batch.is_empty() {
        let _ = out_tx.send(Ok(batch));
    }
}

/// Build a record for one entry. Metadata follows symlinks, so a dangling
/// link is an error.
fn inspect_entry(entry: &DirEntry, resolver: &dyn IdentityResolver) -> Result<FileRecord> {
    let path = entry.path();
    let metadata = fs::metadata(&path).map_err(|source| FsError::Stat {
        path: path.clone(),
        source,
    })?;

    let is_symlink = entry.file_type().map(|t| t.is_symlink()).unwrap_or(false);
    let kind = if is_symlink {
        FileKind::Symlink
    } else if metadata.is_dir() {
        FileKind::Dir
    } else {
        FileKind::File
    };

    let name = entry.file_name().to_string_lossy().into_owned();
    let extension = extension_of(&name).to_string();

    let modified = to_local(metadata.modified().ok());
    // Not every filesystem records a birth time.
    let created = metadata
        .created()
        .ok()
        .map(|t| to_local(Some(t)))
        .unwrap_or(modified);

    let owner_info = OwnerInfo::from_metadata(&metadata);

    Ok(FileRecord {
        name,
        path: path.to_string_lossy().into_owned(),
        extension,
        modified,
        created,
        owner: owner_info
            .uid
            .map(|uid| resolver.owner_of(uid))
            .unwrap_or_default(),
        group: owner_info
            .gid
            .map(|gid| resolver.group_of(gid))
            .unwrap_or_default(),
        size: metadata.len(),
        kind,
        mode: owner_info.mode,
        links: owner_info.links,
    })
}

/// Platform specific bits of the metadata.
struct OwnerInfo {
    uid: Option<u32>,
    gid: Option<u32>,
    mode: FileMode,
    links: u64,
}

impl OwnerInfo {
    #[cfg(unix)]
    fn from_metadata(metadata: &Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;

        Self {
            uid: Some(metadata.uid()),
            gid: Some(metadata.gid()),
            mode: FileMode::from_raw(metadata.mode()),
            links: metadata.nlink(),
        }
    }

    #[cfg(not(unix))]
    fn from_metadata(metadata: &Metadata) -> Self {
        let mode = if metadata.permissions().readonly() {
            FileMode::OWNER_READ | FileMode::GROUP_READ | FileMode::OTHER_READ
        } else {
            FileMode::OWNER_READ | FileMode::OWNER_WRITE | FileMode::GROUP_READ | FileMode::OTHER_READ
        };

        Self {
            uid: None,
            gid: None,
            mode,
            links: 1,
        }
    }
}

/// Text after the last `.` of a file name, so `.bashrc` yields `bashrc`.
fn extension_of(name: &str) -> &str {
    name.rsplit_once('.').map_or("", |(_, ext)| ext)
}

fn to_local(t: Option<SystemTime>) -> DateTime<Local> {
    DateTime::<Local>::from(t.unwrap_or(UNIX_EPOCH))
}

#[cfg(test)]
#[path = "listing_tests.rs"]
mod tests;
