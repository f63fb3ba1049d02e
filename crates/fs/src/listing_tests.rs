use super::*;

use std::{
    collections::BTreeMap,
    fs::{File, create_dir, write},
    time::Duration,
};

use crate::identity::IdentityResolver;

struct FixedNames;

impl IdentityResolver for FixedNames {
    fn user_name(&self, _uid: u32) -> Option<String> {
        Some("alice".to_string())
    }

    fn group_name(&self, _gid: u32) -> Option<String> {
        Some("staff".to_string())
    }
}

fn by_name(records: Vec<FileRecord>) -> BTreeMap<String, FileRecord> {
    records.into_iter().map(|r| (r.name.clone(), r)).collect()
}

fn sample_dir() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().expect("create temp dir");
    write(tmp.path().join("a.sh"), b"0123456789").expect("write a.sh");
    write(tmp.path().join("b.txt"), [b'x'; 20]).expect("write b.txt");
    write(tmp.path().join(".bashrc"), b"").expect("write .bashrc");
    create_dir(tmp.path().join("sub")).expect("mkdir sub");
    tmp
}

#[test]
fn to_local_treats_none_as_epoch() {
    assert_eq!(to_local(None).timestamp(), 0);
    assert_eq!(
        to_local(Some(UNIX_EPOCH + Duration::from_secs(42))).timestamp(),
        42
    );
}

#[test]
fn extension_is_text_after_last_dot() {
    let cases = [
        ("a.sh", "sh"),
        ("archive.tar.gz", "gz"),
        (".bashrc", "bashrc"),
        ("Makefile", ""),
        ("trailing.", ""),
        ("UPPER.TXT", "TXT"),
    ];
    for (name, want) in cases {
        assert_eq!(extension_of(name), want, "{name}");
    }
}

#[test]
fn list_dir_builds_one_record_per_immediate_entry() {
    let tmp = sample_dir();
    write(tmp.path().join("sub").join("nested.rs"), b"fn main() {}").expect("write nested");

    let records = by_name(list_dir(tmp.path(), &FixedNames, 1).expect("list_dir"));

    let names: Vec<&str> = records.keys().map(String::as_str).collect();
    assert_eq!(names, vec![".bashrc", "a.sh", "b.txt", "sub"]);

    let a = &records["a.sh"];
    assert_eq!(a.size, 10);
    assert_eq!(a.extension, "sh");
    assert_eq!(a.kind, FileKind::File);
    assert_eq!(a.path, tmp.path().join("a.sh").to_string_lossy());
    assert_eq!(a.owner, "alice");
    assert_eq!(a.group, "staff");
    assert!(a.links >= 1);

    assert_eq!(records["b.txt"].size, 20);
    assert_eq!(records[".bashrc"].extension, "bashrc");
    assert!(records["sub"].is_dir());
}

#[test]
fn parallel_listing_matches_sequential() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    for i in 0..(BATCH_SIZE * 2 + 5) {
        write(tmp.path().join(format!("f{i}.dat")), vec![0u8; i]).expect("write file");
    }

    let seq = by_name(list_dir(tmp.path(), &FixedNames, 1).expect("sequential"));
    let par = by_name(list_dir(tmp.path(), &FixedNames, 4).expect("parallel"));

    assert_eq!(seq.len(), BATCH_SIZE * 2 + 5);
    assert_eq!(
        seq.keys().collect::<Vec<_>>(),
        par.keys().collect::<Vec<_>>()
    );
    for (name, rec) in &seq {
        assert_eq!(rec.size, par[name].size, "size of {name}");
    }
}

#[test]
fn missing_directory_is_a_read_dir_error() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let missing = tmp.path().join("missing");

    let err = list_dir(&missing, &FixedNames, 1).unwrap_err();
    assert!(matches!(err, FsError::ReadDir { ref path, .. } if *path == missing));
}

#[test]
fn created_falls_back_to_modified_or_birth_time() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let path = tmp.path().join("old.log");
    let file = File::create(&path).expect("create");
    let mtime = UNIX_EPOCH + Duration::from_secs(1_600_000_000);
    file.set_modified(mtime).expect("set mtime");
    drop(file);

    let records = list_dir(tmp.path(), &FixedNames, 1).expect("list_dir");
    let rec = &records[0];
    assert_eq!(rec.modified.timestamp(), 1_600_000_000);
    // birth time (if any) is "now", never earlier than the file was made
    assert!(rec.created.timestamp() >= 1_600_000_000);

    match std::fs::metadata(&path).and_then(|m| m.created()) {
        Ok(birth) => {
            assert_eq!(rec.created, to_local(Some(birth)));
            assert!(rec.created > rec.modified, "birth time is not the mtime copy");
        }
        Err(_) => assert_eq!(rec.created, rec.modified),
    }
}

#[cfg(unix)]
#[test]
fn symlinks_are_followed_and_marked() {
    let tmp = sample_dir();
    std::os::unix::fs::symlink(tmp.path().join("b.txt"), tmp.path().join("link.txt"))
        .expect("symlink");

    let records = by_name(list_dir(tmp.path(), &FixedNames, 1).expect("list_dir"));
    let link = &records["link.txt"];
    assert_eq!(link.kind, FileKind::Symlink);
    assert_eq!(link.size, 20);
}

#[cfg(unix)]
#[test]
fn dangling_symlink_fails_the_whole_listing() {
    for jobs in [1, 3] {
        let tmp = sample_dir();
        let dangling = tmp.path().join("dangling");
        std::os::unix::fs::symlink(tmp.path().join("gone"), &dangling).expect("symlink");

        let err = list_dir(tmp.path(), &FixedNames, jobs).unwrap_err();
        assert!(
            matches!(err, FsError::Stat { ref path, .. } if *path == dangling),
            "jobs={jobs}: {err:?}"
        );
    }
}

#[test]
fn records_serialize_with_output_keys() {
    let tmp = sample_dir();
    let records = by_name(list_dir(tmp.path(), &FixedNames, 1).expect("list_dir"));

    let json = serde_json::to_value(&records["a.sh"]).expect("serialize");
    let obj = json.as_object().expect("object");
    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["createdt", "extension", "group", "lastmod", "name", "owner", "path", "size"]
    );
    assert_eq!(obj["size"], 10);
    assert_eq!(
        obj["lastmod"],
        crate::record::format_timestamp(&records["a.sh"].modified)
    );
}
