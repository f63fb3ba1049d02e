use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{FsError, Result};

/// Expand a leading `~` or `~/` against `home` and check that the result exists.
///
/// `home` is `None` when the home directory could not be determined; that is
/// only an error for paths that actually need it.
pub fn resolve_path(raw: &str, home: Option<&Path>) -> Result<PathBuf> {
    let path = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => {
            let home = home.ok_or(FsError::HomeDirUnavailable)?;
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(raw),
    };

    if !path.exists() {
        return Err(FsError::PathNotFound(path));
    }

    debug!("[resolve] {raw:?} -> {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expands_to_home() {
        let home = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(home.path().join("scripts")).expect("mkdir");

        let cases: &[(&str, PathBuf)] = &[
            ("~", home.path().to_path_buf()),
            ("~/", home.path().to_path_buf()),
            ("~/scripts", home.path().join("scripts")),
        ];

        for (raw, expected) in cases {
            let got = resolve_path(raw, Some(home.path())).expect("resolve");
            assert_eq!(&got, expected, "resolve_path({raw:?})");
        }
    }

    #[test]
    fn absolute_paths_are_kept_verbatim() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let raw = dir.path().to_str().expect("utf-8 temp path");
        assert_eq!(resolve_path(raw, None).expect("resolve"), dir.path());
    }

    #[test]
    fn tilde_user_form_is_not_expanded() {
        // `~bob/x` is treated as a literal relative path
        let err = resolve_path("~bob/definitely-missing", Some(Path::new("/"))).unwrap_err();
        assert!(matches!(err, FsError::PathNotFound(ref p) if p == Path::new("~bob/definitely-missing")));
    }

    #[test]
    fn missing_home_is_an_error_only_for_tilde_paths() {
        assert!(matches!(
            resolve_path("~/", None),
            Err(FsError::HomeDirUnavailable)
        ));
        assert!(resolve_path(".", None).is_ok());
    }

    #[test]
    fn nonexistent_path_is_reported() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let missing = dir.path().join("nope");
        let err = resolve_path(missing.to_str().expect("utf-8"), None).unwrap_err();
        assert!(matches!(err, FsError::PathNotFound(ref p) if *p == missing));
    }
}
