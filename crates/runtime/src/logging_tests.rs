use super::*;
use log::{Level, Metadata, Record};
use serial_test::serial;

fn with_env_level<R>(value: Option<&str>, f: impl FnOnce() -> R) -> R {
    // SAFETY: env-touching tests are serialized.
    unsafe {
        match value {
            Some(v) => std::env::set_var(PROGRAM_LOG_LEVEL, v),
            None => std::env::remove_var(PROGRAM_LOG_LEVEL),
        }
    }
    let out = f();
    unsafe { std::env::remove_var(PROGRAM_LOG_LEVEL) };
    out
}

#[test]
#[serial]
fn unset_or_unusable_env_defaults_to_warn() {
    for value in [None, Some(""), Some("verbose"), Some("off")] {
        assert_eq!(with_env_level(value, level_from_env), Level::Warn, "{value:?}");
    }
}

#[test]
#[serial]
fn env_level_is_case_insensitive() {
    assert_eq!(with_env_level(Some("debug"), level_from_env), Level::Debug);
    assert_eq!(with_env_level(Some("Info"), level_from_env), Level::Info);
    assert_eq!(with_env_level(Some("TRACE"), level_from_env), Level::Trace);
    assert_eq!(with_env_level(Some("error"), level_from_env), Level::Error);
}

#[test]
fn info_logger_drops_debug_and_trace() {
    let logger = Logger { level: Level::Info };
    let enabled = |level| logger.enabled(&Metadata::builder().level(level).build());

    assert!(enabled(Level::Error));
    assert!(enabled(Level::Warn));
    assert!(enabled(Level::Info));
    assert!(!enabled(Level::Debug));
    assert!(!enabled(Level::Trace));
}

#[test]
fn line_carries_program_level_and_target() {
    let logger = Logger { level: Level::Info };
    let line = logger.format(
        &Record::builder()
            .level(Level::Info)
            .target("sqlfs_fs::listing")
            .args(format_args!("listed {} entries", 3))
            .build(),
    );

    assert!(line.ends_with("sqlfs INFO [sqlfs_fs::listing] listed 3 entries"), "{line}");
    // "YYYY-MM-DD HH:MM:SS.mmm " prefix
    assert_eq!(line.find(" sqlfs "), Some(23), "{line}");
}
