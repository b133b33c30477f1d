//! Settings file tests

use queue_logger::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn settings_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create settings file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write settings");
    file
}

#[test]
fn test_level_and_flags_round_trip() {
    let settings = settings_file("level=debug\nflags=level,date,time,pid,tid\n");

    let logger = Logger::new();
    logger
        .apply_settings_file(settings.path())
        .expect("Failed to apply settings");

    assert_eq!(logger.level(), Level::Debug);
    assert_eq!(logger.flags().bits(), 31);
    assert!(!logger.is_json());
}

#[test]
fn test_settings_open_log_file_and_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = temp_dir.path().join("configured.log");
    fs::write(&log_path, "").expect("Failed to create log file");

    let settings = settings_file(&format!(
        "level = info\nflags = level\njson = true\n\nfile = {}\n",
        log_path.display()
    ));

    let logger = Logger::builder()
        .settings_file(settings.path())
        .build()
        .expect("Failed to build logger");
    assert!(logger.is_file_open());

    logger.info("configured", &[]);
    logger.debug("filtered", &[]);
    logger.stop();

    assert_eq!(
        fs::read_to_string(&log_path).unwrap(),
        "{ \"level\": \"info\", \"message\": \"configured\" }\n"
    );
}

#[test]
fn test_invalid_key_halts_with_partial_application() {
    let settings = settings_file("level=error\nflags=time\nverbosity=high\nlevel=debug\n");

    let logger = Logger::new();
    let err = logger.apply_settings_file(settings.path()).unwrap_err();

    assert!(matches!(err, LoggerError::InvalidKey(ref key) if key == "verbosity"));
    assert!(err.is_configuration());
    assert_eq!(logger.level(), Level::Error);
    assert_eq!(logger.flags(), Flags::TIME);
}

#[test]
fn test_malformed_line_reports_line_number() {
    let settings = settings_file("level=info\n\njust some words\n");

    let logger = Logger::new();
    let err = logger.apply_settings_file(settings.path()).unwrap_err();

    match err {
        LoggerError::MalformedLine { line_number, line } => {
            assert_eq!(line_number, 3);
            assert_eq!(line, "just some words");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(logger.level(), Level::Info);
}

#[test]
fn test_missing_settings_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = Logger::new();

    let err = logger
        .apply_settings_file(temp_dir.path().join("absent.conf"))
        .unwrap_err();
    assert!(matches!(err, LoggerError::SettingsFileNotFound { .. }));

    let err = logger.apply_settings_file("").unwrap_err();
    assert!(matches!(err, LoggerError::EmptyPath));
}

#[test]
fn test_builder_fails_on_bad_settings() {
    let settings = settings_file("level=shouting\n");
    let result = Logger::builder().settings_file(settings.path()).build();
    assert!(matches!(result, Err(LoggerError::InvalidLevel(_))));
}
