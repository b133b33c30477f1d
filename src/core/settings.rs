//! Settings file parser
//!
//! A settings file holds one `key=value` pair per line:
//!
//! ```text
//! level = debug
//! flags = level, date, time
//! json  = false
//! file  = /var/log/app.log
//! ```
//!
//! Whitespace is removed everywhere in a line, not only at the ends, so
//! `fla gs = le vel` reads as `flags=level`. Lines are applied in order and
//! parsing stops at the first error; lines applied before it stay applied.

use super::{
    error::{LoggerError, Result},
    flags::Flags,
    level::Level,
    state::LoggerState,
};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Apply the settings file at `path` to `state`.
pub fn apply_settings_file(state: &LoggerState, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(LoggerError::EmptyPath);
    }
    if !path.exists() {
        return Err(LoggerError::settings_not_found(path));
    }

    let file = File::open(path)?;
    apply_settings(state, BufReader::new(file))
}

/// Apply settings text read from `reader` to `state`.
pub fn apply_settings<R: BufRead>(state: &LoggerState, reader: R) -> Result<()> {
    for (index, line) in reader.lines().enumerate() {
        apply_line(state, index + 1, &line?)?;
    }
    Ok(())
}

fn apply_line(state: &LoggerState, line_number: usize, line: &str) -> Result<()> {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Ok(());
    }

    let (key, value) = compact
        .split_once('=')
        .ok_or_else(|| LoggerError::malformed_line(line_number, line))?;

    match key {
        "level" => {
            let level: Level = value
                .parse()
                .map_err(|_| LoggerError::InvalidLevel(value.to_string()))?;
            state.set_level(level);
        }
        "flags" => {
            state.set_flags(&[Flags::NONE]);
            for name in value.split(',') {
                let flag: Flags = name
                    .parse()
                    .map_err(|_| LoggerError::InvalidFlags(name.to_string()))?;
                state.add_flags(&[flag]);
            }
        }
        "json" => match value {
            "true" => state.set_json(true),
            "false" => state.set_json(false),
            _ => return Err(LoggerError::InvalidJsonValue(value.to_string())),
        },
        "file" => {
            state
                .open_file(value)
                .map_err(|e| LoggerError::file_open_failed(value, e))?;
        }
        _ => return Err(LoggerError::InvalidKey(key.to_string())),
    }

    Ok(())
}
