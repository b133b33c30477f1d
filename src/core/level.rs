//! Severity level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message severity, ordered from least to most important.
///
/// `Output` is an "always show" category that sits above `Error`.
/// `Disabled` is only meaningful as a threshold: setting it silences
/// every message, and a message logged at `Disabled` is never emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Level {
    Debug = 0,
    Info = 1,
    #[default]
    #[serde(alias = "warning")]
    Warn = 2,
    Error = 3,
    Output = 4,
    Disabled = 5,
}

impl Level {
    /// Every level that can be attached to a message, in ascending order.
    pub const EMITTABLE: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Output,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Output => "output",
            // Not a message level, so it has no display name of its own.
            Level::Disabled => "unknown",
        }
    }

    /// Whether a message at `self` passes the threshold `min`.
    #[inline]
    pub fn passes(self, min: Level) -> bool {
        self != Level::Disabled && self >= min
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "output" => Ok(Level::Output),
            "disabled" => Ok(Level::Disabled),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
