//! Core logger types: configuration store, formatter, queue and writer

pub mod args;
pub mod error;
pub mod flags;
pub mod formatter;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod queue;
pub mod settings;
pub mod state;
mod writer;

pub use args::{substitute, Arg};
pub use error::{FormatError, LoggerError, Result};
pub use flags::Flags;
pub use formatter::{render, render_message, RenderContext};
pub use level::Level;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use queue::{Destination, QueueElement, Target};
pub use settings::{apply_settings, apply_settings_file};
pub use state::LoggerState;
