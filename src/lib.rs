//! # Queue Logger
//!
//! A process-embedded logging engine. Log calls are filtered by a severity
//! threshold, rendered on the calling thread with an optional prefix, and
//! queued; a single background writer thread performs every write to the
//! console, the log file and the log socket in FIFO order.
//!
//! ## Features
//!
//! - **Flag-driven prefixes**: level, date, time, pid and tid fields in
//!   plain `[ key=value ]` or JSON object form
//! - **Non-blocking producers**: callers never wait on sink I/O
//! - **Graceful shutdown**: stopping the writer drains the whole queue
//! - **Settings files**: bulk configuration from `key=value` text

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Arg, Flags, FormatError, Level, Logger, LoggerBuilder, LoggerError, LoggerMetrics,
        Result, Target,
    };
    pub use crate::sinks::{Protocol, SocketHandle};
}

pub use crate::core::{
    apply_settings, apply_settings_file, render, render_message, substitute, Arg, Destination,
    Flags, FormatError, Level, Logger, LoggerBuilder, LoggerError, LoggerMetrics, LoggerState,
    QueueElement, RenderContext, Result, Target,
};
pub use sinks::{
    ConsoleSink, FileSink, Protocol, Sink, SocketHandle, SocketKind, SocketSink,
    MAX_UNIX_PATH_LEN,
};
