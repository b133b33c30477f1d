//! Sink adapters
//!
//! A sink is a sequential destination for rendered text. Sinks are only
//! written by the writer thread; producers never touch them directly.

pub mod console;
pub mod file;
pub mod socket;

pub use console::ConsoleSink;
pub use file::FileSink;
pub use socket::{Protocol, SocketHandle, SocketKind, SocketSink, MAX_UNIX_PATH_LEN};

use crate::core::Result;

pub trait Sink: Send + Sync {
    /// Write `text` exactly as rendered, with no framing.
    fn write(&self, text: &str) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}
