//! Console sink implementation

use super::Sink;
use crate::core::Result;
use std::io::Write;

/// Writes rendered text to the process's standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub const fn new() -> Self {
        ConsoleSink
    }
}

impl Sink for ConsoleSink {
    fn write(&self, text: &str) -> Result<()> {
        std::io::stdout().lock().write_all(text.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
