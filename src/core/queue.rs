//! Delivery queue elements

use crate::sinks::{ConsoleSink, FileSink, Sink, SocketSink};
use std::fmt;
use std::sync::Arc;

/// Where a queued message goes, together with the sink that writes it.
///
/// File and socket destinations hold the sink that was open when the
/// message was enqueued, so closing or replacing the sink later does not
/// redirect or lose messages that are already queued.
#[derive(Clone)]
pub enum Destination {
    Console,
    File(Arc<FileSink>),
    Socket(Arc<SocketSink>),
}

impl Destination {
    pub fn target(&self) -> Target {
        match self {
            Destination::Console => Target::Console,
            Destination::File(_) => Target::File,
            Destination::Socket(_) => Target::Socket,
        }
    }

    pub fn sink(&self) -> &dyn Sink {
        static CONSOLE: ConsoleSink = ConsoleSink::new();
        match self {
            Destination::Console => &CONSOLE,
            Destination::File(file) => file.as_ref(),
            Destination::Socket(socket) => socket.as_ref(),
        }
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Console => f.write_str("Console"),
            Destination::File(file) => f.debug_tuple("File").field(&file.path()).finish(),
            Destination::Socket(socket) => {
                f.debug_tuple("Socket").field(&socket.address()).finish()
            }
        }
    }
}

/// Destination tag without a handle, used to route a message explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Console,
    File,
    Socket,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Console => f.write_str("console"),
            Target::File => f.write_str("file"),
            Target::Socket => f.write_str("socket"),
        }
    }
}

/// A rendered message waiting for the writer thread.
#[derive(Debug, Clone)]
pub struct QueueElement {
    pub message: String,
    pub destination: Destination,
}

impl QueueElement {
    pub fn new(message: String, destination: Destination) -> Self {
        Self {
            message,
            destination,
        }
    }

    /// Write the message to its destination.
    pub fn deliver(&self) -> crate::core::Result<()> {
        self.destination.sink().write(&self.message)
    }
}
