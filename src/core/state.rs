//! Shared logger state
//!
//! One mutex guards the threshold, the flags, the open file and socket,
//! the delivery queue and the writer status. Critical sections only move
//! data around; opening files and sockets happens before the lock is taken
//! and all sink writes happen on the writer thread.

use super::{
    error::Result,
    flags::Flags,
    level::Level,
    metrics::LoggerMetrics,
    queue::{Destination, QueueElement, Target},
};
use crate::sinks::{FileSink, Protocol, SocketHandle, SocketSink};
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WriterStatus {
    Idle,
    Running,
    Stopping,
}

pub(crate) struct Inner {
    pub(crate) level: Level,
    pub(crate) flags: Flags,
    pub(crate) file: Option<Arc<FileSink>>,
    pub(crate) socket: Option<Arc<SocketSink>>,
    pub(crate) queue: VecDeque<QueueElement>,
    pub(crate) status: WriterStatus,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            level: Level::Warn,
            flags: Flags::LEVEL,
            file: None,
            socket: None,
            queue: VecDeque::new(),
            status: WriterStatus::Idle,
        }
    }
}

/// The configuration store and delivery queue shared by producers and
/// the writer thread.
pub struct LoggerState {
    inner: Mutex<Inner>,
    wakeup: Condvar,
    metrics: LoggerMetrics,
}

impl LoggerState {
    /// Threshold `warn`, flags `level`, no file, no socket, empty queue.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            wakeup: Condvar::new(),
            metrics: LoggerMetrics::new(),
        }
    }

    pub fn level(&self) -> Level {
        self.inner.lock().level
    }

    pub fn set_level(&self, level: Level) {
        self.inner.lock().level = level;
    }

    pub fn flags(&self) -> Flags {
        self.inner.lock().flags
    }

    /// Replace the flag set with the union of `flags`.
    pub fn set_flags(&self, flags: &[Flags]) {
        self.inner.lock().flags = Flags::union_of(flags);
    }

    /// OR `flags` into the current flag set.
    pub fn add_flags(&self, flags: &[Flags]) {
        self.inner.lock().flags.insert(Flags::union_of(flags));
    }

    pub fn is_json(&self) -> bool {
        self.inner.lock().flags.contains(Flags::JSON)
    }

    pub fn set_json(&self, enabled: bool) {
        let mut inner = self.inner.lock();
        if enabled {
            inner.flags.insert(Flags::JSON);
        } else {
            inner.flags.remove(Flags::JSON);
        }
    }

    pub fn is_file_open(&self) -> bool {
        self.inner.lock().file.is_some()
    }

    /// Open an existing file for append and make it the log file.
    ///
    /// The previous file, if any, is closed only once the new one is open.
    /// Messages already queued for the previous file are still written to it.
    pub fn open_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let sink = Arc::new(FileSink::open(path)?);
        let previous = self.inner.lock().file.replace(sink);
        drop(previous);
        Ok(())
    }

    pub fn close_file(&self) {
        let previous = self.inner.lock().file.take();
        drop(previous);
    }

    pub fn is_socket_open(&self) -> bool {
        self.inner.lock().socket.is_some()
    }

    /// Connect to a Unix domain stream socket and make it the log socket.
    #[cfg(unix)]
    pub fn open_unix_socket(&self, path: &str) -> Result<SocketHandle> {
        let sink = SocketSink::connect_unix(path)?;
        Ok(self.install_socket(sink))
    }

    /// Connect to an IPv4 TCP or UDP endpoint and make it the log socket.
    pub fn open_socket(&self, host: &str, port: u16, protocol: Protocol) -> Result<SocketHandle> {
        let sink = SocketSink::connect_inet(host, port, protocol)?;
        Ok(self.install_socket(sink))
    }

    fn install_socket(&self, sink: SocketSink) -> SocketHandle {
        let handle = sink.handle();
        let previous = self.inner.lock().socket.replace(Arc::new(sink));
        drop(previous);
        handle
    }

    pub fn close_socket(&self) {
        let previous = self.inner.lock().socket.take();
        drop(previous);
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Number of queue elements not yet taken by the writer thread.
    pub fn pending(&self) -> usize {
        self.inner.lock().queue.len()
    }

    /// The flags to render with, or `None` if `level` is below the threshold.
    pub(crate) fn admit(&self, level: Level) -> Option<Flags> {
        let inner = self.inner.lock();
        level.passes(inner.level).then_some(inner.flags)
    }

    /// Queue `message` for every active destination, or only for `target`.
    ///
    /// The console is always active; the file and socket are active when
    /// open at this moment. Returns the number of elements queued.
    pub(crate) fn dispatch(&self, message: String, target: Option<Target>) -> usize {
        let mut inner = self.inner.lock();
        let mut destinations = Vec::with_capacity(3);

        if matches!(target, None | Some(Target::Console)) {
            destinations.push(Destination::Console);
        }
        if matches!(target, None | Some(Target::File)) {
            if let Some(file) = &inner.file {
                destinations.push(Destination::File(Arc::clone(file)));
            }
        }
        if matches!(target, None | Some(Target::Socket)) {
            if let Some(socket) = &inner.socket {
                destinations.push(Destination::Socket(Arc::clone(socket)));
            }
        }

        let count = destinations.len();
        for destination in destinations {
            inner
                .queue
                .push_back(QueueElement::new(message.clone(), destination));
            self.metrics.record_enqueued();
        }
        drop(inner);

        if count > 0 {
            self.wakeup.notify_one();
        }
        count
    }

    /// Block until there is work or a stop was requested, then take the
    /// whole queue. `None` means stop was requested and the queue is empty.
    pub(crate) fn next_batch(&self) -> Option<VecDeque<QueueElement>> {
        let mut inner = self.inner.lock();
        while inner.queue.is_empty() && inner.status != WriterStatus::Stopping {
            self.wakeup.wait(&mut inner);
        }
        if inner.queue.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut inner.queue))
        }
    }

    #[cfg(test)]
    pub(crate) fn status(&self) -> WriterStatus {
        self.inner.lock().status
    }

    pub(crate) fn set_status(&self, status: WriterStatus) {
        self.inner.lock().status = status;
        if status == WriterStatus::Stopping {
            self.wakeup.notify_all();
        }
    }

    /// Open file and socket sinks, for flushing outside the lock.
    pub(crate) fn open_sinks(&self) -> (Option<Arc<FileSink>>, Option<Arc<SocketSink>>) {
        let inner = self.inner.lock();
        (inner.file.clone(), inner.socket.clone())
    }

    #[cfg(test)]
    pub(crate) fn lock(&self) -> parking_lot::MutexGuard<'_, Inner> {
        self.inner.lock()
    }
}

impl Default for LoggerState {
    fn default() -> Self {
        Self::new()
    }
}
