//! Main logger implementation

use super::{
    args::Arg,
    error::{LoggerError, Result},
    flags::Flags,
    formatter,
    level::Level,
    metrics::LoggerMetrics,
    queue::Target,
    settings,
    state::{LoggerState, WriterStatus},
    writer,
};
use crate::sinks::{ConsoleSink, Protocol, Sink, SocketHandle};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

const WRITER_THREAD_NAME: &str = "log-writer";

/// A logger with one background writer thread.
///
/// Log calls check the threshold, render the message on the calling
/// thread and queue it; the writer thread performs every sink write.
/// Share a logger between threads through `Arc<Logger>` or a scoped borrow.
///
/// # Example
///
/// ```no_run
/// use queue_logger::prelude::*;
///
/// let logger = Logger::new();
/// logger.set_level(Level::Info);
/// logger.set_flags(&[Flags::LEVEL, Flags::TIME]);
/// logger.start()?;
///
/// logger.info("listening on port {}", &[Arg::from(8080)]);
///
/// logger.stop();
/// # Ok::<(), LoggerError>(())
/// ```
pub struct Logger {
    state: Arc<LoggerState>,
    writer: Mutex<Option<thread::JoinHandle<()>>>,
}

impl Logger {
    /// A logger with default settings whose writer is not started yet.
    ///
    /// Messages logged before [`Logger::start`] wait in the queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(LoggerState::new()),
            writer: Mutex::new(None),
        }
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```no_run
    /// use queue_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .level(Level::Debug)
    ///     .flags(&[Flags::LEVEL, Flags::DATE])
    ///     .json(true)
    ///     .build()?;
    /// # Ok::<(), LoggerError>(())
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Spawn the writer thread.
    pub fn start(&self) -> Result<()> {
        let mut writer = self.writer.lock();
        if writer.is_some() {
            return Err(LoggerError::WriterAlreadyRunning);
        }

        self.state.set_status(WriterStatus::Running);
        let state = Arc::clone(&self.state);
        let spawned = thread::Builder::new()
            .name(WRITER_THREAD_NAME.to_string())
            .spawn(move || writer::run(&state));

        match spawned {
            Ok(handle) => {
                *writer = Some(handle);
                Ok(())
            }
            Err(e) => {
                self.state.set_status(WriterStatus::Idle);
                Err(e.into())
            }
        }
    }

    /// Stop the writer thread after it has written everything queued.
    ///
    /// Does nothing if the writer is not running.
    pub fn stop(&self) {
        // Held until the writer has exited so a concurrent start waits.
        let mut writer = self.writer.lock();
        let Some(handle) = writer.take() else {
            return;
        };

        self.state.set_status(WriterStatus::Stopping);
        if let Err(e) = handle.join() {
            eprintln!("[LOGGER ERROR] Writer thread panicked during shutdown: {:?}", e);
        }
        self.state.set_status(WriterStatus::Idle);
        drop(writer);

        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }

    pub fn is_running(&self) -> bool {
        self.writer.lock().is_some()
    }

    pub fn level(&self) -> Level {
        self.state.level()
    }

    pub fn set_level(&self, level: Level) {
        self.state.set_level(level);
    }

    pub fn flags(&self) -> Flags {
        self.state.flags()
    }

    /// Replace the flag set.
    pub fn set_flags(&self, flags: &[Flags]) {
        self.state.set_flags(flags);
    }

    /// Add to the flag set.
    pub fn add_flags(&self, flags: &[Flags]) {
        self.state.add_flags(flags);
    }

    pub fn is_json(&self) -> bool {
        self.state.is_json()
    }

    pub fn set_json(&self, enabled: bool) {
        self.state.set_json(enabled);
    }

    pub fn is_file_open(&self) -> bool {
        self.state.is_file_open()
    }

    /// Use the existing file at `path` as the log file, replacing any open one.
    pub fn open_file(&self, path: impl AsRef<Path>) -> Result<()> {
        self.state.open_file(path)
    }

    pub fn close_file(&self) {
        self.state.close_file();
    }

    pub fn is_socket_open(&self) -> bool {
        self.state.is_socket_open()
    }

    /// Connect the log socket to a Unix domain socket, replacing any open one.
    #[cfg(unix)]
    pub fn open_unix_socket(&self, path: &str) -> Result<SocketHandle> {
        self.state.open_unix_socket(path)
    }

    /// Connect the log socket to an IPv4 endpoint, replacing any open one.
    pub fn open_socket(&self, host: &str, port: u16, protocol: Protocol) -> Result<SocketHandle> {
        self.state.open_socket(host, port, protocol)
    }

    pub fn close_socket(&self) {
        self.state.close_socket();
    }

    /// Apply a `key=value` settings file. See [`crate::core::settings`].
    pub fn apply_settings_file(&self, path: impl AsRef<Path>) -> Result<()> {
        settings::apply_settings_file(&self.state, path)
    }

    /// Log to every active destination.
    ///
    /// A template that does not match `args` drops the message; the
    /// failure is reported on stderr and counted in [`LoggerMetrics`].
    pub fn log(&self, level: Level, template: &str, args: &[Arg]) {
        if let Err(e) = self.try_log(level, template, args) {
            eprintln!("[LOGGER ERROR] Dropped {} message: {}", level, e);
        }
    }

    /// Like [`Logger::log`], but returns the template error.
    pub fn try_log(&self, level: Level, template: &str, args: &[Arg]) -> Result<()> {
        self.submit(None, level, template, args)
    }

    /// Log to a single destination, if it is active.
    pub fn log_to(&self, target: Target, level: Level, template: &str, args: &[Arg]) {
        if let Err(e) = self.submit(Some(target), level, template, args) {
            eprintln!("[LOGGER ERROR] Dropped {} message for {}: {}", level, target, e);
        }
    }

    /// Queue already rendered text for a single destination, if it is active.
    ///
    /// No threshold check and no prefix. Returns whether anything was queued.
    pub fn write_raw(&self, target: Target, text: impl Into<String>) -> bool {
        self.state.dispatch(text.into(), Some(target)) > 0
    }

    fn submit(&self, target: Option<Target>, level: Level, template: &str, args: &[Arg]) -> Result<()> {
        let Some(flags) = self.state.admit(level) else {
            return Ok(());
        };

        let message = formatter::render(level, template, args, flags, flags.contains(Flags::JSON))
            .map_err(|e| {
                self.state.metrics().record_format_failure();
                LoggerError::from(e)
            })?;

        self.state.dispatch(message, target);
        Ok(())
    }

    #[inline]
    pub fn debug(&self, template: &str, args: &[Arg]) {
        self.log(Level::Debug, template, args);
    }

    #[inline]
    pub fn info(&self, template: &str, args: &[Arg]) {
        self.log(Level::Info, template, args);
    }

    #[inline]
    pub fn warn(&self, template: &str, args: &[Arg]) {
        self.log(Level::Warn, template, args);
    }

    #[inline]
    pub fn error(&self, template: &str, args: &[Arg]) {
        self.log(Level::Error, template, args);
    }

    #[inline]
    pub fn output(&self, template: &str, args: &[Arg]) {
        self.log(Level::Output, template, args);
    }

    /// Flush standard output and the open file and socket.
    ///
    /// Only data the writer thread has already written is affected; queued
    /// messages are not drained by this call.
    pub fn flush(&self) -> Result<()> {
        ConsoleSink::new().flush()?;
        let (file, socket) = self.state.open_sinks();
        if let Some(file) = file {
            file.flush()?;
        }
        if let Some(socket) = socket {
            socket.flush()?;
        }
        Ok(())
    }

    /// Queue elements not yet taken by the writer thread.
    pub fn pending(&self) -> usize {
        self.state.pending()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        self.state.metrics()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        // Everything queued is written before the writer exits.
        self.stop();

        // Never started: drain on this thread instead.
        if self.state.pending() > 0 {
            self.state.set_status(WriterStatus::Stopping);
            writer::run(&self.state);
            self.state.set_status(WriterStatus::Idle);
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// Settings are applied in the order level, flags, json, settings file,
/// log file; the writer is started last unless `autostart(false)` is set.
pub struct LoggerBuilder {
    level: Option<Level>,
    flags: Option<Vec<Flags>>,
    json: Option<bool>,
    settings_file: Option<PathBuf>,
    file: Option<PathBuf>,
    autostart: bool,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            level: None,
            flags: None,
            json: None,
            settings_file: None,
            file: None,
            autostart: true,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Replace the default flag set.
    #[must_use = "builder methods return a new value"]
    pub fn flags(mut self, flags: &[Flags]) -> Self {
        self.flags = Some(flags.to_vec());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn json(mut self, enabled: bool) -> Self {
        self.json = Some(enabled);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn settings_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_file = Some(path.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Whether `build` starts the writer thread. Default: true.
    #[must_use = "builder methods return a new value"]
    pub fn autostart(mut self, enabled: bool) -> Self {
        self.autostart = enabled;
        self
    }

    /// Build the Logger
    pub fn build(self) -> Result<Logger> {
        let logger = Logger::new();

        if let Some(level) = self.level {
            logger.set_level(level);
        }
        if let Some(flags) = &self.flags {
            logger.set_flags(flags);
        }
        if let Some(json) = self.json {
            logger.set_json(json);
        }
        if let Some(path) = &self.settings_file {
            logger.apply_settings_file(path)?;
        }
        if let Some(path) = &self.file {
            logger.open_file(path)?;
        }
        if self.autostart {
            logger.start()?;
        }

        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn file_logger(dir: &tempfile::TempDir) -> (Logger, PathBuf) {
        let path = dir.path().join("logger.log");
        fs::write(&path, "").unwrap();
        let logger = Logger::builder()
            .level(Level::Debug)
            .flags(&[Flags::LEVEL])
            .file(&path)
            .build()
            .unwrap();
        (logger, path)
    }

    #[test]
    fn test_builder_defaults() {
        let logger = Logger::builder().autostart(false).build().unwrap();
        assert_eq!(logger.level(), Level::Warn);
        assert_eq!(logger.flags(), Flags::LEVEL);
        assert!(!logger.is_running());
    }

    #[test]
    fn test_start_twice_fails() {
        let logger = Logger::new();
        logger.start().unwrap();
        assert!(matches!(logger.start(), Err(LoggerError::WriterAlreadyRunning)));
        logger.stop();
        assert!(!logger.is_running());
        logger.start().unwrap();
        logger.stop();
    }

    #[test]
    fn test_stop_without_start_is_noop() {
        let logger = Logger::new();
        logger.stop();
        assert!(!logger.is_running());
    }

    #[test]
    fn test_messages_before_start_are_kept() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("early.log");
        fs::write(&path, "").unwrap();

        let logger = Logger::new();
        logger.open_file(&path).unwrap();
        logger.warn("queued early", &[]);
        assert_eq!(logger.pending(), 2);

        logger.start().unwrap();
        logger.stop();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[ level=warn ] queued early\n");
        assert_eq!(logger.pending(), 0);
    }

    #[test]
    fn test_threshold_filters() {
        let dir = tempdir().unwrap();
        let (logger, path) = file_logger(&dir);
        logger.set_level(Level::Error);

        logger.debug("hidden", &[]);
        logger.warn("hidden", &[]);
        logger.error("shown {}", &[Arg::from(1)]);
        logger.output("shown {}", &[Arg::from(2)]);
        logger.log(Level::Disabled, "never", &[]);
        logger.stop();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[ level=error ] shown 1\n[ level=output ] shown 2\n"
        );
    }

    #[test]
    fn test_format_failure_is_counted_and_dropped() {
        let dir = tempdir().unwrap();
        let (logger, path) = file_logger(&dir);

        logger.info("{} {}", &[Arg::from("only one")]);
        let err = logger.try_log(Level::Info, "{}", &[]);
        assert!(matches!(err, Err(LoggerError::Format(_))));
        logger.stop();

        assert_eq!(logger.metrics().format_failures(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_log_to_single_target() {
        let dir = tempdir().unwrap();
        let (logger, path) = file_logger(&dir);

        logger.log_to(Target::File, Level::Info, "file only", &[]);
        logger.log_to(Target::Socket, Level::Info, "no socket", &[]);
        logger.stop();

        assert_eq!(logger.metrics().enqueued(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "[ level=info ] file only\n");
    }

    #[test]
    fn test_write_raw() {
        let dir = tempdir().unwrap();
        let (logger, path) = file_logger(&dir);

        assert!(logger.write_raw(Target::File, "raw text, no newline"));
        assert!(!logger.write_raw(Target::Socket, "dropped"));
        logger.stop();

        assert_eq!(fs::read_to_string(&path).unwrap(), "raw text, no newline");
    }

    #[test]
    fn test_drop_without_start_drains_queue() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("never_started.log");
        fs::write(&path, "").unwrap();

        let logger = Logger::new();
        logger.open_file(&path).unwrap();
        logger.error("written on drop", &[]);
        assert!(!logger.is_running());
        drop(logger);

        assert_eq!(fs::read_to_string(&path).unwrap(), "[ level=error ] written on drop\n");
    }

    #[test]
    fn test_concurrent_stop_and_start_never_hang() {
        use std::sync::Barrier;

        let dir = tempdir().unwrap();
        let (logger, path) = file_logger(&dir);
        logger.set_flags(&[Flags::NONE]);
        let logger = Arc::new(logger);

        for i in 0..300 {
            if !logger.is_running() {
                logger.start().unwrap();
            }
            logger.log_to(Target::File, Level::Info, "round {}", &[Arg::from(i)]);

            let barrier = Arc::new(Barrier::new(2));
            let stopper = {
                let logger = Arc::clone(&logger);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    logger.stop();
                })
            };
            barrier.wait();
            // Fails with WriterAlreadyRunning when it wins the race.
            let _ = logger.start();
            stopper.join().unwrap();
        }
        logger.stop();

        assert!(!logger.is_running());
        assert_eq!(logger.pending(), 0);
        let expected: String = (0..300).map(|i| format!("round {}\n", i)).collect();
        assert_eq!(fs::read_to_string(&path).unwrap(), expected);
    }

    #[test]
    fn test_drop_drains_queue() {
        let dir = tempdir().unwrap();
        let (logger, path) = file_logger(&dir);
        for i in 0..20 {
            logger.info("message {}", &[Arg::from(i)]);
        }
        drop(logger);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 20);
        assert!(content.ends_with("[ level=info ] message 19\n"));
    }
}
