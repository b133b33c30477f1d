//! Logging macros for ergonomic log message formatting.
//!
//! Each argument after the template is converted with [`Arg::from`], so any
//! string, integer, float, `bool` or `char` can be passed directly.
//!
//! [`Arg::from`]: crate::Arg
//!
//! # Examples
//!
//! ```
//! use queue_logger::prelude::*;
//! use queue_logger::info;
//!
//! let logger = Logger::new();
//! logger.set_level(Level::Info);
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use queue_logger::prelude::*;
/// # let logger = Logger::new();
/// use queue_logger::log;
/// log!(logger, Level::Warn, "Simple message");
/// log!(logger, Level::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger.log($level, $template, &[$($crate::Arg::from($arg)),*])
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($rest)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($rest)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use queue_logger::prelude::*;
/// # let logger = Logger::new();
/// use queue_logger::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($rest)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($rest)+)
    };
}

/// Log a message that is always shown unless logging is disabled.
#[macro_export]
macro_rules! output {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::Output, $($rest)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Level, Logger};

    #[test]
    fn test_macros_queue_messages() {
        let logger = Logger::new();
        logger.set_level(Level::Debug);

        log!(logger, Level::Info, "Formatted: {}", 42);
        debug!(logger, "Debug message");
        info!(logger, "Items: {}", 100usize);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);
        output!(logger, "name={} ok={}", "svc", true,);

        assert_eq!(logger.pending(), 6);
        assert_eq!(logger.metrics().format_failures(), 0);
    }

    #[test]
    fn test_macro_threshold() {
        let logger = Logger::new();
        debug!(logger, "below the default threshold");
        assert_eq!(logger.pending(), 0);
    }
}
