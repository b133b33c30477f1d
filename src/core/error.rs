//! Error types for the logger system

use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, LoggerError>;

/// Why a message template could not be filled in.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// A placeholder refers to an argument that was not supplied
    #[error("placeholder refers to argument {index}, but it was not supplied")]
    MissingArgument { index: usize },

    /// More arguments were supplied than the template consumes
    #[error("template used {used} of {supplied} arguments")]
    UnusedArguments { used: usize, supplied: usize },

    /// A lone `{` or `}` that is neither a placeholder nor an escape
    #[error("unmatched brace at byte {position}")]
    UnmatchedBrace { position: usize },

    /// Something other than an argument index between braces
    #[error("invalid placeholder at byte {position}")]
    InvalidPlaceholder { position: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// The log file must exist before it can be opened
    #[error("Log file '{}' does not exist", path.display())]
    FileNotFound { path: PathBuf },

    /// The log file exists but could not be opened for append
    #[error("Could not open log file '{}' for append", path.display())]
    FileOpenError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Unix domain socket path exceeds the platform limit
    #[error("Socket address too long: {len} bytes, max {max}")]
    AddressTooLong { len: usize, max: usize },

    #[error("Could not create socket")]
    SocketCreateError {
        #[source]
        source: std::io::Error,
    },

    #[error("Could not connect to socket '{address}'")]
    SocketConnectError {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid protocol: '{0}'")]
    InvalidProtocol(String),

    #[error("Invalid address: '{0}'")]
    InvalidAddress(String),

    /// Settings file path is empty
    #[error("Settings file path is empty")]
    EmptyPath,

    #[error("Settings file '{}' does not exist", path.display())]
    SettingsFileNotFound { path: PathBuf },

    /// A non-blank settings line without `=`
    #[error("Malformed settings line {line_number}: '{line}'")]
    MalformedLine { line_number: usize, line: String },

    #[error("Invalid log level in settings: '{0}'")]
    InvalidLevel(String),

    #[error("Invalid flags in settings: '{0}'")]
    InvalidFlags(String),

    #[error("Invalid json value in settings: '{0}', expected true or false")]
    InvalidJsonValue(String),

    #[error("Invalid key in settings: '{0}'")]
    InvalidKey(String),

    /// The `file` settings key named a file that could not be opened
    #[error("Could not open file '{}' named in settings", path.display())]
    FileOpenFailed {
        path: PathBuf,
        #[source]
        source: Box<LoggerError>,
    },

    /// Template substitution failed
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Writer thread is already running")]
    WriterAlreadyRunning,

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoggerError {
    pub fn file_not_found(path: impl AsRef<Path>) -> Self {
        LoggerError::FileNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn file_open(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        LoggerError::FileOpenError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn socket_connect(address: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::SocketConnectError {
            address: address.into(),
            source,
        }
    }

    pub fn settings_not_found(path: impl AsRef<Path>) -> Self {
        LoggerError::SettingsFileNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn malformed_line(line_number: usize, line: impl Into<String>) -> Self {
        LoggerError::MalformedLine {
            line_number,
            line: line.into(),
        }
    }

    /// Wrap an `open_file` failure raised while applying settings.
    pub fn file_open_failed(path: impl AsRef<Path>, source: LoggerError) -> Self {
        LoggerError::FileOpenFailed {
            path: path.as_ref().to_path_buf(),
            source: Box::new(source),
        }
    }

    /// True for errors raised by bad settings text rather than by I/O.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LoggerError::MalformedLine { .. }
                | LoggerError::InvalidLevel(_)
                | LoggerError::InvalidFlags(_)
                | LoggerError::InvalidJsonValue(_)
                | LoggerError::InvalidKey(_)
        )
    }
}
