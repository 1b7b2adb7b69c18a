//! Startup error types for the depot server.
//!
//! Request-level failures use [`crate::domain::DomainError`]; this module
//! covers what can go wrong before the server starts listening.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort server startup.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// A config file named on the command line does not exist.
    #[error("configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to open or migrate the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Failed to install the logger.
    #[error("failed to initialize logging: {0}")]
    Logging(#[from] rolling_logger::LoggerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = Error::validation("bind address is empty");
        assert_eq!(err.to_string(), "invalid configuration: bind address is empty");
    }

    #[test]
    fn test_database_open_display() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/depot.db",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(source) = result {
            let err = Error::DatabaseOpen {
                path: PathBuf::from("/nonexistent/path/depot.db"),
                source,
            };
            assert!(err.to_string().contains("/nonexistent/path/depot.db"));
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("address in use"));
    }
}
