//! Application-wide error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },

    #[error("logger error: {0}")]
    Logger(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn config_error_display() {
        let e = AppError::Config("missing table".into());
        assert!(e.to_string().contains("missing table"));
    }

    #[test]
    fn invalid_range_display() {
        let e = AppError::InvalidRange { min: 10, max: 1 };
        let msg = e.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains("1"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let e: AppError = io_err.into();
        assert!(e.to_string().contains("io error"));
        // satisfies std::error::Error trait
        let _: &dyn Error = &e;
    }
}
