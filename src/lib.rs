//! Support library for the API test suite: environment configuration
//! resolution and random test-data helpers.

pub mod config;
pub mod error;
pub mod logger;
pub mod random;

pub use config::{Config, Environment, Sources};
pub use error::AppError;
