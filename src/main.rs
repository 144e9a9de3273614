//! Harness entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Init logger
//!   3. Load config sources from HARNESS_CONFIG_DIR (default `config/`)
//!   4. Resolve config for HARNESS_ENV
//!   5. Print a summary and exit

use std::{env, path::Path};

use tracing::info;

use api_harness::{Config, Sources, error::AppError, logger};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    // Load .env if present — ignore errors (file is optional).
    let _ = dotenvy::dotenv();

    let log_level = env::var("HARNESS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    logger::init(&log_level)?;

    let config_dir = env::var("HARNESS_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let sources = Sources::load(Path::new(&config_dir))?;

    let env_tag = env::var("HARNESS_ENV").ok();
    let config = Config::resolve_tag(env_tag.as_deref(), &sources);

    // Credentials stay out of the logs.
    info!(
        env = %config.env,
        base_url = %config.base_url,
        db_host = %config.db_host,
        db_name = %config.db_name,
        timeout_ms = config.timeout_ms,
        "config resolved"
    );
    println!("✓ Config resolved: env={} base_url={}", config.env, config.base_url);

    Ok(())
}
