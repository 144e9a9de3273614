//! Environment-aware configuration resolution.
//!
//! Base values come from `config/default.toml`, with an optional
//! `config/local.toml` overlay for credentials that stay out of git.
//! Resolution copies the base values, applies the selected environment's
//! overrides, then derives `auth_header` from the resolved API token.

use std::{fmt, fs, path::Path};

use serde::Deserialize;
use tracing::warn;

use crate::error::AppError;

/// Deployment environment selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    /// Lenient parse: unrecognized or empty tags fall back to `Dev`.
    ///
    /// The fallback is silent by contract (the test runner passes whatever
    /// string it was given), but a warning is logged so a typo'd tag is at
    /// least visible in the output.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "dev" | "" => Self::Dev,
            "staging" => Self::Staging,
            "prod" => Self::Prod,
            other => {
                warn!(tag = other, "unrecognized environment tag, using dev");
                Self::Dev
            }
        }
    }

    /// Strict parse: unrecognized tags are an error instead of dev.
    pub fn from_tag_strict(tag: &str) -> Result<Self, AppError> {
        match tag.to_ascii_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "staging" => Ok(Self::Staging),
            "prod" => Ok(Self::Prod),
            other => Err(AppError::Config(format!(
                "unrecognized environment tag {other:?} (expected dev, staging or prod)"
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dev => write!(f, "dev"),
            Self::Staging => write!(f, "staging"),
            Self::Prod => write!(f, "prod"),
        }
    }
}

/// Raw API collaborator values — the `[api]` table of the config file.
/// Key casing matches the upstream config contract, hence the renames.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSource {
    #[serde(rename = "baseUri", default = "default_base_uri")]
    pub base_uri: String,
    #[serde(rename = "apiToken", default = "default_api_token")]
    pub api_token: String,
    #[serde(rename = "apiKey", default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_password")]
    pub password: String,
    /// Per-request timeout in milliseconds.
    #[serde(rename = "timeout", default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(rename = "mastercardBaseUrl", default = "default_mastercard_base_url")]
    pub mastercard_base_url: String,
    #[serde(rename = "mastercardConsumerKey", default = "default_mastercard_consumer_key")]
    pub mastercard_consumer_key: String,
    /// PKCS#8 private key, base64 or PEM. Real value belongs in `local.toml`.
    #[serde(rename = "mastercardPrivateKey", default = "default_mastercard_private_key")]
    pub mastercard_private_key: String,
    #[serde(rename = "reltioBaseUrl", default = "default_reltio_base_url")]
    pub reltio_base_url: String,
    #[serde(rename = "reltioAuthUrl", default = "default_reltio_auth_url")]
    pub reltio_auth_url: String,
    #[serde(rename = "reltioUserId", default = "default_reltio_user_id")]
    pub reltio_user_id: String,
    #[serde(rename = "reltioPassword", default = "default_reltio_password")]
    pub reltio_password: String,
    #[serde(rename = "reltioTenantId", default = "default_reltio_tenant_id")]
    pub reltio_tenant_id: String,
}

impl Default for ApiSource {
    fn default() -> Self {
        Self {
            base_uri: default_base_uri(),
            api_token: default_api_token(),
            api_key: default_api_key(),
            username: default_username(),
            password: default_password(),
            timeout_ms: default_timeout_ms(),
            mastercard_base_url: default_mastercard_base_url(),
            mastercard_consumer_key: default_mastercard_consumer_key(),
            mastercard_private_key: default_mastercard_private_key(),
            reltio_base_url: default_reltio_base_url(),
            reltio_auth_url: default_reltio_auth_url(),
            reltio_user_id: default_reltio_user_id(),
            reltio_password: default_reltio_password(),
            reltio_tenant_id: default_reltio_tenant_id(),
        }
    }
}

/// Raw database collaborator values — the `[database]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct DbSource {
    #[serde(rename = "dbUrl", default = "default_db_url")]
    pub db_url: String,
    #[serde(rename = "dbUsername", default = "default_db_username")]
    pub db_username: String,
    #[serde(rename = "dbPassword", default = "default_db_password")]
    pub db_password: String,
    #[serde(rename = "dbHost", default = "default_db_host")]
    pub db_host: String,
    #[serde(rename = "dbPort", default = "default_db_port")]
    pub db_port: u16,
    #[serde(rename = "dbName", default = "default_db_name")]
    pub db_name: String,
}

impl Default for DbSource {
    fn default() -> Self {
        Self {
            db_url: default_db_url(),
            db_username: default_db_username(),
            db_password: default_db_password(),
            db_host: default_db_host(),
            db_port: default_db_port(),
            db_name: default_db_name(),
        }
    }
}

fn default_base_uri() -> String { "https://jsonplaceholder.typicode.com".to_string() }
fn default_api_token() -> String { "your-api-token-here".to_string() }
fn default_api_key() -> String { "your-api-key-here".to_string() }
fn default_username() -> String { "your-username".to_string() }
fn default_password() -> String { "your-password".to_string() }
fn default_timeout_ms() -> u64 { 30_000 }
fn default_mastercard_base_url() -> String { "https://stage.api.gateway.mastercard.com".to_string() }
fn default_mastercard_consumer_key() -> String { "your-consumer-key-here".to_string() }
fn default_mastercard_private_key() -> String { "your-private-key-here".to_string() }
fn default_reltio_base_url() -> String { "https://test.reltio.com".to_string() }
fn default_reltio_auth_url() -> String { "https://test.reltio.com/reltio/api/auth".to_string() }
fn default_reltio_user_id() -> String { "your-reltio-user-id".to_string() }
fn default_reltio_password() -> String { "your-reltio-password".to_string() }
fn default_reltio_tenant_id() -> String { "AxLKMMJWrYpn5lO".to_string() }
fn default_db_url() -> String { "jdbc:postgresql://localhost:5432/mydb".to_string() }
fn default_db_username() -> String { "postgres".to_string() }
fn default_db_password() -> String { "postgres".to_string() }
fn default_db_host() -> String { "localhost".to_string() }
fn default_db_port() -> u16 { 5432 }
fn default_db_name() -> String { "mydb".to_string() }

/// The two collaborator tables of one config file.
#[derive(Deserialize, Default)]
struct SourceFile {
    #[serde(default)]
    api: ApiSource,
    #[serde(default)]
    database: DbSource,
}

/// `local.toml` shape — every key optional, set keys win over the base.
#[derive(Deserialize, Default)]
struct OverlayFile {
    #[serde(default)]
    api: ApiOverlay,
    #[serde(default)]
    database: DbOverlay,
}

#[derive(Deserialize, Default)]
struct ApiOverlay {
    #[serde(rename = "baseUri")]
    base_uri: Option<String>,
    #[serde(rename = "apiToken")]
    api_token: Option<String>,
    #[serde(rename = "apiKey")]
    api_key: Option<String>,
    username: Option<String>,
    password: Option<String>,
    #[serde(rename = "timeout")]
    timeout_ms: Option<u64>,
    #[serde(rename = "mastercardBaseUrl")]
    mastercard_base_url: Option<String>,
    #[serde(rename = "mastercardConsumerKey")]
    mastercard_consumer_key: Option<String>,
    #[serde(rename = "mastercardPrivateKey")]
    mastercard_private_key: Option<String>,
    #[serde(rename = "reltioBaseUrl")]
    reltio_base_url: Option<String>,
    #[serde(rename = "reltioAuthUrl")]
    reltio_auth_url: Option<String>,
    #[serde(rename = "reltioUserId")]
    reltio_user_id: Option<String>,
    #[serde(rename = "reltioPassword")]
    reltio_password: Option<String>,
    #[serde(rename = "reltioTenantId")]
    reltio_tenant_id: Option<String>,
}

impl ApiOverlay {
    fn apply(self, base: &mut ApiSource) {
        if let Some(v) = self.base_uri { base.base_uri = v; }
        if let Some(v) = self.api_token { base.api_token = v; }
        if let Some(v) = self.api_key { base.api_key = v; }
        if let Some(v) = self.username { base.username = v; }
        if let Some(v) = self.password { base.password = v; }
        if let Some(v) = self.timeout_ms { base.timeout_ms = v; }
        if let Some(v) = self.mastercard_base_url { base.mastercard_base_url = v; }
        if let Some(v) = self.mastercard_consumer_key { base.mastercard_consumer_key = v; }
        if let Some(v) = self.mastercard_private_key { base.mastercard_private_key = v; }
        if let Some(v) = self.reltio_base_url { base.reltio_base_url = v; }
        if let Some(v) = self.reltio_auth_url { base.reltio_auth_url = v; }
        if let Some(v) = self.reltio_user_id { base.reltio_user_id = v; }
        if let Some(v) = self.reltio_password { base.reltio_password = v; }
        if let Some(v) = self.reltio_tenant_id { base.reltio_tenant_id = v; }
    }
}

#[derive(Deserialize, Default)]
struct DbOverlay {
    #[serde(rename = "dbUrl")]
    db_url: Option<String>,
    #[serde(rename = "dbUsername")]
    db_username: Option<String>,
    #[serde(rename = "dbPassword")]
    db_password: Option<String>,
    #[serde(rename = "dbHost")]
    db_host: Option<String>,
    #[serde(rename = "dbPort")]
    db_port: Option<u16>,
    #[serde(rename = "dbName")]
    db_name: Option<String>,
}

impl DbOverlay {
    fn apply(self, base: &mut DbSource) {
        if let Some(v) = self.db_url { base.db_url = v; }
        if let Some(v) = self.db_username { base.db_username = v; }
        if let Some(v) = self.db_password { base.db_password = v; }
        if let Some(v) = self.db_host { base.db_host = v; }
        if let Some(v) = self.db_port { base.db_port = v; }
        if let Some(v) = self.db_name { base.db_name = v; }
    }
}

/// Collaborator bundle passed explicitly to [`Config::resolve`].
///
/// Built from files via [`Sources::load`], or constructed directly in tests.
/// Keeping this an explicit value (rather than reading files inside every
/// resolution call) makes environment selection testable in isolation.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    pub api: ApiSource,
    pub db: DbSource,
}

impl Sources {
    /// Load `<dir>/default.toml`, then overlay `<dir>/local.toml` if present.
    ///
    /// A missing or unparsable `default.toml` is fatal — there is no sane
    /// fallback for a harness with no base config. A missing `local.toml`
    /// is not an error.
    pub fn load(dir: &Path) -> Result<Self, AppError> {
        let default_path = dir.join("default.toml");
        let raw = fs::read_to_string(&default_path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", default_path.display())))?;
        let parsed: SourceFile = toml::from_str(&raw)
            .map_err(|e| AppError::Config(format!("parse error in {}: {e}", default_path.display())))?;

        let mut sources = Self {
            api: parsed.api,
            db: parsed.database,
        };

        let local_path = dir.join("local.toml");
        if local_path.exists() {
            let raw = fs::read_to_string(&local_path)
                .map_err(|e| AppError::Config(format!("cannot read {}: {e}", local_path.display())))?;
            let overlay: OverlayFile = toml::from_str(&raw)
                .map_err(|e| AppError::Config(format!("parse error in {}: {e}", local_path.display())))?;
            overlay.api.apply(&mut sources.api);
            overlay.database.apply(&mut sources.db);
        }

        Ok(sources)
    }
}

/// Fully resolved configuration for one environment.
///
/// Constructed fresh on every resolution call and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub env: Environment,
    pub base_url: String,
    pub api_token: String,
    pub api_key: String,
    pub username: String,
    pub password: String,
    /// `"Bearer " + api_token`, derived after token resolution.
    pub auth_header: String,
    pub timeout_ms: u64,
    pub mastercard_base_url: String,
    pub mastercard_consumer_key: String,
    pub mastercard_private_key: String,
    pub reltio_base_url: String,
    pub reltio_auth_url: String,
    pub reltio_user_id: String,
    pub reltio_password: String,
    pub reltio_tenant_id: String,
    pub db_url: String,
    pub db_username: String,
    pub db_password: String,
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
}

impl Config {
    /// Resolve the configuration for `env` from explicit sources.
    ///
    /// Dev applies no overrides. Staging and prod replace `base_url` and
    /// rebuild `db_url` from a fixed host template and the database name.
    pub fn resolve(env: Environment, sources: &Sources) -> Self {
        let api = &sources.api;
        let db = &sources.db;

        let mut base_url = api.base_uri.clone();
        let mut db_url = db.db_url.clone();
        match env {
            Environment::Dev => {}
            Environment::Staging => {
                base_url = "https://staging-api.example.com".to_string();
                db_url = format!("jdbc:postgresql://staging-db.example.com:5432/{}", db.db_name);
            }
            Environment::Prod => {
                base_url = "https://api.example.com".to_string();
                db_url = format!("jdbc:postgresql://prod-db.example.com:5432/{}", db.db_name);
            }
        }

        Self {
            env,
            base_url,
            auth_header: format!("Bearer {}", api.api_token),
            api_token: api.api_token.clone(),
            api_key: api.api_key.clone(),
            username: api.username.clone(),
            password: api.password.clone(),
            timeout_ms: api.timeout_ms,
            mastercard_base_url: api.mastercard_base_url.clone(),
            mastercard_consumer_key: api.mastercard_consumer_key.clone(),
            mastercard_private_key: api.mastercard_private_key.clone(),
            reltio_base_url: api.reltio_base_url.clone(),
            reltio_auth_url: api.reltio_auth_url.clone(),
            reltio_user_id: api.reltio_user_id.clone(),
            reltio_password: api.reltio_password.clone(),
            reltio_tenant_id: api.reltio_tenant_id.clone(),
            db_url,
            db_username: db.db_username.clone(),
            db_password: db.db_password.clone(),
            db_host: db.db_host.clone(),
            db_port: db.db_port,
            db_name: db.db_name.clone(),
        }
    }

    /// Entry point matching the runner contract: zero-or-one string tag.
    /// Absent or empty tags mean dev; unrecognized tags fall back to dev.
    pub fn resolve_tag(tag: Option<&str>, sources: &Sources) -> Self {
        Self::resolve(Environment::from_tag(tag.unwrap_or("")), sources)
    }
}
