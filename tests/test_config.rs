//! End-to-end properties of environment config resolution.

use api_harness::{Config, Environment, Sources};

fn resolved_for(tag: Option<&str>) -> Config {
    Config::resolve_tag(tag, &Sources::default())
}

#[test]
fn test_every_tag_yields_complete_config() {
    for tag in [Some("dev"), Some("staging"), Some("prod"), Some("unknown"), Some(""), None] {
        let cfg = resolved_for(tag);
        for (name, value) in [
            ("base_url", &cfg.base_url),
            ("api_token", &cfg.api_token),
            ("api_key", &cfg.api_key),
            ("username", &cfg.username),
            ("password", &cfg.password),
            ("auth_header", &cfg.auth_header),
            ("mastercard_base_url", &cfg.mastercard_base_url),
            ("mastercard_consumer_key", &cfg.mastercard_consumer_key),
            ("mastercard_private_key", &cfg.mastercard_private_key),
            ("reltio_base_url", &cfg.reltio_base_url),
            ("reltio_auth_url", &cfg.reltio_auth_url),
            ("reltio_user_id", &cfg.reltio_user_id),
            ("reltio_password", &cfg.reltio_password),
            ("reltio_tenant_id", &cfg.reltio_tenant_id),
            ("db_url", &cfg.db_url),
            ("db_username", &cfg.db_username),
            ("db_password", &cfg.db_password),
            ("db_host", &cfg.db_host),
            ("db_name", &cfg.db_name),
        ] {
            assert!(!value.is_empty(), "{name} empty for tag {tag:?}");
        }
        assert!(cfg.timeout_ms > 0, "timeout_ms zero for tag {tag:?}");
        assert!(cfg.db_port > 0, "db_port zero for tag {tag:?}");
    }
}

#[test]
fn test_environment_base_urls_are_distinct() {
    let dev = resolved_for(Some("dev"));
    let staging = resolved_for(Some("staging"));
    let prod = resolved_for(Some("prod"));
    assert_ne!(staging.base_url, dev.base_url);
    assert_ne!(prod.base_url, staging.base_url);
    assert_ne!(prod.base_url, dev.base_url);
}

#[test]
fn test_auth_header_matches_token_everywhere() {
    for tag in ["dev", "staging", "prod", "unknown"] {
        let cfg = resolved_for(Some(tag));
        assert_eq!(cfg.auth_header, format!("Bearer {}", cfg.api_token));
    }
}

#[test]
fn test_prod_db_url_for_mydb() {
    let mut sources = Sources::default();
    sources.db.db_name = "mydb".to_string();
    let cfg = Config::resolve(Environment::Prod, &sources);
    assert_eq!(cfg.db_url, "jdbc:postgresql://prod-db.example.com:5432/mydb");
}

#[test]
fn test_shipped_default_toml_loads() {
    // The crate ships config/default.toml; loading it must succeed and
    // agree with the built-in defaults.
    let sources = Sources::load(std::path::Path::new("config")).unwrap();
    let defaults = Sources::default();
    assert_eq!(sources.api.base_uri, defaults.api.base_uri);
    assert_eq!(sources.api.timeout_ms, defaults.api.timeout_ms);
    assert_eq!(sources.db.db_name, defaults.db.db_name);
}
