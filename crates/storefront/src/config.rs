//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string (session store)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//! - `SHOPIFY_STORE` - Shopify store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_STOREFRONT_PRIVATE_TOKEN` - Storefront API private access token
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `SHOPIFY_API_VERSION` - API version (default: 2026-01)
//! - `SHOPIFY_STOREFRONT_ENDPOINT` - Full GraphQL endpoint, overrides the one derived from the store
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Shopify Storefront API configuration
    pub shopify: ShopifyStorefrontConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Shopify Storefront API configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct ShopifyStorefrontConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store: String,
    /// Shopify API version (e.g., 2026-01)
    pub api_version: String,
    /// Storefront API private access token (server-side only)
    pub storefront_private_token: SecretString,
    /// Explicit GraphQL endpoint (proxies, tests)
    pub endpoint_override: Option<String>,
}

impl std::fmt::Debug for ShopifyStorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyStorefrontConfig")
            .field("store", &self.store)
            .field("api_version", &self.api_version)
            .field("storefront_private_token", &"[REDACTED]")
            .field("endpoint_override", &self.endpoint_override)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env is fine; the process environment wins either way.
        let _ = dotenvy::dotenv();

        let database_url = required("STOREFRONT_DATABASE_URL")
            .or_else(|_| required("DATABASE_URL"))
            .map_err(|_| ConfigError::MissingEnvVar("STOREFRONT_DATABASE_URL".to_string()))
            .map(SecretString::from)?;
        let host: IpAddr = parsed_or("STOREFRONT_HOST", "127.0.0.1")?;
        let port: u16 = parsed_or("STOREFRONT_PORT", "3000")?;
        let base_url = required("STOREFRONT_BASE_URL")?;
        check_http_url("STOREFRONT_BASE_URL", &base_url)?;

        let shopify = ShopifyStorefrontConfig::from_env()?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            shopify,
            sentry_dsn: optional("SENTRY_DSN"),
            sentry_environment: optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` flag.
    #[must_use]
    pub fn is_https(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl ShopifyStorefrontConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let endpoint_override = optional("SHOPIFY_STOREFRONT_ENDPOINT");
        if let Some(endpoint) = &endpoint_override {
            check_http_url("SHOPIFY_STOREFRONT_ENDPOINT", endpoint)?;
        }

        let token = required("SHOPIFY_STOREFRONT_PRIVATE_TOKEN")?;
        check_token_strength("SHOPIFY_STOREFRONT_PRIVATE_TOKEN", &token)?;

        Ok(Self {
            store: required("SHOPIFY_STORE")?,
            api_version: optional("SHOPIFY_API_VERSION").unwrap_or_else(|| "2026-01".to_string()),
            storefront_private_token: SecretString::from(token),
            endpoint_override,
        })
    }

    /// The Storefront API GraphQL endpoint.
    #[must_use]
    pub fn graphql_endpoint(&self) -> String {
        self.endpoint_override.clone().unwrap_or_else(|| {
            format!(
                "https://{}/api/{}/graphql.json",
                self.store, self.api_version
            )
        })
    }
}

fn required(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Set and not blank.
fn optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_or<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional(key)
        .as_deref()
        .unwrap_or(default)
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Absolute http(s) URL with a host.
fn check_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url =
        Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() {
        return Ok(());
    }
    Err(ConfigError::InvalidEnvVar(
        key.to_string(),
        format!("expected an http(s) URL with a host, got scheme '{}'", url.scheme()),
    ))
}

/// Shannon entropy in bits per character.
fn bits_per_char(s: &str) -> f64 {
    let mut counts: HashMap<char, u32> = HashMap::new();
    for c in s.chars() {
        *counts.entry(c).or_default() += 1;
    }
    let total: u32 = counts.values().sum();
    if total == 0 {
        return 0.0;
    }
    let total = f64::from(total);
    counts
        .values()
        .map(|&n| {
            let p = f64::from(n) / total;
            -p * p.log2()
        })
        .sum()
}

/// Reject placeholder values and tokens that are not random enough to have
/// been issued by Shopify.
fn check_token_strength(key: &str, token: &str) -> Result<(), ConfigError> {
    let lower = token.to_lowercase();
    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            key.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = bits_per_char(token);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            key.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}); use the token issued by Shopify"
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn shopify_config(endpoint_override: Option<&str>) -> ShopifyStorefrontConfig {
        ShopifyStorefrontConfig {
            store: "lumen-test.myshopify.com".to_string(),
            api_version: "2026-01".to_string(),
            storefront_private_token: SecretString::from("shpat_9fK2mQx7LpR4tVz1"),
            endpoint_override: endpoint_override.map(String::from),
        }
    }

    #[test]
    fn test_bits_per_char() {
        assert!(bits_per_char("").abs() < f64::EPSILON);
        assert!((bits_per_char("ab") - 1.0).abs() < 0.01);
        assert!(bits_per_char("aaaa").abs() < f64::EPSILON);
    }

    #[test]
    fn test_token_strength() {
        let insecure = |token| {
            matches!(
                check_token_strength("TOKEN", token),
                Err(ConfigError::InsecureSecret(_, _))
            )
        };
        assert!(insecure("your-storefront-token"));
        assert!(insecure("aaaaaaaaaaaaaaaaaaaaaaaa"));
        assert!(check_token_strength("TOKEN", "shpat_9fK2mQx7LpR4tVz1").is_ok());
    }

    #[test]
    fn test_check_http_url() {
        assert!(check_http_url("X", "https://lumenskin.si").is_ok());
        assert!(check_http_url("X", "http://127.0.0.1:3000").is_ok());
        assert!(check_http_url("X", "ftp://lumenskin.si").is_err());
        assert!(check_http_url("X", "not a url").is_err());
    }

    #[test]
    fn test_graphql_endpoint_derived_and_overridden() {
        assert_eq!(
            shopify_config(None).graphql_endpoint(),
            "https://lumen-test.myshopify.com/api/2026-01/graphql.json"
        );
        assert_eq!(
            shopify_config(Some("http://127.0.0.1:9999/graphql")).graphql_endpoint(),
            "http://127.0.0.1:9999/graphql"
        );
    }

    #[test]
    fn test_shopify_config_debug_redacts_secrets() {
        let debug_output = format!("{:?}", shopify_config(None));
        assert!(debug_output.contains("lumen-test.myshopify.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("shpat_9fK2mQx7LpR4tVz1"));
    }

    #[test]
    fn test_socket_addr_and_https() {
        let config = StorefrontConfig {
            database_url: SecretString::from("postgres://localhost/lumen"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "https://lumenskin.si".to_string(),
            shopify: shopify_config(None),
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
        assert!(config.is_https());
    }
}
