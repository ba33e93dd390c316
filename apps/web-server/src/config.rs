//! Application configuration loaded from environment variables.

use std::env;

use secretly_infra::{DatabaseConfig, GoogleConfig, JwtConfig, PasswordHashConfig};

const DEFAULT_SESSION_SECRET: &str = "change-me-in-production";

/// Longest accepted session lifetime: one year.
const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub session: SessionConfig,
    pub password: PasswordHashConfig,
    pub google: Option<GoogleConfig>,
}

/// Session cookie settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub jwt: JwtConfig,
    /// Mark cookies `Secure` (HTTPS only).
    pub secure_cookies: bool,
}

fn var_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: var_or("DB_MAX_CONNECTIONS", 20),
            min_connections: var_or("DB_MIN_CONNECTIONS", 2),
        });

        let port = var_or("PORT", 3000);

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port,
            database,
            session: SessionConfig::from_env(),
            password: Self::password_from_env(),
            google: Self::google_from_env(port),
        }
    }

    fn password_from_env() -> PasswordHashConfig {
        let defaults = PasswordHashConfig::default();
        PasswordHashConfig {
            memory_kib: var_or("PASSWORD_MEMORY_KIB", defaults.memory_kib),
            iterations: var_or("PASSWORD_ITERATIONS", defaults.iterations),
            parallelism: var_or("PASSWORD_PARALLELISM", defaults.parallelism),
        }
    }

    /// Google login is enabled only when both client id and secret are present.
    fn google_from_env(port: u16) -> Option<GoogleConfig> {
        let client_id = env::var("GOOGLE_CLIENT_ID").ok()?;
        let client_secret = env::var("GOOGLE_CLIENT_SECRET").ok()?;

        Some(GoogleConfig {
            client_id,
            client_secret,
            redirect_uri: env::var("GOOGLE_REDIRECT_URI")
                .unwrap_or_else(|_| format!("http://localhost:{port}/auth/google/secretly")),
        })
    }
}

impl SessionConfig {
    fn from_env() -> Self {
        let secret =
            env::var("SESSION_SECRET").unwrap_or_else(|_| DEFAULT_SESSION_SECRET.to_string());

        // Warn if using default secret in production
        if secret == DEFAULT_SESSION_SECRET {
            let is_production = env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default session secret in production! Set SESSION_SECRET."
                );
            } else {
                tracing::warn!("Using default session secret. Set SESSION_SECRET for production use.");
            }
        }

        Self {
            jwt: JwtConfig {
                secret,
                expiration_hours: bounded_ttl_hours(var_or("SESSION_TTL_HOURS", 24)),
                issuer: env::var("SESSION_ISSUER").unwrap_or_else(|_| "secretly".to_string()),
            },
            secure_cookies: env::var("SESSION_SECURE_COOKIE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

/// Clamp a configured session lifetime into `1..=MAX_SESSION_TTL_HOURS`.
fn bounded_ttl_hours(hours: i64) -> i64 {
    let bounded = hours.clamp(1, MAX_SESSION_TTL_HOURS);
    if bounded != hours {
        tracing::warn!(
            requested = hours,
            used = bounded,
            "SESSION_TTL_HOURS out of range, clamped"
        );
    }
    bounded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ttl_is_bounded() {
        assert_eq!(bounded_ttl_hours(24), 24);
        assert_eq!(bounded_ttl_hours(0), 1);
        assert_eq!(bounded_ttl_hours(-5), 1);
        assert_eq!(bounded_ttl_hours(i64::MAX), MAX_SESSION_TTL_HOURS);
    }
}
