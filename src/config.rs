use std::env;

/// Server configuration loaded from environment variables (after `.env`).
///
/// | Env Var              | Default        |
/// |----------------------|----------------|
/// | `DATABASE_URL`       | required       |
/// | `SERVER_ADDRESS`     | `0.0.0.0:8080` |
/// | `DB_MAX_CONNECTIONS` | `5`            |
/// | `SESSION_MINUTES`    | `30`           |
/// | `REMEMBER_ME_DAYS`   | `10`           |
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_address: String,
    pub max_connections: u32,
    /// Lifetime of a session created without "remember me".
    pub session_minutes: i64,
    /// Lifetime of a persistent session.
    pub remember_me_days: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} must be a valid number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let server_address = lookup("SERVER_ADDRESS").unwrap_or_else(|| "0.0.0.0:8080".into());

        Ok(Self {
            database_url,
            server_address,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            session_minutes: parse_or(&lookup, "SESSION_MINUTES", 30)?,
            remember_me_days: parse_or(&lookup, "REMEMBER_ME_DAYS", 10)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "mysql://localhost/tasks")]))
            .unwrap();
        assert_eq!(config.database_url, "mysql://localhost/tasks");
        assert_eq!(config.server_address, "0.0.0.0:8080");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.session_minutes, 30);
        assert_eq!(config.remember_me_days, 10);
    }

    #[test]
    fn test_overrides_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "mysql://db/tasks"),
            ("SERVER_ADDRESS", "127.0.0.1:9000"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("SESSION_MINUTES", " 45 "),
        ]))
        .unwrap();
        assert_eq!(config.server_address, "127.0.0.1:9000");
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.session_minutes, 45);
    }

    #[test]
    fn test_missing_database_url() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_invalid_number_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "mysql://db/tasks"),
            ("DB_MAX_CONNECTIONS", "many"),
        ]))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "DB_MAX_CONNECTIONS must be a valid number, got \"many\""
        );
    }
}
