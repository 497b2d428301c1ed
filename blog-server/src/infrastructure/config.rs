use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Unset selects the in-memory store.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_ttl_minutes: i64,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = var("HOST").unwrap_or_else(|| "127.0.0.1".into());
        let port = var("PORT")
            .unwrap_or_else(|| "8080".into())
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid PORT: {}", e))?;
        let database_url = var("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let jwt_secret = var("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("JWT_SECRET must be set"))?;
        let jwt_ttl_minutes = var("JWT_TTL_MINUTES")
            .unwrap_or_else(|| "60".into())
            .parse::<i64>()
            .map_err(|e| anyhow::anyhow!("invalid JWT_TTL_MINUTES: {}", e))?;
        if jwt_ttl_minutes <= 0 {
            anyhow::bail!("JWT_TTL_MINUTES must be positive");
        }
        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            database_url,
            jwt_secret,
            jwt_ttl_minutes,
            cors_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn applies_defaults() {
        let config = AppConfig::from_vars(vars(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, None);
        assert_eq!(config.jwt_ttl_minutes, 60);
        assert_eq!(config.cors_origins, ["*"]);
    }

    #[test]
    fn requires_jwt_secret() {
        assert!(AppConfig::from_vars(vars(&[])).is_err());
    }

    #[test]
    fn parses_overrides() {
        let config = AppConfig::from_vars(vars(&[
            ("JWT_SECRET", "s3cret"),
            ("PORT", "9000"),
            ("DATABASE_URL", "postgres://localhost/blog"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/blog")
        );
        assert_eq!(config.cors_origins, ["http://a.test", "http://b.test"]);
    }

    #[test]
    fn rejects_bad_port() {
        let result = AppConfig::from_vars(vars(&[("JWT_SECRET", "s"), ("PORT", "http")]));
        assert!(result.is_err());
    }
}
