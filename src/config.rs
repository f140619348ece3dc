use std::env;
use std::time::Duration;

/// Application configuration, resolved once from the environment at startup.
///
/// Required values panic when missing so that misconfiguration aborts the
/// process instead of surfacing per-request. The signing secret and salt are
/// immutable for the process lifetime.
pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: String,
    pub password_salt: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            password_salt: env::var("PASSWORD_SALT").expect("PASSWORD_SALT must be set"),
            access_token_ttl: Duration::from_secs(
                env::var("ACCESS_TOKEN_TTL_MINUTES")
                    .unwrap_or_else(|_| "15".to_string())
                    .parse::<u64>()
                    .expect("ACCESS_TOKEN_TTL_MINUTES must be a number")
                    * 60,
            ),
            refresh_token_ttl: Duration::from_secs(
                env::var("REFRESH_TOKEN_TTL_DAYS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse::<u64>()
                    .expect("REFRESH_TOKEN_TTL_DAYS must be a number")
                    * 24
                    * 60
                    * 60,
            ),
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required environment variables
        env::set_var("DATABASE_URL", "postgres://test");
        env::set_var("JWT_SECRET", "test-secret");
        env::set_var("PASSWORD_SALT", "test-salt");

        let config = Config::from_env();

        assert_eq!(config.database_url, "postgres://test");
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.access_token_ttl, Duration::from_secs(15 * 60));
        assert_eq!(
            config.refresh_token_ttl,
            Duration::from_secs(30 * 24 * 60 * 60)
        );

        // Test custom values
        env::set_var("SERVER_PORT", "3000");
        env::set_var("SERVER_HOST", "0.0.0.0");
        env::set_var("ACCESS_TOKEN_TTL_MINUTES", "5");

        let config = Config::from_env();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.access_token_ttl, Duration::from_secs(5 * 60));
    }
}
