use anyhow::Result;

#[derive(Debug, Clone)]
pub struct Config {
    // Storage
    pub database_path: String,
    pub max_connections: u32,

    // HTTP
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Storage
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "languages.db".to_string()),
            max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(5),

            // HTTP
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
        })
    }

    /// Address the listener binds to, e.g. `127.0.0.1:5000`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 4] = ["DATABASE_PATH", "DATABASE_MAX_CONNECTIONS", "HOST", "PORT"];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();

        let config = Config::from_env().expect("Should load config");

        assert_eq!(config.database_path, "languages.db");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.bind_address(), "127.0.0.1:5000");
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        std::env::set_var("DATABASE_PATH", "/tmp/registry.db");
        std::env::set_var("DATABASE_MAX_CONNECTIONS", "12");
        std::env::set_var("HOST", "0.0.0.0");
        std::env::set_var("PORT", "8080");

        let config = Config::from_env().expect("Should load config");
        clear_env();

        assert_eq!(config.database_path, "/tmp/registry.db");
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    #[serial]
    fn test_invalid_numbers_fall_back_to_defaults() {
        clear_env();
        std::env::set_var("PORT", "not-a-port");
        std::env::set_var("DATABASE_MAX_CONNECTIONS", "0");

        let config = Config::from_env().expect("Should load config");
        clear_env();

        assert_eq!(config.port, 5000);
        assert_eq!(config.max_connections, 5);
    }
}
