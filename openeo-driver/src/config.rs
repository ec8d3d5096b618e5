//! Driver configuration
//!
//! Defines all configurable parameters for the driver: the bind address,
//! the registry database location, and the actinia backend connection.

use std::path::PathBuf;

/// Driver configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the REST surface binds to
    pub bind_addr: String,

    /// File path of the registry database (jobs and stored graphs)
    pub database_path: PathBuf,

    /// Base URL of the actinia backend (e.g., "http://localhost:8088")
    pub actinia_url: String,

    /// Backend credentials
    pub actinia_user: String,
    pub actinia_password: String,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - OPENEO_BIND_ADDR (optional, default: 0.0.0.0:8080)
    /// - OPENEO_DB_PATH (optional, default: $HOME/.openeo_driver.sqlite)
    /// - ACTINIA_URL (optional, default: http://localhost:8088)
    /// - ACTINIA_USER (optional, default: user)
    /// - ACTINIA_PASSWORD (optional, default: empty)
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("OPENEO_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let database_path = match std::env::var("OPENEO_DB_PATH") {
            Ok(path) => PathBuf::from(path),
            Err(_) => Self::default_database_path()?,
        };

        let actinia_url =
            std::env::var("ACTINIA_URL").unwrap_or_else(|_| "http://localhost:8088".to_string());
        let actinia_user = std::env::var("ACTINIA_USER").unwrap_or_else(|_| "user".to_string());
        let actinia_password = std::env::var("ACTINIA_PASSWORD").unwrap_or_default();

        let config = Self {
            bind_addr,
            database_path,
            actinia_url,
            actinia_user,
            actinia_password,
        };
        config.validate()?;

        Ok(config)
    }

    fn default_database_path() -> anyhow::Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| anyhow::anyhow!("HOME not set and OPENEO_DB_PATH not provided"))?;
        Ok(PathBuf::from(home).join(".openeo_driver.sqlite"))
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if !self.actinia_url.starts_with("http://") && !self.actinia_url.starts_with("https://") {
            anyhow::bail!("actinia_url must start with http:// or https://");
        }

        if self.actinia_user.is_empty() {
            anyhow::bail!("actinia_user cannot be empty");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            bind_addr: "0.0.0.0:8080".to_string(),
            database_path: PathBuf::from("/tmp/test.sqlite"),
            actinia_url: "http://localhost:8088".to_string(),
            actinia_user: "user".to_string(),
            actinia_password: String::new(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = test_config();

        config.actinia_url = "not-a-url".to_string();
        assert!(config.validate().is_err());

        config.actinia_url = "https://actinia.example.org".to_string();
        assert!(config.validate().is_ok());

        config.bind_addr = String::new();
        assert!(config.validate().is_err());
    }
}
