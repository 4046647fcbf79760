//! Server configuration from environment variables

use std::env;

/// Runtime configuration for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address and port the server binds to
    pub bind_address: String,
    /// Session lifetime in seconds (default: 24 hours)
    pub session_ttl_secs: i64,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    pub fn from_env() -> Self {
        let bind_address =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let session_ttl_secs = env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .unwrap_or(86400);

        Self {
            bind_address,
            session_ttl_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_server_config_defaults() {
        unsafe {
            env::remove_var("BIND_ADDRESS");
            env::remove_var("SESSION_TTL_SECS");
        }

        let config = ServerConfig::from_env();
        assert_eq!(config.bind_address, "0.0.0.0:3000");
        assert_eq!(config.session_ttl_secs, 86400);
    }

    #[test]
    #[serial]
    fn test_server_config_overrides() {
        unsafe {
            env::set_var("BIND_ADDRESS", "127.0.0.1:8123");
            env::set_var("SESSION_TTL_SECS", "600");
        }

        let config = ServerConfig::from_env();
        assert_eq!(config.bind_address, "127.0.0.1:8123");
        assert_eq!(config.session_ttl_secs, 600);

        unsafe {
            env::remove_var("BIND_ADDRESS");
            env::remove_var("SESSION_TTL_SECS");
        }
    }
}
