// Configuration module entry point
// Loads and validates application configuration at startup

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, ContentConfig, HealthConfig, LoggingConfig, PerformanceConfig, ServerConfig,
};

impl Config {
    /// Load configuration from the default `config.toml` next to the binary,
    /// with `FILEVIEW__*` environment overrides.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the specified file path (extension optional).
    ///
    /// `content.path` intentionally has no default: a configuration without
    /// it fails here, before any listener is bound.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("FILEVIEW").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that deserialize fine but cannot serve requests
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.content.path.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "content.path must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write_config(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "fileview-config-{}-{name}.toml",
            std::process::id()
        ));
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn load_full_config() {
        let path = write_config(
            "full",
            r#"
[server]
host = "0.0.0.0"
port = 9090

[content]
path = "/srv/notes/today.txt"

[logging]
level = "debug"
access_log = false
"#,
        );
        let config = Config::load_from(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.content.path, "/srv/notes/today.txt");
        assert!(!config.logging.access_log);
        // Defaults fill in what the file left out
        assert_eq!(config.logging.access_log_format, "combined");
        assert_eq!(config.performance.keep_alive_timeout, 75);
        assert!(config.health.enabled);
    }

    #[test]
    fn missing_content_path_is_fatal() {
        let path = write_config(
            "nopath",
            r#"
[server]
host = "127.0.0.1"
port = 8080
"#,
        );
        let result = Config::load_from(path.to_str().unwrap());
        fs::remove_file(&path).unwrap();

        assert!(result.is_err());
    }

    #[test]
    fn empty_content_path_is_fatal() {
        let path = write_config(
            "emptypath",
            r#"
[content]
path = ""
"#,
        );
        let result = Config::load_from(path.to_str().unwrap());
        fs::remove_file(&path).unwrap();

        assert!(result.is_err());
    }

    #[test]
    fn socket_addr_parses_from_host_and_port() {
        let path = write_config(
            "addr",
            r#"
[content]
path = "hello.txt"
"#,
        );
        let config = Config::load_from(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).unwrap();

        let addr = config.get_socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8080");
    }
}
