//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Email configuration.
    #[serde(default)]
    pub email: EmailConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Session configuration.
///
/// Sessions expire a fixed interval after creation; the TTL is not
/// extended by use.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Session time-to-live in seconds.
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_session_ttl(),
        }
    }
}

fn default_session_ttl() -> u64 {
    86400 // 24 hours
}

/// Email (SMTP) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Whether outbound email is enabled. When false, sends become no-ops
    /// so local development needs no SMTP server.
    #[serde(default)]
    pub enabled: bool,
    /// SMTP server hostname.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// SMTP server port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username.
    #[serde(default)]
    pub smtp_username: String,
    /// SMTP password.
    #[serde(default)]
    pub smtp_password: String,
    /// From address for outbound mail.
    #[serde(default = "default_from_email")]
    pub from_email: String,
    /// From display name.
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Inbox that receives contact-form submissions.
    #[serde(default = "default_contact_inbox")]
    pub contact_inbox: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            contact_inbox: default_contact_inbox(),
        }
    }
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_email() -> String {
    "no-reply@meridian.local".to_string()
}

fn default_from_name() -> String {
    "Meridian Capital".to_string()
}

fn default_contact_inbox() -> String {
    "support@meridian.local".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MERIDIAN").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_defaults_to_24_hours() {
        let session = SessionConfig::default();
        assert_eq!(session.ttl_secs, 86400);
    }

    #[test]
    fn test_email_config_defaults_disabled() {
        let email = EmailConfig::default();
        assert!(!email.enabled);
        assert_eq!(email.smtp_port, 587);
    }

    #[test]
    fn test_server_defaults_applied_on_missing_fields() {
        let cfg: ServerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8080);
    }
}
