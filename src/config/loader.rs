// Configuration file loading

use super::merger::PartialConfig;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub templates: TemplateConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Allowed CORS origins; empty allows any origin
    #[serde(rename = "corsOrigins", alias = "cors_origins", default)]
    pub cors_origins: Vec<String>,
    /// Bearer token for the client-portal routes; generated at startup when unset
    #[serde(rename = "portalToken", alias = "portal_token", default)]
    pub portal_token: Option<String>,
}

fn default_port() -> u16 { 3001 }
fn default_bind() -> String { "0.0.0.0".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind: default_bind(),
            cors_origins: Vec::new(),
            portal_token: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MailTransport {
    /// Log messages only
    #[default]
    Log,
    /// POST messages to `webhook_url`
    Webhook,
    /// Deliver through the relay at `smtp_host`
    Smtp,
}

impl std::str::FromStr for MailTransport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "log" => Ok(MailTransport::Log),
            "webhook" => Ok(MailTransport::Webhook),
            "smtp" => Ok(MailTransport::Smtp),
            _ => Err(format!(
                "Unknown mail transport: '{}'. Expected log, webhook or smtp",
                s
            )),
        }
    }
}

/// Lead notification settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MailConfig {
    #[serde(default)]
    pub transport: MailTransport,
    #[serde(default = "default_from")]
    pub from: String,
    #[serde(rename = "teamRecipients", alias = "team_recipients", default = "default_team_recipients")]
    pub team_recipients: Vec<String>,
    #[serde(rename = "sendClientCopies", alias = "send_client_copies", default = "default_true")]
    pub send_client_copies: bool,
    #[serde(rename = "webhookUrl", alias = "webhook_url", default)]
    pub webhook_url: Option<String>,
    #[serde(rename = "webhookToken", alias = "webhook_token", default)]
    pub webhook_token: Option<String>,
    #[serde(rename = "timeoutSecs", alias = "timeout_secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(rename = "smtpHost", alias = "smtp_host", default)]
    pub smtp_host: Option<String>,
    #[serde(rename = "smtpPort", alias = "smtp_port", default = "default_smtp_port")]
    pub smtp_port: u16,
    /// Implicit TLS; STARTTLS is used when the relay offers it otherwise
    #[serde(rename = "smtpSecure", alias = "smtp_secure", default)]
    pub smtp_secure: bool,
    #[serde(rename = "smtpUser", alias = "smtp_user", default)]
    pub smtp_user: Option<String>,
    #[serde(rename = "smtpPassword", alias = "smtp_password", default)]
    pub smtp_password: Option<String>,
}

fn default_from() -> String { "noreply@yourtechassist.us".to_string() }
fn default_team_recipients() -> Vec<String> { vec!["team@yourtechassist.us".to_string()] }
fn default_true() -> bool { true }
fn default_timeout_secs() -> u64 { 10 }
fn default_smtp_port() -> u16 { 587 }

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            transport: MailTransport::default(),
            from: default_from(),
            team_recipients: default_team_recipients(),
            send_client_copies: true,
            webhook_url: None,
            webhook_token: None,
            timeout_secs: default_timeout_secs(),
            smtp_host: None,
            smtp_port: default_smtp_port(),
            smtp_secure: false,
            smtp_user: None,
            smtp_password: None,
        }
    }
}

/// Question catalog source
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    /// YAML or JSON catalog file; the builtin catalog when unset
    #[serde(default)]
    pub path: Option<String>,
}

/// Notification template overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TemplateConfig {
    #[serde(rename = "templatesDir", alias = "templates_dir", default)]
    pub templates_dir: Option<String>,
}

impl AppConfig {
    /// Check values that parse but cannot work
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(anyhow!("server.port must be greater than 0"));
        }

        if let Some(token) = &self.server.portal_token {
            if token.trim().is_empty() {
                return Err(anyhow!("server.portalToken must not be empty"));
            }
        }

        if self.mail.team_recipients.is_empty() {
            return Err(anyhow!("mail.teamRecipients must list at least one address"));
        }

        if self.mail.transport == MailTransport::Webhook && self.mail.webhook_url.is_none() {
            return Err(anyhow!("mail.webhookUrl is required when mail.transport is webhook"));
        }

        if self.mail.transport == MailTransport::Smtp {
            if self.mail.smtp_host.as_deref().map_or(true, |h| h.trim().is_empty()) {
                return Err(anyhow!("mail.smtpHost is required when mail.transport is smtp"));
            }
            if self.mail.smtp_port == 0 {
                return Err(anyhow!("mail.smtpPort must be greater than 0"));
            }
            if self.mail.smtp_user.is_some() != self.mail.smtp_password.is_some() {
                return Err(anyhow!("mail.smtpUser and mail.smtpPassword must be set together"));
            }
        }

        if self.mail.timeout_secs == 0 {
            return Err(anyhow!("mail.timeoutSecs must be greater than 0"));
        }

        Ok(())
    }
}

/// Config loader
pub struct ConfigLoader {
    global_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            global_path: Self::get_global_config_path(),
        }
    }

    /// Use `path` as the global config file instead of the home-directory one
    pub fn with_global_path(mut self, path: &Path) -> Self {
        self.global_path = Some(path.to_path_buf());
        self
    }

    /// ~/.techassist/config.toml
    fn get_global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".techassist").join("config.toml"))
    }

    pub fn global_config_path(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Load the global config if it exists
    pub fn load_global(&self) -> Result<Option<PartialConfig>> {
        match self.global_path {
            Some(ref path) if path.exists() => self.load_from_path(path).map(Some),
            _ => Ok(None),
        }
    }

    /// Load config from a specific path; a missing file is an error here
    pub fn load_from_path(&self, path: &Path) -> Result<PartialConfig> {
        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: PartialConfig = toml::from_str(&contents)
            .map_err(|e| anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_values() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.bind, "0.0.0.0");
        assert_eq!(config.mail.transport, MailTransport::Log);
        assert_eq!(config.mail.from, "noreply@yourtechassist.us");
        assert!(config.mail.send_client_copies);
        assert!(config.catalog.path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_config_parses_with_either_key_style() {
        let config: AppConfig = toml::from_str(
            r#"
[server]
port = 8080
cors_origins = ["https://yourtechassist.us"]

[mail]
transport = "webhook"
webhookUrl = "https://relay.example.com/send"
team_recipients = ["sales@example.com"]
"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind, "0.0.0.0");
        assert_eq!(config.server.cors_origins, vec!["https://yourtechassist.us"]);
        assert_eq!(config.mail.transport, MailTransport::Webhook);
        assert_eq!(config.mail.team_recipients, vec!["sales@example.com"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_webhook_transport_requires_url() {
        let mut config = AppConfig::default();
        config.mail.transport = MailTransport::Webhook;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("webhookUrl"));
    }

    #[test]
    fn test_handles_missing_global_config_gracefully() {
        let dir = TempDir::new().unwrap();
        let loader = ConfigLoader::new().with_global_path(&dir.path().join("config.toml"));
        assert!(loader.load_global().unwrap().is_none());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = ConfigLoader::new()
            .load_from_path(&dir.path().join("nope.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server\nport = ").unwrap();
        let err = ConfigLoader::new().load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_mail_transport_from_str() {
        assert_eq!("Webhook".parse::<MailTransport>().unwrap(), MailTransport::Webhook);
        assert_eq!("SMTP".parse::<MailTransport>().unwrap(), MailTransport::Smtp);
        assert!("carrier-pigeon".parse::<MailTransport>().is_err());
    }

    #[test]
    fn test_smtp_section_parses() {
        let config: AppConfig = toml::from_str(
            r#"
[mail]
transport = "smtp"
from = "leads@yourtechassist.us"
smtpHost = "smtp.example.com"
smtp_port = 465
smtpSecure = true
smtpUser = "mailer"
smtp_password = "hunter2"
"#,
        )
        .unwrap();

        assert_eq!(config.mail.transport, MailTransport::Smtp);
        assert_eq!(config.mail.smtp_host.as_deref(), Some("smtp.example.com"));
        assert_eq!(config.mail.smtp_port, 465);
        assert!(config.mail.smtp_secure);
        assert_eq!(config.mail.smtp_user.as_deref(), Some("mailer"));
        assert_eq!(config.mail.smtp_password.as_deref(), Some("hunter2"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_smtp_transport_validation() {
        let mut config = AppConfig::default();
        assert_eq!(config.mail.smtp_port, 587);
        config.mail.transport = MailTransport::Smtp;
        assert!(config.validate().unwrap_err().to_string().contains("smtpHost"));

        config.mail.smtp_host = Some("smtp.example.com".to_string());
        assert!(config.validate().is_ok());

        config.mail.smtp_user = Some("mailer".to_string());
        assert!(config.validate().unwrap_err().to_string().contains("smtpPassword"));

        config.mail.smtp_password = Some("secret".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_portal_token_fails_validation() {
        let mut config = AppConfig::default();
        config.server.portal_token = Some(String::new());
        assert!(config.validate().is_err());
        config.server.portal_token = Some("token".to_string());
        assert!(config.validate().is_ok());
    }
}
