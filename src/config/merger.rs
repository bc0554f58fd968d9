// Configuration merging with priority

use crate::config::loader::{
    AppConfig, CatalogConfig, MailConfig, MailTransport, ServerConfig, TemplateConfig,
};
use serde::{Deserialize, Serialize};

/// Partial configuration for merging
/// Uses Option<T> for all fields so a layer only overrides what it sets
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PartialConfig {
    #[serde(default)]
    pub server: Option<PartialServerConfig>,
    #[serde(default)]
    pub mail: Option<PartialMailConfig>,
    #[serde(default)]
    pub catalog: Option<PartialCatalogConfig>,
    #[serde(default)]
    pub templates: Option<PartialTemplateConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PartialServerConfig {
    pub port: Option<u16>,
    pub bind: Option<String>,
    #[serde(rename = "corsOrigins", alias = "cors_origins", default)]
    pub cors_origins: Option<Vec<String>>,
    #[serde(rename = "portalToken", alias = "portal_token", default)]
    pub portal_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PartialMailConfig {
    pub transport: Option<MailTransport>,
    pub from: Option<String>,
    #[serde(rename = "teamRecipients", alias = "team_recipients", default)]
    pub team_recipients: Option<Vec<String>>,
    #[serde(rename = "sendClientCopies", alias = "send_client_copies", default)]
    pub send_client_copies: Option<bool>,
    #[serde(rename = "webhookUrl", alias = "webhook_url", default)]
    pub webhook_url: Option<String>,
    #[serde(rename = "webhookToken", alias = "webhook_token", default)]
    pub webhook_token: Option<String>,
    #[serde(rename = "timeoutSecs", alias = "timeout_secs", default)]
    pub timeout_secs: Option<u64>,
    #[serde(rename = "smtpHost", alias = "smtp_host", default)]
    pub smtp_host: Option<String>,
    #[serde(rename = "smtpPort", alias = "smtp_port", default)]
    pub smtp_port: Option<u16>,
    #[serde(rename = "smtpSecure", alias = "smtp_secure", default)]
    pub smtp_secure: Option<bool>,
    #[serde(rename = "smtpUser", alias = "smtp_user", default)]
    pub smtp_user: Option<String>,
    #[serde(rename = "smtpPassword", alias = "smtp_password", default)]
    pub smtp_password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PartialCatalogConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PartialTemplateConfig {
    #[serde(rename = "templatesDir", alias = "templates_dir", default)]
    pub templates_dir: Option<String>,
}

/// Configuration merger
/// Priority order: CLI -> config file -> global -> defaults
pub struct ConfigMerger {
    defaults: AppConfig,
    global: Option<PartialConfig>,
    file: Option<PartialConfig>,
    cli: Option<PartialConfig>,
}

impl ConfigMerger {
    pub fn new() -> Self {
        Self {
            defaults: AppConfig::default(),
            global: None,
            file: None,
            cli: None,
        }
    }

    /// Set global config (~/.techassist/config.toml)
    pub fn with_global(mut self, config: Option<PartialConfig>) -> Self {
        self.global = config;
        self
    }

    /// Set the config file named on the command line
    pub fn with_file(mut self, config: Option<PartialConfig>) -> Self {
        self.file = config;
        self
    }

    /// Set CLI and environment overrides
    pub fn with_cli(mut self, config: Option<PartialConfig>) -> Self {
        self.cli = config;
        self
    }

    /// Merge all layers with priority
    pub fn merge(&self) -> AppConfig {
        [&self.global, &self.file, &self.cli]
            .into_iter()
            .flatten()
            .fold(self.defaults.clone(), |base, layer| {
                self.merge_partial(&base, layer)
            })
    }

    fn merge_partial(&self, base: &AppConfig, partial: &PartialConfig) -> AppConfig {
        AppConfig {
            server: partial
                .server
                .as_ref()
                .map(|p| self.merge_partial_server(&base.server, p))
                .unwrap_or_else(|| base.server.clone()),
            mail: partial
                .mail
                .as_ref()
                .map(|p| self.merge_partial_mail(&base.mail, p))
                .unwrap_or_else(|| base.mail.clone()),
            catalog: partial
                .catalog
                .as_ref()
                .map(|p| CatalogConfig {
                    path: p.path.clone().or_else(|| base.catalog.path.clone()),
                })
                .unwrap_or_else(|| base.catalog.clone()),
            templates: partial
                .templates
                .as_ref()
                .map(|p| TemplateConfig {
                    templates_dir: p
                        .templates_dir
                        .clone()
                        .or_else(|| base.templates.templates_dir.clone()),
                })
                .unwrap_or_else(|| base.templates.clone()),
        }
    }

    fn merge_partial_server(
        &self,
        base: &ServerConfig,
        partial: &PartialServerConfig,
    ) -> ServerConfig {
        ServerConfig {
            port: partial.port.unwrap_or(base.port),
            bind: partial.bind.clone().unwrap_or_else(|| base.bind.clone()),
            cors_origins: partial
                .cors_origins
                .clone()
                .unwrap_or_else(|| base.cors_origins.clone()),
            portal_token: partial
                .portal_token
                .clone()
                .or_else(|| base.portal_token.clone()),
        }
    }

    fn merge_partial_mail(&self, base: &MailConfig, partial: &PartialMailConfig) -> MailConfig {
        MailConfig {
            transport: partial.transport.unwrap_or(base.transport),
            from: partial.from.clone().unwrap_or_else(|| base.from.clone()),
            team_recipients: partial
                .team_recipients
                .clone()
                .unwrap_or_else(|| base.team_recipients.clone()),
            send_client_copies: partial
                .send_client_copies
                .unwrap_or(base.send_client_copies),
            webhook_url: partial
                .webhook_url
                .clone()
                .or_else(|| base.webhook_url.clone()),
            webhook_token: partial
                .webhook_token
                .clone()
                .or_else(|| base.webhook_token.clone()),
            timeout_secs: partial.timeout_secs.unwrap_or(base.timeout_secs),
            smtp_host: partial.smtp_host.clone().or_else(|| base.smtp_host.clone()),
            smtp_port: partial.smtp_port.unwrap_or(base.smtp_port),
            smtp_secure: partial.smtp_secure.unwrap_or(base.smtp_secure),
            smtp_user: partial.smtp_user.clone().or_else(|| base.smtp_user.clone()),
            smtp_password: partial
                .smtp_password
                .clone()
                .or_else(|| base.smtp_password.clone()),
        }
    }
}

impl Default for ConfigMerger {
    fn default() -> Self {
        Self::new()
    }
}
