// Layered configuration system

pub mod loader;
pub mod merger;

pub use loader::{
    AppConfig, CatalogConfig, ConfigLoader, MailConfig, MailTransport, ServerConfig,
    TemplateConfig,
};
pub use merger::{
    ConfigMerger, PartialCatalogConfig, PartialConfig, PartialMailConfig, PartialServerConfig,
    PartialTemplateConfig,
};

use anyhow::Result;
use std::path::Path;

/// Load and merge configuration from all sources
/// Priority: CLI -> config file -> global -> defaults
pub fn load_merged_config(
    loader: &ConfigLoader,
    config_file: Option<&Path>,
    cli_overrides: Option<PartialConfig>,
) -> Result<AppConfig> {
    let global = match loader.load_global() {
        Ok(global) => global,
        Err(e) => {
            log::warn!("Ignoring unreadable global config: {}", e);
            None
        }
    };

    let file = config_file
        .map(|path| loader.load_from_path(path))
        .transpose()?;

    let config = ConfigMerger::new()
        .with_global(global)
        .with_file(file)
        .with_cli(cli_overrides)
        .merge();

    config.validate()?;
    Ok(config)
}
