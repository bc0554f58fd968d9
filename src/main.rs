use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use techassist_lib::catalog::Catalog;
use techassist_lib::config::{
    load_merged_config, AppConfig, ConfigLoader, MailConfig, MailTransport, PartialCatalogConfig,
    PartialConfig, PartialMailConfig, PartialServerConfig, PartialTemplateConfig,
};
use techassist_lib::estimator::{Estimator, EstimatorRules};
use techassist_lib::models::{AnswerSet, OnboardingData};
use techassist_lib::notifications::{
    LeadNotifier, LogMailer, MailSettings, Mailer, SmtpMailer, SmtpSettings, TemplateEngine,
    TemplateResolver, WebhookMailer,
};
use techassist_lib::server::{self, generate_auth_token, ServerAppState};
use techassist_lib::shutdown::{register_signal_handlers, ShutdownState};
use techassist_lib::{onboarding, scoring, wizard};

/// TechAssist - project estimator and lead intake service
#[derive(Parser, Debug)]
#[command(name = "techassist")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file layered over ~/.techassist/config.toml
    #[arg(long, short, global = true, env = "TECHASSIST_CONFIG")]
    config: Option<PathBuf>,

    /// Question catalog file (YAML or JSON) instead of the builtin one
    #[arg(long, global = true, env = "TECHASSIST_CATALOG")]
    catalog_file: Option<PathBuf>,

    /// Directory with notification template overrides
    #[arg(long, global = true, env = "TECHASSIST_TEMPLATES_DIR")]
    templates_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Port to bind the server to
        #[arg(long, env = "TECHASSIST_PORT")]
        port: Option<u16>,

        /// Address to bind the server to
        #[arg(long, env = "TECHASSIST_BIND")]
        bind: Option<String>,

        /// Fixed portal token. If not provided, a random token is generated on each startup
        #[arg(long, env = "TECHASSIST_PORTAL_TOKEN")]
        token: Option<String>,

        #[command(flatten)]
        mail: MailArgs,
    },

    /// Score an answers file and print the estimate
    Estimate {
        /// JSON object of question id -> option id(s)
        answers: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Print the question catalog, or only validate it with --check
    Catalog {
        #[arg(long)]
        check: bool,
    },

    /// Suggest a portal tier from an onboarding JSON file
    Onboarding {
        data: PathBuf,
    },
}

/// Mail delivery overrides, including the conventional SMTP_* variables
#[derive(Args, Debug, Default)]
struct MailArgs {
    /// Mail transport: log, webhook or smtp
    #[arg(long, env = "TECHASSIST_MAIL_TRANSPORT")]
    mail_transport: Option<MailTransport>,

    /// Sender address for lead mail
    #[arg(long, env = "SMTP_FROM")]
    mail_from: Option<String>,

    #[arg(long, env = "SMTP_HOST")]
    smtp_host: Option<String>,

    #[arg(long, env = "SMTP_PORT")]
    smtp_port: Option<u16>,

    /// Use implicit TLS (true/false)
    #[arg(long, env = "SMTP_SECURE")]
    smtp_secure: Option<bool>,

    #[arg(long, env = "SMTP_USER")]
    smtp_user: Option<String>,

    #[arg(long = "smtp-pass", env = "SMTP_PASS", hide_env_values = true)]
    smtp_password: Option<String>,
}

impl MailArgs {
    fn overrides(&self) -> PartialMailConfig {
        PartialMailConfig {
            transport: self.mail_transport,
            from: self.mail_from.clone(),
            smtp_host: self.smtp_host.clone(),
            smtp_port: self.smtp_port,
            smtp_secure: self.smtp_secure,
            smtp_user: self.smtp_user.clone(),
            smtp_password: self.smtp_password.clone(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Command-line and environment layer of the config
fn cli_overrides(cli: &Cli) -> PartialConfig {
    let mut overrides = PartialConfig {
        catalog: cli.catalog_file.as_ref().map(|path| PartialCatalogConfig {
            path: Some(path.display().to_string()),
        }),
        templates: cli.templates_dir.as_ref().map(|dir| PartialTemplateConfig {
            templates_dir: Some(dir.display().to_string()),
        }),
        ..Default::default()
    };

    if let Command::Serve {
        port,
        bind,
        token,
        mail,
    } = &cli.command
    {
        overrides.server = Some(PartialServerConfig {
            port: *port,
            bind: bind.clone(),
            cors_origins: None,
            portal_token: token.clone(),
        });
        overrides.mail = Some(mail.overrides());
    }

    overrides
}

fn run(cli: Cli) -> Result<()> {
    let config = load_merged_config(
        &ConfigLoader::new(),
        cli.config.as_deref(),
        Some(cli_overrides(&cli)),
    )?;

    match cli.command {
        Command::Serve { .. } => serve(config),
        Command::Estimate { answers, format } => estimate(&config, &answers, format),
        Command::Catalog { check } => catalog(&config, check),
        Command::Onboarding { data } => suggest_onboarding(&data),
    }
}

fn build_estimator(config: &AppConfig) -> Result<Estimator> {
    let catalog = Catalog::resolve(config.catalog.path.as_deref().map(Path::new))?;
    let estimator = Estimator::new(Arc::new(catalog), Arc::new(EstimatorRules::default()))
        .context("Catalog does not match the estimator rules")?;
    Ok(estimator)
}

fn build_notifier(config: &AppConfig, catalog: Arc<Catalog>) -> Result<LeadNotifier> {
    let mut resolver = TemplateResolver::new();
    if let Some(dir) = &config.templates.templates_dir {
        resolver = resolver.with_override_dir(Path::new(dir));
    }

    Ok(LeadNotifier::new(
        TemplateEngine::load(&resolver)?,
        catalog,
        MailSettings {
            from: config.mail.from.clone(),
            team_recipients: config.mail.team_recipients.clone(),
            send_client_copies: config.mail.send_client_copies,
        },
    ))
}

fn build_mailer(config: &MailConfig) -> Result<Arc<dyn Mailer>> {
    match config.transport {
        MailTransport::Log => Ok(Arc::new(LogMailer)),
        MailTransport::Webhook => {
            let url = config
                .webhook_url
                .as_deref()
                .ok_or_else(|| anyhow!("mail.webhookUrl is required for the webhook transport"))?;
            let mailer = WebhookMailer::new(
                url,
                config.webhook_token.clone(),
                Duration::from_secs(config.timeout_secs),
            )?;
            Ok(Arc::new(mailer))
        }
        MailTransport::Smtp => {
            let host = config
                .smtp_host
                .clone()
                .ok_or_else(|| anyhow!("mail.smtpHost is required for the smtp transport"))?;
            let mailer = SmtpMailer::new(&SmtpSettings {
                host,
                port: config.smtp_port,
                secure: config.smtp_secure,
                username: config.smtp_user.clone(),
                password: config.smtp_password.clone(),
                timeout: Duration::from_secs(config.timeout_secs),
            })?;
            log::info!(
                "Lead mail goes through SMTP relay {}:{}",
                config.smtp_host.as_deref().unwrap_or_default(),
                config.smtp_port
            );
            Ok(Arc::new(mailer))
        }
    }
}

fn serve(config: AppConfig) -> Result<()> {
    let estimator = build_estimator(&config)?;
    let notifier = build_notifier(&config, Arc::clone(estimator.catalog()))?;

    // Built outside the runtime: the blocking clients must not be created or dropped in async context
    let mailer = build_mailer(&config.mail)?;

    let shutdown_state = ShutdownState::new();
    if let Err(e) = register_signal_handlers(shutdown_state.clone()) {
        log::warn!("Failed to register signal handlers: {}", e);
    }

    // Use provided token or generate a random one
    let portal_token = config
        .server
        .portal_token
        .clone()
        .unwrap_or_else(generate_auth_token);

    let state = ServerAppState::new(
        portal_token,
        estimator,
        notifier,
        Arc::clone(&mailer),
        shutdown_state,
    );

    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let result = rt.block_on(server::run_server(
        config.server.port,
        &config.server.bind,
        state,
        config.server.cors_origins.clone(),
    ));
    drop(rt);
    drop(mailer);

    result.map_err(|e| anyhow!(e))
}

fn estimate(config: &AppConfig, path: &Path, format: OutputFormat) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers file {}", path.display()))?;
    let answers: AnswerSet = serde_json::from_str(&content)
        .with_context(|| format!("Invalid answers file {}", path.display()))?;

    let estimator = build_estimator(config)?;
    if let Err(e) = wizard::validate_required(&answers, estimator.catalog()) {
        log::warn!("Answers are incomplete ({}); estimating anyway", e);
    }

    let result = estimator.estimate(&answers);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => {
            let notifier = build_notifier(config, Arc::clone(estimator.catalog()))?;
            println!("{}", notifier.render_summary(&result)?);
        }
    }
    Ok(())
}

fn catalog(config: &AppConfig, check: bool) -> Result<()> {
    let estimator = build_estimator(config)?;
    let catalog = estimator.catalog();

    if check {
        println!(
            "Catalog OK: {} questions across {} steps",
            catalog.questions().len(),
            catalog.step_count()
        );
    } else {
        print!("{}", serde_yaml::to_string(catalog.as_ref())?);
    }
    Ok(())
}

fn suggest_onboarding(path: &Path) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read onboarding file {}", path.display()))?;
    let data: OnboardingData = serde_json::from_str(&content)
        .with_context(|| format!("Invalid onboarding file {}", path.display()))?;

    let suggestion = onboarding::suggest_tier(&data, &scoring::onboarding());
    println!("{}", serde_json::to_string_pretty(&suggestion)?);
    Ok(())
}
