//! pasteme: publish an end-to-end encrypted paste to Paste.me
//!
//! Usage:
//!   pasteme --name <title> [--body <text>] (--expires <minutes> | --destroy)
//!           [--source] [--file <path>]...
//!
//! The body is read from stdin when stdin is not a terminal. On success the
//! share URL is printed to stdout; the decryption passphrase lives only in
//! its fragment.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use pasteme_client::{publish, HttpTransport, PasteOptions, Published};
use pasteme_core::config::{expand_tilde, PasteConfig};
use pasteme_core::error::EXIT_INPUT;
use pasteme_core::PasteError;

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "pasteme",
    version,
    about = "Encrypt and publish a paste to Paste.me",
    long_about = "pasteme: encrypt a paste and its attachments locally, publish the \
                  ciphertext, and print a share URL whose fragment holds the key"
)]
struct Cli {
    /// Paste title
    #[arg(long, short = 'n')]
    name: Option<String>,

    /// Paste body (ignored when stdin is piped and non-empty)
    #[arg(long, short = 'b')]
    body: Option<String>,

    /// Expiry in minutes: 5, 10, 60, 1440, 10080 or 43800
    #[arg(long, short = 'e', allow_negative_numbers = true)]
    expires: Option<i64>,

    /// Self-destruct after the first read (--expires is ignored)
    #[arg(long, short = 'd')]
    destroy: bool,

    /// Ask the service to highlight the body as source code
    #[arg(long, short = 's')]
    source: bool,

    /// Attach a file (repeatable)
    #[arg(long = "file", short = 'f', value_name = "PATH")]
    files: Vec<PathBuf>,

    /// Path to config.toml
    #[arg(
        long,
        short = 'c',
        env = "PASTEME_CONFIG",
        default_value = "~/.config/pasteme/config.toml"
    )]
    config: PathBuf,

    /// Override the paste API endpoint
    #[arg(long, env = "PASTEME_API_ENDPOINT")]
    api_endpoint: Option<String>,

    /// Override the share URL prefix
    #[arg(long, env = "PASTEME_SHARE_URL")]
    share_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PASTEME_LOG")]
    log: Option<String>,

    /// Log format (json, text)
    #[arg(long, env = "PASTEME_LOG_FORMAT")]
    log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, ValueEnum, PartialEq)]
enum LogFormat {
    Json,
    Text,
}

impl Cli {
    fn paste_options(&self) -> PasteOptions {
        PasteOptions {
            name: self.name.clone(),
            body: self.body.clone(),
            expires: self.expires,
            destroy: self.destroy,
            source: self.source,
            files: self.files.clone(),
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help/--version go to stdout
            let _ = err.print();
            return ExitCode::from(usage_exit_code(&err));
        }
    };

    match run(&cli) {
        Ok(published) => {
            println!("{published}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            let code = err
                .downcast_ref::<PasteError>()
                .map_or(EXIT_INPUT, PasteError::exit_code);
            ExitCode::from(code)
        }
    }
}

/// Argument errors are input failures; help and version output is success.
fn usage_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        EXIT_INPUT
    } else {
        0
    }
}

fn run(cli: &Cli) -> Result<Published> {
    let config = load_config(cli)?;
    init_logging(cli, &config)?;

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        endpoint = %config.api.endpoint,
        files = cli.files.len(),
        "pasteme starting"
    );

    let transport = HttpTransport::new(&config.api.user_agent)?;
    let published = publish(
        &cli.paste_options(),
        &mut std::io::stdin(),
        &config.api,
        &transport,
    )?;
    Ok(published)
}

/// Config file, then flag/env overrides, then validation.
fn load_config(cli: &Cli) -> Result<PasteConfig> {
    let path = expand_tilde(&cli.config);
    let mut config = PasteConfig::load(&path)?;

    if let Some(endpoint) = &cli.api_endpoint {
        config.api.endpoint = endpoint.clone();
    }
    if let Some(prefix) = &cli.share_url {
        config.api.share_url_prefix = prefix.clone();
    }
    if let Some(level) = &cli.log {
        config.log.level = level.clone();
    }

    config.api.validate()?;
    Ok(config)
}

fn init_logging(cli: &Cli, config: &PasteConfig) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let format = match &cli.log_format {
        Some(format) => format.clone(),
        None => LogFormat::from_str(&config.log.format, true).map_err(|_| {
            PasteError::Config(format!(
                "log.format must be \"json\" or \"text\", got: {:?}",
                config.log.format
            ))
        })?,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    // stdout carries only the share URL
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?,
    }
    Ok(())
}
