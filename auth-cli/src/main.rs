//! Spa Auth CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use spa_auth::app_config::AppConfig;
use spa_auth::redirect::PageOrigin;
use spa_auth_cli::{CommandContext, authorize_url, check, options_json, providers_json};
use std::path::PathBuf;
use tracing::debug;
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "spa-auth")]
#[command(about = "Inspect the OAuth provider configuration of a single-page application", version)]
#[command(arg_required_else_help(true))]
struct Cli {
    /// JSON application config; read from SPA_AUTH_CONFIG when omitted
    #[arg(long, env = "SPA_AUTH_CONFIG_FILE")]
    config: Option<PathBuf>,

    /// URL of the page hosting the application
    #[arg(long, env = "SPA_AUTH_ORIGIN", default_value = "http://localhost:8080")]
    origin: String,

    /// Base path used when the config has none
    #[arg(long, env = "BASE_URL")]
    base_url: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the provider configuration map
    #[command(name = "providers")]
    Providers,

    /// Print the full authentication options
    #[command(name = "options")]
    Options,

    /// Print the authorization URL of a provider
    #[command(name = "authorize-url")]
    AuthorizeUrl { provider: String },

    /// Report configuration issues
    #[command(name = "check")]
    Check,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env()?,
    };
    let origin = PageOrigin::parse(&args.origin)?;
    debug!("origin: {origin}");

    let ctx = CommandContext {
        config,
        origin,
        default_base_path: args.base_url,
    };
    let output = match args.command {
        Commands::Providers => providers_json(&ctx)?,
        Commands::Options => options_json(&ctx)?,
        Commands::AuthorizeUrl { provider } => authorize_url(&ctx, &provider)?,
        Commands::Check => check(&ctx)?,
    };
    println!("{output}");
    Ok(())
}
