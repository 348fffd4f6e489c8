//! Claimgate CLI
//!
//! Command-line interface for evaluating OpenID Connect claims requests
//! against user fixtures and stored consent.

use anyhow::Result;
use clap::{Parser, Subcommand};
use claimgate_oidc::{ClaimsConfig, ScopeStrategyKind};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::Bucket;

#[derive(Parser)]
#[command(name = "claimgate")]
#[command(author, version, about = "Claimgate: OpenID Connect claims request evaluation", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, global = true, env = "CLAIMGATE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a claims request and print the granted claims
    Grant {
        /// Raw JSON value of the claims parameter
        #[arg(long, conflicts_with = "form")]
        claims: Option<String>,

        /// Form-encoded request body or query string carrying a claims parameter
        #[arg(long)]
        form: Option<String>,

        /// User details file (JSON)
        #[arg(short, long)]
        user: PathBuf,

        /// Scopes granted to the client (space-separated)
        #[arg(short, long, default_value = "openid")]
        scopes: String,

        /// Client identifier
        #[arg(long, default_value = "claimgate-cli")]
        client_id: String,

        /// Which claims bucket to evaluate
        #[arg(short, long, value_enum, default_value_t = Bucket::Userinfo)]
        bucket: Bucket,

        /// Authenticated subject, checked against any requested `sub`
        #[arg(long)]
        subject: Option<String>,

        /// Override the configured scope strategy
        #[arg(long)]
        strategy: Option<ScopeStrategyKind>,
    },

    /// Check a claims request against the authenticated subject
    Subject {
        /// Raw JSON value of the claims parameter
        #[arg(long, conflicts_with = "form")]
        claims: Option<String>,

        /// Form-encoded request body or query string carrying a claims parameter
        #[arg(long)]
        form: Option<String>,

        /// Authenticated subject identifier
        #[arg(short, long)]
        subject: String,
    },

    /// Replay a stored consent record onto an authorization request
    Consent {
        /// Consent session file (JSON)
        #[arg(long)]
        consent: PathBuf,

        /// Authorization request file (JSON), a fresh request if omitted
        #[arg(short, long)]
        request: Option<PathBuf>,
    },

    /// Show the effective configuration
    Status,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("claimgate={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClaimsConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Grant {
            claims,
            form,
            user,
            scopes,
            client_id,
            bucket,
            subject,
            strategy,
        } => {
            let config = match strategy {
                Some(strategy) => config.with_scope_strategy(strategy),
                None => config,
            };
            commands::grant::run(commands::grant::GrantArgs {
                config: &config,
                claims,
                form,
                user: &user,
                scopes: &scopes,
                client_id,
                bucket,
                subject: subject.as_deref(),
            })?;
        }
        Commands::Subject {
            claims,
            form,
            subject,
        } => {
            commands::subject::run(claims, form, &subject)?;
        }
        Commands::Consent { consent, request } => {
            commands::consent::run(&consent, request.as_deref())?;
        }
        Commands::Status => {
            commands::status::show(&config, cli.config.as_deref());
        }
    }

    Ok(())
}
