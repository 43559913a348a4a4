//! Apiprobe CLI - environment checks and smoke calls

use clap::{Parser, Subcommand};
use colored::Colorize;

use apiprobe::error::{FixSuggestion, ProbeError};
use apiprobe::{ApiClient, AuthApi, EnvConfig, RequestOptions};

#[derive(Parser)]
#[command(name = "apiprobe")]
#[command(about = "Apiprobe - typed API test-harness core")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the environment configuration and print it (secrets masked)
    CheckEnv,

    /// Smoke-test the login endpoint with the configured credentials
    Login,
}

#[tokio::main]
async fn main() {
    // Initialize tracing (EnvConfig::load pulls in .env itself)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::CheckEnv => check_env(),
        Commands::Login => login_smoke().await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn check_env() -> Result<(), ProbeError> {
    let config = EnvConfig::load()?;

    println!("{}", "Environment configuration OK".green().bold());
    println!("  baseUrl:        {}", config.base_url);
    println!("  apiBaseUrl:     {}", config.api_base_url);
    println!("  defaultTimeout: {} ms", config.default_timeout_ms);
    println!("  userEmail:      {}", config.credentials.email);
    println!("  userPassword:   {}", mask(&config.credentials.password));
    println!("  apiBearerToken: {}", mask(&config.api_bearer_token));
    Ok(())
}

async fn login_smoke() -> Result<(), ProbeError> {
    let config = EnvConfig::load()?;
    let auth = AuthApi::new(ApiClient::from_config(&config)?);

    let credentials = apiprobe::testdata::valid_credentials(&config);
    let response = auth.login(&credentials, RequestOptions::new()).await?;
    auth.verify_successful_login(&response)?;

    println!(
        "{} logged in as {}",
        "OK".green().bold(),
        config.credentials.email
    );
    Ok(())
}

/// Keep the first two characters, hide the rest
fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(2).collect();
    format!("{}{}", visible, "*".repeat(secret.chars().count().saturating_sub(2)))
}
