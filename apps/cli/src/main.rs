//! # nextbuy: NextBuy Storefront CLI
//!
//! ```text
//! nextbuy [--config <path>] [--api-url <url>] <command>
//!
//!   products     fetch the catalog once and print it
//!   shell        interactive cart session
//!   login        simulated login
//!   signup       simulated signup (user or admin)
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG` to change the filter.

mod render;
mod shell;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use nextbuy_core::{AccountType, FormErrors, LoginForm, SignupForm};
use nextbuy_store::{AuthService, CatalogLoader, Store, StorefrontConfig};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::shell::Shell;

#[derive(Parser)]
#[command(name = "nextbuy")]
#[command(author, version, about = "NextBuy storefront from the terminal")]
#[command(propagate_version = true)]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the product API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the catalog and print it
    Products {
        /// Print the raw product records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive cart session
    Shell,

    /// Simulated login
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Simulated signup
    Signup(SignupArgs),
}

#[derive(Args)]
struct SignupArgs {
    /// Register an admin account
    #[arg(long)]
    admin: bool,

    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    password: String,

    /// Repeat of the password
    #[arg(long)]
    confirm_password: String,

    #[arg(long)]
    phone: String,

    /// Admin verification code
    #[arg(long, default_value = "")]
    admin_code: String,

    #[arg(long, default_value = "")]
    business_name: String,

    #[arg(long, default_value = "")]
    business_address: String,
}

impl From<SignupArgs> for SignupForm {
    fn from(args: SignupArgs) -> Self {
        SignupForm {
            account_type: if args.admin {
                AccountType::Admin
            } else {
                AccountType::User
            },
            name: args.name,
            email: args.email,
            password: args.password,
            confirm_password: args.confirm_password,
            phone: args.phone,
            admin_code: args.admin_code,
            business_name: args.business_name,
            business_address: args.business_address,
        }
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,nextbuy=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<StorefrontConfig> {
    let mut config =
        StorefrontConfig::load(cli.config.clone()).context("Failed to load configuration")?;

    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
        config.validate().context("Invalid --api-url")?;
    }

    info!(url = %config.products_url(), policy = %config.fetch_policy(), "Configuration loaded");
    Ok(config)
}

fn print_form_errors(errors: &FormErrors) {
    eprintln!("Please fix the following:");
    for (field, err) in errors.iter() {
        eprintln!("  {}: {}", field, err);
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Products { json } => {
            let store = Store::new();
            let loader = CatalogLoader::from_config(store.clone(), &config)?;
            loader
                .load()
                .await
                .with_context(|| format!("Could not load products from {}", config.products_url()))?;

            let mut stdout = std::io::stdout().lock();
            if json {
                serde_json::to_writer_pretty(&mut stdout, &store.catalog().data)?;
                writeln!(stdout)?;
            } else {
                render::write_catalog(&mut stdout, &store.catalog())?;
            }
        }

        Commands::Shell => {
            let store = Store::new();
            let loader = CatalogLoader::from_config(store, &config)?;
            println!("NextBuy shell. Type `help` for commands.");

            let stdin = BufReader::new(tokio::io::stdin());
            Shell::new(loader).run(stdin, &mut std::io::stdout()).await?;
        }

        Commands::Login { email, password } => {
            let auth = AuthService::new(config.auth.clone());
            match auth.login(&LoginForm::new(email, password)).await {
                Ok(session) => println!("Logged in as {} (session {})", session.email, session.token),
                Err(errors) => {
                    print_form_errors(&errors);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }

        Commands::Signup(args) => {
            let auth = AuthService::new(config.auth.clone());
            match auth.signup(&SignupForm::from(args)).await {
                Ok(registration) => {
                    println!(
                        "Registered {} account for {} <{}>",
                        registration.account_type, registration.name, registration.email
                    );
                    if let Some(business) = &registration.business_name {
                        println!("Business: {}", business);
                    }
                }
                Err(errors) => {
                    print_form_errors(&errors);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "nextbuy",
            "products",
            "--json",
            "--api-url",
            "http://localhost:3000",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:3000"));
        assert!(matches!(cli.command, Commands::Products { json: true }));
    }

    #[test]
    fn test_signup_args_to_form() {
        let cli = Cli::try_parse_from([
            "nextbuy",
            "signup",
            "--admin",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
            "--password",
            "secret1",
            "--confirm-password",
            "secret1",
            "--phone",
            "5551234567",
            "--admin-code",
            "ADMIN2024",
            "--business-name",
            "Engines",
            "--business-address",
            "1 Loop Rd",
        ])
        .unwrap();

        let Commands::Signup(args) = cli.command else {
            panic!("expected signup");
        };
        let form = SignupForm::from(args);
        assert_eq!(form.account_type, AccountType::Admin);
        assert!(form.validate("ADMIN2024").is_ok());
    }
}
