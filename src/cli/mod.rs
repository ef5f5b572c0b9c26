//! CLI module for erpsync.
//!
//! # Usage
//!
//! ```ignore
//! use erpsync::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! run_cli_command(command, ClientConfig::from_env()).await?;
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use version::{version_line, VERSION};

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use std::io::{self, Write};
use std::sync::Arc;

use crate::adapters::LoggingNavigator;
use crate::client::{AuthenticatedClient, RequestDescriptor};
use crate::startup::ClientConfig;

/// Environment variable holding the password for `erpsync login`.
///
/// When unset the password is prompted for without echo.
pub const PASSWORD_ENV: &str = "ERPSYNC_PASSWORD";

/// Run a parsed command against the API described by `config`.
pub async fn run_cli_command(command: CliCommand, config: ClientConfig) -> Result<()> {
    match command {
        CliCommand::Version => println!("{}", version_line()),
        CliCommand::Help => println!("{}", USAGE),
        CliCommand::Get(path) => {
            let navigator = Arc::new(LoggingNavigator::new());
            let client = AuthenticatedClient::from_config(config, navigator.clone())?;
            let url = client.config().url(&path);

            let result = client.send(RequestDescriptor::get(url)).await;
            if navigator.is_signed_out() {
                return Err(eyre!("Session ended. Run `erpsync login <email>` to sign in again."));
            }
            let response = result.map_err(|e| {
                let category = e.category();
                tracing::debug!(category = category.as_str(), code = e.error_code(), "Request failed: {}", e);
                eyre!("{} {}.", e.user_message(), category.recovery_hint())
            })?;
            println!("{}", String::from_utf8_lossy(&response.body));
            if !response.is_success() {
                return Err(eyre!("Request failed with status {}", response.status));
            }
        }
        CliCommand::Login(email) => {
            let password = match std::env::var(PASSWORD_ENV) {
                Ok(password) if !password.is_empty() => password,
                _ => {
                    print!("Password for {}: ", email);
                    io::stdout().flush()?;
                    rpassword::read_password().wrap_err("Failed to read password")?
                }
            };
            let client =
                AuthenticatedClient::from_config(config, Arc::new(LoggingNavigator::new()))?;
            client
                .sign_in(&email, &password)
                .await
                .map_err(|e| eyre!(e.user_message()))?;
            println!("Signed in as {}", email);
        }
        CliCommand::Logout => {
            let client =
                AuthenticatedClient::from_config(config, Arc::new(LoggingNavigator::new()))?;
            client.sign_out().await;
            println!("Signed out");
        }
    }
    Ok(())
}
