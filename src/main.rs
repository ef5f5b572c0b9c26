use color_eyre::Result;

use erpsync::cli::{parse_args, run_cli_command};
use erpsync::startup::{init_tracing, ClientConfig};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = ClientConfig::from_env();
    init_tracing(&config.log_level);

    let command = parse_args(std::env::args());
    run_cli_command(command, config).await
}
