use std::process::ExitCode;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;

use peerlink::adapters::ReqwestHttpClient;
use peerlink::cli::{execute, parse_args};
use peerlink::config::ClientConfig;
use peerlink::gateway::Gateway;
use peerlink::logging;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = parse_args(std::env::args());
    logging::init(cli.verbosity);

    let config = ClientConfig::from_env().wrap_err("invalid configuration")?;
    let http = ReqwestHttpClient::from_config(&config).wrap_err("failed to build HTTP client")?;
    tracing::debug!(api = %config.api_base_url, "Starting");

    let gateway = Gateway::new(http, config);
    let mut stdout = std::io::stdout();
    let ok = execute(cli.command, gateway, &mut stdout).await?;

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
