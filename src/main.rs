use clap::Parser;
use connecthub_server::{start_connecthub_server, CmdArgs};
use connecthub_utils::error::ConnectHubResult;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
pub async fn main() -> ConnectHubResult<()> {
  let filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .from_env_lossy();
  tracing_subscriber::fmt().with_env_filter(filter).init();

  let args = CmdArgs::parse();

  start_connecthub_server(args).await?;
  Ok(())
}
