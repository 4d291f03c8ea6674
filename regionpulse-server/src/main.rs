use clap::Parser;
use regionpulse_server::config::DEFAULT_LISTEN_ADDR;
use regionpulse_server::dataset::DatasetSource;
use regionpulse_server::{Server, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "regionpulse-server")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
    listen: SocketAddr,

    /// Telemetry file (`.csv`, otherwise JSON). The built-in dataset is served when omitted.
    #[arg(long)]
    dataset: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = ServerConfig {
        address: args.listen,
        dataset: args.dataset.map(DatasetSource::from_path).unwrap_or(DatasetSource::Embedded),
    };

    let (ready_tx, _ready_rx) = tokio::sync::oneshot::channel();
    Server::new(config).run(ready_tx).await?;
    Ok(())
}
