//! Tic Tac Toe lobby server - Entry Point
//!
//! Players join under a name, list who is online, and ask for each other's
//! address to start a game directly between themselves.

use clap::Parser;
use log::{error, info};

use ttt_lobby_server::error::ServerError;
use ttt_lobby_server::{Server, ServerConfig};

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Port to listen on, overriding the configured one
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // RUST_LOG overrides the default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Launching lobby server...");

    if let Err(e) = run(args).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), ServerError> {
    let mut config = ServerConfig::load()?;
    if let Some(port) = args.port {
        config.port = port;
    }

    let server = Server::bind(config).await?;
    server.run().await;
    Ok(())
}
