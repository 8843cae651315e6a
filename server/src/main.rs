use anyhow::Result;
use axum::Router;
use clap::Parser;
use pulse_core::youtube::DEFAULT_API_BASE;
use pulse_server::{build_app, ServerConfig};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// YouTube Data API base URL
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = ServerConfig::from_env(args.api_base);
    let app: Router = build_app(&config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
