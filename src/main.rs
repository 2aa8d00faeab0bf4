//! Order book server: one symbol, line-framed JSON over TCP.

use matchbook::logger::TracingLogger;
use matchbook::server;
use matchbook::OrderBook;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    let book = Arc::new(Mutex::new(OrderBook::with_logger(Box::new(TracingLogger))));
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("listening on 0.0.0.0:{}", port);
    server::serve(listener, book).await?;
    Ok(())
}
