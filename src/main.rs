mod board;
mod directory;
mod error;
mod export;
mod web;

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = std::env::args().collect();
    let port = args
        .get(1)
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);
    let passphrase = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string()); // Default password, change this!

    info!("starting board server on port {port}");
    info!("access the board at http://localhost:{port}");

    web::start_server(port, passphrase, PathBuf::from(directory::STORAGE_FILE)).await
}
