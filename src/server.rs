use std::net::{Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};
use axum::Router;
use tower_http::services::ServeDir;
use tracing::{info, warn};

pub const PAGE_FILENAME: &str = "spideypass.html";

const PAGE: &str = include_str!("../assets/spideypass.html");

/// Write the demo page into a temp directory, serve it read-only from
/// loopback, optionally open a browser, and run until interrupted.
/// Startup failures abort before any browser open is attempted.
pub async fn run(port: u16, open_browser: bool) -> Result<()> {
    let dir = tempfile::Builder::new()
        .prefix("spideypass-")
        .tempdir()
        .context("Failed to create temporary directory")?;
    let page_path = dir.path().join(PAGE_FILENAME);
    std::fs::write(&page_path, PAGE)
        .with_context(|| format!("Failed to write demo page to {}", page_path.display()))?;

    let app = Router::new().fallback_service(ServeDir::new(dir.path()));

    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    let local_addr = listener
        .local_addr()
        .context("Failed to read bound address")?;

    let url = format!("http://{local_addr}/{PAGE_FILENAME}");
    info!("Serving demo at {url}");
    info!("Press Ctrl+C to stop");

    if open_browser {
        if let Err(err) = webbrowser::open(&url) {
            warn!("Could not open browser: {err}");
        }
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
