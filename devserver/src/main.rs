//! Local development server for the chat widget.
//!
//! Serves the built widget, an embed snippet, a demo host page and a stub of
//! the public chat endpoint, so the widget can be clicked through without the
//! production backend.

mod routes;
mod state;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum DevServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("server failed: {0}")]
    Serve(#[source] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "widget-devserver", about = "Serve the chat widget and a stub chat API for local testing")]
struct Cli {
    /// Address to listen on.
    #[arg(long, env = "WIDGET_DEV_BIND", default_value = "127.0.0.1:8000")]
    bind: SocketAddr,

    /// `wasm-bindgen --target no-modules` output directory.
    #[arg(long, env = "WIDGET_PKG_DIR", default_value = "pkg")]
    pkg_dir: PathBuf,

    /// Origin written into the embed snippet; defaults to `http://{bind}`.
    #[arg(long, env = "WIDGET_PUBLIC_URL")]
    public_url: Option<String>,

    /// Shop the demo page embeds the widget for.
    #[arg(long, env = "WIDGET_SHOP_ID", default_value = "demo-shop")]
    shop_id: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "devserver stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), DevServerError> {
    let public_url = cli.public_url.unwrap_or_else(|| format!("http://{}", cli.bind));
    if !cli.pkg_dir.join(routes::widget::GLUE_FILE).is_file() {
        tracing::warn!(pkg_dir = %cli.pkg_dir.display(), "no widget build found; widget.js will return 404");
    }
    let state = state::AppState::new(cli.pkg_dir, &public_url, cli.shop_id);
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .map_err(|source| DevServerError::Bind { addr: cli.bind, source })?;

    tracing::info!(addr = %cli.bind, %public_url, "widget devserver listening");
    axum::serve(listener, app).await.map_err(DevServerError::Serve)
}
