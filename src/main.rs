// This is the entry point for the image transform server.
// The lib.rs file serves only as a public API for external consumers.

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use image_transformer::registry;
use image_transformer::server;

#[derive(Parser, Debug)]
#[command(name = "image-transformer", about = "HTTP pixel-transform service")]
struct Args {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Allowed CORS origin ("*" for any)
    #[arg(long, env = "CORS_ORIGIN", default_value = "*")]
    cors_origin: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .with_target(false)
        .with_ansi(true)
        .compact();

    subscriber.init();

    let args = Args::parse();
    info!(
        "=== Server starting ({} operations registered) ===",
        registry::operation_names().len()
    );

    let app = server::router(&args.cors_origin);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", args.port))
        .await
        .with_context(|| format!("failed to bind port {}", args.port))?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .context("server terminated")?;
    Ok(())
}
