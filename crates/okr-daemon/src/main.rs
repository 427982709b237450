use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use okr_core::{seed, MemStore};
use okr_daemon::{api, config::DaemonConfig, sweep};
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "okr-daemon", version, about = "OKR tracking daemon")]
struct Cli {
    /// Where the HTTP API will listen, e.g. 127.0.0.1:8080
    #[arg(long, default_value = "127.0.0.1:8080")]
    listen: String,

    /// Start with an empty store instead of the demo data.
    #[arg(long, default_value_t = false)]
    skip_seed: bool,

    /// Due-reminder sweep interval in seconds (0 disables the sweep).
    #[arg(long, default_value_t = 60)]
    reminder_sweep_seconds: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_target(false)
        .with_max_level(Level::INFO)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = DaemonConfig {
        skip_seed: cli.skip_seed,
        reminder_sweep_seconds: cli.reminder_sweep_seconds,
    };

    let store = Arc::new(MemStore::new());
    if !config.skip_seed {
        seed::seed_sample_data(&store);
        info!("seeded sample objectives, tasks, and reminders");
    }

    let state = api::AppState::new(store, config);
    sweep::spawn_reminder_sweep(state.clone());

    let app = api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = cli.listen.parse()?;
    info!("listening on http://{}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    info!("shutdown requested");
}
