use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use simdrive_launcher::helpers::surface_base_url;
use simdrive_launcher::spawner::RealProcessSpawner;
use simdrive_launcher::{router, AppState, LauncherProfile};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "simdrive-launcher")]
#[command(about = "Browser wizard that launches CARLA scenario runs in new terminals")]
struct Cli {
    /// TCP address to bind the web server
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Launcher profile (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory containing the wizard frontend
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Open fullscreen wizard windows on three displays
    #[arg(long)]
    presentation: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "simdrive_launcher=info,simdrive_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let profile = match &cli.config {
        Some(path) => match LauncherProfile::load(path) {
            Ok(profile) => {
                info!("Loaded launcher profile {}", path.display());
                profile
            }
            Err(err) => {
                error!("{err}");
                std::process::exit(1);
            }
        },
        None => LauncherProfile::default(),
    };

    if let Some(dir) = &profile.runner_dir {
        if !dir.is_dir() {
            warn!("Runner directory {} does not exist", dir.display());
        }
    }

    let state = AppState::new(&profile, Arc::new(RealProcessSpawner));

    let static_dir = cli
        .static_dir
        .unwrap_or_else(|| PathBuf::from("crates/simdrive-launcher/static"));

    info!("Serving static files from: {}", static_dir.display());

    let app = router(state.clone(), static_dir);

    let listener = match TcpListener::bind(cli.bind).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind {}: {err}", cli.bind);
            std::process::exit(1);
        }
    };

    info!("simdrive launcher: http://{}", cli.bind);

    if cli.presentation {
        let base_url = surface_base_url(cli.bind);
        if let Err(err) = state
            .session
            .open_windows(&profile.presentation, &base_url, state.spawner.as_ref())
            .await
        {
            error!("Presentation windows not opened: {err}");
        }
    }

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {err}");
    }

    state.session.teardown().await;
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
