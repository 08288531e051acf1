use fraud_lens::config::Config;
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        data_dir = %cfg.source.data_dir.display(),
        database_url = %cfg.source.database_url.as_deref().unwrap_or("<none>"),
        loglevel = %cfg.basic.loglevel,
    );

    let report = match fraud_lens::pipeline::build_report(&cfg.source).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "failed to build dashboard summary");
            return Err(e.into());
        }
    };

    let state = fraud_lens::router::LensState::new(report)?;
    let app = fraud_lens::router::lens_router(state);

    let addr = cfg.listen_socket();
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}
