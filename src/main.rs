use chrono::Local;
use habit_tracker::{
    AppState, Config, Tracker,
    calendar::MonthRef,
    ids::UuidGenerator,
    router,
    storage::{FileStore, Persistence},
};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    fs::create_dir_all(&config.data_dir).await?;
    info!("storing data in {}", config.data_dir.display());

    let persistence = Persistence::new(FileStore::new(&config.data_dir));
    let this_month = MonthRef::of(Local::now().date_naive());
    let tracker = tokio::task::spawn_blocking(move || {
        Tracker::open(persistence, UuidGenerator, this_month)
    })
    .await?;
    let app = router(AppState::new(tracker));

    let addr = config.addr();
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
    }
}
