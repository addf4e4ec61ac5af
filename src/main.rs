use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use summercamp_web::{
    cache::AppCache,
    clock::SystemClock,
    config::Config,
    notify::notifier_from_config,
    payment::HttpPaymentGateway,
    router,
    storage::{BookingRepository, ConsentRepository, MemoryStore, PgStore},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("Invalid configuration")?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Summer Camp booking API");

    let (bookings, consents): (Arc<dyn BookingRepository>, Arc<dyn ConsentRepository>) = match &config.database.url {
        Some(url) => {
            let store = PgStore::connect(url, &config.database)
                .await
                .context("Failed to connect to database")?;
            (Arc::new(store.clone()), Arc::new(store))
        }
        None => {
            warn!("DATABASE_URL not set - bookings are kept in memory and lost on restart");
            let store = MemoryStore::new();
            (Arc::new(store.clone()), Arc::new(store))
        }
    };

    let timeout = Duration::from_secs(config.payment.timeout_secs);
    let gateway = HttpPaymentGateway::from_config(&config.payment).context("Failed to build payment client")?;
    let notifier = notifier_from_config(&config.email, timeout).context("Failed to build mail client")?;

    let addr: SocketAddr = format!("{}:{}", config.app.host, config.app.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.app.host, config.app.port))?;

    let state = AppState {
        config: Arc::new(config),
        cache: AppCache::new(),
        bookings,
        consents,
        gateway: Arc::new(gateway),
        notifier,
        clock: Arc::new(SystemClock),
    };

    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
