use quartermaster::{AppState, catalog, routes};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 0. Load .env file immediately
    // Uses dotenvy which is just dotenv but maintained. Silently ignores if no .env exists.
    dotenvy::dotenv().ok();

    // 1. Initialize Sentry (if configured)
    // This guard must be kept in scope for Sentry to work
    let _guard = sentry::init((std::env::var("SENTRY_DSN").ok(), sentry::ClientOptions {
        release: sentry::release_name!(),
        traces_sample_rate: 1.0,
        ..Default::default()
    }));

    // 2. Install rustls crypto provider
    // This needs to happen before any TLS connections are made (the upstream fetches).
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // 3. Initialize logging
    // Uses tracing for structured logs. Respects RUST_LOG env var.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "quartermaster=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer()) // Sentry integration
        .init();

    tracing::info!("Starting Quartermaster script dispatcher...");

    // 4. Resolve the upstream base
    // Everything we serve comes from this static-file host. Overridable so
    // staging deployments can point at a branch instead of main.
    let upstream_base = std::env::var("UPSTREAM_BASE_URL")
        .unwrap_or_else(|_| catalog::DEFAULT_UPSTREAM_BASE.to_string());
    tracing::info!("Upstream base: {}", upstream_base);

    // 5. Build the app state
    // This is what gets passed to all route handlers. Contains the shared
    // outbound client (with its fetch timeout) and the upstream base.
    let state = AppState::new(upstream_base);
    let app = routes::create_routes(state);

    // 6. Start the server
    // Listens on PORT env var (defaults to 3000).
    // 0.0.0.0 so it binds to all interfaces (necessary in Docker).
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = SocketAddr::from(([0, 0, 0, 0], port.parse()?));

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
