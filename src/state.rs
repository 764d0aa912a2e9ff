use std::time::Duration;

/// Shared state for all route handlers. Just the outbound client and the
/// upstream base URL; every routing table is a process-wide constant in
/// the catalog module.
#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub upstream_base: String,
}

impl AppState {
    /// Builds the state with the one outbound client the whole service
    /// shares. 10 second cap per fetch; a hung upstream must not hold a
    /// request open indefinitely. No retries anywhere, so this is also the
    /// worst-case time a single category fetch can cost.
    pub fn new(upstream_base: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("reqwest client construction only fails on broken TLS backends");

        Self { http, upstream_base }
    }
}
