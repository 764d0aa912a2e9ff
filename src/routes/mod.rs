use crate::catalog::Platform;
use crate::error::RouteError;
use crate::handlers::{
    dotfiles::{config_file, config_update_script},
    health::health_check,
    install::{base_script, msstore_install_script, post_install_script, profile_script},
    packages::{msstore_package_list, package_list},
};
use crate::middleware::rate_limit;
use crate::state::AppState;
use axum::{Router, handler::Handler, routing::get};
use axum_extra::extract::Host;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn create_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let fetch_conf = rate_limit::create_fetch_config();

    // Static segments win over captures in axum, so /packages/msstore/...
    // never lands in the generic {profile} route below it.
    let package_routes = Router::new()
        .route(
            "/msstore/{profile}",
            get(msstore_package_list.layer(GovernorLayer::new(fetch_conf.clone()))),
        )
        .route(
            "/{profile}",
            get(package_list.layer(GovernorLayer::new(fetch_conf))),
        );

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(base_script))
        .route("/post-install", get(post_install_script))
        .route("/msstore/{profile}", get(msstore_install_script))
        .route("/config/all", get(config_update_script))
        .route("/config/{file}", get(config_file))
        .nest("/packages", package_routes)
        // Last because it captures any single remaining segment.
        .route("/{profile}", get(profile_script))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Exhaustive fallback arm: a recognized host off the route table is a
/// 404, anything else keeps getting the teapot.
async fn not_found(Host(host): Host) -> RouteError {
    match Platform::from_host(&host) {
        Some(_) => RouteError::UnmatchedPath,
        None => RouteError::UnrecognizedHost,
    }
}
