use axum::extract::{Path, State};
use axum::response::Response;
use axum_extra::extract::Host;

use super::serve;
use crate::catalog::Platform;
use crate::error::RouteError;
use crate::state::AppState;
use crate::{templates, upstream};

/// GET /config/{file} - one named dotfile, fetched verbatim from upstream.
/// The key space is the platform's declared table, nothing else.
pub async fn config_file(
    State(state): State<AppState>,
    Host(host): Host,
    Path(key): Path<String>,
) -> Result<Response, RouteError> {
    let platform = Platform::from_host(&host).ok_or(RouteError::UnrecognizedHost)?;

    let entry = platform
        .config_file(&key)
        .ok_or_else(|| RouteError::UnknownConfigKey {
            key: key.clone(),
            available: platform.config_keys(),
        })?;

    tracing::info!("Fetching config file: {}", key);

    let url = format!("{}/{}", state.upstream_base, entry.path);
    let content = upstream::fetch_text(&state.http, &url).await?;
    Ok(serve(content, entry.content_type))
}

/// GET /config/all - a locally generated script that re-downloads every
/// declared dotfile, backing up existing copies first. Nothing is fetched
/// to build it; the dotfile table is the source of truth.
pub async fn config_update_script(Host(host): Host) -> Result<Response, RouteError> {
    let platform = Platform::from_host(&host).ok_or(RouteError::UnrecognizedHost)?;

    tracing::info!("Serving config update script for {:?}", platform);

    let script = templates::config_update_script(platform, &host);
    Ok(serve(script, platform.script_content_type()))
}
