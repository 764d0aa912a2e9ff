use axum::extract::{Path, State};
use axum::response::Response;
use axum_extra::extract::Host;

use super::serve;
use crate::catalog::{self, Platform};
use crate::error::RouteError;
use crate::state::AppState;
use crate::{compose, rewrite, templates, upstream};

/// GET / - the platform's base install script, verbatim.
pub async fn base_script(
    State(state): State<AppState>,
    Host(host): Host,
) -> Result<Response, RouteError> {
    let platform = Platform::from_host(&host).ok_or(RouteError::UnrecognizedHost)?;

    let url = format!("{}/{}", state.upstream_base, platform.script_path());
    tracing::info!("Serving base install script from {}", url);

    let script = upstream::fetch_text(&state.http, &url).await?;
    Ok(serve(script, platform.script_content_type()))
}

/// GET /{profile} - the base install script with its embedded package
/// source redirected to the requested composition.
///
/// The expression is validated before any fetch so a typo stays a cheap
/// 400 instead of costing an upstream round trip.
pub async fn profile_script(
    State(state): State<AppState>,
    Host(host): Host,
    Path(expr): Path<String>,
) -> Result<Response, RouteError> {
    let platform = Platform::from_host(&host).ok_or(RouteError::UnrecognizedHost)?;

    compose::compose(platform.packages(), &expr)?;

    let url = format!("{}/{}", state.upstream_base, platform.script_path());
    tracing::info!("Serving install script for profiles '{}' from {}", expr, url);

    let script = upstream::fetch_text(&state.http, &url).await?;
    let replacement = platform.package_source_line(&host, &expr);
    let script =
        rewrite::rewrite_package_source(&script, platform.package_source_marker(), &replacement)?;

    Ok(serve(script, platform.script_content_type()))
}

/// GET /post-install - the Windows post-install script, verbatim.
/// Only Windows has one; the route 404s on the other platforms.
pub async fn post_install_script(
    State(state): State<AppState>,
    Host(host): Host,
) -> Result<Response, RouteError> {
    let platform = Platform::from_host(&host).ok_or(RouteError::UnrecognizedHost)?;
    if platform != Platform::Windows {
        return Err(RouteError::UnmatchedPath);
    }

    let url = format!("{}/{}", state.upstream_base, catalog::WINDOWS_POST_INSTALL_SCRIPT);
    tracing::info!("Serving post-install script from {}", url);

    let script = upstream::fetch_text(&state.http, &url).await?;
    Ok(serve(script, catalog::POWERSHELL))
}

/// GET /msstore/{profile} - a locally generated PowerShell installer that
/// pulls the composed Microsoft Store list and feeds it to winget.
pub async fn msstore_install_script(
    Host(host): Host,
    Path(expr): Path<String>,
) -> Result<Response, RouteError> {
    let platform = Platform::from_host(&host).ok_or(RouteError::UnrecognizedHost)?;
    if platform != Platform::Windows {
        return Err(RouteError::UnmatchedPath);
    }

    // Validate now; the generated script assumes the list endpoint resolves.
    compose::compose(&catalog::MSSTORE, &expr)?;

    tracing::info!("Serving Microsoft Store installer for profiles '{}'", expr);
    Ok(serve(templates::msstore_install_script(&host, &expr), catalog::POWERSHELL))
}
