use axum::extract::{Path, State};
use axum::response::Response;
use axum_extra::extract::Host;

use super::serve;
use crate::catalog::{MSSTORE, PLAINTEXT, Platform};
use crate::error::RouteError;
use crate::state::AppState;
use crate::{compose, upstream};

/// GET /packages/{profile} - the combined, de-commented package list for a
/// composition expression, in the platform's native package catalog.
pub async fn package_list(
    State(state): State<AppState>,
    Host(host): Host,
    Path(expr): Path<String>,
) -> Result<Response, RouteError> {
    let platform = Platform::from_host(&host).ok_or(RouteError::UnrecognizedHost)?;

    let catalog = platform.packages();
    let categories = compose::compose(catalog, &expr)?;
    tracing::info!(
        "Composing {} list for categories: {}",
        catalog.kind,
        categories.iter().map(|c| c.name).collect::<Vec<_>>().join(", ")
    );

    let combined =
        upstream::fetch_and_combine(&state.http, &state.upstream_base, &categories).await?;
    Ok(serve(combined, PLAINTEXT))
}

/// GET /packages/msstore/{profile} - same, from the Microsoft Store
/// catalog. Windows only.
pub async fn msstore_package_list(
    State(state): State<AppState>,
    Host(host): Host,
    Path(expr): Path<String>,
) -> Result<Response, RouteError> {
    let platform = Platform::from_host(&host).ok_or(RouteError::UnrecognizedHost)?;
    if platform != Platform::Windows {
        return Err(RouteError::UnmatchedPath);
    }

    let categories = compose::compose(&MSSTORE, &expr)?;
    tracing::info!(
        "Composing msstore list for categories: {}",
        categories.iter().map(|c| c.name).collect::<Vec<_>>().join(", ")
    );

    let combined =
        upstream::fetch_and_combine(&state.http, &state.upstream_base, &categories).await?;
    Ok(serve(combined, PLAINTEXT))
}
