use crate::catalog::Category;
use crate::error::RouteError;

pub const USER_AGENT: &str = "quartermaster-edge";

/// Fetches a text resource from the upstream host.
///
/// Single attempt, fail fast. Timeouts come from the shared client (10s,
/// set at startup) and surface as the same error kind as a non-2xx status,
/// so callers only ever see one failure shape.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String, RouteError> {
    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .header("Accept", "text/plain")
        .send()
        .await
        .map_err(|e| RouteError::UpstreamFetchFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    if !response.status().is_success() {
        return Err(RouteError::UpstreamFetchFailed {
            url: url.to_string(),
            reason: response.status().to_string(),
        });
    }

    response
        .text()
        .await
        .map_err(|e| RouteError::UpstreamFetchFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })
}

/// Drops blank lines and comment lines from a raw package list.
/// A comment is any line whose first non-whitespace character is '#'.
pub fn strip_package_list(raw: &str) -> String {
    raw.lines()
        .filter(|line| {
            let trimmed = line.trim_start();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fetches every category list in order and concatenates them into one
/// combined document, each block headed by a banner naming its category.
///
/// Fetches run sequentially, so output order is composition order by
/// construction. Any single failure voids the whole response; a partial
/// list would silently install a subset and that is worse than a 500.
pub async fn fetch_and_combine(
    client: &reqwest::Client,
    base: &str,
    categories: &[&Category],
) -> Result<String, RouteError> {
    let mut blocks = Vec::with_capacity(categories.len());

    for category in categories {
        let url = format!("{}/{}", base, category.path);
        let raw = fetch_text(client, &url).await?;
        blocks.push(format!(
            "# {} packages\n{}",
            category.name,
            strip_package_list(&raw)
        ));
    }

    Ok(blocks.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;
    use pretty_assertions::assert_eq;

    #[test]
    fn strip_drops_comments_and_blanks() {
        let raw = "# comment\npkgA\n\npkgB";
        assert_eq!(strip_package_list(raw), "pkgA\npkgB");
    }

    #[test]
    fn strip_treats_indented_hash_as_comment() {
        let raw = "  # indented comment\n\tpkgA\n   \npkgB  ";
        assert_eq!(strip_package_list(raw), "\tpkgA\npkgB  ");
    }

    #[test]
    fn strip_of_pure_comments_is_empty() {
        assert_eq!(strip_package_list("# a\n# b\n\n"), "");
    }

    async fn spawn_fixture_server() -> String {
        let app = Router::new()
            .route("/packages/test/alpha.txt", get(|| async { "# comment\npkgA\n\npkgB" }))
            .route("/packages/test/beta.txt", get(|| async { "pkgC" }))
            .route(
                "/packages/test/broken.txt",
                get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    static ALPHA: Category = Category { name: "alpha", path: "packages/test/alpha.txt" };
    static BETA: Category = Category { name: "beta", path: "packages/test/beta.txt" };
    static BROKEN: Category = Category { name: "broken", path: "packages/test/broken.txt" };

    #[tokio::test]
    async fn combine_strips_banners_and_preserves_order() {
        let base = spawn_fixture_server().await;
        let client = reqwest::Client::new();

        let combined = fetch_and_combine(&client, &base, &[&ALPHA, &BETA])
            .await
            .unwrap();

        assert_eq!(
            combined,
            "# alpha packages\npkgA\npkgB\n\n# beta packages\npkgC"
        );
    }

    #[tokio::test]
    async fn one_failed_fetch_voids_the_whole_response() {
        let base = spawn_fixture_server().await;
        let client = reqwest::Client::new();

        let err = fetch_and_combine(&client, &base, &[&ALPHA, &BROKEN, &BETA])
            .await
            .unwrap_err();

        match err {
            RouteError::UpstreamFetchFailed { url, reason } => {
                assert!(url.ends_with("/packages/test/broken.txt"));
                assert!(reason.contains("500"));
            }
            other => panic!("expected UpstreamFetchFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_resource_is_a_fetch_failure() {
        let base = spawn_fixture_server().await;
        let client = reqwest::Client::new();

        let err = fetch_text(&client, &format!("{}/no-such-file.txt", base))
            .await
            .unwrap_err();

        match err {
            RouteError::UpstreamFetchFailed { reason, .. } => assert!(reason.contains("404")),
            other => panic!("expected UpstreamFetchFailed, got {other:?}"),
        }
    }
}
