use crate::catalog::{Category, PackageCatalog};
use crate::error::RouteError;

/// Expands a `+`-delimited composition expression into an ordered category
/// list.
///
/// Each token either names a profile (expanded to its category set) or a
/// raw category. Duplicates are dropped, first occurrence wins, so
/// "developer+gamer" yields their union with the shared categories listed
/// once, in the order they were first contributed.
///
/// Unknown tokens are collected and reported together instead of failing
/// on the first one, so a caller with two typos sees both. A profile that
/// references a category missing from its own catalog fails the same way;
/// silently dropping entries would install the wrong set.
pub fn compose<'a>(
    catalog: &'a PackageCatalog,
    expr: &str,
) -> Result<Vec<&'a Category>, RouteError> {
    let tokens: Vec<String> = expr
        .split('+')
        .map(|t| t.trim().to_ascii_lowercase())
        .collect();

    let mut resolved: Vec<&Category> = Vec::new();
    let mut unknown: Vec<String> = Vec::new();

    for token in &tokens {
        if let Some(profile) = catalog.profile(token) {
            for name in profile.categories {
                match catalog.category(name) {
                    Some(category) => push_unique(&mut resolved, category),
                    None => unknown.push(name.to_string()),
                }
            }
        } else if let Some(category) = catalog.category(token) {
            push_unique(&mut resolved, category);
        } else {
            unknown.push(token.clone());
        }
    }

    if !unknown.is_empty() {
        return Err(RouteError::UnknownProfileOrCategory {
            tokens: unknown,
            available: catalog.known_names(),
        });
    }

    Ok(resolved)
}

fn push_unique<'a>(resolved: &mut Vec<&'a Category>, category: &'a Category) {
    if !resolved.iter().any(|c| c.name == category.name) {
        resolved.push(category);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Profile;
    use pretty_assertions::assert_eq;

    static CATALOG: PackageCatalog = PackageCatalog {
        kind: "test",
        categories: &[
            Category { name: "base", path: "packages/test/base.txt" },
            Category { name: "devtools", path: "packages/test/devtools.txt" },
            Category { name: "gametools", path: "packages/test/gametools.txt" },
            Category { name: "extras", path: "packages/test/extras.txt" },
        ],
        profiles: &[
            Profile { name: "dev", categories: &["base", "devtools"] },
            Profile { name: "gaming", categories: &["base", "gametools"] },
        ],
    };

    fn names(expr: &str) -> Vec<&'static str> {
        compose(&CATALOG, expr)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect()
    }

    #[test]
    fn overlapping_profiles_dedup_shared_categories() {
        assert_eq!(names("dev+gaming"), vec!["base", "devtools", "gametools"]);
    }

    #[test]
    fn raw_categories_compose_in_order() {
        assert_eq!(names("extras+base"), vec!["extras", "base"]);
    }

    #[test]
    fn profiles_and_raw_categories_mix() {
        assert_eq!(names("dev+extras"), vec!["base", "devtools", "extras"]);
    }

    #[test]
    fn repeated_tokens_collapse() {
        assert_eq!(names("base+base+dev"), vec!["base", "devtools"]);
    }

    #[test]
    fn tokens_are_trimmed_and_lowercased() {
        assert_eq!(names(" Dev + GAMETOOLS "), vec!["base", "devtools", "gametools"]);
    }

    #[test]
    fn unknown_token_fails_with_exactly_that_token() {
        let err = compose(&CATALOG, "unknownthing").unwrap_err();
        match err {
            RouteError::UnknownProfileOrCategory { tokens, available } => {
                assert_eq!(tokens, vec!["unknownthing".to_string()]);
                assert!(available.contains(&"dev".to_string()));
                assert!(available.contains(&"base".to_string()));
            }
            other => panic!("expected UnknownProfileOrCategory, got {other:?}"),
        }
    }

    #[test]
    fn all_unknown_tokens_are_reported_together() {
        let err = compose(&CATALOG, "dev+nope+also").unwrap_err();
        match err {
            RouteError::UnknownProfileOrCategory { tokens, .. } => {
                assert_eq!(tokens, vec!["nope".to_string(), "also".to_string()]);
            }
            other => panic!("expected UnknownProfileOrCategory, got {other:?}"),
        }
    }

    #[test]
    fn empty_token_is_rejected_not_ignored() {
        // "dev+" splits into ["dev", ""] and the empty token is invalid.
        let err = compose(&CATALOG, "dev+").unwrap_err();
        match err {
            RouteError::UnknownProfileOrCategory { tokens, .. } => {
                assert_eq!(tokens, vec!["".to_string()]);
            }
            other => panic!("expected UnknownProfileOrCategory, got {other:?}"),
        }
    }
}
