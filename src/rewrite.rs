use crate::error::RouteError;
use regex::{NoExpand, Regex};

/// Replaces the single package-source assignment line in a base install
/// script with a caller-specific one.
///
/// This is the one place the service depends on the internal format of an
/// upstream script, so it is kept behind one seam. If the marker is absent
/// the upstream script changed shape and the caller must get an error;
/// handing back the unmodified script would install the default package
/// set instead of the requested one.
///
/// The replacement goes through `NoExpand` because PowerShell lines start
/// with '$' and must not be treated as capture-group references.
pub fn rewrite_package_source(
    script: &str,
    marker: &Regex,
    replacement: &str,
) -> Result<String, RouteError> {
    if !marker.is_match(script) {
        return Err(RouteError::PlaceholderNotFound);
    }
    Ok(marker.replace(script, NoExpand(replacement)).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Platform;
    use pretty_assertions::assert_eq;

    const PS_SCRIPT: &str = "\
# Windows install script
$ErrorActionPreference = \"Stop\"
$packagesUrl = \"https://win.qtrm.dev/packages/base\"
Invoke-WebRequest -Uri $packagesUrl -OutFile $env:TEMP\\packages.txt
";

    #[test]
    fn replaces_only_the_marker_line() {
        let replacement = Platform::Windows.package_source_line("win.qtrm.dev", "dev+gaming");
        let rewritten = rewrite_package_source(
            PS_SCRIPT,
            Platform::Windows.package_source_marker(),
            &replacement,
        )
        .unwrap();

        assert_eq!(
            rewritten,
            "\
# Windows install script
$ErrorActionPreference = \"Stop\"
$packagesUrl = \"https://win.qtrm.dev/packages/dev+gaming\"
Invoke-WebRequest -Uri $packagesUrl -OutFile $env:TEMP\\packages.txt
"
        );
    }

    #[test]
    fn dollar_signs_in_the_replacement_stay_literal() {
        // A regex-expansion bug would swallow "$packagesUrl" as a capture
        // reference and emit an empty string.
        let replacement = Platform::Windows.package_source_line("win.qtrm.dev", "base");
        let rewritten = rewrite_package_source(
            PS_SCRIPT,
            Platform::Windows.package_source_marker(),
            &replacement,
        )
        .unwrap();

        assert!(rewritten.contains("$packagesUrl = \"https://win.qtrm.dev/packages/base\""));
    }

    #[test]
    fn shell_marker_rewrites_too() {
        let script = "#!/bin/bash\nPACKAGES_URL=\"https://wsl.qtrm.dev/packages/base\"\ncurl -fsSL \"$PACKAGES_URL\"\n";
        let replacement = Platform::Wsl.package_source_line("wsl.qtrm.dev", "developer");
        let rewritten = rewrite_package_source(
            script,
            Platform::Wsl.package_source_marker(),
            &replacement,
        )
        .unwrap();

        assert_eq!(
            rewritten,
            "#!/bin/bash\nPACKAGES_URL=\"https://wsl.qtrm.dev/packages/developer\"\ncurl -fsSL \"$PACKAGES_URL\"\n"
        );
    }

    #[test]
    fn missing_marker_is_an_error_not_a_passthrough() {
        let script = "# a script with no package source line\nWrite-Host hi\n";
        let replacement = Platform::Windows.package_source_line("win.qtrm.dev", "base");
        let err = rewrite_package_source(
            script,
            Platform::Windows.package_source_marker(),
            &replacement,
        )
        .unwrap_err();

        assert!(matches!(err, RouteError::PlaceholderNotFound));
    }
}
