//! Locally generated scripts.
//!
//! Nothing here touches the network. Each function is a pure string
//! producer driven by the catalog tables, which keeps the templates
//! testable without the HTTP layer and keeps the dotfile list in exactly
//! one place.

use crate::catalog::Platform;

const SHELL_BACKUP_HELPER: &str = r#"backup_if_exists() {
  if [ -f "$1" ]; then
    cp "$1" "$1.backup.$(date +%Y%m%d_%H%M%S)"
    echo "Backed up $1"
  fi
}
"#;

const POWERSHELL_BACKUP_HELPER: &str = r#"function Backup-IfExists {
    param($Path)
    if (Test-Path $Path) {
        $timestamp = Get-Date -Format "yyyyMMdd_HHmmss"
        Copy-Item $Path "$Path.backup.$timestamp"
        Write-Host "Backed up $Path" -ForegroundColor Yellow
    }
}
"#;

/// Builds the `/config/all` update script for a platform.
///
/// The script re-downloads every config file the platform declares and
/// backs up any existing local copy first, so a bad dotfile push is
/// recoverable on the client side.
pub fn config_update_script(platform: Platform, host: &str) -> String {
    match platform {
        Platform::Windows => powershell_update_script(platform, host),
        Platform::Wsl | Platform::Macos => shell_update_script(platform, host),
    }
}

fn shell_update_script(platform: Platform, host: &str) -> String {
    let mut script = String::new();
    script.push_str("#!/bin/bash\n");
    script.push_str(&format!("# Refresh dotfiles served by {host}\n\n"));
    script.push_str("set -euo pipefail\n\n");
    script.push_str("echo \"Updating dotfiles...\"\n\n");
    script.push_str(SHELL_BACKUP_HELPER);
    script.push('\n');

    for file in platform.config_files() {
        script.push_str(&format!("backup_if_exists \"{}\"\n", file.target));
        script.push_str(&format!(
            "curl -fsSL \"https://{host}/config/{}\" -o \"{}\"\n",
            file.key, file.target
        ));
        script.push_str(&format!("echo \"Updated {}\"\n\n", file.target));
    }

    script.push_str("echo \"\"\n");
    script.push_str("echo \"All configs updated. Reload your shell to pick them up.\"\n");
    script
}

fn powershell_update_script(platform: Platform, host: &str) -> String {
    let mut script = String::new();
    script.push_str(&format!("# Refresh dotfiles served by {host}\n\n"));
    script.push_str("Write-Host \"Updating dotfiles...\" -ForegroundColor Cyan\n\n");
    script.push_str(POWERSHELL_BACKUP_HELPER);
    script.push('\n');

    for file in platform.config_files() {
        script.push_str(&format!("Backup-IfExists {}\n", file.target));
        script.push_str(&format!(
            "Invoke-WebRequest -Uri \"https://{host}/config/{}\" -OutFile {}\n",
            file.key, file.target
        ));
        script.push_str(&format!(
            "Write-Host \"Updated {}\" -ForegroundColor Green\n\n",
            file.target
        ));
    }

    script.push_str("Write-Host \"\"\n");
    script.push_str(
        "Write-Host \"All configs updated. Reload your profile to pick them up.\" -ForegroundColor Cyan\n",
    );
    script
}

const MSSTORE_INSTALL_LOOP: &str = r#"$packages = Get-Content $packagesFile | Where-Object { -Not ($_ -match '^\s*$') -and -Not ($_ -match '^#') }

foreach ($package in $packages) {
    try {
        winget install --id $package --source msstore --accept-source-agreements --accept-package-agreements -e
        Write-Host "Installed $package" -ForegroundColor Green
    } catch {
        Write-Host "Failed to install $package" -ForegroundColor Red
    }
}
"#;

/// Builds the PowerShell installer served at `/msstore/<expr>`.
///
/// The expression is validated against the msstore catalog before this is
/// called, so the generated script can assume the package-list endpoint
/// resolves.
pub fn msstore_install_script(host: &str, expr: &str) -> String {
    let mut script = String::new();
    script.push_str("# Microsoft Store package installer\n");
    script.push_str(&format!("# Profiles: {expr}\n"));
    script.push_str(&format!("# Usage: irm {host}/msstore/{expr} | iex\n\n"));
    script.push_str("$ErrorActionPreference = \"Stop\"\n\n");
    script.push_str("Write-Host \"Installing Microsoft Store packages...\" -ForegroundColor Cyan\n\n");
    script.push_str(&format!(
        "$packagesUrl = \"https://{host}/packages/msstore/{expr}\"\n"
    ));
    script.push_str("$packagesFile = \"$env:TEMP\\msstore-packages.txt\"\n\n");
    script.push_str("Invoke-WebRequest -Uri $packagesUrl -OutFile $packagesFile\n\n");
    script.push_str(MSSTORE_INSTALL_LOOP);
    script.push('\n');
    script.push_str("Remove-Item $packagesFile -ErrorAction SilentlyContinue\n");
    script.push_str("Write-Host \"Done.\" -ForegroundColor Cyan\n");
    script
}
