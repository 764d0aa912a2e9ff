use regex::Regex;
use std::sync::OnceLock;

/// Where the scripts, package lists, and dotfiles actually live.
/// Overridable via UPSTREAM_BASE_URL so staging can point at a branch.
pub const DEFAULT_UPSTREAM_BASE: &str =
    "https://raw.githubusercontent.com/quartermaster-dev/kits/refs/heads/main";

pub const POWERSHELL: &str = "application/x-powershell";
pub const SHELLSCRIPT: &str = "text/x-shellscript";
pub const PLAINTEXT: &str = "text/plain";

/// A single named upstream package list.
#[derive(Debug)]
pub struct Category {
    pub name: &'static str,
    /// Path relative to the upstream base URL.
    pub path: &'static str,
}

/// A named bundle that expands to a set of categories. Pure sugar.
pub struct Profile {
    pub name: &'static str,
    pub categories: &'static [&'static str],
}

pub struct PackageCatalog {
    pub kind: &'static str,
    pub categories: &'static [Category],
    pub profiles: &'static [Profile],
}

impl PackageCatalog {
    pub fn category(&self, name: &str) -> Option<&'static Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn profile(&self, name: &str) -> Option<&'static Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Everything a caller is allowed to put in a composition expression.
    /// Profiles first so the 400 body reads from coarse to fine.
    pub fn known_names(&self) -> Vec<String> {
        self.profiles
            .iter()
            .map(|p| p.name.to_string())
            .chain(self.categories.iter().map(|c| c.name.to_string()))
            .collect()
    }
}

/// A dotfile we know how to serve and how to install locally.
/// `target` is the path the generated update script writes to, spelled in
/// the syntax of that platform's shell.
pub struct ConfigFile {
    pub key: &'static str,
    pub path: &'static str,
    pub target: &'static str,
    pub content_type: &'static str,
}

static WINGET: PackageCatalog = PackageCatalog {
    kind: "winget",
    categories: &[
        Category { name: "base", path: "packages/windows/base.txt" },
        Category { name: "dev", path: "packages/windows/dev.txt" },
        Category { name: "gaming", path: "packages/windows/gaming.txt" },
        Category { name: "work", path: "packages/windows/work.txt" },
        Category { name: "qol", path: "packages/windows/qol.txt" },
        Category { name: "network", path: "packages/windows/network.txt" },
    ],
    profiles: &[
        Profile { name: "desktop", categories: &["base", "qol"] },
        Profile { name: "developer", categories: &["base", "dev", "qol"] },
        Profile { name: "gamer", categories: &["base", "gaming", "qol"] },
        Profile { name: "office", categories: &["base", "work", "qol"] },
    ],
};

pub static MSSTORE: PackageCatalog = PackageCatalog {
    kind: "msstore",
    categories: &[
        Category { name: "base", path: "packages/msstore/base.txt" },
        Category { name: "dev", path: "packages/msstore/dev.txt" },
        Category { name: "gaming", path: "packages/msstore/gaming.txt" },
        Category { name: "work", path: "packages/msstore/work.txt" },
        Category { name: "qol", path: "packages/msstore/qol.txt" },
    ],
    profiles: &[Profile { name: "essentials", categories: &["base", "qol"] }],
};

static APT: PackageCatalog = PackageCatalog {
    kind: "apt",
    categories: &[
        Category { name: "base", path: "packages/wsl/base.txt" },
        Category { name: "dev", path: "packages/wsl/dev.txt" },
        Category { name: "network", path: "packages/wsl/network.txt" },
    ],
    profiles: &[Profile { name: "developer", categories: &["base", "dev"] }],
};

static BREW: PackageCatalog = PackageCatalog {
    kind: "brew",
    categories: &[
        Category { name: "base", path: "packages/macos/base.txt" },
        Category { name: "dev", path: "packages/macos/dev.txt" },
        Category { name: "qol", path: "packages/macos/qol.txt" },
    ],
    profiles: &[Profile { name: "developer", categories: &["base", "dev"] }],
};

static WINDOWS_CONFIG_FILES: &[ConfigFile] = &[
    ConfigFile {
        key: "powershell",
        path: "dotfiles/powershell-profile.ps1",
        target: "$PROFILE.CurrentUserAllHosts",
        content_type: PLAINTEXT,
    },
    ConfigFile {
        key: "gitconfig",
        path: "dotfiles/gitconfig",
        target: "$HOME\\.gitconfig",
        content_type: PLAINTEXT,
    },
];

static WSL_CONFIG_FILES: &[ConfigFile] = &[
    ConfigFile {
        key: "zshrc",
        path: "dotfiles/zshrc",
        target: "$HOME/.zshrc",
        content_type: PLAINTEXT,
    },
    ConfigFile {
        key: "ripgreprc",
        path: "dotfiles/ripgreprc",
        target: "$HOME/.ripgreprc",
        content_type: PLAINTEXT,
    },
    ConfigFile {
        key: "gitconfig",
        path: "dotfiles/gitconfig",
        target: "$HOME/.gitconfig",
        content_type: PLAINTEXT,
    },
];

static MACOS_CONFIG_FILES: &[ConfigFile] = &[
    ConfigFile {
        key: "zshrc",
        path: "dotfiles/zshrc-macos",
        target: "$HOME/.zshrc",
        content_type: PLAINTEXT,
    },
    ConfigFile {
        key: "gitconfig",
        path: "dotfiles/gitconfig",
        target: "$HOME/.gitconfig",
        content_type: PLAINTEXT,
    },
];

/// Upstream path of the Windows post-install script. Windows is the only
/// platform that has one.
pub const WINDOWS_POST_INSTALL_SCRIPT: &str = "windows-post-install.ps1";

/// One recognized deployment domain per target operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Wsl,
    Macos,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Windows, Platform::Wsl, Platform::Macos];

    /// Resolves the Host header to a platform.
    ///
    /// Containment match, not exact match, so "win.qtrm.dev:443" and
    /// vanity subdomains in front of the zone still route. Case-insensitive
    /// because Host headers arrive in whatever casing the client felt like.
    pub fn from_host(host: &str) -> Option<Platform> {
        let host = host.to_ascii_lowercase();
        Self::ALL.into_iter().find(|p| host.contains(p.domain()))
    }

    pub fn domain(self) -> &'static str {
        match self {
            Platform::Windows => "win.qtrm.dev",
            Platform::Wsl => "wsl.qtrm.dev",
            Platform::Macos => "mac.qtrm.dev",
        }
    }

    /// Upstream path of the base install script.
    pub fn script_path(self) -> &'static str {
        match self {
            Platform::Windows => "windows-install.ps1",
            Platform::Wsl => "wsl-install.sh",
            Platform::Macos => "macos-install.sh",
        }
    }

    pub fn script_content_type(self) -> &'static str {
        match self {
            Platform::Windows => POWERSHELL,
            Platform::Wsl | Platform::Macos => SHELLSCRIPT,
        }
    }

    pub fn packages(self) -> &'static PackageCatalog {
        match self {
            Platform::Windows => &WINGET,
            Platform::Wsl => &APT,
            Platform::Macos => &BREW,
        }
    }

    pub fn config_files(self) -> &'static [ConfigFile] {
        match self {
            Platform::Windows => WINDOWS_CONFIG_FILES,
            Platform::Wsl => WSL_CONFIG_FILES,
            Platform::Macos => MACOS_CONFIG_FILES,
        }
    }

    pub fn config_file(self, key: &str) -> Option<&'static ConfigFile> {
        self.config_files().iter().find(|f| f.key == key)
    }

    pub fn config_keys(self) -> Vec<String> {
        self.config_files().iter().map(|f| f.key.to_string()).collect()
    }

    /// The assignment line inside the base install script that binds the
    /// default package-list URL. This is the one brittle contract we have
    /// with the upstream scripts; keep it anchored to a whole line so a
    /// format drift upstream fails loudly instead of rewriting the wrong
    /// thing.
    pub fn package_source_marker(self) -> &'static Regex {
        match self {
            Platform::Windows => {
                static RE: OnceLock<Regex> = OnceLock::new();
                RE.get_or_init(|| {
                    Regex::new(r#"(?m)^\$packagesUrl = "[^"]*"$"#).expect("marker regex is valid")
                })
            }
            Platform::Wsl | Platform::Macos => {
                static RE: OnceLock<Regex> = OnceLock::new();
                RE.get_or_init(|| {
                    Regex::new(r#"(?m)^PACKAGES_URL="[^"]*"$"#).expect("marker regex is valid")
                })
            }
        }
    }

    /// The replacement assignment line pointing the script at the caller's
    /// resolved profile endpoint.
    pub fn package_source_line(self, host: &str, expr: &str) -> String {
        match self {
            Platform::Windows => {
                format!("$packagesUrl = \"https://{host}/packages/{expr}\"")
            }
            Platform::Wsl | Platform::Macos => {
                format!("PACKAGES_URL=\"https://{host}/packages/{expr}\"")
            }
        }
    }
}
