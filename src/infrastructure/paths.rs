//! Path utilities for the Zellij sandbox environment.
//!
//! Inside the plugin sandbox the host filesystem is mounted under `/host`,
//! which usually maps to the directory Zellij was started from.

use std::path::PathBuf;

/// Returns the data directory used for trace files.
///
/// Resolves to `/host/.local/share/zellij/reelfinder`, normally
/// `~/.local/share/zellij/reelfinder` on the host.
///
/// # Examples
///
/// ```
/// use reelfinder::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str().unwrap(), "/host/.local/share/zellij/reelfinder");
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("reelfinder")
}

/// Rewrites `~` paths onto the sandbox's `/host` mount.
///
/// Used for user-supplied paths such as `theme_file`.
///
/// # Examples
///
/// ```
/// use reelfinder::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dusk.toml"), "/host/themes/dusk.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
