//! Small helpers shared across modules.

use std::path::Path;

/// Render a path for display with the home directory replaced by `~`.
///
/// Keeps usernames out of logs and bug reports.
pub fn private_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(relative) = path.strip_prefix(&home)
    {
        return format!("~/{}", relative.display());
    }
    path.display().to_string()
}
