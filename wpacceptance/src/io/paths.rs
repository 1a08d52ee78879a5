//! Path helpers and WordPress root discovery.

use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

use tracing::debug;

/// Suite config file name, looked up in the suite directory.
pub const CONFIG_FILE_NAME: &str = "wpacceptance.json";

/// Render `path` with exactly one trailing separator.
pub fn trailingslash(path: impl AsRef<Path>) -> String {
    let rendered = path.as_ref().to_string_lossy();
    let trimmed = rendered.trim_end_matches(['/', '\\']);
    format!("{trimmed}{MAIN_SEPARATOR}")
}

/// Lexically normalize `path`: drop `.`, fold `..`, collapse repeated
/// separators. Does not touch the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

/// Locates the WordPress installation that a suite belongs to.
pub trait WordPressLocator {
    /// Return the WordPress root for a suite rooted at `base`, or `None`.
    fn wordpress_root(&self, base: &Path) -> Option<PathBuf>;
}

/// Walks up from the suite directory looking for a WordPress install.
///
/// A directory qualifies when it holds `wp-settings.php`, or `wp-config.php`
/// next to a `wp-includes/` directory. The result is canonicalized.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesystemLocator;

impl WordPressLocator for FilesystemLocator {
    fn wordpress_root(&self, base: &Path) -> Option<PathBuf> {
        let found = base.ancestors().find(|dir| is_wordpress_root(dir))?;
        debug!(base = %base.display(), root = %found.display(), "found WordPress root");
        found.canonicalize().ok()
    }
}

fn is_wordpress_root(dir: &Path) -> bool {
    dir.join("wp-settings.php").is_file()
        || (dir.join("wp-config.php").is_file() && dir.join("wp-includes").is_dir())
}
