//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "trellis";
const APPLICATION: &str = "clinic";

/// Maximum number of old log files to keep.
const MAX_OLD_LOGS: usize = 25;

const LATEST_LOG: &str = "latest.log";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory holding the logs.
///
/// - Linux: `$XDG_CACHE_HOME/clinic` or `~/.cache/clinic`
/// - macOS: `~/Library/Caches/dev.trellis.clinic`
/// - Windows: `C:\Users\<User>\AppData\Local\trellis\clinic\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the directory exports are written to.
pub fn export_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("exports"))
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Rotate logs: archive latest.log under a timestamped name and prune old
/// archives.
///
/// Runs before the logger exists, so problems are returned for the caller
/// to log afterwards.
pub fn rotate_logs() -> Vec<String> {
    let Some(cache) = cache_dir() else {
        return Vec::new();
    };
    rotate_logs_in(&cache)
}

fn rotate_logs_in(cache: &Path) -> Vec<String> {
    let mut problems = Vec::new();

    let latest = cache.join(LATEST_LOG);
    if latest.exists() {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let archived = cache.join(format!("{}.log", timestamp));
        if let Err(e) = fs::rename(&latest, &archived) {
            problems.push(format!("could not archive {}: {}", latest.display(), e));
        }
    }

    problems.extend(prune_archives(cache, MAX_OLD_LOGS));
    problems
}

/// Delete all but the newest `keep` archived logs.
///
/// Archive names are timestamps, so name order is age order.
fn prune_archives(cache: &Path, keep: usize) -> Vec<String> {
    let entries = match fs::read_dir(cache) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => return vec![format!("could not list {}: {}", cache.display(), e)],
    };

    let mut archives: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == "log")
                && path.file_name().is_some_and(|name| name != LATEST_LOG)
        })
        .collect();
    archives.sort();

    let excess = archives.len().saturating_sub(keep);
    archives
        .into_iter()
        .take(excess)
        .filter_map(|path| {
            fs::remove_file(&path)
                .err()
                .map(|e| format!("could not remove {}: {}", path.display(), e))
        })
        .collect()
}
