//! Where the CLI keeps its config and logs.
//!
//! XDG directories on Linux, the platform's standard locations elsewhere.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use directories::ProjectDirs;

const LATEST_LOG: &str = "latest.log";
const ARCHIVE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Archived logs kept next to `latest.log`.
const KEEP_LOGS: usize = 25;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "ngs360", "ngs360")
}

/// Default table config, e.g. `~/.config/ngs360/table.json` on Linux.
pub fn table_config() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("table.json"))
}

/// Directory holding `latest.log` and its archives, e.g. `~/.cache/ngs360`.
pub fn log_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Archive the previous run's log and prune old archives.
///
/// Returns the path the new log should be written to. The directory is
/// created if missing.
pub fn rotate_logs(dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let latest = dir.join(LATEST_LOG);

    if let Ok(metadata) = fs::metadata(&latest) {
        let stamp: DateTime<Local> = metadata.modified()?.into();
        let archived = dir.join(format!("{}.log", stamp.format(ARCHIVE_FORMAT)));
        fs::rename(&latest, archived)?;
    }

    prune_archives(dir, KEEP_LOGS)?;
    Ok(latest)
}

/// Delete all but the newest `keep` archives. Archive names sort by time.
fn prune_archives(dir: &Path, keep: usize) -> io::Result<()> {
    let mut archives: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == "log")
                && path.file_name().is_some_and(|name| name != LATEST_LOG)
        })
        .collect();

    if archives.len() <= keep {
        return Ok(());
    }

    archives.sort();
    let excess = archives.len() - keep;
    for path in &archives[..excess] {
        fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ngs360-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_rotate_archives_latest() {
        let dir = scratch_dir("rotate");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(LATEST_LOG), "previous run").unwrap();

        let latest = rotate_logs(&dir).unwrap();

        assert_eq!(latest, dir.join(LATEST_LOG));
        assert!(!latest.exists());
        let archived: Vec<_> = fs::read_dir(&dir).unwrap().collect();
        assert_eq!(archived.len(), 1);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_prune_keeps_newest() {
        let dir = scratch_dir("prune");
        fs::create_dir_all(&dir).unwrap();
        for day in 1..=5 {
            fs::write(dir.join(format!("2026010{}_120000.log", day)), "").unwrap();
        }
        fs::write(dir.join("notes.txt"), "").unwrap();

        prune_archives(&dir, 2).unwrap();

        let mut names: Vec<String> = fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec!["20260104_120000.log", "20260105_120000.log", "notes.txt"]
        );
        fs::remove_dir_all(&dir).unwrap();
    }
}
