//! Append-only log of created HITs.
//!
//! Every created HIT is recorded as one comma-separated line,
//! `<hit_id>, <creation_date>, <config_path>`, in a per-profile file named
//! by mode (`hit_live.txt` / `hit_sandbox.txt`). The review flow reads the
//! log back to decide which HITs to inspect when not reviewing everything,
//! so this file is the only record tying a HIT back to its configuration.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::CoreError;

/// One line of the creation log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitLogEntry {
    pub hit_id: String,
    pub created_on: NaiveDate,
    pub config_path: String,
}

/// Log file name for the given mode.
pub fn log_file_name(live: bool) -> &'static str {
    if live {
        "hit_live.txt"
    } else {
        "hit_sandbox.txt"
    }
}

/// Path of the creation log for an (app dir, profile, mode) triple.
pub fn log_path(app_dir: &Path, profile: &str, live: bool) -> PathBuf {
    app_dir.join(profile).join(log_file_name(live))
}

/// Append one entry, creating the file and parent directories as needed.
pub fn append(path: &Path, entry: &HitLogEntry) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(
        file,
        "{}, {}, {}",
        entry.hit_id, entry.created_on, entry.config_path
    )?;
    Ok(())
}

/// Read back the HIT ids recorded in a log file, oldest first.
///
/// Lines are comma-split and whitespace-trimmed; the first field is the
/// HIT id. A missing file reads as an empty list.
pub fn read_hit_ids(path: &Path) -> Result<Vec<String>, CoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path)?;
    Ok(raw
        .lines()
        .filter_map(|line| {
            let id = line.split(',').next().unwrap_or("").trim();
            (!id.is_empty()).then(|| id.to_string())
        })
        .collect())
}

/// Keep only the `n_last` most recent entries. Zero keeps everything.
pub fn most_recent(mut hit_ids: Vec<String>, n_last: usize) -> Vec<String> {
    if n_last == 0 {
        return hit_ids;
    }
    let skip = hit_ids.len().saturating_sub(n_last);
    hit_ids.split_off(skip)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(hit_id: &str) -> HitLogEntry {
        HitLogEntry {
            hit_id: hit_id.to_string(),
            created_on: NaiveDate::from_ymd_opt(2026, 8, 27).unwrap(),
            config_path: "projects/e001/hit_config.json".to_string(),
        }
    }

    #[test]
    fn append_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_path(dir.path(), "mozer", false);

        append(&path, &entry("3XJOUITW8URHJMX7F00H")).unwrap();
        append(&path, &entry("3B1GTLGDFCGPMQKPZ9G1")).unwrap();

        assert_eq!(
            read_hit_ids(&path).unwrap(),
            vec!["3XJOUITW8URHJMX7F00H", "3B1GTLGDFCGPMQKPZ9G1"]
        );

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with(
            "3XJOUITW8URHJMX7F00H, 2026-08-27, projects/e001/hit_config.json\n"
        ));
    }

    #[test]
    fn read_trims_whitespace_and_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hit_sandbox.txt");
        fs::write(&path, "  HIT1 , 2026-08-27, a.json\n\nHIT2, 2026-08-27, b.json\n").unwrap();
        assert_eq!(read_hit_ids(&path).unwrap(), vec!["HIT1", "HIT2"]);
    }

    #[test]
    fn missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_path(dir.path(), "mozer", true);
        assert!(read_hit_ids(&path).unwrap().is_empty());
    }

    #[test]
    fn most_recent_keeps_the_tail() {
        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(most_recent(ids.clone(), 2), vec!["b", "c"]);
        assert_eq!(most_recent(ids.clone(), 1), vec!["c"]);
        assert_eq!(most_recent(ids, 10), vec!["a", "b", "c"]);
    }

    #[test]
    fn most_recent_zero_keeps_everything() {
        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(most_recent(ids, 0), vec!["a", "b", "c"]);
    }

    #[test]
    fn file_names_by_mode() {
        assert_eq!(log_file_name(true), "hit_live.txt");
        assert_eq!(log_file_name(false), "hit_sandbox.txt");
    }
}
