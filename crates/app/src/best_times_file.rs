use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const BEST_TIMES_FORMAT_VERSION: u32 = 1;

/// Fastest clear per level index, in milliseconds of simulated time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BestTimesFile {
    pub format_version: u32,
    pub best_ms: BTreeMap<usize, u64>,
}

impl Default for BestTimesFile {
    fn default() -> Self {
        Self { format_version: BEST_TIMES_FORMAT_VERSION, best_ms: BTreeMap::new() }
    }
}

impl BestTimesFile {
    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "MazeStalker").map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("best_times.json");
            path
        })
    }

    pub fn best(&self, level: usize) -> Option<u64> {
        self.best_ms.get(&level).copied()
    }

    /// Stores `ms` if it beats the current record; returns whether it did.
    pub fn record_if_better(&mut self, level: usize, ms: u64) -> bool {
        match self.best_ms.get(&level) {
            Some(&best) if best <= ms => false,
            _ => {
                self.best_ms.insert(level, ms);
                true
            }
        }
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let file: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if file.format_version != BEST_TIMES_FORMAT_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsupported best times format {}", file.format_version),
            ));
        }
        Ok(file)
    }

    /// Missing or unreadable files start a fresh table.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                log::warn!("ignoring best times at {}: {err}", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn only_faster_times_replace_the_record() {
        let mut times = BestTimesFile::default();
        assert!(times.record_if_better(0, 42_000));
        assert!(!times.record_if_better(0, 42_000));
        assert!(!times.record_if_better(0, 50_000));
        assert!(times.record_if_better(0, 39_900));
        assert_eq!(times.best(0), Some(39_900));
        assert_eq!(times.best(1), None);
    }

    #[test]
    fn atomic_write_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("best.json");

        let mut times = BestTimesFile::default();
        times.record_if_better(0, 31_200);
        times.record_if_better(3, 88_000);

        times.write_atomic(&path).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let loaded = BestTimesFile::load(&path).unwrap();
        assert_eq!(times, loaded);
    }

    #[test]
    fn missing_or_corrupt_files_fall_back_to_empty() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert_eq!(BestTimesFile::load_or_default(&missing), BestTimesFile::default());

        let corrupt = dir.path().join("corrupt.json");
        fs::write(&corrupt, "{ not json").unwrap();
        assert_eq!(BestTimesFile::load_or_default(&corrupt), BestTimesFile::default());
    }

    #[test]
    fn unknown_format_version_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("future.json");
        fs::write(&path, r#"{"format_version":7,"best_ms":{}}"#).unwrap();
        let err = BestTimesFile::load(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
