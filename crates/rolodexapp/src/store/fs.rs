//! Filesystem backend: one JSON artifact at a configurable path.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::SnapshotBackend;
use crate::error::{Result, RolodexError};
use crate::snapshot::Snapshot;

pub struct FsBackend {
    path: PathBuf,
}

impl FsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "snapshot".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotBackend for FsBackend {
    fn load(&self) -> Result<Option<Snapshot>> {
        if !self.path.exists() {
            debug!("no artifact at {}, starting empty", self.path.display());
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(snapshot)?;

        // Write to a sibling temp file, then rename over the artifact so a
        // failed write cannot truncate the previous one.
        let tmp = self.tmp_path();
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path).map_err(|err| {
            let _ = fs::remove_file(&tmp);
            RolodexError::Io(err)
        })?;

        debug!(
            "saved {} records to {}",
            snapshot.records.len(),
            self.path.display()
        );
        Ok(())
    }
}
