//! Filesystem campaign store.
//!
//! Layout under the campaign root:
//!
//! ```text
//! <root>/trails.json          the trail set, one sorted document
//! <root>/meta.json            the applied-input ledger
//! <root>/footprints/<id>.json one immutable file per footprint
//! ```
//!
//! Every write goes through a scoped temp file in the destination
//! directory followed by an atomic rename, so the rename is the only
//! externally observable transition and a crash mid-write never yields a
//! corrupted document.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::{Footprint, MetaState, TrailSet};

use super::CampaignStore;

/// Error type for the filesystem store.
#[derive(Debug, thiserror::Error)]
pub enum FsStoreError {
    /// Underlying I/O failure, naming the path.
    #[error("io error on {path}: {source}")]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Source error.
        #[source]
        source: std::io::Error,
    },
    /// A document failed to parse.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path of the document.
        path: PathBuf,
        /// Source error.
        #[source]
        source: serde_json::Error,
    },
    /// Footprints are immutable once written.
    #[error("footprint '{0}' already exists")]
    FootprintExists(String),
}

/// Filesystem campaign store rooted at one directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Open a store at `root`, creating the directory tree if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, FsStoreError> {
        let root = root.into();
        let footprints = root.join("footprints");
        fs::create_dir_all(&footprints).map_err(|source| FsStoreError::Io {
            path: footprints,
            source,
        })?;
        Ok(Self { root })
    }

    /// Path of the trail set document.
    pub fn trails_path(&self) -> PathBuf {
        self.root.join("trails.json")
    }

    /// Path of the ledger document.
    pub fn meta_path(&self) -> PathBuf {
        self.root.join("meta.json")
    }

    /// Path of one footprint document.
    pub fn footprint_path(&self, id: &str) -> PathBuf {
        self.root.join("footprints").join(format!("{id}.json"))
    }

    fn load_or_default<T: DeserializeOwned + Default>(
        &self,
        path: &Path,
    ) -> Result<T, FsStoreError> {
        if !path.exists() {
            return Ok(T::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| FsStoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| FsStoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn atomic_write<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), FsStoreError> {
        let io_err = |source| FsStoreError::Io {
            path: path.to_path_buf(),
            source,
        };
        let dir = path.parent().unwrap_or(&self.root);
        let data = serde_json::to_vec_pretty(value).map_err(|source| FsStoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        temp.write_all(&data).map_err(io_err)?;
        temp.as_file().sync_all().map_err(io_err)?; // fsync for durability
        temp.persist(path).map_err(|e| io_err(e.error))?;

        // fsync the directory to ensure rename is durable
        #[cfg(unix)]
        {
            if let Ok(dir) = fs::File::open(dir) {
                let _ = dir.sync_all();
            }
        }

        tracing::debug!(path = %path.display(), bytes = data.len(), "document replaced");
        Ok(())
    }
}

impl CampaignStore for FsStore {
    type Error = FsStoreError;

    fn load_trails(&self) -> Result<TrailSet, Self::Error> {
        self.load_or_default(&self.trails_path())
    }

    fn save_trails(&mut self, trails: &TrailSet) -> Result<(), Self::Error> {
        self.atomic_write(&self.trails_path(), trails)
    }

    fn load_meta(&self) -> Result<MetaState, Self::Error> {
        let meta: MetaState = self.load_or_default(&self.meta_path())?;
        if meta.backend.is_empty() {
            return Ok(MetaState::new("fs"));
        }
        Ok(meta)
    }

    fn save_meta(&mut self, meta: &MetaState) -> Result<(), Self::Error> {
        self.atomic_write(&self.meta_path(), meta)
    }

    fn write_footprint(&mut self, footprint: &Footprint) -> Result<(), Self::Error> {
        let path = self.footprint_path(&footprint.id);
        if path.exists() {
            return Err(FsStoreError::FootprintExists(footprint.id.clone()));
        }
        self.atomic_write(&path, footprint)
    }

    fn footprint_ids(&self) -> Result<Vec<String>, Self::Error> {
        let dir = self.root.join("footprints");
        let entries = fs::read_dir(&dir).map_err(|source| FsStoreError::Io {
            path: dir.clone(),
            source,
        })?;
        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| FsStoreError::Io {
                path: dir.clone(),
                source,
            })?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(id) = name.strip_suffix(".json") {
                ids.push(id.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn read_footprint(&self, id: &str) -> Result<Option<Footprint>, Self::Error> {
        let path = self.footprint_path(id);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path).map_err(|source| FsStoreError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| FsStoreError::Parse { path, source })
    }
}
