//! In-memory campaign store for testing.

use std::collections::BTreeMap;

use crate::types::{Footprint, MetaState, TrailSet};

use super::CampaignStore;

/// Error type for the in-memory store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MemoryStoreError {
    /// Footprints are immutable once written.
    #[error("footprint '{0}' already exists")]
    FootprintExists(String),
}

/// In-memory campaign store.
///
/// Uses `BTreeMap` for deterministic iteration order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    trails: TrailSet,
    meta: Option<MetaState>,
    footprints: BTreeMap<String, Footprint>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the trail set directly (test setup).
    pub fn set_trails(&mut self, trails: TrailSet) {
        self.trails = trails;
    }

    /// All stored footprints, by id.
    pub fn footprints(&self) -> &BTreeMap<String, Footprint> {
        &self.footprints
    }
}

impl CampaignStore for MemoryStore {
    type Error = MemoryStoreError;

    fn load_trails(&self) -> Result<TrailSet, Self::Error> {
        Ok(self.trails.clone())
    }

    fn save_trails(&mut self, trails: &TrailSet) -> Result<(), Self::Error> {
        self.trails = trails.clone();
        Ok(())
    }

    fn load_meta(&self) -> Result<MetaState, Self::Error> {
        Ok(self
            .meta
            .clone()
            .unwrap_or_else(|| MetaState::new("memory")))
    }

    fn save_meta(&mut self, meta: &MetaState) -> Result<(), Self::Error> {
        self.meta = Some(meta.clone());
        Ok(())
    }

    fn write_footprint(&mut self, footprint: &Footprint) -> Result<(), Self::Error> {
        if self.footprints.contains_key(&footprint.id) {
            return Err(MemoryStoreError::FootprintExists(footprint.id.clone()));
        }
        self.footprints
            .insert(footprint.id.clone(), footprint.clone());
        Ok(())
    }

    fn footprint_ids(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.footprints.keys().cloned().collect())
    }

    fn read_footprint(&self, id: &str) -> Result<Option<Footprint>, Self::Error> {
        Ok(self.footprints.get(id).cloned())
    }
}
