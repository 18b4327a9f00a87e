//! Campaign storage backends.
//!
//! All mutation is whole-document: the trail set, the ledger, and each
//! footprint are loaded and written as one unit. Backends must make every
//! write atomic: a crash mid-write may lose the write but never corrupts
//! a document.

pub mod fs;
pub mod memory;

use crate::types::{Footprint, MetaState, TrailSet};

/// Trait for campaign storage backends.
///
/// Single-writer and synchronous; the engine is invoked by one operator
/// process at a time.
pub trait CampaignStore {
    /// Error type for store operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the trail set, empty if none has been written yet.
    fn load_trails(&self) -> Result<TrailSet, Self::Error>;

    /// Rewrite the trail set in full.
    fn save_trails(&mut self, trails: &TrailSet) -> Result<(), Self::Error>;

    /// Load the applied-input ledger, empty if none has been written yet.
    fn load_meta(&self) -> Result<MetaState, Self::Error>;

    /// Rewrite the ledger in full.
    fn save_meta(&mut self, meta: &MetaState) -> Result<(), Self::Error>;

    /// Durably write one footprint. Footprints are immutable: writing an
    /// id that already exists is an error.
    fn write_footprint(&mut self, footprint: &Footprint) -> Result<(), Self::Error>;

    /// Ids of all stored footprints.
    fn footprint_ids(&self) -> Result<Vec<String>, Self::Error>;

    /// Load one footprint by id, `None` if absent.
    fn read_footprint(&self, id: &str) -> Result<Option<Footprint>, Self::Error>;
}

pub use fs::FsStore;
pub use memory::MemoryStore;
