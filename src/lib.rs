//! # trailwarden
//!
//! Deterministic trail-network state for hexcrawl campaigns.
//!
//! The engine answers one question:
//!
//! > Given the campaign's play record, which trails exist right now, and
//! > what is the best route between two hexes?
//!
//! ## Core Contract
//!
//! 1. Fold finalized session logs into a persistent trail set, exactly once
//!    per input file
//! 2. Decay the trail set at every season boundary under an explicit,
//!    seedable persistence policy
//! 3. Answer shortest-path queries over the surviving network with stable,
//!    quality-aware tie-breaks
//!
//! ## Architecture
//!
//! ```text
//! SessionInput / RolloverInput → Guard → Session/Rollover engine
//!                                  ↓            ↓
//!                              MetaState     TrailSet → TrailGraph → paths
//!                                  ↓            ↓
//!                            CampaignStore (Fs or Memory) + Footprints
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same trail set + same endpoints → identical path (ties broken by edge
//!   quality, then hex order)
//! - Same session log applied twice → recorded once, second apply is a no-op
//! - Trail documents serialize in canonical coordinate order

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod canonical;
pub mod config;
pub mod engine;
pub mod fingerprint;
pub mod graph;
pub mod guard;
pub mod policy;
pub mod rollover;
pub mod session;
pub mod store;
pub mod types;

// Re-exports
pub use types::{
    EdgeSnapshot, EffectSummary, Footprint, FootprintKind, HexCoord, HexFormatError, HexId,
    MetaState, Notation, RolloverEntry, RolloverInput, Season, SeasonId, SessionEntry,
    SessionEvent, SessionInput, TrailEdgeId, TrailRecord, TrailSet,
};
pub use canonical::{canonical_hash, canonical_hash_hex, to_canonical_bytes};
pub use config::CampaignConfig;
pub use engine::{ApplyOutcome, CampaignEngine, EffectDigest, EffectReport, EngineError, PlanOutcome};
pub use fingerprint::fingerprint_hex;
pub use graph::TrailGraph;
pub use guard::GuardError;
pub use policy::{FixedRoll, PersistencePolicyV1, RngRoll, SurvivalRoll};
pub use rollover::{RolloverEffect, RolloverEngine};
pub use session::{apply_events, SessionEffect};
pub use store::{CampaignStore, FsStore, MemoryStore};

/// Schema version for all persisted trail documents.
/// Increment on breaking changes to any schema type.
pub const TRAIL_SCHEMA_VERSION: &str = "1.0.0";

/// Default policy version identifier.
pub const DEFAULT_POLICY_VERSION: &str = "persistence_policy_v1";
