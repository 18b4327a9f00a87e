//! Footprints: immutable audit records of applied operations.
//!
//! Every committed rollover or session apply writes exactly one footprint
//! before the ledger is updated, so a footprint exists for every recorded
//! input (a footprint without a ledger entry is the drift `reconcile`
//! looks for). Once written a footprint is never mutated.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rollover::RolloverEffect;
use crate::session::SessionEffect;

use super::season::SeasonId;
use super::trail::{TrailEdgeId, TrailRecord};

/// Kind of applied operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FootprintKind {
    /// A session apply.
    Session,
    /// A seasonal rollover.
    Rollover,
}

impl std::fmt::Display for FootprintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Session => write!(f, "session"),
            Self::Rollover => write!(f, "rollover"),
        }
    }
}

/// The effect an operation had, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EffectSummary {
    /// Rollover effect triple.
    Rollover(RolloverEffect),
    /// Session effect triple.
    Session(SessionEffect),
}

/// Before/after snapshot of one touched edge.
///
/// `before: None` means the edge was created; `after: None` means deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    /// Record before the operation, if the edge existed.
    pub before: Option<TrailRecord>,
    /// Record after the operation, if the edge survived.
    pub after: Option<TrailRecord>,
}

/// Immutable audit record of one applied operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    /// Unique footprint id.
    pub id: String,
    /// Operation kind.
    pub kind: FootprintKind,
    /// Season the operation targeted.
    pub season: SeasonId,
    /// Wall-clock time the apply committed.
    pub timestamp: DateTime<Utc>,
    /// Ledger key of the input that produced this footprint.
    pub source: String,
    /// Effect lists, verbatim from the engine.
    pub effect: EffectSummary,
    /// Before/after snapshots of every touched edge.
    pub touched: BTreeMap<TrailEdgeId, EdgeSnapshot>,
    /// Quantized parameter hash of the policy in force at apply time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_hash: Option<String>,
    /// Optional source-control marker for the input file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcs_mark: Option<String>,
}

impl Footprint {
    /// Create a footprint for an operation committed now.
    pub fn new(
        kind: FootprintKind,
        season: SeasonId,
        source: impl Into<String>,
        effect: EffectSummary,
        touched: BTreeMap<TrailEdgeId, EdgeSnapshot>,
        policy_hash: Option<String>,
        vcs_mark: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            season,
            timestamp: Utc::now(),
            source: source.into(),
            effect,
            touched,
            policy_hash,
            vcs_mark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::hex::{HexId, Notation};
    use crate::types::season::Season;

    #[test]
    fn test_footprint_round_trips_through_json() {
        let a = HexId::parse("p12", Notation::LetterNumber).unwrap();
        let b = HexId::parse("p13", Notation::LetterNumber).unwrap();
        let edge = TrailEdgeId::new(&a, &b);
        let season = SeasonId::new(1165, Season::Spring);

        let mut touched = BTreeMap::new();
        touched.insert(
            edge.clone(),
            EdgeSnapshot {
                before: None,
                after: Some(TrailRecord::created(season)),
            },
        );

        let fp = Footprint::new(
            FootprintKind::Session,
            season,
            "session_007",
            EffectSummary::Session(SessionEffect {
                created: vec![edge],
                used_flags: vec![],
                rediscovered: vec![],
            }),
            touched,
            Some("a1b2c3d4e5f60718".into()),
            Some("rev:abc123".into()),
        );

        let json = serde_json::to_string(&fp).unwrap();
        let back: Footprint = serde_json::from_str(&json).unwrap();
        assert_eq!(fp, back);
    }
}
