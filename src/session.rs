//! The session apply engine.
//!
//! Consumes a finalized session event log and folds every trail-relevant
//! traversal into the trail set: unknown edges are created, known edges
//! get their seasonal usage marked, and edges the last rollover deleted
//! are flagged as rediscovered. The effect lists are deduplicated and
//! sorted like everything else.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::policy::PersistencePolicyV1;
use crate::types::{
    HexFormatError, HexId, Notation, SeasonId, SessionEvent, TrailEdgeId, TrailRecord, TrailSet,
};

/// The effect lists a session apply produces.
///
/// An all-empty effect is the distinct "no changes" outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEffect {
    /// Edges created by a first traversal.
    pub created: Vec<TrailEdgeId>,
    /// Existing edges marked used for the current season.
    pub used_flags: Vec<TrailEdgeId>,
    /// Edges traversed again after the last rollover deleted them.
    pub rediscovered: Vec<TrailEdgeId>,
}

impl SessionEffect {
    /// Whether the session changed nothing.
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.used_flags.is_empty() && self.rediscovered.is_empty()
    }
}

/// Fold a session's traversal events into the trail set.
///
/// `deleted_last_rollover` is the checkpoint from the most recent rollover,
/// used to detect rediscovery. Event hexes are direct targets: a malformed
/// id rejects the whole session, unlike the skip-and-continue treatment of
/// stored edge keys.
pub fn apply_events(
    trails: &TrailSet,
    events: &[SessionEvent],
    season: SeasonId,
    deleted_last_rollover: &[TrailEdgeId],
    policy: &PersistencePolicyV1,
    notation: Notation,
) -> Result<(TrailSet, SessionEffect), HexFormatError> {
    let deleted: BTreeSet<&TrailEdgeId> = deleted_last_rollover.iter().collect();
    let mut next = trails.clone();
    let mut created = BTreeSet::new();
    let mut used_flags = BTreeSet::new();
    let mut rediscovered = BTreeSet::new();

    for event in events {
        let SessionEvent::Traversal { from, to } = event;
        let a = HexId::parse(from, notation)?;
        let b = HexId::parse(to, notation)?;
        let id = TrailEdgeId::new(&a, &b);

        if next.contains(&id) {
            if let Some(record) = next.get_mut(&id) {
                if record.last_season_touched != season || !record.used_this_season {
                    record.used_this_season = true;
                    record.last_season_touched = season;
                    record.streak += 1;
                    if record.streak >= policy.permanent_streak_threshold {
                        record.permanent = true;
                    }
                    used_flags.insert(id.clone());
                }
            }
        } else {
            next.insert(id.clone(), TrailRecord::created(season));
            created.insert(id.clone());
        }
        if deleted.contains(&id) {
            rediscovered.insert(id);
        }
    }

    let effect = SessionEffect {
        created: created.into_iter().collect(),
        used_flags: used_flags.into_iter().collect(),
        rediscovered: rediscovered.into_iter().collect(),
    };
    Ok((next, effect))
}
