//! The rollover engine: seasonal decay over the whole trail set.
//!
//! Invoked once per season boundary. Edges near a haven are protected and
//! come through unchanged; everything else takes the persistence test
//! through the injectable [`SurvivalRoll`] seam. The result is three
//! disjoint edge-id lists that fully describe the effect, surfaced
//! verbatim in dry-run previews and written into the footprint.

use serde::{Deserialize, Serialize};

use crate::policy::{PersistencePolicyV1, SurvivalRoll};
use crate::types::{HexCoord, HexId, SeasonId, TrailEdgeId, TrailSet};
use crate::types::hex::distance;

/// The three disjoint edge-id lists a rollover produces.
///
/// All lists are sorted by the coordinate comparator. An all-empty effect
/// is the distinct "no changes" outcome, not a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverEffect {
    /// Near-haven edges kept unchanged.
    pub maintained: Vec<TrailEdgeId>,
    /// Far-haven edges that passed the persistence test.
    pub persisted: Vec<TrailEdgeId>,
    /// Far-haven edges removed from the set.
    pub deleted_trails: Vec<TrailEdgeId>,
}

impl RolloverEffect {
    /// Whether the rollover changed nothing.
    pub fn is_empty(&self) -> bool {
        self.maintained.is_empty() && self.persisted.is_empty() && self.deleted_trails.is_empty()
    }
}

/// Seasonal decay transform over a trail set.
#[derive(Debug)]
pub struct RolloverEngine<'a> {
    havens: &'a [HexId],
    haven_radius: u32,
    policy: &'a PersistencePolicyV1,
}

impl<'a> RolloverEngine<'a> {
    /// Create an engine for the given haven list and policy.
    pub fn new(havens: &'a [HexId], haven_radius: u32, policy: &'a PersistencePolicyV1) -> Self {
        Self {
            havens,
            haven_radius,
            policy,
        }
    }

    fn near_haven(&self, a: HexCoord, b: HexCoord) -> bool {
        self.havens.iter().filter_map(HexId::coord).any(|haven| {
            distance(a, haven) <= self.haven_radius || distance(b, haven) <= self.haven_radius
        })
    }

    /// Run the decay transform for the season being crossed into.
    ///
    /// Returns the surviving trail set and the effect triple. Pure with
    /// respect to the inputs apart from the injected roll; plan and apply
    /// share this path.
    pub fn run(
        &self,
        trails: &TrailSet,
        season: SeasonId,
        roll: &mut dyn SurvivalRoll,
    ) -> (TrailSet, RolloverEffect) {
        let mut next = TrailSet::new();
        let mut effect = RolloverEffect::default();

        for (id, record) in trails.iter() {
            let endpoints = match id.split() {
                Ok((a, b)) => a.coord().zip(b.coord()),
                Err(e) => {
                    tracing::warn!(key = %id, "keeping structurally unreadable edge: {e}");
                    None
                }
            };
            let Some((a, b)) = endpoints else {
                // Unreadable keys cannot be classified; carry them through
                // untouched and unlisted.
                next.insert(id.clone(), record.clone());
                continue;
            };

            if self.near_haven(a, b) {
                next.insert(id.clone(), record.clone());
                effect.maintained.push(id.clone());
                continue;
            }

            let survives =
                record.permanent || roll.passes(self.policy.survival_chance(record));
            if survives {
                let mut updated = record.clone();
                updated.used_this_season = false;
                if !record.used_this_season {
                    updated.streak = updated.streak.saturating_sub(1);
                }
                updated.last_season_touched = season;
                next.insert(id.clone(), updated);
                effect.persisted.push(id.clone());
            } else {
                effect.deleted_trails.push(id.clone());
            }
        }

        effect.maintained.sort();
        effect.persisted.sort();
        effect.deleted_trails.sort();
        (next, effect)
    }
}
