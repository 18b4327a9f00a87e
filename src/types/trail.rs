//! Trail edges and the trail set.
//!
//! A trail is an undirected route between two hexes. Both travel directions
//! collapse onto one canonical [`TrailEdgeId`]: the two endpoint ids joined
//! by `-`, ordered by the coordinate comparator. The [`TrailSet`] is the
//! canonical source of truth for the whole campaign and is always rewritten
//! as one sorted document.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::hex::{HexFormatError, HexId};
use super::season::SeasonId;

/// Canonical id of an undirected trail between two hexes.
///
/// Formatted `"hexA-hexB"` with the endpoints in coordinate order, so no
/// two distinct keys denote the same unordered pair. `Ord` sorts by first
/// hex then second hex (falling back to the raw string for keys the
/// comparator cannot decode), which keeps every serialized document and
/// effect list stably ordered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrailEdgeId(String);

impl TrailEdgeId {
    /// Build the canonical id for the unordered pair `{a, b}`.
    pub fn new(a: &HexId, b: &HexId) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self(format!("{first}-{second}"))
    }

    /// Wrap a raw key without validation (used when loading documents).
    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the key back into its two endpoint ids.
    ///
    /// Fails on keys that are not two well-formed hex ids joined by `-`.
    pub fn split(&self) -> Result<(HexId, HexId), HexFormatError> {
        let malformed = || HexFormatError::EdgeKey {
            key: self.0.clone(),
        };
        let (a, b) = self.0.split_once('-').ok_or_else(malformed)?;
        if a.is_empty() || b.is_empty() || b.contains('-') {
            return Err(malformed());
        }
        let a = HexId::parse_any(a).map_err(|_| malformed())?;
        let b = HexId::parse_any(b).map_err(|_| malformed())?;
        Ok((a, b))
    }

    fn sort_key(&self) -> (Option<(HexId, HexId)>, &str) {
        (self.split().ok(), &self.0)
    }
}

impl fmt::Display for TrailEdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialOrd for TrailEdgeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TrailEdgeId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// Usage and decay state of one trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailRecord {
    /// Permanent trails never decay and win path tie-breaks.
    pub permanent: bool,
    /// Consecutive-use counter, never negative.
    pub streak: u32,
    /// Whether the trail was traversed during the current season.
    pub used_this_season: bool,
    /// Season of the most recent session touch.
    pub last_season_touched: SeasonId,
}

impl TrailRecord {
    /// Record for a trail created by a traversal in `season`.
    pub fn created(season: SeasonId) -> Self {
        Self {
            permanent: false,
            streak: 1,
            used_this_season: true,
            last_season_touched: season,
        }
    }
}

/// The full mapping of canonical edge ids to trail records.
///
/// Backed by a `BTreeMap` keyed by [`TrailEdgeId`], so the set can never
/// hold a duplicate edge and iteration (and therefore serialization) is
/// always in comparator order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrailSet {
    trails: BTreeMap<TrailEdgeId, TrailRecord>,
}

impl TrailSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of trails.
    pub fn len(&self) -> usize {
        self.trails.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }

    /// Whether the set holds the edge.
    pub fn contains(&self, id: &TrailEdgeId) -> bool {
        self.trails.contains_key(id)
    }

    /// Get a record.
    pub fn get(&self, id: &TrailEdgeId) -> Option<&TrailRecord> {
        self.trails.get(id)
    }

    /// Get a mutable record.
    pub fn get_mut(&mut self, id: &TrailEdgeId) -> Option<&mut TrailRecord> {
        self.trails.get_mut(id)
    }

    /// Insert or replace a record.
    pub fn insert(&mut self, id: TrailEdgeId, record: TrailRecord) {
        self.trails.insert(id, record);
    }

    /// Remove a record.
    pub fn remove(&mut self, id: &TrailEdgeId) -> Option<TrailRecord> {
        self.trails.remove(id)
    }

    /// Iterate in comparator order.
    pub fn iter(&self) -> impl Iterator<Item = (&TrailEdgeId, &TrailRecord)> {
        self.trails.iter()
    }

    /// All edge ids in comparator order.
    pub fn edge_ids(&self) -> Vec<TrailEdgeId> {
        self.trails.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::hex::Notation;
    use crate::types::season::Season;

    fn hex(s: &str) -> HexId {
        HexId::parse(s, Notation::LetterNumber).unwrap()
    }

    fn season() -> SeasonId {
        SeasonId::new(1165, Season::Spring)
    }

    #[test]
    fn test_edge_id_collapses_directions() {
        let a = TrailEdgeId::new(&hex("p12"), &hex("q13"));
        let b = TrailEdgeId::new(&hex("q13"), &hex("p12"));
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "p12-q13");
    }

    #[test]
    fn test_edge_id_split_round_trip() {
        let id = TrailEdgeId::new(&hex("p12"), &hex("p13"));
        let (a, b) = id.split().unwrap();
        assert_eq!(a, hex("p12"));
        assert_eq!(b, hex("p13"));
    }

    #[test]
    fn test_edge_id_split_rejects_malformed() {
        assert!(TrailEdgeId::from_raw("p12").split().is_err());
        assert!(TrailEdgeId::from_raw("p12-").split().is_err());
        assert!(TrailEdgeId::from_raw("p12-q13-r14").split().is_err());
        assert!(TrailEdgeId::from_raw("??-q13").split().is_err());
    }

    #[test]
    fn test_edge_id_sorts_by_coordinates() {
        // string order would put "p10-..." before "p2-..."
        let early = TrailEdgeId::new(&hex("p2"), &hex("p3"));
        let late = TrailEdgeId::new(&hex("p10"), &hex("p11"));
        assert!(early < late);
    }

    #[test]
    fn test_trail_set_no_duplicate_edges() {
        let mut set = TrailSet::new();
        let id = TrailEdgeId::new(&hex("p12"), &hex("q13"));
        let flipped = TrailEdgeId::new(&hex("q13"), &hex("p12"));
        set.insert(id, TrailRecord::created(season()));
        set.insert(flipped, TrailRecord::created(season()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_trail_set_serializes_in_comparator_order() {
        let mut set = TrailSet::new();
        set.insert(
            TrailEdgeId::new(&hex("p10"), &hex("p11")),
            TrailRecord::created(season()),
        );
        set.insert(
            TrailEdgeId::new(&hex("p2"), &hex("p3")),
            TrailRecord::created(season()),
        );
        let json = serde_json::to_string(&set).unwrap();
        let p2 = json.find("p2-p3").unwrap();
        let p10 = json.find("p10-p11").unwrap();
        assert!(p2 < p10);
    }
}
