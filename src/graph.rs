//! Trail graph construction and shortest-path queries.
//!
//! Trails are unweighted, so breadth-first search yields a true shortest
//! path by edge count. Among equal-length paths the finder prefers, in
//! order, permanent edges, then edges used this season, then higher
//! streak; the preference is carried per node as BFS discovers it, so the
//! reconstructed path is the preferred one without a second global pass.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::types::{HexId, TrailEdgeId, TrailSet};

/// Preference rank of one edge for same-distance tie-breaking.
///
/// Ordered so that a larger rank is a better edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct EdgeRank {
    permanent: bool,
    used_this_season: bool,
    streak: u32,
}

impl EdgeRank {
    fn of(trails: &TrailSet, a: &HexId, b: &HexId) -> Self {
        match trails.get(&TrailEdgeId::new(a, b)) {
            Some(record) => Self {
                permanent: record.permanent,
                used_this_season: record.used_this_season,
                streak: record.streak,
            },
            // unknown edge: worst rank
            None => Self {
                permanent: false,
                used_this_season: false,
                streak: 0,
            },
        }
    }
}

/// Undirected adjacency over the trail set.
#[derive(Debug, Clone, Default)]
pub struct TrailGraph {
    adjacency: HashMap<HexId, Vec<HexId>>,
}

impl TrailGraph {
    /// Build the adjacency map from a trail set.
    ///
    /// Each edge key splits into its two endpoints and both directions are
    /// inserted, preserving insertion order. Malformed keys are skipped,
    /// not errors; the rest of the set still loads.
    pub fn build(trails: &TrailSet) -> Self {
        let mut adjacency: HashMap<HexId, Vec<HexId>> = HashMap::new();
        for (id, _) in trails.iter() {
            let (a, b) = match id.split() {
                Ok(pair) => pair,
                Err(e) => {
                    tracing::warn!(key = %id, "skipping malformed trail edge key: {e}");
                    continue;
                }
            };
            adjacency.entry(a.clone()).or_default().push(b.clone());
            adjacency.entry(b).or_default().push(a);
        }
        Self { adjacency }
    }

    /// Whether the hex appears in the graph.
    pub fn contains(&self, hex: &HexId) -> bool {
        self.adjacency.contains_key(hex)
    }

    /// Neighbors of a hex, in insertion order.
    pub fn neighbors(&self, hex: &HexId) -> &[HexId] {
        self.adjacency.get(hex).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of hexes in the graph.
    pub fn num_hexes(&self) -> usize {
        self.adjacency.len()
    }

    /// Shortest path from `start` to `dest` by edge count.
    ///
    /// Returns `[start]` when `start == dest` regardless of graph
    /// membership, and `None` when `start` is absent or no path exists.
    /// Ties between equal-length paths go to the path whose discovered
    /// edges rank best (permanent, then used-this-season, then streak).
    pub fn find_path(
        &self,
        trails: &TrailSet,
        start: &HexId,
        dest: &HexId,
    ) -> Option<Vec<HexId>> {
        if start == dest {
            return Some(vec![start.clone()]);
        }
        if !self.contains(start) {
            return None;
        }

        let mut dist: HashMap<HexId, u32> = HashMap::new();
        let mut prev: HashMap<HexId, (HexId, EdgeRank)> = HashMap::new();
        let mut visited: HashSet<HexId> = HashSet::new();
        let mut queue: VecDeque<HexId> = VecDeque::new();

        dist.insert(start.clone(), 0);
        visited.insert(start.clone());
        queue.push_back(start.clone());

        while let Some(current) = queue.pop_front() {
            let current_dist = dist[&current];

            // Expand better edges first so the first discovery of each
            // neighbor records the preferred predecessor.
            let mut expansion: Vec<&HexId> = self.neighbors(&current).iter().collect();
            expansion.sort_by(|x, y| {
                EdgeRank::of(trails, &current, y)
                    .cmp(&EdgeRank::of(trails, &current, x))
                    .then_with(|| x.cmp(y))
            });

            for next in expansion {
                let rank = EdgeRank::of(trails, &current, next);
                if visited.insert(next.clone()) {
                    dist.insert(next.clone(), current_dist + 1);
                    prev.insert(next.clone(), (current.clone(), rank));
                    queue.push_back(next.clone());
                } else if dist.get(next) == Some(&(current_dist + 1)) {
                    // Same-distance rediscovery through a better edge
                    // upgrades the predecessor.
                    if let Some(entry) = prev.get_mut(next) {
                        if rank > entry.1 {
                            *entry = (current.clone(), rank);
                        }
                    }
                }
            }
        }

        if !dist.contains_key(dest) {
            return None;
        }

        let mut path = vec![dest.clone()];
        let mut cursor = dest.clone();
        while let Some((p, _)) = prev.get(&cursor) {
            path.push(p.clone());
            cursor = p.clone();
        }
        path.reverse();
        debug_assert_eq!(path.first(), Some(start));
        Some(path)
    }
}
