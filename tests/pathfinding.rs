//! Golden tests for trail pathfinding.
//!
//! These tests verify determinism and tie-break behavior of the path
//! finder over hand-built trail networks.

use trailwarden::{
    HexId, Notation, Season, SeasonId, TrailEdgeId, TrailGraph, TrailRecord, TrailSet,
};

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn hex(s: &str) -> HexId {
    HexId::parse(s, Notation::LetterNumber).unwrap()
}

fn season() -> SeasonId {
    SeasonId::new(1165, Season::Spring)
}

fn record(permanent: bool, streak: u32, used: bool) -> TrailRecord {
    TrailRecord {
        permanent,
        streak,
        used_this_season: used,
        last_season_touched: season(),
    }
}

fn insert(set: &mut TrailSet, a: &str, b: &str, rec: TrailRecord) {
    set.insert(TrailEdgeId::new(&hex(a), &hex(b)), rec);
}

/// A ring of plain trails around q10 plus spokes, the kind of network a
/// few seasons of play produce.
fn ring_network() -> TrailSet {
    let mut set = TrailSet::new();
    let ring = ["p9", "q9", "r10", "r11", "q11", "p10"];
    for i in 0..ring.len() {
        insert(
            &mut set,
            ring[i],
            ring[(i + 1) % ring.len()],
            record(false, 1, false),
        );
    }
    for spoke in ring {
        insert(&mut set, "q10", spoke, record(false, 0, false));
    }
    set
}

fn path_of(set: &TrailSet, start: &str, dest: &str) -> Option<Vec<HexId>> {
    TrailGraph::build(set).find_path(set, &hex(start), &hex(dest))
}

// ─────────────────────────────────────────────────────────────────────────────
// Determinism
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_identical_inputs_identical_path() {
    let set = ring_network();
    let first = path_of(&set, "p9", "r11");
    for _ in 0..10 {
        assert_eq!(path_of(&set, "p9", "r11"), first);
    }
}

#[test]
fn test_rebuilt_graph_identical_path() {
    // adjacency uses hash maps internally; the answer must not depend on
    // their iteration order across builds
    let set = ring_network();
    let a = TrailGraph::build(&set).find_path(&set, &hex("p9"), &hex("r11"));
    let b = TrailGraph::build(&set).find_path(&set, &hex("p9"), &hex("r11"));
    assert_eq!(a, b);
}

// ─────────────────────────────────────────────────────────────────────────────
// Golden paths
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hub_route_through_center() {
    let set = ring_network();
    // p9 and r11 are opposite on the ring: 3 hops around, 2 through q10
    let path = path_of(&set, "p9", "r11").unwrap();
    assert_eq!(path, vec![hex("p9"), hex("q10"), hex("r11")]);
}

#[test]
fn test_adjacent_ring_hexes_skip_center() {
    let set = ring_network();
    let path = path_of(&set, "p9", "q9").unwrap();
    assert_eq!(path, vec![hex("p9"), hex("q9")]);
}

#[test]
fn test_permanent_spur_preferred_on_tie() {
    // two 3-hop routes a1→d1; the b-row route is made permanent
    let mut set = TrailSet::new();
    for (a, b) in [("a1", "b1"), ("b1", "c1"), ("c1", "d1")] {
        insert(&mut set, a, b, record(true, 0, false));
    }
    for (a, b) in [("a1", "b2"), ("b2", "c2"), ("c2", "d1")] {
        insert(&mut set, a, b, record(false, 4, true));
    }

    let path = path_of(&set, "a1", "d1").unwrap();
    assert_eq!(path, vec![hex("a1"), hex("b1"), hex("c1"), hex("d1")]);
}

#[test]
fn test_tie_between_plain_routes_is_hex_order() {
    // equal-rank 2-hop routes p12→q13 via p13 and via q12; hex order
    // prefers p13
    let mut set = TrailSet::new();
    for (a, b) in [("p12", "p13"), ("p13", "q13"), ("p12", "q12"), ("q12", "q13")] {
        insert(&mut set, a, b, record(false, 0, false));
    }

    let path = path_of(&set, "p12", "q13").unwrap();
    assert_eq!(path, vec![hex("p12"), hex("p13"), hex("q13")]);
}

#[test]
fn test_longer_permanent_route_never_beats_shorter() {
    let mut set = TrailSet::new();
    insert(&mut set, "p12", "q13", record(false, 0, false));
    for (a, b) in [("p12", "p13"), ("p13", "q13")] {
        insert(&mut set, a, b, record(true, 9, true));
    }

    let path = path_of(&set, "p12", "q13").unwrap();
    assert_eq!(path, vec![hex("p12"), hex("q13")]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Input normalization
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_unnormalized_query_reaches_same_edges() {
    // queries arrive from operator input; case and padding differences
    // must resolve to the same hexes the set is keyed by
    let set = {
        let mut s = TrailSet::new();
        insert(&mut s, "p7", "p8", record(false, 0, false));
        s
    };
    let graph = TrailGraph::build(&set);
    let start = HexId::parse(" P07 ", Notation::LetterNumber).unwrap();
    let dest = HexId::parse("P8", Notation::LetterNumber).unwrap();
    let path = graph.find_path(&set, &start, &dest).unwrap();
    assert_eq!(path, vec![hex("p7"), hex("p8")]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Edges of the contract
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_set_has_no_paths() {
    let set = TrailSet::new();
    assert_eq!(path_of(&set, "p12", "p13"), None);
    assert_eq!(
        path_of(&set, "p12", "p12"),
        Some(vec![hex("p12")])
    );
}

#[test]
fn test_disconnected_components() {
    let mut set = TrailSet::new();
    insert(&mut set, "a1", "a2", record(false, 0, false));
    insert(&mut set, "m10", "m11", record(false, 0, false));
    assert_eq!(path_of(&set, "a1", "m11"), None);
}
