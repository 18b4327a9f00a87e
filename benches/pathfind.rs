//! Performance benchmarks for trail pathfinding.
//!
//! Run with: `cargo bench --bench pathfind`
//!
//! ## Performance Targets
//!
//! | Operation | Target | Notes |
//! |-----------|--------|-------|
//! | Graph build | <5ms | Full adjacency from a stored trail set |
//! | Corner-to-corner path | <10ms | Dense grid, worst-case BFS frontier |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use trailwarden::{HexCoord, Notation, TrailEdgeId, TrailGraph, TrailRecord, TrailSet};
use trailwarden::{HexId, Season, SeasonId};

/// Build a fully trailed grid: every hex connected to its east and south
/// neighbors, the densest network a campaign map of this size can hold.
fn grid_trails(cols: i32, rows: i32) -> TrailSet {
    let season = SeasonId::new(1165, Season::Spring);
    let mut set = TrailSet::new();
    for col in 1..=cols {
        for row in 1..=rows {
            for (dc, dr) in [(1, 0), (0, 1)] {
                let (nc, nr) = (col + dc, row + dr);
                if nc > cols || nr > rows {
                    continue;
                }
                let a = hex_at(col, row);
                let b = hex_at(nc, nr);
                set.insert(
                    TrailEdgeId::new(&a, &b),
                    TrailRecord {
                        permanent: (col + row) % 7 == 0,
                        streak: ((col * row) % 4) as u32,
                        used_this_season: (col + row) % 3 == 0,
                        last_season_touched: season,
                    },
                );
            }
        }
    }
    set
}

fn hex_at(col: i32, row: i32) -> HexId {
    let id = trailwarden::types::hex::format(HexCoord::new(col, row), Notation::LetterNumber)
        .unwrap();
    HexId::parse(&id, Notation::LetterNumber).unwrap()
}

fn bench_graph_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_build");
    for size in [10, 20, 26] {
        let set = grid_trails(size, size);
        group.throughput(Throughput::Elements(set.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &set, |b, set| {
            b.iter(|| TrailGraph::build(black_box(set)));
        });
    }
    group.finish();
}

fn bench_corner_to_corner(c: &mut Criterion) {
    let mut group = c.benchmark_group("corner_to_corner");
    for size in [10, 20, 26] {
        let set = grid_trails(size, size);
        let graph = TrailGraph::build(&set);
        let start = hex_at(1, 1);
        let dest = hex_at(size, size);
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| graph.find_path(black_box(&set), black_box(&start), black_box(&dest)));
        });
    }
    group.finish();
}

fn bench_no_path(c: &mut Criterion) {
    // worst case: the whole component gets explored before giving up
    let mut set = grid_trails(20, 20);
    let island_a = hex_at(25, 25);
    let island_b = hex_at(26, 25);
    set.insert(
        TrailEdgeId::new(&island_a, &island_b),
        TrailRecord {
            permanent: false,
            streak: 0,
            used_this_season: false,
            last_season_touched: SeasonId::new(1165, Season::Spring),
        },
    );
    let graph = TrailGraph::build(&set);
    let start = hex_at(1, 1);

    c.bench_function("no_path_full_exploration", |b| {
        b.iter(|| graph.find_path(black_box(&set), black_box(&start), black_box(&island_a)));
    });
}

criterion_group!(benches, bench_graph_build, bench_corner_to_corner, bench_no_path);
criterion_main!(benches);
