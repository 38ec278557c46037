use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::HashMap;
use std::time::Duration;

use empire_rules::board::{Action, PlayerId, RegionId, TerritoryGraph};
use empire_rules::decision::RandomDecisions;
use empire_rules::resolve::{board_scores, resolve_winner, Standing};
use empire_rules::{Game, GameConfig};

/// A `width` x `height` grid. Each row is one continent; vertical links
/// between rows are water.
fn grid(width: usize, height: usize) -> TerritoryGraph {
    let key = |x: usize, y: usize| format!("r{}_{}", x, y);
    let mut g = TerritoryGraph::new();
    for y in 0..height {
        for x in 0..width {
            g.add_region(&key(x, y), &key(x, y), &format!("row{}", y)).unwrap();
        }
    }
    for y in 0..height {
        for x in 0..width {
            if x + 1 < width {
                g.add_edge(&key(x, y), &key(x + 1, y), false).unwrap();
            }
            if y + 1 < height {
                g.add_edge(&key(x, y), &key(x, y + 1), true).unwrap();
            }
        }
    }
    g.set_start_region(&key(0, 0)).unwrap();
    g
}

fn bench_validate_map(c: &mut Criterion) {
    let g = grid(12, 8);
    c.bench_function("validate_96_region_map", |b| b.iter(|| black_box(&g).validate()));
}

fn bench_connectivity(c: &mut Criterion) {
    let g = grid(12, 8);
    let mut group = c.benchmark_group("validators");
    group.bench_function("is_connected", |b| b.iter(|| black_box(&g).is_connected()));
    group.bench_function("validate_continents", |b| b.iter(|| black_box(&g).validate_continents()));
    group.bench_function("validate_edges", |b| b.iter(|| black_box(&g).validate_edges()));
    group.finish();
}

fn bench_march_across_row(c: &mut Criterion) {
    let config = GameConfig::default();
    let base = Game::new(config, grid(12, 8), &["ana", "ben", "cal", "dee"]).unwrap();
    c.bench_function("place_and_march_11_steps", |b| {
        b.iter(|| {
            let mut game = base.clone();
            let me = PlayerId(0);
            game.perform(me, &Action::PlaceArmies { count: 5, region: RegionId(0) }).unwrap();
            for x in 0..11u16 {
                game.perform(me, &Action::MoveOverLand { count: 5, from: RegionId(x), to: RegionId(x + 1) })
                    .unwrap();
            }
            black_box(game.ledger().armies_of(me, RegionId(11)))
        })
    });
}

fn bench_scoring(c: &mut Criterion) {
    let mut game = Game::new(GameConfig::default(), grid(12, 8), &["ana", "ben", "cal", "dee", "eve"]).unwrap();
    game.place_starting_armies().unwrap();
    for p in 0..5u8 {
        let me = PlayerId(p);
        for x in 0..u16::from(p) {
            let _ = game.perform(me, &Action::MoveOverLand { count: 1, from: RegionId(x), to: RegionId(x + 1) });
        }
    }
    let goods = HashMap::new();

    let mut group = c.benchmark_group("scoring");
    group.bench_function("board_scores", |b| {
        b.iter(|| board_scores(black_box(game.graph()), black_box(game.ledger())))
    });
    group.bench_function("declare_winner", |b| b.iter(|| game.declare_winner(black_box(&goods))));
    group.finish();
}

fn bench_resolve_winner(c: &mut Criterion) {
    let standings: Vec<Standing> = (0..5u8)
        .map(|p| Standing {
            player: PlayerId(p),
            score: 10,
            coins: 3,
            armies_in_pool: 4,
            controlled_regions: 2,
        })
        .collect();
    c.bench_function("resolve_winner_full_draw", |b| {
        b.iter(|| resolve_winner(black_box(&standings), 14))
    });
}

fn bench_random_auction(c: &mut Criterion) {
    let base = Game::new(GameConfig::default(), grid(4, 2), &["ana", "ben", "cal", "dee", "eve"]).unwrap();
    let mut group = c.benchmark_group("auction");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(3));
    group.bench_function("random_5_players", |b| {
        let mut decisions = RandomDecisions::seeded(42);
        b.iter(|| {
            let mut game = base.clone();
            game.run_auction(&mut decisions).unwrap()
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_validate_map,
    bench_connectivity,
    bench_march_across_row,
    bench_scoring,
    bench_resolve_winner,
    bench_random_auction,
);
criterion_main!(benches);
