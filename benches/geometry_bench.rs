//! Criterion benchmarks for the hot geometry and rules paths.
//!
//! Benchmarks:
//!   - intervening hexes for short, long and hex-line sightlines
//!   - weapon to-hit across open ground and through woods
//!   - compiling a ten-step walking path
//!
//! Run with: cargo bench --bench geometry_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mech_rules::board::{intervening, Board, Coords, TerrainKind};
use mech_rules::combat::to_hit_weapon;
use mech_rules::core::types::Owner;
use mech_rules::entity::{Entity, Location, Weapon, WeaponAttack, WeaponType};
use mech_rules::game::Game;
use mech_rules::movement::compile;
use mech_rules::movement::pathfinder::lazy;

// ---------------------------------------------------------------------------
// Benchmark: intervening
// ---------------------------------------------------------------------------

fn bench_intervening(c: &mut Criterion) {
    let mut group = c.benchmark_group("intervening");

    group.bench_function("adjacent", |b| {
        b.iter(|| black_box(intervening(black_box(Coords::new(4, 4)), black_box(Coords::new(4, 5)))));
    });

    group.bench_function("long_diagonal", |b| {
        b.iter(|| black_box(intervening(black_box(Coords::new(0, 0)), black_box(Coords::new(15, 16)))));
    });

    // Runs along hex edges, so pairs of hexes are returned
    group.bench_function("hex_line", |b| {
        b.iter(|| black_box(intervening(black_box(Coords::new(0, 8)), black_box(Coords::new(12, 8)))));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: weapon to-hit
// ---------------------------------------------------------------------------

fn duel(woods: bool) -> (Game, WeaponAttack) {
    let mut board = Board::new(16, 17);
    if woods {
        board.set_terrain(Coords::new(5, 6), TerrainKind::Woods, 1);
        board.set_terrain(Coords::new(5, 9), TerrainKind::Woods, 1);
    }
    let mut game = Game::new(board).expect("demo board has no structures");
    let attacker = game.add_entity(
        Entity::biped_mech("Shooter", Owner::new(1, 1), 50.0, 4, 0)
            .at(Coords::new(5, 12), 0)
            .with_weapon(Weapon::new(WeaponType::large_laser(), Location::CenterTorso)),
    );
    let target = game.add_entity(
        Entity::biped_mech("Mark", Owner::new(2, 2), 50.0, 4, 0).at(Coords::new(5, 3), 3),
    );
    (
        game,
        WeaponAttack {
            attacker,
            target,
            weapon: 0,
        },
    )
}

fn bench_to_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_hit_weapon");

    let (open, attack) = duel(false);
    group.bench_function("open_ground", |b| {
        b.iter(|| black_box(to_hit_weapon(&open, black_box(&attack))));
    });

    let (wooded, attack) = duel(true);
    group.bench_function("through_woods", |b| {
        b.iter(|| black_box(to_hit_weapon(&wooded, black_box(&attack))));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: path compilation
// ---------------------------------------------------------------------------

fn bench_compile(c: &mut Criterion) {
    let mut game = Game::new(Board::new(16, 17)).expect("empty board");
    let walker = game.add_entity(
        Entity::biped_mech("Walker", Owner::new(1, 1), 50.0, 6, 0).at(Coords::new(2, 14), 0),
    );
    let path = lazy(Coords::new(2, 14), 0, Coords::new(8, 6));

    c.bench_function("compile_lazy_path", |b| {
        b.iter(|| {
            let mut path = path.clone();
            compile(&game, walker, &mut path).expect("walker is on the board");
            black_box(path)
        });
    });
}

// ---------------------------------------------------------------------------
// Register groups
// ---------------------------------------------------------------------------

criterion_group!(benches, bench_intervening, bench_to_hit, bench_compile);
criterion_main!(benches);
