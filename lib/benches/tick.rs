use criterion::{Criterion, criterion_group, criterion_main};
use hydra::diagnostics::NullSink;
use hydra::snake::Snake;
use hydra::{
    Address, CellUpdate, GameState, MainStrategy, StateMessage, StrategyConfig, UpdateMessage,
};
use std::hint::black_box;

/// A crowded 2-D board: 40 of our snakes, two enemies and plenty of food.
fn crowded_2d() -> GameState {
    let mut state = GameState::new(vec![64, 64], [0, 0].into(), "us");
    state.snakes = (0..40)
        .map(|i| {
            let y = 2 + i;
            Snake::new(
                format!("us.{i}"),
                (4..10).map(|x| Address::from([x, y])).collect(),
            )
        })
        .collect();
    let mut cells: Vec<CellUpdate> = state
        .snakes
        .iter()
        .flat_map(|s| s.segments.iter().map(|a| CellUpdate::new(a.clone(), 0, "us")))
        .collect();
    cells.extend((0..30).map(|i| CellUpdate::new([50 + i % 10, 10 + i / 10], 0, "red")));
    cells.extend((0..20).map(|i| CellUpdate::new([30, 10 + i], 0, "blue")));
    cells.extend((0..200).map(|i| CellUpdate::new([20 + i % 20, 50 + i / 20], 1, "")));
    state.set_state(&StateMessage {
        updated_cells: cells,
    });
    state.update(&UpdateMessage::default(), &mut NullSink);
    state
}

/// A 3-D board with a handful of long snakes and scattered food.
fn sparse_3d() -> GameState {
    let mut state = GameState::new(vec![16, 16, 16], [0, 0, 0].into(), "us");
    state.snakes = (0..8)
        .map(|i| {
            Snake::new(
                format!("us.{i}"),
                (0..12).map(|x| Address::from([x, i * 2, 8])).collect(),
            )
        })
        .collect();
    let cells: Vec<CellUpdate> = (0..64)
        .map(|i| CellUpdate::new([i % 16, 15, i / 16], 1, ""))
        .chain((0..16).map(|i| CellUpdate::new([15, i, 0], 0, "red")))
        .collect();
    state.set_state(&StateMessage {
        updated_cells: cells,
    });
    state.update(&UpdateMessage::default(), &mut NullSink);
    state
}

fn bench_tick(c: &mut Criterion, name: &str, state: GameState) {
    c.bench_function(name, |b| {
        b.iter(|| {
            let mut state = state.clone();
            let mut strategy = MainStrategy::new(StrategyConfig::default())
                .with_sink(NullSink)
                .with_seed(7);
            black_box(strategy.update(black_box(&mut state)));
        })
    });
}

fn bench_ticks(c: &mut Criterion) {
    bench_tick(c, "tick_crowded_2d", crowded_2d());
    bench_tick(c, "tick_sparse_3d", sparse_3d());
}

/// Enemy aggregates are rebuilt from the whole grid every tick.
fn bench_update(c: &mut Criterion) {
    let state = crowded_2d();
    let update = UpdateMessage {
        updated_cells: (0..30)
            .map(|i| CellUpdate::new([50 + i % 10, 20], 0, "red"))
            .collect(),
        removed_snakes: vec![],
    };
    c.bench_function("update_crowded_2d", |b| {
        b.iter(|| {
            let mut state = state.clone();
            state.update(black_box(&update), &mut NullSink);
            black_box(state.enemy_cell_count());
        })
    });
}

criterion_group!(benches, bench_ticks, bench_update);
criterion_main!(benches);
