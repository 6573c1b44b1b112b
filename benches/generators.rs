use criterion::{criterion_group, criterion_main, Criterion};
use mazes_dfs::cells::Coordinate;
use mazes_dfs::generators;
use mazes_dfs::grid::Grid;
use mazes_dfs::maze::Maze;
use mazes_dfs::renderers::Headless;
use mazes_dfs::units::{ColumnsCount, RowsCount};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bench_recursive_backtracker_maze_32(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(32);
    c.bench_function("recursive_backtracker_maze_32", move |b| {
        b.iter(|| {
            let mut g = Grid::new(RowsCount(32), ColumnsCount(32)).unwrap();
            generators::recursive_backtracker(&mut g, Coordinate::new(0, 0), &mut rng, &mut Headless).unwrap();
            g
        })
    });
}

fn bench_recursive_backtracker_maze_350(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(350);
    c.bench_function("recursive_backtracker_maze_350", move |b| {
        b.iter(|| {
            let mut g = Grid::new(RowsCount(350), ColumnsCount(350)).unwrap();
            generators::recursive_backtracker(&mut g, Coordinate::new(0, 0), &mut rng, &mut Headless).unwrap();
            g
        })
    });
}

fn bench_seeded_maze_100(c: &mut Criterion) {
    c.bench_function("seeded_maze_100", |b| {
        b.iter(|| Maze::new(RowsCount(100), ColumnsCount(100), Some(42)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_maze_32,
    bench_recursive_backtracker_maze_350,
    bench_seeded_maze_100
);
criterion_main!(benches);
