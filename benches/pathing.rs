use criterion::{
    Criterion,
    criterion_group,
    criterion_main
};
use mazes_dfs::cells::Coordinate;
use mazes_dfs::maze::Maze;
use mazes_dfs::pathing;
use mazes_dfs::renderers::{Headless, RecordingHook};
use mazes_dfs::units::{ColumnsCount, RowsCount};

fn bench_solve(c: &mut Criterion) {
    c.bench_function("solve", |b| {
        let mut m = Maze::new(RowsCount(350), ColumnsCount(350), Some(7)).unwrap();
        b.iter(|| m.solve())
    });
}

fn bench_solve_recording(c: &mut Criterion) {
    c.bench_function("solve_recording", |b| {
        let mut m = Maze::with_hook(RowsCount(100), ColumnsCount(100), Some(7), RecordingHook::new()).unwrap();
        b.iter(|| {
            m.hook_mut().clear();
            m.solve()
        })
    });
}

fn bench_depth_first_search_from_centre(c: &mut Criterion) {
    c.bench_function("depth_first_search_from_centre", |b| {
        let m = Maze::new(RowsCount(350), ColumnsCount(350), Some(7)).unwrap();
        let mut g = m.grid().clone();
        let start_coord = Coordinate::new(250, 250);
        let end_coord = Coordinate::new(0, 0);
        b.iter(|| pathing::depth_first_search(&mut g, start_coord, end_coord, &mut Headless))
    });
}

criterion_group!(benches,
    bench_solve,
    bench_solve_recording,
    bench_depth_first_search_from_centre
);
criterion_main!(benches);
