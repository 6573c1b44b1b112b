use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;
use tracing::debug;

use crate::cells::{Coordinate, Direction};
use crate::errors::*;
use crate::grid::{CoordinateSmallVec, Grid};
use crate::renderers::{RenderEvent, RenderHook};

/// Apply the recursive backtracker maze generation algorithm to a grid.
///
/// A depth first walk from `start`: at each cell pick a random unvisited neighbour, knock down
/// the wall to it and carry on from there; when a cell has no unvisited neighbours left, back
/// up to the previous one. Every cell ends up joined to the walk exactly once, so the open
/// walls form a spanning tree, a perfect maze with exactly one route between any two cells.
///
/// The walk keeps its own stack of cells on the heap rather than recursing, the depth can
/// reach `rows * columns`.
///
/// Candidate neighbours are always gathered in `Direction::ALL` order (up, right, down, left)
/// before the random pick, so a seeded `rng` always produces the same maze for the same grid
/// size. The `visited` flags are left set on every cell; callers reset them once any other
/// post-processing is done.
pub fn recursive_backtracker<R, H>(grid: &mut Grid,
                                   start: Coordinate,
                                   rng: &mut R,
                                   hook: &mut H)
                                   -> Result<()>
    where R: Rng,
          H: RenderHook + ?Sized
{
    grid.set_visited(start)?;
    hook.on_event(RenderEvent::CellDrawn {
        at: start,
        cell: *grid.cell(start)?,
    });

    let mut stack: Vec<Coordinate> = Vec::with_capacity(grid.size());
    stack.push(start);

    while let Some(&current) = stack.last() {
        let unvisited = unvisited_neighbours(grid, current);

        match unvisited.choose(rng) {
            Some(&next) => {
                grid.open_wall_between(current, next)?;
                grid.set_visited(next)?;
                hook.on_event(RenderEvent::CellDrawn {
                    at: next,
                    cell: *grid.cell(next)?,
                });
                stack.push(next);
            }
            None => {
                let _ = stack.pop();
            }
        }
    }

    debug!(start = %start, passages = grid.open_passages_count(), "recursive backtracker finished");
    Ok(())
}

fn unvisited_neighbours(grid: &Grid, coord: Coordinate) -> CoordinateSmallVec {
    Direction::ALL.iter()
        .filter_map(|dir| grid.neighbour_at_direction(coord, *dir))
        .filter(|neighbour| !grid.is_visited(*neighbour).unwrap_or(true))
        .collect::<SmallVec<_>>()
}

#[cfg(test)]
mod tests {

    use fnv::FnvHashSet;
    use petgraph::algo::{connected_components, is_cyclic_undirected};
    use quickcheck::quickcheck;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::renderers::{Headless, RecordingHook};
    use crate::units::{ColumnsCount, RowsCount};

    fn generated(rows: usize, columns: usize, seed: u64) -> Grid {
        let mut g = Grid::new(RowsCount(rows), ColumnsCount(columns)).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        recursive_backtracker(&mut g, Coordinate::new(0, 0), &mut rng, &mut Headless)
            .expect("generation failed");
        g
    }

    fn is_perfect_maze(g: &Grid) -> bool {
        let graph = g.passage_graph();
        g.open_passages_count() == g.size() - 1 && connected_components(&graph) == 1 &&
        !is_cyclic_undirected(&graph)
    }

    #[test]
    fn carves_a_spanning_tree() {
        for &(rows, columns) in [(1, 1), (1, 7), (7, 1), (2, 2), (3, 3), (10, 12), (25, 4)].iter() {
            let g = generated(rows, columns, 7);
            assert!(is_perfect_maze(&g), "{}x{} is not a perfect maze", rows, columns);
        }
    }

    #[test]
    fn every_cell_is_left_visited() {
        let g = generated(6, 5, 11);
        assert_eq!(g.visited_count(), 30);
    }

    #[test]
    fn start_anywhere() {
        let mut g = Grid::new(RowsCount(5), ColumnsCount(5)).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        recursive_backtracker(&mut g, Coordinate::new(2, 3), &mut rng, &mut Headless).unwrap();
        assert!(is_perfect_maze(&g));
    }

    #[test]
    fn invalid_start_is_rejected() {
        let mut g = Grid::new(RowsCount(3), ColumnsCount(3)).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let err = recursive_backtracker(&mut g, Coordinate::new(3, 0), &mut rng, &mut Headless)
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::OutOfRange(..)));
        assert_eq!(g.open_passages_count(), 0);
        assert_eq!(g.visited_count(), 0);
    }

    #[test]
    fn same_seed_same_maze() {
        assert_eq!(generated(9, 13, 42), generated(9, 13, 42));
    }

    #[test]
    fn different_seeds_differ() {
        // Not guaranteed for tiny grids, but 20x20 has far too many spanning trees to collide.
        assert_ne!(generated(20, 20, 1), generated(20, 20, 2));
    }

    #[test]
    fn each_carved_cell_is_drawn_once() {
        let mut g = Grid::new(RowsCount(4), ColumnsCount(6)).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let mut hook = RecordingHook::new();
        recursive_backtracker(&mut g, Coordinate::new(0, 0), &mut rng, &mut hook).unwrap();

        assert_eq!(hook.cells_drawn_count(), 24);
        match hook.events()[0] {
            RenderEvent::CellDrawn { at, cell } => {
                assert_eq!(at, Coordinate::new(0, 0));
                assert!(cell.is_visited());
            }
            ref other => panic!("unexpected first event {:?}", other),
        }
        assert_eq!(hook.moves().count(), 0);
    }

    #[test]
    fn carved_cells_are_drawn_as_entered() {
        let mut g = Grid::new(RowsCount(6), ColumnsCount(6)).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let mut hook = RecordingHook::new();
        recursive_backtracker(&mut g, Coordinate::new(0, 0), &mut rng, &mut hook).unwrap();

        // Each snapshot only shows the wall back to the parent open, so painting every event
        // over the last picture is what reproduces the finished grid.
        let mut painted_open: FnvHashSet<(Coordinate, Direction)> = FnvHashSet::default();
        for (i, event) in hook.events().iter().enumerate() {
            if let RenderEvent::CellDrawn { at, cell } = *event {
                let expected_walls = if i == 0 { 4 } else { 3 };
                assert_eq!(cell.walls_count(), expected_walls, "snapshot of {}", at);
                for &dir in Direction::ALL.iter().filter(|dir| !cell.has_wall(**dir)) {
                    let neighbour = g.neighbour_at_direction(at, dir).unwrap();
                    let _ = painted_open.insert((at, dir));
                    let _ = painted_open.insert((neighbour, dir.opposite()));
                }
            }
        }
        for coord in g.iter() {
            for &dir in Direction::ALL.iter() {
                let is_open = !g.has_wall(coord, dir).unwrap();
                assert_eq!(painted_open.contains(&(coord, dir)), is_open, "{} {}", coord, dir);
            }
        }
    }

    #[test]
    fn large_grids_do_not_exhaust_the_call_stack() {
        let g = generated(100, 120, 99);
        assert_eq!(g.open_passages_count(), 100 * 120 - 1);
    }

    #[test]
    fn quickcheck_perfect_mazes() {
        fn p(rows: u8, columns: u8, seed: u64) -> bool {
            let (rows, columns) = (rows as usize % 16 + 1, columns as usize % 16 + 1);
            is_perfect_maze(&generated(rows, columns, seed))
        }
        quickcheck(p as fn(u8, u8, u64) -> bool)
    }
}
