use tracing::debug;

use crate::cells::{Coordinate, Direction};
use crate::errors::*;
use crate::grid::Grid;
use crate::renderers::{MoveKind, RenderEvent, RenderHook};

/// One cell on the search stack and how far through `Direction::ALL` it has got.
#[derive(Debug, Copy, Clone)]
struct Frame {
    at: Coordinate,
    next_direction: usize,
}

impl Frame {
    fn new(at: Coordinate) -> Frame {
        Frame {
            at,
            next_direction: 0,
        }
    }
}

/// Depth first search for a route from `start` to `end` that only passes through open walls.
///
/// All `visited` flags are cleared first. Every cell the search steps onto is left visited,
/// including dead ends it backed out of, so afterwards the visited cells are a superset of the
/// route. Neighbours are tried up, right, down then left, and the search stops as soon as
/// `end` is reached.
///
/// Returns the route, both ends included, or `None` if `end` cannot be reached. Only invalid
/// coordinates are errors.
pub fn depth_first_search<H>(grid: &mut Grid,
                             start: Coordinate,
                             end: Coordinate,
                             hook: &mut H)
                             -> Result<Option<Vec<Coordinate>>>
    where H: RenderHook + ?Sized
{
    let _ = grid.cell(start)?;
    let _ = grid.cell(end)?;
    Ok(search(grid, start, end, hook))
}

/// `depth_first_search` for coordinates already known to be inside the grid.
pub(crate) fn search<H>(grid: &mut Grid,
                        start: Coordinate,
                        end: Coordinate,
                        hook: &mut H)
                        -> Option<Vec<Coordinate>>
    where H: RenderHook + ?Sized
{
    grid.reset_visited();
    visit(grid, start, hook);
    if start == end {
        return Some(vec![start]);
    }

    let mut stack = vec![Frame::new(start)];
    let route = loop {
        let frame = match stack.last_mut() {
            Some(frame) => frame,
            None => break None,
        };
        let current = frame.at;

        match next_open_unvisited(grid, frame) {
            Some(neighbour) => {
                hook.on_event(RenderEvent::Moved {
                    from: current,
                    to: neighbour,
                    kind: MoveKind::Forward,
                });
                visit(grid, neighbour, hook);
                stack.push(Frame::new(neighbour));
                if neighbour == end {
                    break Some(stack.iter().map(|frame| frame.at).collect::<Vec<_>>());
                }
            }
            None => {
                // Dead end. The cell stays visited so nothing re-enters it.
                let _ = stack.pop();
                if let Some(parent) = stack.last() {
                    hook.on_event(RenderEvent::Moved {
                        from: parent.at,
                        to: current,
                        kind: MoveKind::Undo,
                    });
                }
            }
        }
    };

    debug!(start = %start,
           end = %end,
           found = route.is_some(),
           visited = grid.visited_count(),
           "depth first search finished");
    route
}

fn visit<H: RenderHook + ?Sized>(grid: &mut Grid, coord: Coordinate, hook: &mut H) {
    grid.mark_visited_unchecked(coord);
    hook.on_event(RenderEvent::CellVisited { at: coord });
}

/// Advance the frame to its next neighbour that can be entered: inside the grid, not walled
/// off from the frame's cell, and not yet visited.
fn next_open_unvisited(grid: &Grid, frame: &mut Frame) -> Option<Coordinate> {
    while let Some(&dir) = Direction::ALL.get(frame.next_direction) {
        frame.next_direction += 1;
        if grid.cell_unchecked(frame.at).has_wall(dir) {
            continue;
        }
        match grid.neighbour_at_direction(frame.at, dir) {
            Some(neighbour) if !grid.cell_unchecked(neighbour).is_visited() => return Some(neighbour),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::renderers::{Headless, RecordingHook};
    use crate::units::{ColumnsCount, RowsCount};

    fn gc(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    fn grid(rows: usize, columns: usize) -> Grid {
        Grid::new(RowsCount(rows), ColumnsCount(columns)).unwrap()
    }

    // 3x3, with a dead end to the right of the start that the search tries first:
    //
    // S . .      (0,0)-(0,1)-(0,2)
    // .          (0,0)-(1,0)
    // . . E      (1,0)-(2,0)-(2,1)-(2,2)
    fn dead_end_first() -> Grid {
        let mut g = grid(3, 3);
        for &(a, b) in [(gc(0, 0), gc(0, 1)),
                        (gc(0, 1), gc(0, 2)),
                        (gc(0, 0), gc(1, 0)),
                        (gc(1, 0), gc(2, 0)),
                        (gc(2, 0), gc(2, 1)),
                        (gc(2, 1), gc(2, 2))]
            .iter() {
            g.open_wall_between(a, b).unwrap();
        }
        g
    }

    #[test]
    fn single_cell_is_its_own_route() {
        let mut g = grid(1, 1);
        let mut hook = RecordingHook::new();
        let route = depth_first_search(&mut g, gc(0, 0), gc(0, 0), &mut hook).unwrap();
        assert_eq!(route, Some(vec![gc(0, 0)]));
        assert!(g.is_visited(gc(0, 0)).unwrap());
        assert_eq!(hook.moves().count(), 0);
        assert_eq!(hook.visits().collect::<Vec<_>>(), vec![gc(0, 0)]);
    }

    #[test]
    fn backs_out_of_dead_ends() {
        let mut g = dead_end_first();
        let mut hook = RecordingHook::new();
        let route = depth_first_search(&mut g, gc(0, 0), gc(2, 2), &mut hook).unwrap();

        assert_eq!(route,
                   Some(vec![gc(0, 0), gc(1, 0), gc(2, 0), gc(2, 1), gc(2, 2)]));

        // the dead end stays marked, the unreachable cell in the middle was never entered
        assert!(g.is_visited(gc(0, 2)).unwrap());
        assert!(!g.is_visited(gc(1, 1)).unwrap());
        assert_eq!(g.visited_count(), 7);

        let moves = hook.moves().collect::<Vec<_>>();
        assert_eq!(moves,
                   vec![(gc(0, 0), gc(0, 1), MoveKind::Forward),
                        (gc(0, 1), gc(0, 2), MoveKind::Forward),
                        (gc(0, 1), gc(0, 2), MoveKind::Undo),
                        (gc(0, 0), gc(0, 1), MoveKind::Undo),
                        (gc(0, 0), gc(1, 0), MoveKind::Forward),
                        (gc(1, 0), gc(2, 0), MoveKind::Forward),
                        (gc(2, 0), gc(2, 1), MoveKind::Forward),
                        (gc(2, 1), gc(2, 2), MoveKind::Forward)]);
    }

    #[test]
    fn walled_off_end_is_unreachable() {
        let mut g = dead_end_first();
        // (2,2) now only opens onto (1,2), which is cut off from everything else
        let mut sealed = grid(3, 3);
        for coord in g.iter() {
            for dir in [Direction::Right, Direction::Down].iter() {
                if let Some(n) = g.neighbour_at_direction(coord, *dir) {
                    let is_last_step = (coord, n) == (gc(2, 1), gc(2, 2));
                    if g.is_linked(coord, n) && !is_last_step {
                        sealed.open_wall_between(coord, n).unwrap();
                    }
                }
            }
        }
        sealed.open_wall_between(gc(1, 2), gc(2, 2)).unwrap();
        g = sealed;

        let mut hook = RecordingHook::new();
        let route = depth_first_search(&mut g, gc(0, 0), gc(2, 2), &mut hook).unwrap();
        assert_eq!(route, None);
        assert!(!g.is_visited(gc(2, 2)).unwrap());
        assert!(!g.is_visited(gc(1, 2)).unwrap());
        assert_eq!(g.visited_count(), 6);

        // everything taken forward is undone again
        let forward = hook.moves().filter(|m| m.2 == MoveKind::Forward).count();
        let undone = hook.moves().filter(|m| m.2 == MoveKind::Undo).count();
        assert_eq!(forward, 5);
        assert_eq!(undone, forward);
    }

    #[test]
    fn fully_walled_grid_is_unreachable() {
        let mut g = grid(4, 4);
        let route = depth_first_search(&mut g, gc(0, 0), gc(3, 3), &mut Headless).unwrap();
        assert_eq!(route, None);
        assert_eq!(g.visited_count(), 1);
    }

    #[test]
    fn exterior_openings_are_not_followed() {
        let mut g = grid(1, 2);
        g.open_exterior_wall(gc(0, 0), Direction::Up).unwrap();
        let route = depth_first_search(&mut g, gc(0, 0), gc(0, 1), &mut Headless).unwrap();
        assert_eq!(route, None);
    }

    #[test]
    fn visited_flags_are_reset_first() {
        let mut g = dead_end_first();
        g.set_visited(gc(1, 1)).unwrap();
        g.set_visited(gc(1, 0)).unwrap();
        let route = depth_first_search(&mut g, gc(0, 0), gc(2, 2), &mut Headless).unwrap();
        assert!(route.is_some());
        assert!(!g.is_visited(gc(1, 1)).unwrap());
    }

    #[test]
    fn invalid_end_points() {
        let mut g = grid(2, 2);
        let err = depth_first_search(&mut g, gc(0, 0), gc(2, 2), &mut Headless).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::OutOfRange(c) if *c == gc(2, 2)));
        let err = depth_first_search(&mut g, gc(5, 0), gc(1, 1), &mut Headless).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::OutOfRange(c) if *c == gc(5, 0)));
    }

    #[test]
    fn long_corridor_does_not_exhaust_the_call_stack() {
        // a 1 x 20000 corridor forces the deepest possible search
        let columns = 20_000;
        let mut g = grid(1, columns);
        for col in 1..columns {
            g.open_wall_between(gc(0, col - 1), gc(0, col)).unwrap();
        }
        let route = depth_first_search(&mut g, gc(0, 0), gc(0, columns - 1), &mut Headless)
            .unwrap()
            .expect("corridor has a route");
        assert_eq!(route.len(), columns);
    }
}
