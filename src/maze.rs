use std::fmt;

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use tracing::debug;

use crate::cells::{Coordinate, Direction};
use crate::errors::*;
use crate::generators;
use crate::grid::Grid;
use crate::pathing;
use crate::renderers::{Headless, RenderEvent, RenderHook};
use crate::units::{ColumnsCount, RowsCount};

/// A perfect maze: every cell reachable from every other by exactly one route.
///
/// The maze is carved once, when it is built, with the recursive backtracker starting from the
/// entrance at the top left. The entrance has its top wall opened and the exit, at the bottom
/// right, its bottom wall. After construction no cell is marked visited; `solve` marks the cells
/// it searches and clears them again at the start of every run.
///
/// Every change a picture of the maze would show is reported to the render hook `H`, which
/// defaults to drawing nothing.
pub struct Maze<H: RenderHook = Headless> {
    grid: Grid,
    seed: Option<u64>,
    hook: H,
}

impl Maze<Headless> {
    /// A headless maze. With a seed the same maze is generated every time, without one the
    /// random generator is seeded from the operating system.
    pub fn new(rows: RowsCount, columns: ColumnsCount, seed: Option<u64>) -> Result<Maze> {
        Maze::with_hook(rows, columns, seed, Headless)
    }
}

impl<H: RenderHook> Maze<H> {
    pub fn with_hook(rows: RowsCount, columns: ColumnsCount, seed: Option<u64>, hook: H) -> Result<Maze<H>> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut maze = Maze::with_rng(rows, columns, &mut rng, hook)?;
        maze.seed = seed;
        Ok(maze)
    }

    /// Build the maze with randomness from `rng`, nothing else draws from it.
    pub fn with_rng<R: Rng>(rows: RowsCount, columns: ColumnsCount, rng: &mut R, mut hook: H) -> Result<Maze<H>> {
        let mut grid = Grid::new(rows, columns)?;
        for coord in grid.iter() {
            draw_cell(&grid, coord, &mut hook)?;
        }

        let (RowsCount(rows), ColumnsCount(columns)) = (rows, columns);
        let entrance = Coordinate::new(0, 0);
        let exit = Coordinate::new(rows - 1, columns - 1);

        generators::recursive_backtracker(&mut grid, entrance, rng, &mut hook)
            .chain_err(|| "failed to carve the maze passages")?;

        grid.open_exterior_wall(entrance, Direction::Up)?;
        grid.open_exterior_wall(exit, Direction::Down)?;
        draw_cell(&grid, entrance, &mut hook)?;
        if exit != entrance {
            draw_cell(&grid, exit, &mut hook)?;
        }

        grid.reset_visited();

        debug!(rows, columns, passages = grid.open_passages_count(), "maze generated");
        Ok(Maze {
            grid,
            seed: None,
            hook,
        })
    }

    /// Search for the route from the entrance to the exit, reporting every step to the hook.
    ///
    /// A generated maze always has a route, but the search itself does not assume one.
    pub fn solve(&mut self) -> bool {
        self.solve_path().is_some()
    }

    /// As `solve`, returning the route from the entrance to the exit inclusive.
    pub fn solve_path(&mut self) -> Option<Vec<Coordinate>> {
        let (entrance, exit) = (self.entrance(), self.exit());
        pathing::search(&mut self.grid, entrance, exit, &mut self.hook)
    }

    pub fn reset_visited(&mut self) {
        self.grid.reset_visited();
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }

    pub fn hook_mut(&mut self) -> &mut H {
        &mut self.hook
    }

    pub fn into_hook(self) -> H {
        self.hook
    }
}

impl<H: RenderHook> Maze<H> {
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.grid.rows()
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.grid.columns()
    }

    /// The seed given at construction, `None` for entropy seeded or injected generators.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[inline]
    pub fn entrance(&self) -> Coordinate {
        Coordinate::new(0, 0)
    }

    #[inline]
    pub fn exit(&self) -> Coordinate {
        let (RowsCount(rows), ColumnsCount(columns)) = (self.rows(), self.columns());
        Coordinate::new(rows - 1, columns - 1)
    }
}

impl<H: RenderHook> fmt::Debug for Maze<H> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Maze :: seed: {:?}, {:?}", self.seed, self.grid)
    }
}

impl<H: RenderHook> fmt::Display for Maze<H> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.grid, f)
    }
}

fn draw_cell<H: RenderHook + ?Sized>(grid: &Grid, coord: Coordinate, hook: &mut H) -> Result<()> {
    hook.on_event(RenderEvent::CellDrawn {
        at: coord,
        cell: *grid.cell(coord)?,
    });
    Ok(())
}
