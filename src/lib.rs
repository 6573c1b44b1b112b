//! **mazes-dfs** generates perfect mazes with a randomized depth first recursive backtracker and
//! finds the route through them with a backtracking depth first search.
//!
//! Everything runs headless by default. A [`renderers::RenderHook`] can watch every cell the
//! generator carves and every step the solver takes.
//!
//! ```
//! use mazes_dfs::maze::Maze;
//! use mazes_dfs::units::{ColumnsCount, RowsCount};
//!
//! let mut maze = Maze::new(RowsCount(4), ColumnsCount(6), Some(42)).unwrap();
//! assert!(maze.solve());
//! println!("{}", maze);
//! ```

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod maze;
pub mod pathing;
pub mod renderers;
pub mod units;
mod utils;

pub use crate::maze::Maze;
