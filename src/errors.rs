// Error types for building grids and mazes. Other modules `use crate::errors::*;` to get the
// `Error`, `ErrorKind`, `Result` and `ResultExt` types that `error_chain!` creates.
//
// A solver that finds no route is not an error, it returns a negative result instead.

use error_chain::error_chain;

use crate::cells::{Coordinate, Direction};

error_chain! {
    errors {
        InvalidDimensions(rows: usize, columns: usize) {
            description("invalid grid dimensions")
            display("invalid grid dimensions {}x{}, rows and columns must both be at least 1", rows, columns)
        }
        OutOfRange(coord: Coordinate) {
            description("coordinate outside the grid")
            display("coordinate {} is outside the grid", coord)
        }
        NotAdjacent(a: Coordinate, b: Coordinate) {
            description("cells are not adjacent")
            display("cells {} and {} are not adjacent", a, b)
        }
        NotExterior(coord: Coordinate, dir: Direction) {
            description("wall is not on the grid boundary")
            display("the {} wall of cell {} is shared with another cell", dir, coord)
        }
    }
}
