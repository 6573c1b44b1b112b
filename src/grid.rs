use std::fmt;

use error_chain::bail;
use petgraph::graph::{NodeIndex, UnGraph};
use smallvec::SmallVec;

use crate::cells::{Cell, Coordinate, Direction};
use crate::errors::*;
use crate::units::{ColumnsCount, RowsCount};

pub type CoordinateSmallVec = SmallVec<[Coordinate; 4]>;

/// A `rows × columns` block of cells stored row-major.
///
/// Wall state only changes through `open_wall_between` (and `open_exterior_wall` for the outer
/// boundary), so the two sides of a wall shared by neighbouring cells always agree.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: rows: {}, columns: {}, open passages: {}",
               self.rows,
               self.columns,
               self.open_passages_count())
    }
}

impl Grid {
    /// A grid of fully walled, unvisited cells.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<Grid> {
        let (RowsCount(rows), ColumnsCount(columns)) = (rows, columns);
        if rows == 0 || columns == 0 {
            bail!(ErrorKind::InvalidDimensions(rows, columns));
        }
        let cells_count = rows.checked_mul(columns)
            .ok_or(ErrorKind::InvalidDimensions(rows, columns))?;

        Ok(Grid {
            rows,
            columns,
            cells: vec![Cell::new(); cells_count],
        })
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.rows)
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.columns)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Coordinate) -> bool {
        coord.row < self.rows && coord.col < self.columns
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn coordinate_to_index(&self, coord: Coordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row * self.columns + coord.col)
        } else {
            None
        }
    }

    #[inline]
    fn index_of(&self, coord: Coordinate) -> usize {
        coord.row * self.columns + coord.col
    }

    fn checked_index(&self, coord: Coordinate) -> Result<usize> {
        self.coordinate_to_index(coord)
            .ok_or_else(|| ErrorKind::OutOfRange(coord).into())
    }

    pub fn cell(&self, coord: Coordinate) -> Result<&Cell> {
        let index = self.checked_index(coord)?;
        Ok(&self.cells[index])
    }

    pub fn has_wall(&self, coord: Coordinate, dir: Direction) -> Result<bool> {
        self.cell(coord).map(|c| c.has_wall(dir))
    }

    pub fn is_visited(&self, coord: Coordinate) -> Result<bool> {
        self.cell(coord).map(Cell::is_visited)
    }

    pub fn set_visited(&mut self, coord: Coordinate) -> Result<()> {
        let index = self.checked_index(coord)?;
        self.cells[index].set_visited(true);
        Ok(())
    }

    /// Clear the `visited` flag on every cell.
    pub fn reset_visited(&mut self) {
        for cell in &mut self.cells {
            cell.set_visited(false);
        }
    }

    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_visited()).count()
    }

    /// Remove the wall shared by two 4-neighbour cells, from both sides.
    ///
    /// Fails without touching the grid if either coordinate is outside it or the two cells are
    /// not adjacent.
    pub fn open_wall_between(&mut self, a: Coordinate, b: Coordinate) -> Result<()> {
        let a_index = self.checked_index(a)?;
        let b_index = self.checked_index(b)?;
        let direction = a.direction_to(b).ok_or(ErrorKind::NotAdjacent(a, b))?;

        self.cells[a_index].remove_wall(direction);
        self.cells[b_index].remove_wall(direction.opposite());
        Ok(())
    }

    /// Remove a wall on the outer boundary of the grid, one with no cell on its other side.
    pub fn open_exterior_wall(&mut self, coord: Coordinate, dir: Direction) -> Result<()> {
        let index = self.checked_index(coord)?;
        if self.neighbour_at_direction(coord, dir).is_some() {
            bail!(ErrorKind::NotExterior(coord, dir));
        }
        self.cells[index].remove_wall(dir);
        Ok(())
    }

    pub fn neighbour_at_direction(&self, coord: Coordinate, direction: Direction) -> Option<Coordinate> {
        coord.offset(direction)
            .filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    /// Cells that are above, right of, below or left of a cell (in that order), but not
    /// necessarily reachable through an open wall.
    pub fn neighbours(&self, coord: Coordinate) -> CoordinateSmallVec {
        if !self.is_valid_coordinate(coord) {
            return CoordinateSmallVec::new();
        }
        Direction::ALL.iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    /// Cells that are reachable from a particular cell through an open wall.
    pub fn links(&self, coord: Coordinate) -> Result<CoordinateSmallVec> {
        let cell = self.cell(coord)?;
        Ok(Direction::ALL.iter()
            .filter(|dir| !cell.has_wall(**dir))
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect())
    }

    /// Are two cells in the grid joined by an open wall?
    pub fn is_linked(&self, a: Coordinate, b: Coordinate) -> bool {
        match (self.cell(a), a.direction_to(b)) {
            (Ok(cell), Some(dir)) => self.is_valid_coordinate(b) && !cell.has_wall(dir),
            _ => false,
        }
    }

    pub fn is_neighbour_linked(&self, coord: Coordinate, direction: Direction) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour_coord| self.is_linked(coord, neighbour_coord))
    }

    /// Number of open walls between pairs of cells. Openings in the outer boundary are not
    /// counted.
    pub fn open_passages_count(&self) -> usize {
        self.iter()
            .map(|coord| {
                [Direction::Right, Direction::Down]
                    .iter()
                    .filter(|dir| self.is_neighbour_linked(coord, **dir))
                    .count()
            })
            .sum()
    }

    /// The open passages as an undirected graph. Node `i` is the cell at row-major index `i`
    /// and carries its coordinate.
    pub fn passage_graph(&self) -> UnGraph<Coordinate, ()> {
        let mut graph = UnGraph::with_capacity(self.size(), self.size().saturating_sub(1));
        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }
        for (index, coord) in self.iter().enumerate() {
            for dir in [Direction::Right, Direction::Down].iter() {
                if let Some(neighbour) = self.neighbour_at_direction(coord, *dir) {
                    if self.is_linked(coord, neighbour) {
                        let neighbour_index = self.index_of(neighbour);
                        let _ = graph.add_edge(NodeIndex::new(index), NodeIndex::new(neighbour_index), ());
                    }
                }
            }
        }
        graph
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            columns: self.columns,
            cells_count: self.size(),
        }
    }

    #[inline]
    pub fn iter_row(&self) -> RowIter {
        RowIter {
            current_row: 0,
            rows: self.rows,
            columns: self.columns,
        }
    }

    // The `_unchecked` accessors are for traversals that only ever reach coordinates through
    // `neighbour_at_direction` or after validating them up front.

    #[inline]
    pub(crate) fn cell_unchecked(&self, coord: Coordinate) -> &Cell {
        &self.cells[self.index_of(coord)]
    }

    #[inline]
    pub(crate) fn mark_visited_unchecked(&mut self, coord: Coordinate) {
        let index = self.index_of(coord);
        self.cells[index].set_visited(true);
    }
}

/// Row-major walk over every coordinate of a grid.
#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    columns: usize,
    cells_count: usize,
}

impl Iterator for CellIter {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Coordinate::new(self.current_cell_number / self.columns,
                                        self.current_cell_number % self.columns);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for CellIter {} // default impl using size_hint()

#[derive(Debug, Copy, Clone)]
pub struct RowIter {
    current_row: usize,
    rows: usize,
    columns: usize,
}

impl Iterator for RowIter {
    type Item = Vec<Coordinate>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row < self.rows {
            let row = self.current_row;
            self.current_row += 1;
            Some((0..self.columns).map(|col| Coordinate::new(row, col)).collect())
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rows - self.current_row;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for RowIter {}
