use std::fmt;

/// Location of a cell in a grid, row-major: `row` counts down from the top, `col` across from
/// the left.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub fn new(row: usize, col: usize) -> Coordinate {
        Coordinate { row, col }
    }

    /// Creates a new `Coordinate` offset 1 cell away in the given direction.
    /// Returns None if the coordinate would be negative. The far edges of a grid are not known
    /// here, so the result may still lie outside a particular grid.
    pub fn offset(self, dir: Direction) -> Option<Coordinate> {
        let Coordinate { row, col } = self;
        match dir {
            Direction::Up => row.checked_sub(1).map(|r| Coordinate::new(r, col)),
            Direction::Right => col.checked_add(1).map(|c| Coordinate::new(row, c)),
            Direction::Down => row.checked_add(1).map(|r| Coordinate::new(r, col)),
            Direction::Left => col.checked_sub(1).map(|c| Coordinate::new(row, c)),
        }
    }

    /// The direction to travel from this coordinate to reach `other` in one step, if the two
    /// are 4-neighbours.
    pub fn direction_to(self, other: Coordinate) -> Option<Direction> {
        if self.row == other.row {
            if other.col.checked_sub(self.col) == Some(1) {
                Some(Direction::Right)
            } else if self.col.checked_sub(other.col) == Some(1) {
                Some(Direction::Left)
            } else {
                None
            }
        } else if self.col == other.col {
            if other.row.checked_sub(self.row) == Some(1) {
                Some(Direction::Down)
            } else if self.row.checked_sub(other.row) == Some(1) {
                Some(Direction::Up)
            } else {
                None
            }
        } else {
            None
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Every direction in the fixed order both the generator and the solver try neighbours in.
    /// Seeded mazes are only reproducible while this order stays the same.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        };
        f.write_str(name)
    }
}

/// One square of the maze: a wall on each side plus the transient `visited` flag used by
/// whichever traversal is currently running.
///
/// Walls are only ever removed through the owning `Grid`, which keeps both sides of a shared
/// wall in step.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    has_top_wall: bool,
    has_right_wall: bool,
    has_bottom_wall: bool,
    has_left_wall: bool,
    visited: bool,
}

impl Default for Cell {
    fn default() -> Cell {
        Cell {
            has_top_wall: true,
            has_right_wall: true,
            has_bottom_wall: true,
            has_left_wall: true,
            visited: false,
        }
    }
}

impl Cell {
    pub fn new() -> Cell {
        Cell::default()
    }

    #[inline]
    pub fn has_wall(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.has_top_wall,
            Direction::Right => self.has_right_wall,
            Direction::Down => self.has_bottom_wall,
            Direction::Left => self.has_left_wall,
        }
    }

    #[inline]
    pub fn has_top_wall(&self) -> bool {
        self.has_top_wall
    }

    #[inline]
    pub fn has_right_wall(&self) -> bool {
        self.has_right_wall
    }

    #[inline]
    pub fn has_bottom_wall(&self) -> bool {
        self.has_bottom_wall
    }

    #[inline]
    pub fn has_left_wall(&self) -> bool {
        self.has_left_wall
    }

    pub fn walls_count(&self) -> usize {
        Direction::ALL.iter().filter(|&&dir| self.has_wall(dir)).count()
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub(crate) fn remove_wall(&mut self, dir: Direction) {
        match dir {
            Direction::Up => self.has_top_wall = false,
            Direction::Right => self.has_right_wall = false,
            Direction::Down => self.has_bottom_wall = false,
            Direction::Left => self.has_left_wall = false,
        }
    }

    #[inline]
    pub(crate) fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }
}
