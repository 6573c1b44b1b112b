use std::fmt;

use fnv::FnvHashSet;

use crate::cells::{Coordinate, Direction};
use crate::grid::Grid;
use crate::utils;

const CORNER: &str = "+";
const WALL_H: &str = "---";
const OPEN_H: &str = "   ";
const WALL_V: &str = "|";
const OPEN_V: &str = " ";
const BLANK_BODY: &str = "   ";

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: Coordinate) -> String {
        String::from(BLANK_BODY)
    }
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Coordinate>,
}
impl PathDisplay {
    pub fn new(path: &[Coordinate]) -> Self {
        PathDisplay { on_path_coordinates: utils::coordinate_set(path.iter().cloned()) }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: Coordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from(BLANK_BODY)
        }
    }
}

/// Marks every cell the last traversal of a grid touched.
#[derive(Debug)]
pub struct VisitedDisplay {
    visited_coordinates: FnvHashSet<Coordinate>,
}
impl VisitedDisplay {
    pub fn new(grid: &Grid) -> Self {
        let visited = grid.iter().filter(|coord| grid.is_visited(*coord).unwrap_or(false));
        VisitedDisplay { visited_coordinates: utils::coordinate_set(visited) }
    }
}
impl GridDisplay for VisitedDisplay {
    fn render_cell_body(&self, coord: Coordinate) -> String {
        if self.visited_coordinates.contains(&coord) {
            String::from(" x ")
        } else {
            String::from(BLANK_BODY)
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start: Coordinate,
    end: Coordinate,
}
impl StartEndPointsDisplay {
    pub fn new(start: Coordinate, end: Coordinate) -> StartEndPointsDisplay {
        StartEndPointsDisplay { start, end }
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: Coordinate) -> String {
        if coord == self.start {
            String::from(" S ")
        } else if coord == self.end {
            String::from(" E ")
        } else {
            String::from(BLANK_BODY)
        }
    }
}

/// Stacks displays; the first one with something other than a blank body for a cell wins.
pub struct LayeredDisplay<'a> {
    layers: Vec<&'a dyn GridDisplay>,
}
impl<'a> LayeredDisplay<'a> {
    pub fn new(layers: Vec<&'a dyn GridDisplay>) -> LayeredDisplay<'a> {
        LayeredDisplay { layers }
    }
}
impl<'a> GridDisplay for LayeredDisplay<'a> {
    fn render_cell_body(&self, coord: Coordinate) -> String {
        self.layers
            .iter()
            .map(|layer| layer.render_cell_body(coord))
            .find(|body| body != BLANK_BODY)
            .unwrap_or_else(|| String::from(BLANK_BODY))
    }
}

/// A grid paired with the display used for the cell bodies, ready to be formatted.
pub struct GridView<'a> {
    grid: &'a Grid,
    display: Option<&'a dyn GridDisplay>,
}

impl Grid {
    pub fn display_with<'a>(&'a self, display: &'a dyn GridDisplay) -> GridView<'a> {
        GridView {
            grid: self,
            display: Some(display),
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let view = GridView {
            grid: self,
            display: None,
        };
        fmt::Display::fmt(&view, f)
    }
}

impl<'a> fmt::Display for GridView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let grid = self.grid;
        // Walls are kept on both sides, so a cell's own flags are enough for every edge; the
        // outer boundary shows the entrance and exit openings.
        let wall_text = |coord: Coordinate, dir: Direction, wall: &'static str, open: &'static str| {
            if grid.has_wall(coord, dir).unwrap_or(true) {
                wall
            } else {
                open
            }
        };

        let mut output = String::new();
        let mut rows = grid.iter_row().peekable();

        // Start by special case rendering the text for the north most boundary
        if let Some(first_row) = rows.peek() {
            output.push_str(CORNER);
            for coord in first_row {
                output.push_str(wall_text(*coord, Direction::Up, WALL_H, OPEN_H));
                output.push_str(CORNER);
            }
            output.push('\n');
        }

        for row in rows {
            // Each cell uses the southern wall of the cell above as its own northern wall, so
            // only the west boundary of the row, then each body, east side and south side remain.
            let mut row_middle_section_render = String::new();
            let mut row_bottom_section_render = String::from(CORNER);

            if let Some(first) = row.first() {
                row_middle_section_render.push_str(wall_text(*first, Direction::Left, WALL_V, OPEN_V));
            }
            for coord in &row {
                match self.display {
                    Some(displayer) => row_middle_section_render.push_str(&displayer.render_cell_body(*coord)),
                    None => row_middle_section_render.push_str(BLANK_BODY),
                }
                row_middle_section_render.push_str(wall_text(*coord, Direction::Right, WALL_V, OPEN_V));

                row_bottom_section_render.push_str(wall_text(*coord, Direction::Down, WALL_H, OPEN_H));
                row_bottom_section_render.push_str(CORNER);
            }

            output.push_str(&row_middle_section_render);
            output.push('\n');
            output.push_str(&row_bottom_section_render);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}
