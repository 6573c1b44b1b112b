//! The render hook: how generation and solving report progress to anything that wants to draw
//! or animate them.
//!
//! The maze algorithms never depend on a drawing backend. They hand a [`RenderEvent`] to a
//! [`RenderHook`] after every step that changes what a picture of the maze would show. Events
//! carry copies of the state, so a hook can never change the maze it observes.

use crate::cells::{Cell, Coordinate, Direction};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum MoveKind {
    Forward,
    Undo,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum RenderEvent {
    /// A cell should be (re)drawn with its current walls. Sent for every cell when a maze is
    /// created, for each cell the generator carves into, and for the entrance and exit once
    /// their outer walls are broken.
    ///
    /// `cell` is a snapshot taken when the event is sent. The generator only redraws the cell it
    /// carves into, so the wall back to the cell it came from is shown open by that event alone;
    /// the parent's own last snapshot may still have it closed. Drawing events in order over the
    /// previous picture gives the finished maze, keeping only the latest snapshot per cell does
    /// not.
    CellDrawn { at: Coordinate, cell: Cell },
    /// The solver stepped onto a cell.
    CellVisited { at: Coordinate },
    /// The solver moved between two cell centres, or backed out of a dead end.
    Moved {
        from: Coordinate,
        to: Coordinate,
        kind: MoveKind,
    },
}

pub trait RenderHook {
    fn on_event(&mut self, event: RenderEvent);
}

/// Draws nothing.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct Headless;

impl RenderHook for Headless {
    #[inline(always)]
    fn on_event(&mut self, _: RenderEvent) {}
}

impl<'a, H: RenderHook + ?Sized> RenderHook for &'a mut H {
    fn on_event(&mut self, event: RenderEvent) {
        (**self).on_event(event)
    }
}

impl<H: RenderHook + ?Sized> RenderHook for Box<H> {
    fn on_event(&mut self, event: RenderEvent) {
        (**self).on_event(event)
    }
}

/// Keeps every event in order, one per animation frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingHook {
    events: Vec<RenderEvent>,
}

impl RecordingHook {
    pub fn new() -> RecordingHook {
        RecordingHook::default()
    }

    #[inline]
    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn moves(&self) -> impl Iterator<Item = (Coordinate, Coordinate, MoveKind)> + '_ {
        self.events.iter().filter_map(|event| match *event {
            RenderEvent::Moved { from, to, kind } => Some((from, to, kind)),
            _ => None,
        })
    }

    pub fn visits(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.events.iter().filter_map(|event| match *event {
            RenderEvent::CellVisited { at } => Some(at),
            _ => None,
        })
    }

    pub fn cells_drawn_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, RenderEvent::CellDrawn { .. }))
            .count()
    }
}

impl RenderHook for RecordingHook {
    fn on_event(&mut self, event: RenderEvent) {
        self.events.push(event);
    }
}

/// Where the maze sits on a drawing surface: the top left corner and the size of one cell.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Layout {
    pub origin_x: i32,
    pub origin_y: i32,
    pub cell_width: i32,
    pub cell_height: i32,
}

pub type Point = (i32, i32);

/// The screen rectangle of one cell, corners `(x1, y1)` top left and `(x2, y2)` bottom right.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellBounds {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl CellBounds {
    pub fn for_cell(layout: &Layout, coord: Coordinate) -> CellBounds {
        let x1 = layout.origin_x + coord.col as i32 * layout.cell_width;
        let y1 = layout.origin_y + coord.row as i32 * layout.cell_height;
        CellBounds {
            x1,
            y1,
            x2: x1 + layout.cell_width,
            y2: y1 + layout.cell_height,
        }
    }

    pub fn centre(&self) -> Point {
        ((self.x1 + self.x2).div_euclid(2), (self.y1 + self.y2).div_euclid(2))
    }

    /// The line segment a wall on the given side is drawn along.
    pub fn wall_segment(&self, dir: Direction) -> (Point, Point) {
        let CellBounds { x1, y1, x2, y2 } = *self;
        match dir {
            Direction::Up => ((x1, y1), (x2, y1)),
            Direction::Right => ((x2, y1), (x2, y2)),
            Direction::Down => ((x1, y2), (x2, y2)),
            Direction::Left => ((x1, y1), (x1, y2)),
        }
    }
}

/// Line joining the centres of two cells, as drawn for a solver move.
pub fn move_segment(layout: &Layout, from: Coordinate, to: Coordinate) -> (Point, Point) {
    (CellBounds::for_cell(layout, from).centre(), CellBounds::for_cell(layout, to).centre())
}
