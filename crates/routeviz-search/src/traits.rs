//! The read-only grid view a search runs against.

use routeviz_grid::{Point, TileMap};

/// Read-only view of a grid: dimensions, walls, and the two endpoints.
///
/// The engine never mutates the grid it searches; a `SearchGrid` is a
/// snapshot for the duration of one session.
pub trait SearchGrid {
    /// Width of the grid.
    fn width(&self) -> i32;

    /// Height of the grid.
    fn height(&self) -> i32;

    /// Whether `p` lies inside the grid rectangle.
    fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width() && p.y < self.height()
    }

    /// Whether the cell at `p` blocks movement.
    fn is_wall(&self, p: Point) -> bool;

    /// The cell the search grows from. Must be in bounds and not a wall.
    fn start(&self) -> Point;

    /// The cell the search looks for. Must be in bounds and not a wall.
    fn target(&self) -> Point;
}

impl SearchGrid for TileMap {
    fn width(&self) -> i32 {
        TileMap::width(self)
    }

    fn height(&self) -> i32 {
        TileMap::height(self)
    }

    fn in_bounds(&self, p: Point) -> bool {
        TileMap::in_bounds(self, p)
    }

    fn is_wall(&self, p: Point) -> bool {
        TileMap::is_wall(self, p)
    }

    fn start(&self) -> Point {
        TileMap::start(self)
    }

    fn target(&self) -> Point {
        TileMap::target(self)
    }
}
