//! The editable tile map: [`Tile`] and [`TileMap`].
//!
//! A `TileMap` is a dense, row-major rectangle of tiles holding exactly one
//! start and one target at all times. Every other tile is empty, a wall, or a
//! highlight. Editing operations keep that invariant: walls and highlights
//! toggle in place, start and target *move* (the vacated tile reverts to
//! empty).

use crate::geom::Point;

/// One cell of the map.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    #[default]
    Empty,
    Wall,
    /// A user-marked tile; walkable, drawn differently.
    Highlight,
    Start,
    Target,
}

impl Tile {
    /// Whether a search may pass through this tile.
    #[inline]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Tile::Wall)
    }
}

/// A rectangular map of [`Tile`]s with one start and one target.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileMap {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    start: Point,
    target: Point,
}

impl TileMap {
    /// Create a new map with the given walls, start and target.
    ///
    /// Walls that coincide with the start or target tile are dropped, so
    /// start and target always end up on the map.
    ///
    /// # Panics
    ///
    /// If the dimensions are not positive, if start or target is out of
    /// bounds, or if they coincide.
    pub fn new(width: i32, height: i32, walls: &[Point], start: Point, target: Point) -> Self {
        assert!(width > 0 && height > 0, "map dimensions must be positive");
        let mut map = Self {
            width,
            height,
            tiles: vec![Tile::default(); (width * height) as usize],
            start,
            target,
        };
        assert!(
            map.in_bounds(start) && map.in_bounds(target),
            "start and target must be in bounds"
        );
        assert!(start != target, "start and target must differ");
        for &w in walls {
            if map.in_bounds(w) && w != start && w != target {
                let i = map.idx(w);
                map.tiles[i] = Tile::Wall;
            }
        }
        let si = map.idx(start);
        map.tiles[si] = Tile::Start;
        let ti = map.idx(target);
        map.tiles[ti] = Tile::Target;
        map
    }

    #[inline]
    fn idx(&self, p: Point) -> usize {
        debug_assert!(self.in_bounds(p));
        (p.y * self.width + p.x) as usize
    }

    /// Width of the map.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the map.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `p` lies inside the map rectangle.
    #[inline]
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// The tile at `p`, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<Tile> {
        if !self.in_bounds(p) {
            return None;
        }
        Some(self.tiles[self.idx(p)])
    }

    /// Whether the tile at `p` is a wall. Out-of-bounds points are not walls.
    #[inline]
    pub fn is_wall(&self, p: Point) -> bool {
        self.at(p) == Some(Tile::Wall)
    }

    /// The current start tile position.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// The current target tile position.
    #[inline]
    pub fn target(&self) -> Point {
        self.target
    }

    // -----------------------------------------------------------------------
    // Editing operations
    // -----------------------------------------------------------------------

    /// Turn an empty or highlighted tile into a wall. Other tiles (start,
    /// target, existing walls) are left alone. Returns whether the map
    /// changed.
    pub fn set_wall(&mut self, p: Point) -> bool {
        match self.at(p) {
            Some(Tile::Empty | Tile::Highlight) => {
                let i = self.idx(p);
                self.tiles[i] = Tile::Wall;
                true
            }
            _ => false,
        }
    }

    /// Turn a wall or highlighted tile back into an empty tile. Returns
    /// whether the map changed.
    pub fn set_empty(&mut self, p: Point) -> bool {
        match self.at(p) {
            Some(Tile::Wall | Tile::Highlight) => {
                let i = self.idx(p);
                self.tiles[i] = Tile::Empty;
                true
            }
            _ => false,
        }
    }

    /// Highlight an empty tile. Returns whether the map changed.
    pub fn set_highlight(&mut self, p: Point) -> bool {
        match self.at(p) {
            Some(Tile::Empty) => {
                let i = self.idx(p);
                self.tiles[i] = Tile::Highlight;
                true
            }
            _ => false,
        }
    }

    /// Move the start tile to `p`, which must currently be empty or
    /// highlighted; the vacated tile becomes empty. Returns whether the map
    /// changed.
    pub fn move_start(&mut self, p: Point) -> bool {
        match self.at(p) {
            Some(Tile::Empty | Tile::Highlight) => {
                let old = self.idx(self.start);
                self.tiles[old] = Tile::Empty;
                let i = self.idx(p);
                self.tiles[i] = Tile::Start;
                self.start = p;
                true
            }
            _ => false,
        }
    }

    /// Move the target tile to `p`, which must currently be empty or
    /// highlighted; the vacated tile becomes empty. Returns whether the map
    /// changed.
    pub fn move_target(&mut self, p: Point) -> bool {
        match self.at(p) {
            Some(Tile::Empty | Tile::Highlight) => {
                let old = self.idx(self.target);
                self.tiles[old] = Tile::Empty;
                let i = self.idx(p);
                self.tiles[i] = Tile::Target;
                self.target = p;
                true
            }
            _ => false,
        }
    }

    /// Revert every highlighted tile to empty.
    pub fn clear_highlights(&mut self) {
        for t in self.tiles.iter_mut() {
            if *t == Tile::Highlight {
                *t = Tile::Empty;
            }
        }
    }
}
