//! **routeviz-grid**: geometry and the editable tile map for routeviz.
//!
//! This crate provides the two types the rest of the workspace builds on:
//! [`Point`], an integer grid coordinate, and [`TileMap`], a rectangular map
//! of [`Tile`]s with exactly one start and one target tile plus the editing
//! operations the visualizer exposes (wall/highlight toggles, start/target
//! moves).

pub mod geom;
pub mod tilemap;

pub use geom::Point;
pub use tilemap::{Tile, TileMap};
