//! Random wall scattering for the editor.

use rand::{Rng, RngExt};
use routeviz_grid::{Point, TileMap};

/// Chance for each tile to become a wall in [`scatter_walls`].
const WALL_CHANCE: f64 = 0.3;

/// Scatter walls across the map: every empty or highlighted tile has a fixed
/// chance of turning into a wall. Start and target are never overwritten.
pub fn scatter_walls(map: &mut TileMap, rng: &mut impl Rng) {
    for y in 0..map.height() {
        for x in 0..map.width() {
            let r: f64 = rng.random();
            if r < WALL_CHANCE {
                map.set_wall(Point::new(x, y));
            }
        }
    }
}
