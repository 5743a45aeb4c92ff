//! **routeviz-search**: incremental uniform-cost search on a tile grid.
//!
//! The engine is built for frame-by-frame animation: a [`SearchSession`] is
//! set up against a read-only grid view ([`SearchGrid`]) and then advanced
//! one small unit of work at a time with [`SearchSession::step`], each call
//! exposing what changed (the finalized cell and any newly discovered
//! frontier cells) so a caller can render the progress. Once the search has
//! finished with a route, [`SearchSession::backtrack`] walks the shortest
//! path backward one cell per call.
//!
//! Moves use the fixed 8-direction table of [`Direction`]: cardinal steps
//! cost 10, diagonal steps cost 14, so this is a proper Dijkstra search
//! rather than a breadth-first one, with exact integer distances throughout.

mod direction;
mod session;
mod traits;

pub use direction::Direction;
pub use session::{CellStatus, SearchSession, UNREACHABLE};
pub use traits::SearchGrid;
