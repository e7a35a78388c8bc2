//! Tile board engine internals and public API.

mod collision;
mod describe;
mod direction;
mod engine;
mod error;
mod grid;
mod seed;
mod tile;

pub use collision::{Channel, CollisionRule};
pub use describe::{CellDescription, Heading};
pub use direction::DirectionVector;
pub use engine::{
    Board, BoardConfig, COLLISION_ENV, PARALLEL_MIN_CELLS_ENV, THREADS_ENV, TickStats,
};
pub use error::{BoardError, Result};
pub use seed::{random_board, random_tile};
pub use tile::{Emissions, EmptyTile, Jumper, Redirector, Splitter, Tile, TileKind};
