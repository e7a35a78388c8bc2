//! Discrete signal propagation over a fixed grid of typed tiles.

pub mod board;
pub use board::{Board, BoardConfig, BoardError, CollisionRule, DirectionVector, Tile};
