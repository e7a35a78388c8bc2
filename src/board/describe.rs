//! Read-only per-cell summaries for presentation layers.

use super::direction::DirectionVector;
use super::tile::{Tile, TileKind};

/// Heading information carried by a cell, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    /// Splitters and walls have no heading.
    None,
    Single(DirectionVector),
    Crossed {
        horizontal: DirectionVector,
        vertical: DirectionVector,
        horizontal_active: bool,
        vertical_active: bool,
    },
}

/// Variant, signal state and heading of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellDescription {
    pub kind: TileKind,
    pub active: bool,
    pub heading: Heading,
}

impl CellDescription {
    pub fn of(tile: &Tile) -> Self {
        let heading = match tile {
            Tile::Empty(tile) => Heading::Single(tile.direction()),
            Tile::Redirector(tile) => Heading::Single(tile.direction()),
            Tile::Splitter(_) | Tile::Wall => Heading::None,
            Tile::Jumper(tile) => {
                let (horizontal, vertical) = tile.directions();
                let (horizontal_active, vertical_active) = tile.signals();
                Heading::Crossed {
                    horizontal,
                    vertical,
                    horizontal_active,
                    vertical_active,
                }
            }
        };
        Self {
            kind: tile.kind(),
            active: tile.has_signal(),
            heading,
        }
    }

    /// Single-character tag for text displays.
    ///
    /// Redirectors show a filled arrow while active and a small arrow while
    /// idle; a redirector facing `ZERO` shows `?`.
    pub fn glyph(&self) -> char {
        match (self.kind, self.active) {
            (TileKind::Empty, true) => '\u{2593}',
            (TileKind::Empty, false) => '\u{2591}',
            (TileKind::Splitter, true) => 'S',
            (TileKind::Splitter, false) => 's',
            (TileKind::Redirector, active) => match self.heading {
                Heading::Single(direction) => redirector_glyph(direction, active),
                _ => '?',
            },
            (TileKind::Wall, _) => 'W',
            (TileKind::Jumper, _) => '#',
        }
    }
}

fn redirector_glyph(direction: DirectionVector, active: bool) -> char {
    match (direction, active) {
        (DirectionVector::LEFT, true) => '\u{25C0}',
        (DirectionVector::RIGHT, true) => '\u{25B6}',
        (DirectionVector::UP, true) => '\u{25B2}',
        (DirectionVector::DOWN, true) => '\u{25BC}',
        (DirectionVector::LEFT, false) => '\u{25C2}',
        (DirectionVector::RIGHT, false) => '\u{25B8}',
        (DirectionVector::UP, false) => '\u{25B4}',
        (DirectionVector::DOWN, false) => '\u{25BE}',
        _ => '?',
    }
}
