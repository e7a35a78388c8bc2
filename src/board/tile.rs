//! Tile variants and their activation/emission rules.
//!
//! `Tile` is a closed sum type; every per-variant behavior is one exhaustive
//! `match`. Variant-specific accessors live on the payload structs, so asking
//! a splitter for its heading does not type-check.

use std::fmt;

use super::collision::{Channel, CollisionRule};
use super::direction::DirectionVector;
use super::error::{BoardError, Result};

/// Discriminant of a [`Tile`], used for display and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TileKind {
    Empty = 0,
    Splitter = 1,
    Redirector = 2,
    Wall = 3,
    Jumper = 4,
}

impl TileKind {
    pub const ALL: [TileKind; 5] = [
        TileKind::Empty,
        TileKind::Splitter,
        TileKind::Redirector,
        TileKind::Wall,
        TileKind::Jumper,
    ];
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TileKind::Empty => "empty",
            TileKind::Splitter => "splitter",
            TileKind::Redirector => "redirector",
            TileKind::Wall => "wall",
            TileKind::Jumper => "jumper",
        };
        f.write_str(name)
    }
}

/// A plain cell that carries a signal onward in the heading it arrived with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmptyTile {
    channel: Channel,
}

impl EmptyTile {
    pub const fn new(direction: DirectionVector, active: bool) -> Self {
        Self {
            channel: Channel::new(direction, active),
        }
    }

    /// Heading of the most recently accepted arrival.
    #[inline]
    pub const fn direction(&self) -> DirectionVector {
        self.channel.direction()
    }

    #[inline]
    pub const fn is_active(&self) -> bool {
        self.channel.is_active()
    }
}

/// Fans an incoming signal out to all four neighbors. Never collides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Splitter {
    active: bool,
}

impl Splitter {
    pub const fn new(active: bool) -> Self {
        Self { active }
    }

    #[inline]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

/// Re-emits any signal it receives along a heading fixed at placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Redirector {
    channel: Channel,
}

impl Redirector {
    pub const fn new(direction: DirectionVector, active: bool) -> Self {
        Self {
            channel: Channel::new(direction, active),
        }
    }

    #[inline]
    pub const fn direction(&self) -> DirectionVector {
        self.channel.direction()
    }

    #[inline]
    pub const fn is_active(&self) -> bool {
        self.channel.is_active()
    }
}

/// Lets one horizontal and one vertical signal cross the same cell.
///
/// The horizontal channel only ever holds headings with a zero `y`
/// component and the vertical channel headings with a zero `x` component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Jumper {
    horizontal: Channel,
    vertical: Channel,
}

impl Jumper {
    /// A jumper with both headings `ZERO`.
    pub const fn new(x_active: bool, y_active: bool) -> Self {
        Self {
            horizontal: Channel::new(DirectionVector::ZERO, x_active),
            vertical: Channel::new(DirectionVector::ZERO, y_active),
        }
    }

    /// A jumper with explicit per-axis headings.
    ///
    /// `x_direction` must have a zero vertical component and `y_direction` a
    /// zero horizontal component; `ZERO` is accepted for either.
    pub fn with_directions(
        x_direction: DirectionVector,
        x_active: bool,
        y_direction: DirectionVector,
        y_active: bool,
    ) -> Result<Self> {
        if x_direction.y() != 0 {
            return Err(BoardError::invalid_direction(
                x_direction.x(),
                x_direction.y(),
                "jumper horizontal heading must have a zero vertical component",
            ));
        }
        if y_direction.x() != 0 {
            return Err(BoardError::invalid_direction(
                y_direction.x(),
                y_direction.y(),
                "jumper vertical heading must have a zero horizontal component",
            ));
        }
        Ok(Self {
            horizontal: Channel::new(x_direction, x_active),
            vertical: Channel::new(y_direction, y_active),
        })
    }

    /// `(horizontal, vertical)` headings.
    #[inline]
    pub const fn directions(&self) -> (DirectionVector, DirectionVector) {
        (self.horizontal.direction(), self.vertical.direction())
    }

    /// `(horizontal, vertical)` active flags.
    #[inline]
    pub const fn signals(&self) -> (bool, bool) {
        (self.horizontal.is_active(), self.vertical.is_active())
    }

    #[inline]
    pub const fn is_active(&self) -> bool {
        self.horizontal.is_active() || self.vertical.is_active()
    }

    fn arrive(&mut self, direction: DirectionVector, rule: CollisionRule) -> Result<()> {
        if direction.is_horizontal() {
            self.horizontal.arrive(direction, rule);
            Ok(())
        } else if direction.is_vertical() {
            self.vertical.arrive(direction, rule);
            Ok(())
        } else {
            Err(BoardError::invalid_direction(
                direction.x(),
                direction.y(),
                "jumper arrivals must be purely horizontal or purely vertical",
            ))
        }
    }
}

/// One board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Empty(EmptyTile),
    Splitter(Splitter),
    Redirector(Redirector),
    Wall,
    Jumper(Jumper),
}

impl Default for Tile {
    fn default() -> Self {
        Tile::blank()
    }
}

impl Tile {
    /// The fill value of a fresh board: an inactive empty tile facing `ZERO`.
    pub const fn blank() -> Self {
        Tile::Empty(EmptyTile::new(DirectionVector::ZERO, false))
    }

    pub const fn empty(direction: DirectionVector, active: bool) -> Self {
        Tile::Empty(EmptyTile::new(direction, active))
    }

    pub const fn splitter(active: bool) -> Self {
        Tile::Splitter(Splitter::new(active))
    }

    pub const fn redirector(direction: DirectionVector, active: bool) -> Self {
        Tile::Redirector(Redirector::new(direction, active))
    }

    pub const fn wall() -> Self {
        Tile::Wall
    }

    pub const fn jumper(x_active: bool, y_active: bool) -> Self {
        Tile::Jumper(Jumper::new(x_active, y_active))
    }

    pub fn jumper_with_directions(
        x_direction: DirectionVector,
        x_active: bool,
        y_direction: DirectionVector,
        y_active: bool,
    ) -> Result<Self> {
        Jumper::with_directions(x_direction, x_active, y_direction, y_active).map(Tile::Jumper)
    }

    #[inline]
    pub const fn kind(&self) -> TileKind {
        match self {
            Tile::Empty(_) => TileKind::Empty,
            Tile::Splitter(_) => TileKind::Splitter,
            Tile::Redirector(_) => TileKind::Redirector,
            Tile::Wall => TileKind::Wall,
            Tile::Jumper(_) => TileKind::Jumper,
        }
    }

    pub const fn as_empty(&self) -> Option<&EmptyTile> {
        match self {
            Tile::Empty(tile) => Some(tile),
            _ => None,
        }
    }

    pub const fn as_redirector(&self) -> Option<&Redirector> {
        match self {
            Tile::Redirector(tile) => Some(tile),
            _ => None,
        }
    }

    pub const fn as_jumper(&self) -> Option<&Jumper> {
        match self {
            Tile::Jumper(tile) => Some(tile),
            _ => None,
        }
    }

    /// Whether the tile (or, for a jumper, either axis) carries a signal.
    #[inline]
    pub const fn has_signal(&self) -> bool {
        match self {
            Tile::Empty(tile) => tile.is_active(),
            Tile::Splitter(tile) => tile.is_active(),
            Tile::Redirector(tile) => tile.is_active(),
            Tile::Wall => false,
            Tile::Jumper(tile) => tile.is_active(),
        }
    }

    /// Activate under the default collision rule.
    pub fn try_activate(&mut self, direction: DirectionVector) -> Result<()> {
        self.try_activate_with(direction, CollisionRule::default())
    }

    /// Apply one arrival heading `direction` for the current tick.
    ///
    /// Only a jumper can fail, on a diagonal or zero heading; the tile is
    /// left untouched in that case.
    pub fn try_activate_with(
        &mut self,
        direction: DirectionVector,
        rule: CollisionRule,
    ) -> Result<()> {
        match self {
            Tile::Empty(tile) => {
                tile.channel.arrive(direction, rule);
            }
            Tile::Splitter(tile) => tile.active = true,
            Tile::Redirector(tile) => {
                tile.channel.arrive_fixed(rule);
            }
            Tile::Wall => {}
            Tile::Jumper(tile) => tile.arrive(direction, rule)?,
        }
        Ok(())
    }

    /// Clear active flags and arrival counts, keeping placement data.
    pub fn reset_state(&mut self) {
        match self {
            Tile::Empty(tile) => tile.channel.reset(),
            Tile::Splitter(tile) => tile.active = false,
            Tile::Redirector(tile) => tile.channel.reset(),
            Tile::Wall => {}
            Tile::Jumper(tile) => {
                tile.horizontal.reset();
                tile.vertical.reset();
            }
        }
    }

    /// Headings this tile sends out on the next tick.
    ///
    /// Each heading targets the cell one step along it; the caller drops
    /// targets that fall off the board. An empty tile or redirector facing
    /// `ZERO` targets itself and so holds its signal in place. A jumper axis
    /// still at `ZERO` emits nothing, since no jumper accepts a zero arrival.
    pub fn emissions(&self) -> Emissions {
        let mut out = Emissions::new();
        match self {
            Tile::Empty(tile) => {
                if tile.is_active() {
                    out.push(tile.direction());
                }
            }
            Tile::Splitter(tile) => {
                if tile.is_active() {
                    for direction in DirectionVector::CARDINALS {
                        out.push(direction);
                    }
                }
            }
            Tile::Redirector(tile) => {
                if tile.is_active() {
                    out.push(tile.direction());
                }
            }
            Tile::Wall => {}
            Tile::Jumper(tile) => {
                for channel in [tile.horizontal, tile.vertical] {
                    if channel.is_active() && !channel.direction().is_zero() {
                        out.push(channel.direction());
                    }
                }
            }
        }
        out
    }
}

/// Up to four outgoing headings from a single tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Emissions {
    directions: [DirectionVector; 4],
    len: u8,
}

impl Emissions {
    const fn new() -> Self {
        Self {
            directions: [DirectionVector::ZERO; 4],
            len: 0,
        }
    }

    fn push(&mut self, direction: DirectionVector) {
        self.directions[self.len as usize] = direction;
        self.len += 1;
    }

    #[inline]
    pub fn as_slice(&self) -> &[DirectionVector] {
        &self.directions[..self.len as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<'a> IntoIterator for &'a Emissions {
    type Item = &'a DirectionVector;
    type IntoIter = std::slice::Iter<'a, DirectionVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}
