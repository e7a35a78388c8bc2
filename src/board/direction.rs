//! Integer unit directions used as signal headings.
//!
//! Board coordinates grow rightwards in `x` and downwards in `y`, so `UP` is
//! `(0, -1)`. A right turn maps `(x, y)` to `(y, -x)`, so `UP` turns to
//! `LEFT` and four right turns walk `UP`, `LEFT`, `DOWN`, `RIGHT`.

use std::fmt;

use super::error::{BoardError, Result};

/// A heading with both components in `{-1, 0, 1}`.
///
/// Equality is component-wise; two vectors built independently with the same
/// components are interchangeable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DirectionVector {
    x: i8,
    y: i8,
}

impl DirectionVector {
    pub const UP: Self = Self { x: 0, y: -1 };
    pub const DOWN: Self = Self { x: 0, y: 1 };
    pub const LEFT: Self = Self { x: -1, y: 0 };
    pub const RIGHT: Self = Self { x: 1, y: 0 };
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// The four cardinal headings in splitter fan-out order.
    pub const CARDINALS: [Self; 4] = [Self::UP, Self::DOWN, Self::LEFT, Self::RIGHT];

    /// Build a vector from raw components.
    ///
    /// Fails with [`BoardError::InvalidDirection`] when either component lies
    /// outside `{-1, 0, 1}`. Diagonals are representable; callers that need a
    /// cardinal heading check [`is_cardinal`](Self::is_cardinal).
    pub fn new(x: i32, y: i32) -> Result<Self> {
        if !(-1..=1).contains(&x) || !(-1..=1).contains(&y) {
            return Err(BoardError::invalid_direction(
                x,
                y,
                "components must each be -1, 0 or 1",
            ));
        }
        Ok(Self {
            x: x as i8,
            y: y as i8,
        })
    }

    pub fn up() -> Self {
        Self::UP
    }

    pub fn down() -> Self {
        Self::DOWN
    }

    pub fn left() -> Self {
        Self::LEFT
    }

    pub fn right() -> Self {
        Self::RIGHT
    }

    pub fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    pub const fn x(self) -> i32 {
        self.x as i32
    }

    #[inline]
    pub const fn y(self) -> i32 {
        self.y as i32
    }

    #[inline]
    pub const fn components(self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Non-zero horizontal component and zero vertical component.
    #[inline]
    pub const fn is_horizontal(self) -> bool {
        self.x != 0 && self.y == 0
    }

    /// Non-zero vertical component and zero horizontal component.
    #[inline]
    pub const fn is_vertical(self) -> bool {
        self.x == 0 && self.y != 0
    }

    #[inline]
    pub const fn is_cardinal(self) -> bool {
        self.is_horizontal() || self.is_vertical()
    }

    /// Quarter turn right in place: `(x, y)` becomes `(y, -x)`.
    pub fn rotate_right(&mut self) {
        let x = self.x;
        self.x = self.y;
        self.y = -x;
    }

    /// Quarter turn left in place: `(x, y)` becomes `(-y, x)`.
    pub fn rotate_left(&mut self) {
        let x = self.x;
        self.x = -self.y;
        self.y = x;
    }

    /// Apply `turns` right rotations; negative counts rotate left.
    ///
    /// Only `turns mod 4` quarter turns are performed.
    pub fn rotate_right_by(&mut self, turns: i32) {
        for _ in 0..turns.rem_euclid(4) {
            self.rotate_right();
        }
    }

    /// Apply `turns` left rotations; negative counts rotate right.
    pub fn rotate_left_by(&mut self, turns: i32) {
        for _ in 0..turns.rem_euclid(4) {
            self.rotate_left();
        }
    }

    #[must_use]
    pub fn rotated_right(mut self) -> Self {
        self.rotate_right();
        self
    }

    #[must_use]
    pub fn rotated_left(mut self) -> Self {
        self.rotate_left();
        self
    }

    /// The opposite heading.
    #[inline]
    #[must_use]
    pub const fn reverse(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }

    /// The position one step from `(x, y)` along this heading.
    #[inline]
    pub const fn step_from(self, x: i64, y: i64) -> (i64, i64) {
        (x + self.x as i64, y + self.y as i64)
    }
}

impl fmt::Display for DirectionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::UP => f.write_str("up"),
            Self::DOWN => f.write_str("down"),
            Self::LEFT => f.write_str("left"),
            Self::RIGHT => f.write_str("right"),
            Self::ZERO => f.write_str("zero"),
            Self { x, y } => write!(f, "({x}, {y})"),
        }
    }
}
