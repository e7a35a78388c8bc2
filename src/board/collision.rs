//! Per-tick arrival counting and collision resolution.
//!
//! Every channel that can collide (an empty tile, a redirector, each jumper
//! axis) counts the activations it receives during one tick. Whether the
//! channel ends the tick active depends only on that count, never on the
//! order the arrivals were applied in.

use std::fmt;
use std::str::FromStr;

use super::direction::DirectionVector;

/// How a channel resolves several same-tick arrivals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CollisionRule {
    /// Active iff exactly one arrival reached the channel. Any collision,
    /// including a three-way one, cancels.
    #[default]
    Exclusive,
    /// Active iff an odd number of arrivals reached the channel.
    Parity,
}

impl CollisionRule {
    #[inline]
    pub const fn resolve(self, arrivals: u32) -> bool {
        match self {
            CollisionRule::Exclusive => arrivals == 1,
            CollisionRule::Parity => arrivals & 1 == 1,
        }
    }
}

impl fmt::Display for CollisionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionRule::Exclusive => f.write_str("exclusive"),
            CollisionRule::Parity => f.write_str("parity"),
        }
    }
}

impl FromStr for CollisionRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exclusive" => Ok(CollisionRule::Exclusive),
            "parity" | "xor" => Ok(CollisionRule::Parity),
            other => Err(format!(
                "unknown collision rule: {other} (expected exclusive or parity)"
            )),
        }
    }
}

/// One collidable signal slot: heading, active flag and this tick's arrivals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Channel {
    direction: DirectionVector,
    active: bool,
    arrivals: u32,
}

impl Channel {
    pub const fn new(direction: DirectionVector, active: bool) -> Self {
        Self {
            direction,
            active,
            arrivals: 0,
        }
    }

    #[inline]
    pub const fn direction(&self) -> DirectionVector {
        self.direction
    }

    #[inline]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub const fn arrivals(&self) -> u32 {
        self.arrivals
    }

    /// Record one arrival and re-resolve the active flag.
    ///
    /// The heading is overwritten only when this arrival turns the channel
    /// from inactive to active. Returns the new active state.
    pub fn arrive(&mut self, direction: DirectionVector, rule: CollisionRule) -> bool {
        self.arrivals = self.arrivals.saturating_add(1);
        let was_active = self.active;
        self.active = rule.resolve(self.arrivals);
        if self.active && !was_active {
            self.direction = direction;
        }
        self.active
    }

    /// Record one arrival without touching the heading.
    pub fn arrive_fixed(&mut self, rule: CollisionRule) -> bool {
        self.arrivals = self.arrivals.saturating_add(1);
        self.active = rule.resolve(self.arrivals);
        self.active
    }

    /// Clear the active flag and arrival count, keeping the heading.
    #[inline]
    pub fn reset(&mut self) {
        self.active = false;
        self.arrivals = 0;
    }
}
