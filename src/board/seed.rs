//! Seeded random boards for drivers, benches and parity tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::direction::DirectionVector;
use super::engine::{Board, BoardConfig};
use super::error::Result;
use super::tile::Tile;

/// Relative weights of the placed tile kinds, out of 100.
const SPLITTER_PCT: u32 = 4;
const REDIRECTOR_PCT: u32 = 8;
const WALL_PCT: u32 = 10;
const JUMPER_PCT: u32 = 6;

fn random_cardinal(rng: &mut StdRng) -> DirectionVector {
    DirectionVector::CARDINALS[rng.gen_range(0..4)]
}

/// Draw one tile. `density` is the chance that a signal-capable tile starts
/// active; it is clamped to `[0, 1]` and NaN counts as zero.
pub fn random_tile(rng: &mut StdRng, density: f64) -> Tile {
    let density = if density.is_nan() {
        0.0
    } else {
        density.clamp(0.0, 1.0)
    };
    let mut roll = rng.gen_range(0..100u32);
    if roll < SPLITTER_PCT {
        return Tile::splitter(rng.gen_bool(density));
    }
    roll -= SPLITTER_PCT;
    if roll < REDIRECTOR_PCT {
        let active = rng.gen_bool(density);
        return Tile::redirector(random_cardinal(rng), active);
    }
    roll -= REDIRECTOR_PCT;
    if roll < WALL_PCT {
        return Tile::wall();
    }
    roll -= WALL_PCT;
    if roll < JUMPER_PCT {
        let x_dir = if rng.gen_bool(0.5) {
            DirectionVector::LEFT
        } else {
            DirectionVector::RIGHT
        };
        let y_dir = if rng.gen_bool(0.5) {
            DirectionVector::UP
        } else {
            DirectionVector::DOWN
        };
        let x_active = rng.gen_bool(density);
        let y_active = rng.gen_bool(density);
        // Both headings sit on their own axis, so this cannot fail.
        return Tile::jumper_with_directions(x_dir, x_active, y_dir, y_active)
            .unwrap_or_default();
    }
    let active = rng.gen_bool(density);
    Tile::empty(random_cardinal(rng), active)
}

/// A `width` x `height` board filled from a fixed seed.
pub fn random_board(
    width: usize,
    height: usize,
    density: f64,
    seed: u64,
    config: BoardConfig,
) -> Result<Board> {
    let mut board = Board::with_config(width, height, config)?;
    let mut rng = StdRng::seed_from_u64(seed);
    for y in 0..height as i64 {
        for x in 0..width as i64 {
            board.replace_cell(x, y, random_tile(&mut rng, density))?;
        }
    }
    Ok(board)
}
