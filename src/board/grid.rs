//! Double-buffered row-major tile storage.
//!
//! Two equally sized buffers plus a phase bit. The current buffer is only
//! read during a tick; the next buffer is rebuilt from it, written, and then
//! becomes current by flipping the phase.

use super::tile::Tile;

#[derive(Clone, Debug)]
pub struct TileBuffers {
    buffers: [Vec<Tile>; 2],
    phase: u8,
    width: usize,
}

impl TileBuffers {
    /// Both buffers filled with `fill`.
    pub fn filled(width: usize, height: usize, fill: Tile) -> Self {
        let len = width * height;
        Self {
            buffers: [vec![fill; len], vec![fill; len]],
            phase: 0,
            width,
        }
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffers[0].len()
    }

    #[inline]
    pub fn current(&self) -> &[Tile] {
        &self.buffers[self.phase as usize]
    }

    #[inline]
    pub fn current_mut(&mut self) -> &mut [Tile] {
        &mut self.buffers[self.phase as usize]
    }

    /// Current buffer for reading and next buffer for writing.
    #[inline]
    pub fn current_and_next_mut(&mut self) -> (&[Tile], &mut [Tile]) {
        let (a, b) = self.buffers.split_at_mut(1);
        if self.phase == 0 {
            (a[0].as_slice(), b[0].as_mut_slice())
        } else {
            (b[0].as_slice(), a[0].as_mut_slice())
        }
    }

    /// Overwrite the next buffer with a copy of the current one and clear
    /// every tile's per-tick state in it.
    pub fn prepare_next(&mut self) {
        let (current, next) = self.current_and_next_mut();
        next.copy_from_slice(current);
        for tile in next.iter_mut() {
            tile.reset_state();
        }
    }

    #[inline]
    pub fn swap(&mut self) {
        self.phase ^= 1;
    }
}
