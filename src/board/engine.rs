use rayon::prelude::*;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, trace};

use super::collision::CollisionRule;
use super::describe::CellDescription;
use super::direction::DirectionVector;
use super::error::{BoardError, Result};
use super::grid::TileBuffers;
use super::tile::Tile;

const DEFAULT_PARALLEL_MIN_CELLS: usize = 16_384;

pub const COLLISION_ENV: &str = "TILE_SIGNAL_COLLISION";
pub const THREADS_ENV: &str = "TILE_SIGNAL_THREADS";
pub const PARALLEL_MIN_CELLS_ENV: &str = "TILE_SIGNAL_PARALLEL_MIN_CELLS";

/// Configuration for a [`Board`].
///
/// Use `BoardConfig::default()` for the standard rules, or customise
/// individual knobs via the builder methods.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    /// How same-tick arrivals on one channel resolve.
    pub collision: CollisionRule,
    /// Size of a dedicated rayon pool for the parallel path.
    /// `None` means the global rayon pool.
    pub thread_count: Option<usize>,
    /// Boards with fewer cells always tick serially.
    pub parallel_min_cells: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            collision: CollisionRule::default(),
            thread_count: None,
            parallel_min_cells: DEFAULT_PARALLEL_MIN_CELLS,
        }
    }
}

impl BoardConfig {
    pub fn collision(mut self, rule: CollisionRule) -> Self {
        self.collision = rule;
        self
    }

    /// Run the parallel path on a dedicated pool of `n` threads.
    pub fn thread_count(mut self, n: usize) -> Self {
        self.thread_count = Some(n.max(1));
        self
    }

    /// Minimum cell count for the parallel path. `0` always uses it,
    /// `usize::MAX` never does.
    pub fn parallel_min_cells(mut self, cells: usize) -> Self {
        self.parallel_min_cells = cells;
        self
    }

    /// Defaults overridden by `TILE_SIGNAL_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(rule) = parse_override::<CollisionRule>(&lookup, COLLISION_ENV)? {
            config = config.collision(rule);
        }
        if let Some(threads) = parse_override::<usize>(&lookup, THREADS_ENV)? {
            config = config.thread_count(threads);
        }
        if let Some(cells) = parse_override::<usize>(&lookup, PARALLEL_MIN_CELLS_ENV)? {
            config = config.parallel_min_cells(cells);
        }
        Ok(config)
    }
}

fn parse_override<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| BoardError::Config { key, value }),
        None => Ok(None),
    }
}

/// Counters from the most recent tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Activations delivered to an in-bounds cell.
    pub delivered: u64,
    /// Emissions whose target fell off the board.
    pub dropped: u64,
    /// Deliveries the target refused (a diagonal heading into a jumper).
    pub rejected: u64,
    /// Whether the emission scan ran on rayon.
    pub parallel: bool,
}

/// A fixed-size grid of tiles advanced one synchronous tick at a time.
#[derive(Clone, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    grid: TileBuffers,
    config: BoardConfig,
    generation: u64,
    last_tick: TickStats,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl Board {
    /// A `width` x `height` board of blank tiles with default configuration.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::with_config(width, height, BoardConfig::default())
    }

    /// Create a board with explicit configuration.
    pub fn with_config(width: usize, height: usize, config: BoardConfig) -> Result<Self> {
        if width < 1 || height < 1 || buffer_bytes(width, height).is_none() {
            return Err(BoardError::InvalidDimension { width, height });
        }
        let pool = match config.thread_count {
            Some(threads) => Some(Arc::new(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("tile-signal-{i}"))
                    .build()
                    .map_err(|err| BoardError::ThreadPool(err.to_string()))?,
            )),
            None => None,
        };
        debug!(width, height, collision = %config.collision, "board created");

        Ok(Self {
            width,
            height,
            grid: TileBuffers::filled(width, height, Tile::blank()),
            config,
            generation: 0,
            last_tick: TickStats::default(),
            pool,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Number of ticks applied since construction.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn last_tick(&self) -> TickStats {
        self.last_tick
    }

    #[inline]
    pub fn is_valid_position(&self, x: i64, y: i64) -> bool {
        in_bounds(self.width, self.height, x, y)
    }

    fn checked_index(&self, x: i64, y: i64) -> Result<usize> {
        if !self.is_valid_position(x, y) {
            return Err(BoardError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.grid.index(x as usize, y as usize))
    }

    pub fn get_cell(&self, x: i64, y: i64) -> Result<&Tile> {
        let idx = self.checked_index(x, y)?;
        Ok(&self.grid.current()[idx])
    }

    /// Shorthand for `get_cell(x, y)?.has_signal()`.
    pub fn has_signal(&self, x: i64, y: i64) -> Result<bool> {
        self.get_cell(x, y).map(Tile::has_signal)
    }

    /// Place `tile` at `(x, y)`, discarding whatever was there.
    pub fn replace_cell(&mut self, x: i64, y: i64, tile: Tile) -> Result<()> {
        let idx = self.checked_index(x, y)?;
        self.grid.current_mut()[idx] = tile;
        Ok(())
    }

    /// Deliver one external activation to the cell at `(x, y)`.
    ///
    /// It counts as one more arrival in the tick that produced the current
    /// grid, so it collides with a signal that arrived there in that tick.
    pub fn try_activate_at(&mut self, x: i64, y: i64, direction: DirectionVector) -> Result<()> {
        let idx = self.checked_index(x, y)?;
        let rule = self.config.collision;
        self.grid.current_mut()[idx].try_activate_with(direction, rule)
    }

    pub fn describe_cell(&self, x: i64, y: i64) -> Result<CellDescription> {
        self.get_cell(x, y).map(CellDescription::of)
    }

    pub fn active_count(&self) -> u64 {
        self.grid
            .current()
            .iter()
            .filter(|tile| tile.has_signal())
            .count() as u64
    }

    /// Call `f(x, y)` for every cell carrying a signal, in row-major order.
    pub fn for_each_active<F: FnMut(i64, i64)>(&self, mut f: F) {
        for (y, row) in self.grid.current().chunks_exact(self.width).enumerate() {
            for (x, tile) in row.iter().enumerate() {
                if tile.has_signal() {
                    f(x as i64, y as i64);
                }
            }
        }
    }

    #[inline]
    fn uses_parallel(&self) -> bool {
        self.grid.len() >= self.config.parallel_min_cells
    }

    /// Advance the whole board by one tick.
    pub fn update(&mut self) {
        let parallel = self.uses_parallel();
        let rule = self.config.collision;
        let (width, height) = (self.width, self.height);
        let pool = self.pool.clone();

        self.grid.prepare_next();
        let (current, next) = self.grid.current_and_next_mut();
        let mut stats = if parallel {
            propagate_parallel(current, next, width, height, rule, pool.as_deref())
        } else {
            propagate_serial(current, next, width, height, rule)
        };
        stats.parallel = parallel;
        self.grid.swap();

        self.generation += 1;
        self.last_tick = stats;
        debug!(
            generation = self.generation,
            active = self.active_count(),
            delivered = stats.delivered,
            dropped = stats.dropped,
            rejected = stats.rejected,
            parallel,
            "tick applied"
        );
    }

    /// Advance `n` ticks.
    pub fn update_n(&mut self, n: u64) {
        for _ in 0..n {
            self.update();
        }
    }
}

/// Byte size of one tile buffer, or `None` if it cannot be allocated.
fn buffer_bytes(width: usize, height: usize) -> Option<usize> {
    width
        .checked_mul(height)?
        .checked_mul(std::mem::size_of::<Tile>())
        .filter(|&bytes| bytes <= isize::MAX as usize)
}

#[inline]
fn in_bounds(width: usize, height: usize, x: i64, y: i64) -> bool {
    x >= 0 && y >= 0 && (x as u64) < width as u64 && (y as u64) < height as u64
}

/// Row-major index of the cell one step from `(x, y)` along `direction`,
/// or `None` off the board.
#[inline]
fn target_index(
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    direction: DirectionVector,
) -> Option<usize> {
    let (tx, ty) = direction.step_from(x as i64, y as i64);
    if in_bounds(width, height, tx, ty) {
        Some(ty as usize * width + tx as usize)
    } else {
        None
    }
}

/// Report every emission of row `y` of the current grid, in scan order.
#[inline]
fn scan_row<F: FnMut(Option<usize>, DirectionVector)>(
    row: &[Tile],
    y: usize,
    width: usize,
    height: usize,
    mut emit: F,
) {
    for (x, tile) in row.iter().enumerate() {
        if !tile.has_signal() {
            continue;
        }
        for &direction in &tile.emissions() {
            emit(target_index(width, height, x, y, direction), direction);
        }
    }
}

#[inline]
fn deliver(
    next: &mut [Tile],
    target: Option<usize>,
    direction: DirectionVector,
    rule: CollisionRule,
    stats: &mut TickStats,
) {
    let Some(idx) = target else {
        stats.dropped += 1;
        return;
    };
    match next[idx].try_activate_with(direction, rule) {
        Ok(()) => stats.delivered += 1,
        Err(err) => {
            trace!(%err, target = idx, "activation rejected");
            stats.rejected += 1;
        }
    }
}

fn propagate_serial(
    current: &[Tile],
    next: &mut [Tile],
    width: usize,
    height: usize,
    rule: CollisionRule,
) -> TickStats {
    let mut stats = TickStats::default();
    for (y, row) in current.chunks_exact(width).enumerate() {
        scan_row(row, y, width, height, |target, direction| {
            deliver(next, target, direction, rule, &mut stats);
        });
    }
    stats
}

/// Emissions are gathered per row on rayon, then delivered serially in the
/// same row-major order the serial path uses.
fn propagate_parallel(
    current: &[Tile],
    next: &mut [Tile],
    width: usize,
    height: usize,
    rule: CollisionRule,
    pool: Option<&rayon::ThreadPool>,
) -> TickStats {
    let gather = || {
        current
            .par_chunks_exact(width)
            .enumerate()
            .map(|(y, row)| {
                let mut out = Vec::new();
                scan_row(row, y, width, height, |target, direction| {
                    out.push((target, direction));
                });
                out
            })
            .collect::<Vec<_>>()
    };
    let rows = match pool {
        Some(pool) => pool.install(gather),
        None => gather(),
    };

    let mut stats = TickStats::default();
    for (target, direction) in rows.into_iter().flatten() {
        deliver(next, target, direction, rule, &mut stats);
    }
    stats
}
