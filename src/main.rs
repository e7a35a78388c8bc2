#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::time::Instant;
use tile_signal::board::{Board, BoardConfig, BoardError, CollisionRule, random_board};
use tracing::info;

const DEFAULT_SIDE: usize = 256;
const DEFAULT_DENSITY: f64 = 0.3;
const DEFAULT_TICKS: u64 = 1000;
const DEFAULT_CHECK_INTERVAL: u64 = 250;
const DEFAULT_SEED: u64 = 0x5EED_1234_ABCD_EF01;

struct MainArgs {
    config: BoardConfig,
    width: usize,
    height: usize,
    density: f64,
    ticks: u64,
    check_interval: u64,
    seed: u64,
}

const USAGE: &str = "usage: tile-signal [--width N] [--height N] [--density P] [--ticks N] \
[--interval N] [--seed N] [--threads N] [--collision exclusive|parity] [--serial|--parallel]";

fn parse_args(config: BoardConfig) -> MainArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = MainArgs {
        config,
        width: DEFAULT_SIDE,
        height: DEFAULT_SIDE,
        density: DEFAULT_DENSITY,
        ticks: DEFAULT_TICKS,
        check_interval: DEFAULT_CHECK_INTERVAL,
        seed: DEFAULT_SEED,
    };
    let next_arg = |i: usize, flag: &str| -> &str {
        args.get(i)
            .map(String::as_str)
            .unwrap_or_else(|| panic!("{flag} requires a value"))
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--width" => {
                i += 1;
                parsed.width = next_arg(i, "--width")
                    .parse()
                    .expect("--width requires a positive integer");
            }
            "--height" => {
                i += 1;
                parsed.height = next_arg(i, "--height")
                    .parse()
                    .expect("--height requires a positive integer");
            }
            "--density" => {
                i += 1;
                parsed.density = next_arg(i, "--density")
                    .parse()
                    .expect("--density requires a number between 0 and 1");
            }
            "--ticks" => {
                i += 1;
                parsed.ticks = next_arg(i, "--ticks")
                    .parse()
                    .expect("--ticks requires a non-negative integer");
            }
            "--interval" => {
                i += 1;
                let n: u64 = next_arg(i, "--interval")
                    .parse()
                    .expect("--interval requires a positive integer");
                parsed.check_interval = n.max(1);
            }
            "--seed" => {
                i += 1;
                parsed.seed = next_arg(i, "--seed")
                    .parse()
                    .expect("--seed requires an integer");
            }
            "--threads" => {
                i += 1;
                let n: usize = next_arg(i, "--threads")
                    .parse()
                    .expect("--threads requires a positive integer");
                parsed.config = parsed.config.thread_count(n);
            }
            "--collision" => {
                i += 1;
                let rule: CollisionRule = next_arg(i, "--collision")
                    .parse()
                    .unwrap_or_else(|err| panic!("{err}"));
                parsed.config = parsed.config.collision(rule);
            }
            "--serial" => {
                parsed.config = parsed.config.parallel_min_cells(usize::MAX);
            }
            "--parallel" => {
                parsed.config = parsed.config.parallel_min_cells(0);
            }
            other => panic!("unknown argument: {other}\n{USAGE}"),
        }
        i += 1;
    }
    parsed
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

fn run(board: &mut Board, ticks: u64, check_interval: u64) {
    let mut total = std::time::Duration::ZERO;
    let mut remaining = ticks;

    while remaining > 0 {
        let batch = remaining.min(check_interval);
        let start = Instant::now();
        board.update_n(batch);
        let elapsed = start.elapsed();
        total += elapsed;
        remaining -= batch;

        let batch_ms = elapsed.as_secs_f64() * 1000.0;
        let avg_ms = batch_ms / batch as f64;
        let stats = board.last_tick();
        info!(
            generation = board.generation(),
            active = board.active_count(),
            delivered = stats.delivered,
            dropped = stats.dropped,
            parallel = stats.parallel,
            "{batch_ms:.3} ms for {batch} ticks, {avg_ms:.6} ms/tick"
        );
    }

    let total_ms = total.as_secs_f64() * 1000.0;
    let avg_ms = if ticks == 0 {
        0.0
    } else {
        total_ms / ticks as f64
    };
    println!("\n--- Summary ({ticks} ticks) ---");
    println!(
        "{}x{} board: {total_ms:.3} ms total, {avg_ms:.6} ms/tick, {} active",
        board.width(),
        board.height(),
        board.active_count()
    );
}

fn main() -> Result<(), BoardError> {
    init_tracing();
    let args = parse_args(BoardConfig::from_env()?);
    info!(
        width = args.width,
        height = args.height,
        density = args.density,
        seed = args.seed,
        collision = %args.config.collision,
        "seeding board"
    );
    let mut board = random_board(
        args.width,
        args.height,
        args.density,
        args.seed,
        args.config,
    )?;
    run(&mut board, args.ticks, args.check_interval);
    Ok(())
}
