use std::time::Instant;
use tile_signal::board::{BoardConfig, random_board};

const SEED: u64 = 0x5EED_1234_ABCD_EF01;
const DENSITY: f64 = 0.3;

fn bench_board(side: usize, ticks: u64, config: BoardConfig) -> (f64, u64) {
    let mut board = random_board(side, side, DENSITY, SEED, config)
        .unwrap_or_else(|err| panic!("failed to seed {side}x{side} board: {err}"));

    let start = Instant::now();
    board.update_n(ticks);
    let duration = start.elapsed();

    let total_ms = duration.as_secs_f64() * 1000.0;
    (total_ms, board.active_count())
}

fn main() {
    let scales: &[(usize, u64)] = &[
        (64, 2000),  // below the default parallel threshold
        (128, 1000), // exactly at the threshold
        (512, 200),
        (1024, 100),
        (2048, 40),
    ];

    println!(
        "{:<12} {:>10} {:>8} {:>14} {:>14} {:>10}",
        "Grid", "Cells", "Ticks", "Serial(ms)", "Parallel(ms)", "Match"
    );
    println!("{}", "-".repeat(74));

    for &(side, ticks) in scales {
        let serial = BoardConfig::default().parallel_min_cells(usize::MAX);
        let parallel = BoardConfig::default().parallel_min_cells(0);
        let (serial_ms, serial_active) = bench_board(side, ticks, serial);
        let (parallel_ms, parallel_active) = bench_board(side, ticks, parallel);
        let status = if serial_active == parallel_active {
            "MATCH"
        } else {
            "MISMATCH"
        };
        println!(
            "{:<12} {:>10} {:>8} {:>14.1} {:>14.1} {:>10}",
            format!("{side}x{side}"),
            side * side,
            ticks,
            serial_ms,
            parallel_ms,
            status
        );
    }
}
