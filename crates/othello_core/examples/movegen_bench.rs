//! Move generation benchmark comparing the dense and packed engines.
//!
//! Usage:
//!   cargo run --release --example movegen_bench -p othello_core -- [perft-depth]

use othello_core::{Board, Color, PackedBoard, legal_moves, perft, perft_packed};
use std::env;
use std::time::Instant;

/// Positions covering different game phases
const TEST_POSITIONS: &[(&str, &str)] = &[
    (
        "Opening",
        "........ ........ ........ ...WB... ...BW... ........ ........ ........",
    ),
    (
        "Midgame",
        "........ ..W..... ..WWB... .BBWBB.. ..BWWW.. ...WB... ........ ........",
    ),
    (
        "Late",
        "WWWWWWWW WBBBBBBW WBWWWWBW WBW..WBW WBW..WBW WBWWWWBW WBBBBBB. WWWWWWW.",
    ),
];

const ITERATIONS: usize = 100_000;

fn main() {
    let depth: u8 = env::args().nth(1).and_then(|s| s.parse().ok()).unwrap_or(7);

    println!("=== Move Generation Benchmark ===");
    println!("Iterations per position: {ITERATIONS}");
    println!();

    for (name, text) in TEST_POSITIONS {
        let board = Board::from_text(text).unwrap_or_else(|e| panic!("{name}: {e}"));
        let packed = PackedBoard::from_board(&board);

        let start = Instant::now();
        let mut total = 0usize;
        for _ in 0..ITERATIONS {
            total += legal_moves(&board, Color::Black).len();
        }
        let dense = start.elapsed();

        let start = Instant::now();
        let mut total_packed = 0u32;
        for _ in 0..ITERATIONS {
            total_packed += packed.legal_moves(Color::Black).popcount();
        }
        let fast = start.elapsed();

        assert_eq!(total, total_packed as usize);
        println!("{name:.<20} dense {dense:>10.3?}  packed {fast:>10.3?}");
    }

    println!();
    println!("Perft depth {depth} from the opening:");

    let start = Instant::now();
    let nodes = perft(&Board::initial(), Color::Black, depth);
    println!("  dense  {nodes:>12} leaves in {:>8.3?}", start.elapsed());

    let start = Instant::now();
    let nodes = perft_packed(PackedBoard::initial(), Color::Black, depth);
    println!("  packed {nodes:>12} leaves in {:>8.3?}", start.elapsed());
}
