use rayon::prelude::*;

use arena::{play_game, GameResult, SeriesConfig, SeriesResult, SeriesRunner};
use classical_engine::{GreedyEngine, MasterEngine, MinimaxEngine};
use othello_core::{Color, Engine};
use random_engine::RandomEngine;

/// One game of `strong` against a seeded random opponent, colors
/// alternating with the seed. Result from `strong`'s side.
fn game_against_random(strong: &mut dyn Engine, seed: u64) -> GameResult {
    let mut novice = RandomEngine::with_seed(seed);
    let strong_color = if seed % 2 == 0 { Color::Black } else { Color::White };
    let game = match strong_color {
        Color::Black => play_game(strong, &mut novice),
        Color::White => play_game(&mut novice, strong),
    }
    .unwrap();

    if game.is_win_for(strong_color) {
        GameResult::Win
    } else if game.is_win_for(strong_color.other()) {
        GameResult::Loss
    } else {
        GameResult::Draw
    }
}

fn tally(results: impl IntoIterator<Item = GameResult>) -> SeriesResult {
    results.into_iter().fold(SeriesResult::default(), |mut acc, r| {
        acc.record(r);
        acc
    })
}

fn two_game_series(first: &mut dyn Engine, second: &mut dyn Engine) -> SeriesResult {
    let config = SeriesConfig {
        num_games: 2,
        verbose: false,
        ..Default::default()
    };
    SeriesRunner::new(config).run_series(first, second).unwrap()
}

#[test]
fn apprentice_generally_beats_novice() {
    let results: Vec<GameResult> = (0..16u64)
        .into_par_iter()
        .map(|seed| game_against_random(&mut GreedyEngine::new(), seed))
        .collect();

    let result = tally(results);
    eprintln!("apprentice vs novice: {}-{}-{}", result.wins, result.losses, result.draws);
    assert!(result.score() >= 0.7, "apprentice scored {:.2}", result.score());
}

#[test]
fn expert_dominates_random_play() {
    let results: Vec<GameResult> = (0..8u64)
        .into_par_iter()
        .map(|seed| game_against_random(&mut MinimaxEngine::new(), seed))
        .collect();

    let result = tally(results);
    eprintln!("expert vs novice: {}-{}-{}", result.wins, result.losses, result.draws);
    assert!(result.score() >= 0.75, "expert scored {:.2}", result.score());
}

type Pairing = fn() -> (Box<dyn Engine>, Box<dyn Engine>);

fn expert_and_apprentice() -> (Box<dyn Engine>, Box<dyn Engine>) {
    (Box::new(MinimaxEngine::new()), Box::new(GreedyEngine::new()))
}

fn master_and_expert() -> (Box<dyn Engine>, Box<dyn Engine>) {
    (Box::new(MasterEngine::new()), Box::new(MinimaxEngine::new()))
}

fn master_and_apprentice() -> (Box<dyn Engine>, Box<dyn Engine>) {
    (Box::new(MasterEngine::new()), Box::new(GreedyEngine::new()))
}

#[test]
fn each_rank_beats_the_one_below_with_both_colors() {
    let pairings: [(&str, Pairing); 3] = [
        ("expert vs apprentice", expert_and_apprentice),
        ("master vs expert", master_and_expert),
        ("master vs apprentice", master_and_apprentice),
    ];

    let results: Vec<(&str, SeriesResult)> = pairings
        .par_iter()
        .map(|&(label, make)| {
            let (mut stronger, mut weaker) = make();
            (label, two_game_series(stronger.as_mut(), weaker.as_mut()))
        })
        .collect();

    for (label, result) in results {
        eprintln!("{label}: {}-{}-{}", result.wins, result.losses, result.draws);
        assert_eq!(result.total_games(), 2);
        assert!(result.score() > 0.5, "{label} scored {:.2}", result.score());
    }
}

#[test]
fn parallel_series_merge_into_one_tally() {
    let merged = (0..4u64)
        .into_par_iter()
        .map(|seed| {
            two_game_series(
                &mut RandomEngine::with_seed(seed),
                &mut RandomEngine::with_seed(seed + 100),
            )
        })
        .reduce(SeriesResult::default, SeriesResult::merge);

    assert_eq!(merged.total_games(), 8);
}
