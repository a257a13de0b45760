use arena::{ArenaConfig, GameController, GameEvent, Rank};
use othello_core::{Board, Color, Winner};
use random_engine::RandomEngine;
use script_sandbox::SandboxConfig;

const CORNER_HUNTER: &str = include_str!("../../../demos/corner_hunter.rhai");

fn relaxed_config() -> ArenaConfig {
    ArenaConfig {
        sandbox: SandboxConfig {
            timeout_ms: 5_000,
            ..Default::default()
        },
        ..ArenaConfig::instant()
    }
}

async fn play_out(controller: GameController) -> (arena::MatchResult, Vec<GameEvent>) {
    let mut handle = controller.spawn();
    let mut events = Vec::new();
    while let Some(event) = handle.next_event().await {
        events.push(event);
    }
    (handle.join().await.unwrap(), events)
}

#[tokio::test]
async fn starter_script_plays_a_full_match() {
    let cpu = Box::new(RandomEngine::with_seed(7));
    let controller = GameController::with_engine(CORNER_HUNTER, Rank::E, cpu, relaxed_config());

    let (result, events) = play_out(controller).await;

    assert!(!result.forfeit, "starter script forfeited: {events:?}");
    assert!(matches!(events.first(), Some(GameEvent::GameStart { .. })));
    assert!(events.last().is_some_and(GameEvent::is_game_end));
    assert_eq!(events.iter().filter(|e| e.is_game_end()).count(), 1);

    let moves = events
        .iter()
        .filter(|e| matches!(e, GameEvent::MoveMade { .. }))
        .count();
    assert_eq!(moves as u32, result.total_turns);

    let turn_numbers: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::TurnStart { turn_number, .. } => Some(*turn_number),
            _ => None,
        })
        .collect();
    let expected: Vec<u32> = (1..=result.total_turns).collect();
    assert_eq!(turn_numbers, expected);

    match events.last() {
        Some(GameEvent::GameEnd { board, result: end }) => {
            assert_eq!(end, &result);
            let count = board.count();
            assert_eq!((count.black, count.white), (result.black_score, result.white_score));
        }
        other => panic!("unexpected last event {other:?}"),
    }
}

#[tokio::test]
async fn every_move_follows_a_turn_start_for_the_same_player() {
    let cpu = Box::new(RandomEngine::with_seed(11));
    let controller = GameController::with_engine(CORNER_HUNTER, Rank::E, cpu, relaxed_config());

    let (_, events) = play_out(controller).await;

    let mut pending: Option<Color> = None;
    let mut previous = Board::initial();
    for event in &events {
        match event {
            GameEvent::TurnStart { player, board, .. } => {
                assert_eq!(pending, None, "two turn starts without a move");
                assert_eq!(board, &previous);
                pending = Some(*player);
            }
            GameEvent::MoveMade { player, board, flipped, .. } => {
                assert_eq!(pending.take(), Some(*player));
                assert!(!flipped.is_empty());
                assert_eq!(board.count().total(), previous.count().total() + 1);
                previous = *board;
            }
            GameEvent::Pass { .. } => assert_eq!(pending, None),
            _ => {}
        }
    }
}

#[tokio::test]
async fn master_punishes_a_script_that_always_takes_the_first_move() {
    let first_legal = r#"
fn decide_move(board, my_color) {
    let opp = if my_color == "black" { "white" } else { "black" };
    for r in 0..8 {
        for c in 0..8 {
            if type_of(board[r][c]) != "()" { continue; }
            for dr in range(-1, 2) {
                for dc in range(-1, 2) {
                    if dr == 0 && dc == 0 { continue; }
                    let rr = r + dr;
                    let cc = c + dc;
                    let run = 0;
                    while rr >= 0 && rr < 8 && cc >= 0 && cc < 8 && board[rr][cc] == opp {
                        rr += dr;
                        cc += dc;
                        run += 1;
                    }
                    if run > 0 && rr >= 0 && rr < 8 && cc >= 0 && cc < 8 && board[rr][cc] == my_color {
                        return [r, c];
                    }
                }
            }
        }
    }
    []
}
"#;
    let controller = GameController::new(first_legal, Rank::S, relaxed_config());

    let (result, _) = play_out(controller).await;

    assert!(!result.forfeit);
    assert_eq!(result.winner, Winner::White);
}
