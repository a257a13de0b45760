use super::*;
use classical_engine::GreedyEngine;
use othello_core::{Position, Winner};
use random_engine::RandomEngine;

const PLAYS_2_3: &str = "fn decide_move(board, my_color) { [2, 3] }";

fn board(text: &str) -> Board {
    Board::from_text(text).unwrap()
}

async fn collect(controller: GameController) -> (Result<MatchResult, ArenaError>, Vec<GameEvent>) {
    let mut handle = controller.spawn();
    let mut events = Vec::new();
    while let Some(event) = handle.next_event().await {
        events.push(event);
    }
    (handle.join().await, events)
}

fn player_error_kind(events: &[GameEvent]) -> Option<ErrorKind> {
    events.iter().find_map(|e| match e {
        GameEvent::PlayerError { kind, .. } => Some(*kind),
        _ => None,
    })
}

#[tokio::test]
async fn compile_error_forfeits_before_any_move() {
    let controller = GameController::new("fn decide_move(", Rank::E, ArenaConfig::instant());

    let (result, events) = collect(controller).await;
    let result = result.unwrap();

    assert!(result.forfeit);
    assert_eq!(result.winner, Winner::White);
    assert_eq!((result.black_score, result.white_score), (2, 2));
    assert_eq!(result.total_turns, 0);

    assert!(matches!(events[0], GameEvent::GameStart { cpu_rank: Rank::E, .. }));
    assert!(matches!(events[1], GameEvent::TurnStart { player: Color::Black, turn_number: 1, .. }));
    assert_eq!(player_error_kind(&events), Some(ErrorKind::Compile));
    assert!(events.last().unwrap().is_game_end());
    assert_eq!(events.len(), 4);
}

#[tokio::test]
async fn illegal_square_is_an_invalid_move_forfeit() {
    let source = "fn decide_move(board, my_color) { [0, 0] }";
    let controller = GameController::new(source, Rank::E, ArenaConfig::instant());

    let (result, events) = collect(controller).await;

    assert!(result.unwrap().forfeit);
    assert_eq!(player_error_kind(&events), Some(ErrorKind::InvalidMove));
    match &events[2] {
        GameEvent::PlayerError { error, .. } => assert!(error.contains("[0, 0]"), "{error}"),
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn forfeit_on_a_later_turn_keeps_current_stone_counts() {
    // Legal first move, then the same square again.
    let config = ArenaConfig::instant();
    let cpu = Box::new(RandomEngine::with_seed(3));
    let controller = GameController::with_engine(PLAYS_2_3, Rank::E, cpu, config);

    let (result, events) = collect(controller).await;
    let result = result.unwrap();

    assert!(result.forfeit);
    assert_eq!(result.winner, Winner::White);
    assert_eq!(result.total_turns, 2);
    assert_eq!(result.black_score + result.white_score, 6);
    assert_eq!(player_error_kind(&events), Some(ErrorKind::InvalidMove));
}

#[tokio::test]
async fn human_can_play_white() {
    let config = ArenaConfig {
        human_color: Color::White,
        ..ArenaConfig::instant()
    };
    let controller = GameController::new("fn decide_move(b, c) { throw \"no\"; }", Rank::C, config);

    let (result, events) = collect(controller).await;
    let result = result.unwrap();

    // Greedy opens as black, then the script fails as white.
    assert!(result.forfeit);
    assert_eq!(result.winner, Winner::Black);
    assert_eq!(result.total_turns, 1);
    assert!(matches!(events[2], GameEvent::MoveMade { player: Color::Black, .. }));
    assert_eq!(player_error_kind(&events), Some(ErrorKind::Runtime));
}

#[tokio::test]
async fn game_ends_when_neither_side_can_move() {
    let start = board(
        "
        .WB.....
        ........
        ........
        ........
        ........
        ........
        ........
        ........
        ",
    );
    let source = "fn decide_move(board, my_color) { [0, 0] }";
    let controller =
        GameController::new(source, Rank::E, ArenaConfig::instant()).starting_from(start);

    let (result, events) = collect(controller).await;
    let result = result.unwrap();

    assert!(!result.forfeit);
    assert_eq!(result.winner, Winner::Black);
    assert_eq!((result.black_score, result.white_score), (3, 0));
    assert_eq!(result.total_turns, 1);
    assert_eq!(events.len(), 4);
    match &events[2] {
        GameEvent::MoveMade { flipped, .. } => assert_eq!(flipped, &vec![Position::new(0, 1)]),
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn side_without_moves_passes() {
    // Black has nothing to play; white closes the row and ends the game.
    let start = board(
        "
        WB......
        ........
        ........
        ........
        ........
        ........
        ........
        ........
        ",
    );
    let controller = GameController::with_engine(
        PLAYS_2_3,
        Rank::C,
        Box::new(GreedyEngine::new()),
        ArenaConfig::instant(),
    )
    .starting_from(start);

    let (result, events) = collect(controller).await;
    let result = result.unwrap();

    assert_eq!(events[1], GameEvent::Pass { player: Color::Black });
    assert!(matches!(events[2], GameEvent::TurnStart { player: Color::White, turn_number: 1, .. }));
    assert_eq!(result.winner, Winner::White);
    assert_eq!(result.total_turns, 1);
    assert!(!result.forfeit);
}

#[tokio::test]
async fn board_without_moves_ends_immediately_as_draw() {
    let start = board(
        "
        B......W
        ........
        ........
        ........
        ........
        ........
        ........
        ........
        ",
    );
    let controller =
        GameController::new(PLAYS_2_3, Rank::E, ArenaConfig::instant()).starting_from(start);

    let (result, events) = collect(controller).await;
    let result = result.unwrap();

    assert_eq!(result.winner, Winner::Draw);
    assert_eq!(result.total_turns, 0);
    assert_eq!(events.len(), 2);
}

#[tokio::test]
async fn cancel_abandons_a_running_script() {
    let config = ArenaConfig {
        sandbox: script_sandbox::SandboxConfig {
            timeout_ms: 3_000,
            ..Default::default()
        },
        ..ArenaConfig::instant()
    };
    let controller = GameController::new("fn decide_move(b, c) { loop {} }", Rank::E, config);
    let mut handle = controller.spawn();

    while let Some(event) = handle.next_event().await {
        if matches!(event, GameEvent::TurnStart { .. }) {
            break;
        }
    }
    let start = Instant::now();
    handle.cancel();

    let result = handle.join().await;
    assert!(matches!(result, Err(ArenaError::Cancelled)));
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn dropped_receiver_cancels_the_match() {
    let controller = GameController::new(PLAYS_2_3, Rank::E, ArenaConfig::instant());
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (_cancel, cancel_rx) = watch::channel(false);
    drop(event_rx);

    let result = controller.run(event_tx, cancel_rx).await;
    assert!(matches!(result, Err(ArenaError::Cancelled)));
}

#[test]
fn events_serialize_with_kebab_case_tags() {
    let event = GameEvent::PlayerError {
        error: "Invalid move: [0, 0] is not a legal position".into(),
        kind: ErrorKind::InvalidMove,
    };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "player-error");
    assert_eq!(json["kind"], "invalid-move");

    let pass = serde_json::to_value(GameEvent::Pass { player: Color::White }).unwrap();
    assert_eq!(pass, serde_json::json!({"type": "pass", "player": "white"}));
}
