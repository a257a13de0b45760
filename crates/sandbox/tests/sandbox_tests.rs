use std::time::{Duration, Instant};

use othello_core::{Board, Color, Position};
use script_sandbox::{ErrorKind, Sandbox, SandboxConfig, SandboxResult};

fn sandbox() -> Sandbox {
    Sandbox::new(SandboxConfig::default())
}

async fn failure_kind(source: &str) -> ErrorKind {
    match sandbox().execute(source, &Board::initial(), Color::Black).await {
        SandboxResult::Failure(f) => f.kind,
        SandboxResult::Success(s) => panic!("expected a failure, got {:?}", s.position),
    }
}

#[tokio::test]
async fn valid_script_returns_its_move() {
    let source = "fn decide_move(board, my_color) { [2, 3] }";

    let result = sandbox()
        .execute(source, &Board::initial(), Color::Black)
        .await
        .into_result()
        .unwrap();

    assert_eq!(result.position, Position::new(2, 3));
}

#[tokio::test]
async fn syntax_error_is_a_compile_failure() {
    let source = "
fn decide_move(board, my_color) {
    [2, 3]
    let x = = broken syntax here!!!
}
";
    let result = sandbox().execute(source, &Board::initial(), Color::Black).await;
    let failure = result.into_result().unwrap_err();

    assert_eq!(failure.kind, ErrorKind::Compile);
    assert!(failure.line.is_some());
}

#[tokio::test]
async fn infinite_loop_times_out_within_margin() {
    let sandbox = Sandbox::new(SandboxConfig {
        timeout_ms: 200,
        ..Default::default()
    });
    let source = "fn decide_move(board, my_color) { while true {} [0, 0] }";

    let start = Instant::now();
    let failure = sandbox
        .execute(source, &Board::initial(), Color::Black)
        .await
        .into_result()
        .unwrap_err();

    assert_eq!(failure.kind, ErrorKind::Timeout);
    assert!(failure.execution_time_ms >= 200);
    assert!(start.elapsed() < Duration::from_millis(200 + 1000));
}

#[tokio::test]
async fn non_array_return_is_invalid() {
    let kind = failure_kind(r#"fn decide_move(board, my_color) { "invalid" }"#).await;
    assert_eq!(kind, ErrorKind::InvalidReturn);
}

#[tokio::test]
async fn out_of_range_return_is_invalid() {
    let kind = failure_kind("fn decide_move(board, my_color) { [10, 10] }").await;
    assert_eq!(kind, ErrorKind::InvalidReturn);
}

#[tokio::test]
async fn thrown_error_is_runtime() {
    let kind = failure_kind(r#"fn decide_move(board, my_color) { throw "oops"; }"#).await;
    assert_eq!(kind, ErrorKind::Runtime);
}

#[tokio::test]
async fn host_import_is_runtime() {
    let source = r#"
        import "fs" as fs;
        fn decide_move(board, my_color) { [0, 0] }
    "#;
    assert_eq!(failure_kind(source).await, ErrorKind::Runtime);
}

#[tokio::test]
async fn heap_held_across_calls_is_capped_at_default_ceiling() {
    let source = r#"
        fn hold(n) {
            let s = "x";
            while s.len() < 8388608 { s += s; }
            if n == 0 { return [2, 3]; }
            let r = hold(n - 1);
            if s.len() > 0 { r } else { [0, 0] }
        }
        fn decide_move(board, my_color) { hold(10) }
    "#;
    let result = sandbox().execute(source, &Board::initial(), Color::Black).await;
    let failure = result.into_result().unwrap_err();

    assert_eq!(failure.kind, ErrorKind::Runtime);
    assert!(failure.message.contains("Memory limit"), "{}", failure.message);
}

#[tokio::test]
async fn eval_is_not_available() {
    let source = r#"fn decide_move(board, my_color) { eval("[0, 0]") }"#;
    let kind = failure_kind(source).await;
    assert!(matches!(kind, ErrorKind::Compile | ErrorKind::Runtime));
}

#[tokio::test]
async fn script_can_pick_a_legal_move_from_the_board() {
    // Scans for the first empty square next to an opponent stone that
    // closes a line: a compact real strategy.
    let source = r#"
        fn flips(board, r, c, me) {
            let opp = if me == "black" { "white" } else { "black" };
            let total = 0;
            for d in [[-1,-1],[-1,0],[-1,1],[0,-1],[0,1],[1,-1],[1,0],[1,1]] {
                let rr = r + d[0];
                let cc = c + d[1];
                let run = 0;
                while rr >= 0 && rr < 8 && cc >= 0 && cc < 8 && board[rr][cc] == opp {
                    rr += d[0];
                    cc += d[1];
                    run += 1;
                }
                if run > 0 && rr >= 0 && rr < 8 && cc >= 0 && cc < 8 && board[rr][cc] == me {
                    total += run;
                }
            }
            total
        }

        fn decide_move(board, my_color) {
            for r in 0..8 {
                for c in 0..8 {
                    if type_of(board[r][c]) == "()" && flips(board, r, c, my_color) > 0 {
                        return [r, c];
                    }
                }
            }
            [0, 0]
        }
    "#;

    let board = Board::initial();
    let result = sandbox()
        .execute(source, &board, Color::White)
        .await
        .into_result()
        .unwrap();

    assert!(othello_core::is_legal_move(&board, result.position, Color::White));
}

#[test]
fn blocking_api_matches_async_contract() {
    let result = sandbox().execute_blocking(
        "fn decide_move(board, my_color) { [4, 5] }",
        &Board::initial(),
        Color::Black,
    );
    assert!(result.is_success());
}

#[test]
fn results_serialize_with_kebab_case_kinds() {
    let result = sandbox().execute_blocking(
        "fn decide_move(board, my_color) { [9, 9] }",
        &Board::initial(),
        Color::Black,
    );
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["status"], "failure");
    assert_eq!(json["kind"], "invalid-return");
}
