use super::*;
use crate::compile::compile;
use std::time::Duration;

fn run_script(source: &str, config: &SandboxConfig) -> Result<Dynamic, SandboxFailure> {
    let engine = new_engine(config, Instant::now());
    let ast = compile(&engine, source)?;
    run(&engine, &ast, &Board::initial(), Color::Black, config)
}

#[test]
fn board_is_passed_as_nested_arrays() {
    let config = SandboxConfig::default();
    let source = r#"
        fn decide_move(board, my_color) {
            if board.len() != 8 || board[0].len() != 8 { throw "bad shape"; }
            if board[3][3] != "white" || board[3][4] != "black" { throw "bad stones"; }
            if type_of(board[0][0]) != "()" { throw "corner not empty"; }
            if my_color != "black" { throw "bad color"; }
            [2, 3]
        }
    "#;

    let value = run_script(source, &config).unwrap();
    assert_eq!(value.into_array().unwrap().len(), 2);
}

#[test]
fn throw_is_a_runtime_error() {
    let config = SandboxConfig::default();
    let err = run_script(r#"fn decide_move(b, c) { throw "oops"; }"#, &config).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Runtime);
    assert!(err.message.contains("oops"), "{}", err.message);
}

#[test]
fn module_import_is_refused() {
    let config = SandboxConfig::default();
    let source = r#"
        fn decide_move(board, my_color) {
            import "fs" as fs;
            [0, 0]
        }
    "#;
    let err = run_script(source, &config).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Runtime);
}

#[test]
fn missing_entry_point_is_a_runtime_error() {
    let config = SandboxConfig::default();
    let err = run_script("fn something_else() { [0, 0] }", &config).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Runtime);
}

#[test]
fn unbounded_recursion_hits_call_limit() {
    let config = SandboxConfig::default();
    let source = "
        fn dive(n) { dive(n + 1) }
        fn decide_move(board, my_color) { dive(0) }
    ";
    let err = run_script(source, &config).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Runtime);
}

#[test]
fn busy_loop_is_terminated_as_timeout() {
    let config = SandboxConfig {
        timeout_ms: 50,
        ..Default::default()
    };
    let start = Instant::now();
    let err = run_script("fn decide_move(b, c) { loop {} }", &config).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Timeout);
    assert_eq!(err.message, "Execution timed out (50ms limit)");
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[test]
fn oversized_string_is_rejected() {
    let config = SandboxConfig {
        memory_limit_mb: 1,
        ..Default::default()
    };
    let source = r#"
        fn decide_move(b, c) {
            let s = "x";
            loop { s += s; }
        }
    "#;
    let err = run_script(source, &config).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Runtime);
}

const HOLD_PER_FRAME: &str = r#"
    fn hold(n) {
        let s = "x";
        while s.len() < 262144 { s += s; }
        if n == 0 { return [2, 3]; }
        let r = hold(n - 1);
        if s.len() > 0 { r } else { [0, 0] }
    }
"#;

#[test]
fn strings_held_across_frames_hit_the_memory_ceiling() {
    let config = SandboxConfig {
        memory_limit_mb: 1,
        ..Default::default()
    };
    let source = format!("{HOLD_PER_FRAME} fn decide_move(b, c) {{ hold(40) }}");

    let err = run_script(&source, &config).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Runtime);
    assert_eq!(err.message, "Memory limit exceeded (1MB limit)");
}

#[test]
fn modest_allocations_stay_under_the_ceiling() {
    let config = SandboxConfig::default();
    let source = format!("{HOLD_PER_FRAME} fn decide_move(b, c) {{ hold(3) }}");

    let value = run_script(&source, &config).unwrap();
    assert_eq!(value.into_array().unwrap().len(), 2);
}
