//! A fresh, locked-down Rhai engine per invocation

use std::time::Instant;

use othello_core::{Board, Color};
use rhai::module_resolvers::DummyModuleResolver;
use rhai::{Array, Dynamic, Engine, EvalAltResult, Scope, AST};
use tracing::{debug, info};

use crate::config::SandboxConfig;
use crate::memory::MemoryBudget;
use crate::result::{ErrorKind, SandboxFailure};
use crate::ENTRY_POINT;

/// Build an engine with no host access and hard limits.
///
/// Scripts cannot import modules or call `eval`. The progress callback
/// terminates the script once `started + config.timeout()` has passed,
/// which also covers busy loops that never call a function, or once the
/// thread's heap has grown by more than the memory limit since the engine
/// was built.
pub fn new_engine(config: &SandboxConfig, started: Instant) -> Engine {
    let mut engine = Engine::new();

    engine.set_module_resolver(DummyModuleResolver::new());
    engine.disable_symbol("eval");

    engine.set_max_call_levels(config.max_call_levels);
    engine.set_max_expr_depths(config.max_expr_depth, config.max_expr_depth);
    engine.set_max_string_size(config.max_string_size());
    engine.set_max_array_size(config.max_array_size());
    engine.set_max_map_size(config.max_map_size());

    let limit = config.timeout();
    let budget = MemoryBudget::start(config.memory_limit_bytes());
    engine.on_progress(move |_ops| {
        if started.elapsed() > limit {
            Some(Dynamic::UNIT)
        } else if budget.exceeded() {
            Some(Dynamic::from(MemoryExceeded))
        } else {
            None
        }
    });

    engine.on_print(|text| info!(target: "script", "{text}"));
    engine.on_debug(|text, source, pos| {
        debug!(target: "script", source = source.unwrap_or(""), %pos, "{text}")
    });

    engine
}

/// Board as the script sees it: 8 rows of `"black"`, `"white"` or `()`.
pub fn board_to_dynamic(board: &Board) -> Dynamic {
    let rows: Array = board
        .rows()
        .iter()
        .map(|row| {
            let cells: Array = row
                .iter()
                .map(|cell| match cell {
                    Some(color) => Dynamic::from(color.as_str().to_string()),
                    None => Dynamic::UNIT,
                })
                .collect();
            Dynamic::from_array(cells)
        })
        .collect();
    Dynamic::from_array(rows)
}

/// Run top-level statements, then call the entry point once.
pub fn run(
    engine: &Engine,
    ast: &AST,
    board: &Board,
    color: Color,
    config: &SandboxConfig,
) -> Result<Dynamic, SandboxFailure> {
    let mut scope = Scope::new();
    engine
        .call_fn::<Dynamic>(
            &mut scope,
            ast,
            ENTRY_POINT,
            (board_to_dynamic(board), color.as_str().to_string()),
        )
        .map_err(|err| classify(err, config))
}

/// Termination token for a script over its memory budget.
#[derive(Debug, Clone, Copy)]
struct MemoryExceeded;

/// Map an evaluation error to `timeout` or `runtime`.
pub fn classify(err: Box<EvalAltResult>, config: &SandboxConfig) -> SandboxFailure {
    match *root_cause(err) {
        EvalAltResult::ErrorTerminated(token, _) if token.is::<MemoryExceeded>() => {
            SandboxFailure::new(
                ErrorKind::Runtime,
                format!("Memory limit exceeded ({}MB limit)", config.memory_limit_mb),
            )
        }
        EvalAltResult::ErrorTerminated(..) => timeout_failure(config),
        other => SandboxFailure::new(ErrorKind::Runtime, other.to_string()),
    }
}

pub fn timeout_failure(config: &SandboxConfig) -> SandboxFailure {
    SandboxFailure::new(
        ErrorKind::Timeout,
        format!("Execution timed out ({}ms limit)", config.timeout_ms),
    )
}

/// Errors raised inside script functions arrive wrapped once per call frame.
fn root_cause(err: Box<EvalAltResult>) -> Box<EvalAltResult> {
    match *err {
        EvalAltResult::ErrorInFunctionCall(_, _, inner, _) => root_cause(inner),
        EvalAltResult::ErrorInModule(_, inner, _) => root_cause(inner),
        other => Box::new(other),
    }
}

#[cfg(test)]
#[path = "isolate_tests.rs"]
mod isolate_tests;
