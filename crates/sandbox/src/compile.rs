//! Source to AST

use rhai::{Engine, ParseError, AST};

use crate::result::{ErrorKind, SandboxFailure};

/// Parse a strategy script. Syntax errors carry the 1-based location of
/// the offending token when the parser reports one.
pub fn compile(engine: &Engine, source: &str) -> Result<AST, SandboxFailure> {
    engine.compile(source).map_err(compile_failure)
}

fn compile_failure(err: ParseError) -> SandboxFailure {
    let ParseError(kind, pos) = &err;
    SandboxFailure::new(ErrorKind::Compile, kind.to_string()).at(pos.line(), pos.position())
}

#[cfg(test)]
#[path = "compile_tests.rs"]
mod compile_tests;
