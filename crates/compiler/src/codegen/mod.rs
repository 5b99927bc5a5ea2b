//! x86-64 code generation
//!
//! Single-pass traversal of the AST producing NASM-syntax assembly lines.
//! The register discipline is deterministic so tests can assert on the
//! emitted shape:
//!
//! - Every expression result lands in `rax`. Binary operators evaluate
//!   LEFT, `push rax`, evaluate RIGHT, `pop rbx`, then operate; the
//!   order-sensitive ones (`-`, `/`, `%`, shifts, comparisons) move the
//!   operands into position first.
//! - `&&`/`||` are short-circuiting and normalize their result to 0/1 at
//!   the join.
//! - Locals live at negative offsets from `rbp`, handed out in 8-byte
//!   slots by a scope stack; block exit releases the frame's slots.
//! - Calls follow the System V AMD64 convention for up to six integer
//!   arguments, with an 8-byte pad around odd-argument calls.
//! - Labels are `.`-local and share one monotone counter.
//!
//! # Module structure
//!
//! - `state.rs`: the CodeGen struct (line buffer, scopes, loops, labels)
//! - `program.rs`: translation-unit entry point and extern injection
//! - `functions.rs`: prologue/epilogue, parameter spill, call sites
//! - `statements.rs`: straight-line statements
//! - `control_flow.rs`: if/else and the three loop forms
//! - `expr.rs`: expression lowering
//! - `error.rs`: semantic error type

mod control_flow;
mod error;
mod expr;
mod functions;
mod program;
mod state;
mod statements;

pub use error::CodeGenError;
pub use state::CodeGen;
