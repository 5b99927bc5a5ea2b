//! mcc compiler library
//!
//! Compiles a small subset of C (machine-word integers, functions of up
//! to six parameters, the full expression operator family, and structured
//! control flow) to x86-64 assembly, then drives `nasm` and a C linker
//! driver to produce an ELF executable.
//!
//! The pipeline is strictly linear:
//!
//! ```text
//! source text -> tokens -> AST -> assembly lines -> file -> executable
//! ```
//!
//! Each stage is usable on its own (the CLI dumps any of them); the
//! convenience entry points here run the whole chain:
//!
//! ```rust,ignore
//! let config = mcc::BuildConfig::default();
//! mcc::compile_file(Path::new("prog.c"), &config)?;
//! ```

pub mod ast;
pub mod codegen;
pub mod config;
pub mod emitter;
pub mod lexer;
pub mod parser;

pub use ast::Program;
pub use codegen::{CodeGen, CodeGenError};
pub use config::BuildConfig;
pub use lexer::{Token, TokenKind, tokenize};
pub use parser::Parser;

use std::fs;
use std::path::Path;

/// Compile source text to assembly text.
pub fn compile_to_asm(source: &str) -> Result<String, String> {
    let mut parser = Parser::new(source)?;
    let program = parser.parse()?;

    let mut codegen = CodeGen::new();
    codegen.codegen_program(&program).map_err(|e| e.to_string())
}

/// Compile a source file to an executable.
///
/// Writes the assembly under the configured output directory, verifies the
/// assembler is usable, then assembles and links. The assembly file is
/// left in place either way.
pub fn compile_file(source_path: &Path, config: &BuildConfig) -> Result<(), String> {
    let source = fs::read_to_string(source_path).map_err(|e| {
        format!(
            "Failed to read source file '{}': {}",
            source_path.display(),
            e
        )
    })?;

    let asm = compile_to_asm(&source)?;
    emitter::write_assembly(&asm, &config.asm_path())?;

    emitter::check_nasm_version(&config.tools.assembler)?;
    emitter::assemble_and_link(config)?;
    Ok(())
}
