//! Program lowering
//!
//! The entry point for generating a whole translation unit: prelude
//! directives, the prototype table, every function definition in source
//! order, and finally the `extern` directives for call targets that never
//! received a definition.

use super::{CodeGen, CodeGenError};
use crate::ast::{Item, Program};

/// Number of prelude directive lines; externs are spliced in right after.
const PRELUDE_LINES: usize = 3;

impl CodeGen {
    /// Generate NASM-syntax assembly for the entire program.
    pub fn codegen_program(&mut self, program: &Program) -> Result<String, CodeGenError> {
        self.raw("default rel");
        self.raw("section .text");
        self.raw("global main");

        // First pass: record every prototype and definition so call sites
        // and name checks can resolve regardless of ordering.
        for item in &program.items {
            self.functions.insert(item.name().to_string(), item.arity());
            if let Item::Definition(def) = item {
                self.defined.insert(def.name.clone());
            }
        }

        for item in &program.items {
            if let Item::Definition(def) = item {
                self.codegen_function(def)?;
            }
        }

        // Prototypes that never got a definition resolve at link time, as
        // do call targets that were never declared at all.
        let mut externals: Vec<&str> = Vec::new();
        for item in &program.items {
            if let Item::Declaration(decl) = item {
                if !self.defined.contains(&decl.name) && !externals.contains(&decl.name.as_str()) {
                    externals.push(&decl.name);
                }
            }
        }
        for name in &self.undeclared_calls {
            if !externals.contains(&name.as_str()) {
                externals.push(name);
            }
        }

        let extern_lines: Vec<String> = externals
            .iter()
            .map(|name| format!("extern {}", name))
            .collect();
        let mut lines = std::mem::take(&mut self.lines);
        lines.splice(PRELUDE_LINES..PRELUDE_LINES, extern_lines);

        Ok(lines.join("\n") + "\n")
    }
}
