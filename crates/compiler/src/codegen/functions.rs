//! Function and call-site lowering
//!
//! Owns the prologue/epilogue shape, the spilling of register arguments
//! into stack slots, and the System V AMD64 call-site discipline.

use super::state::ARG_REGISTERS;
use super::{CodeGen, CodeGenError};
use crate::ast::{Expr, FunctionDef};

impl CodeGen {
    /// Lower one function definition.
    ///
    /// The parameter bindings form a scope of their own around the body
    /// block, so locals may shadow parameters. Every `return` jumps to the
    /// single per-function end label holding the canonical epilogue.
    pub(super) fn codegen_function(&mut self, def: &FunctionDef) -> Result<(), CodeGenError> {
        self.function_end = self.fresh_label("function_end");

        self.raw(format!("{}:", def.name));
        self.instr("push rbp");
        self.instr("mov rbp, rsp");

        self.enter_scope();

        // Spill incoming register arguments to fresh slots so the body can
        // treat parameters exactly like locals.
        for (i, param) in def.params.iter().enumerate() {
            let offset = self.bind_local(&param.name);
            if i < ARG_REGISTERS.len() {
                self.instr(format!("mov [rbp - {}], {}", offset, ARG_REGISTERS[i]));
            }
        }

        self.codegen_block(&def.body)?;
        self.exit_scope();

        let end = self.function_end.clone();
        self.label(&end);
        self.instr("mov rsp, rbp");
        self.instr("pop rbp");
        self.instr("ret");
        Ok(())
    }

    /// Lower a call site.
    ///
    /// Arguments are evaluated right-to-left with each result pushed, then
    /// popped into the argument registers in order; the reverse-then-pop
    /// sequence restores the natural left-to-right binding. When the
    /// argument count is odd, one 8-byte pad keeps rsp 16-byte aligned at
    /// the `call` and is released right after.
    pub(super) fn codegen_call(&mut self, name: &str, args: &[Expr]) -> Result<(), CodeGenError> {
        if self.is_local(name) {
            return Err(CodeGenError::NotAFunction(name.to_string()));
        }
        if !self.functions.contains_key(name) {
            self.record_undeclared_call(name);
        }

        for arg in args.iter().rev() {
            self.codegen_expr(arg)?;
            self.instr("push rax");
        }
        for register in ARG_REGISTERS.iter().take(args.len()) {
            self.instr(format!("pop {}", register));
        }

        let needs_padding = args.len() % 2 != 0;
        if needs_padding {
            self.instr("sub rsp, 8");
        }
        self.instr(format!("call {}", name));
        if needs_padding {
            self.instr("add rsp, 8");
        }
        Ok(())
    }
}
