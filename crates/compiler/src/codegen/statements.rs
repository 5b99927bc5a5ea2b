//! Statement lowering
//!
//! Dispatches over the statement variants. Control-flow statements live in
//! `control_flow.rs`; everything here is straight-line.

use super::{CodeGen, CodeGenError};
use crate::ast::{Block, Expr, Stmt};

impl CodeGen {
    pub(super) fn codegen_stmt(&mut self, stmt: &Stmt) -> Result<(), CodeGenError> {
        match stmt {
            Stmt::Declaration { name, init } => self.codegen_declaration(name, init.as_ref()),
            Stmt::Return(expr) => self.codegen_return(expr.as_ref()),
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => self.codegen_if(cond, then_branch, else_branch.as_deref()),
            Stmt::For {
                init,
                cond,
                update,
                body,
            } => self.codegen_for(init.as_deref(), cond.as_ref(), update.as_ref(), body),
            Stmt::While { cond, body } => self.codegen_while(cond, body),
            Stmt::DoWhile { body, cond } => self.codegen_do_while(body, cond),
            Stmt::Break => self.codegen_break(),
            Stmt::Continue => self.codegen_continue(),
            Stmt::Block(block) => self.codegen_block(block),
            Stmt::Expr(expr) => self.codegen_expr(expr),
        }
    }

    /// Lower a block in a scope of its own.
    pub(super) fn codegen_block(&mut self, block: &Block) -> Result<(), CodeGenError> {
        self.enter_scope();
        for stmt in &block.statements {
            self.codegen_stmt(stmt)?;
        }
        self.exit_scope();
        Ok(())
    }

    /// Allocate an 8-byte slot and store the initializer (or zero).
    fn codegen_declaration(&mut self, name: &str, init: Option<&Expr>) -> Result<(), CodeGenError> {
        let offset = self.bind_local(name);
        self.instr("sub rsp, 8");

        match init {
            Some(expr) => {
                self.codegen_expr(expr)?;
                self.instr(format!("mov [rbp - {}], rax", offset));
            }
            None => {
                self.instr(format!("mov qword [rbp - {}], 0", offset));
            }
        }
        Ok(())
    }

    /// Evaluate into rax and jump to the shared epilogue.
    fn codegen_return(&mut self, expr: Option<&Expr>) -> Result<(), CodeGenError> {
        match expr {
            Some(expr) => self.codegen_expr(expr)?,
            None => self.instr("xor rax, rax"),
        }
        let end = self.function_end.clone();
        self.instr(format!("jmp {}", end));
        Ok(())
    }
}
