//! Control-flow lowering
//!
//! Structured control flow lowers to the textbook label-and-jump shapes.
//! Each loop registers a `(continue, break)` label pair before its body so
//! `break`/`continue` can resolve against the innermost loop; the continue
//! label sits at the loop's iteration point, which differs per loop kind.

use super::{CodeGen, CodeGenError};
use crate::ast::{Expr, Stmt};

impl CodeGen {
    pub(super) fn codegen_if(
        &mut self,
        cond: &Expr,
        then_branch: &Stmt,
        else_branch: Option<&Stmt>,
    ) -> Result<(), CodeGenError> {
        let end_label = self.fresh_label("end");
        let else_label = self.fresh_label("else");

        self.codegen_expr(cond)?;
        self.instr("cmp rax, 0");
        self.instr(format!("je {}", else_label));

        self.codegen_stmt(then_branch)?;
        self.instr(format!("jmp {}", end_label));

        self.label(&else_label);
        if let Some(else_branch) = else_branch {
            self.codegen_stmt(else_branch)?;
        }

        self.label(&end_label);
        Ok(())
    }

    /// `for` shape, with the continue point at the update expression:
    ///
    /// ```text
    ///     init
    /// .for_start_n:
    ///     cond -> je .for_end_n
    ///     body
    /// .for_update_n:
    ///     update
    ///     jmp .for_start_n
    /// .for_end_n:
    /// ```
    pub(super) fn codegen_for(
        &mut self,
        init: Option<&Stmt>,
        cond: Option<&Expr>,
        update: Option<&Expr>,
        body: &Stmt,
    ) -> Result<(), CodeGenError> {
        let loop_start = self.fresh_label("for_start");
        let loop_update = self.fresh_label("for_update");
        let loop_end = self.fresh_label("for_end");

        self.enter_loop(loop_update.clone(), loop_end.clone());

        if let Some(init) = init {
            self.codegen_stmt(init)?;
        }
        self.label(&loop_start);

        if let Some(cond) = cond {
            self.codegen_expr(cond)?;
            self.instr("cmp rax, 0");
            self.instr(format!("je {}", loop_end));
        }

        self.codegen_stmt(body)?;

        self.label(&loop_update);
        if let Some(update) = update {
            self.codegen_expr(update)?;
        }
        self.instr(format!("jmp {}", loop_start));

        self.label(&loop_end);
        self.exit_loop();
        Ok(())
    }

    /// `while` shape; continue re-tests the condition at the loop top.
    pub(super) fn codegen_while(&mut self, cond: &Expr, body: &Stmt) -> Result<(), CodeGenError> {
        let loop_start = self.fresh_label("while_start");
        let loop_end = self.fresh_label("while_end");

        self.enter_loop(loop_start.clone(), loop_end.clone());

        self.label(&loop_start);
        self.codegen_expr(cond)?;
        self.instr("cmp rax, 0");
        self.instr(format!("je {}", loop_end));

        self.codegen_stmt(body)?;
        self.instr(format!("jmp {}", loop_start));

        self.label(&loop_end);
        self.exit_loop();
        Ok(())
    }

    /// `do-while` shape; the body always runs once, and continue lands on
    /// the condition test.
    pub(super) fn codegen_do_while(&mut self, body: &Stmt, cond: &Expr) -> Result<(), CodeGenError> {
        let loop_start = self.fresh_label("do_start");
        let loop_cond = self.fresh_label("do_cond");
        let loop_end = self.fresh_label("do_end");

        self.enter_loop(loop_cond.clone(), loop_end.clone());

        self.label(&loop_start);
        self.codegen_stmt(body)?;

        self.label(&loop_cond);
        self.codegen_expr(cond)?;
        self.instr("cmp rax, 0");
        self.instr(format!("jne {}", loop_start));

        self.label(&loop_end);
        self.exit_loop();
        Ok(())
    }

    pub(super) fn codegen_break(&mut self) -> Result<(), CodeGenError> {
        let target = self
            .loop_stack
            .last()
            .map(|labels| labels.break_label.clone())
            .ok_or(CodeGenError::BreakOutsideLoop)?;
        self.instr(format!("jmp {}", target));
        Ok(())
    }

    pub(super) fn codegen_continue(&mut self) -> Result<(), CodeGenError> {
        let target = self
            .loop_stack
            .last()
            .map(|labels| labels.continue_label.clone())
            .ok_or(CodeGenError::ContinueOutsideLoop)?;
        self.instr(format!("jmp {}", target));
        Ok(())
    }
}
