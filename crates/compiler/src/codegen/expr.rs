//! Expression lowering
//!
//! Every expression leaves its value in `rax`. When a second operand has to
//! be produced first, the intermediate result is parked on the stack with
//! `push rax` and recovered into `rbx`, so at the operator itself `rbx`
//! holds LEFT and `rax` holds RIGHT. Order-sensitive operations move the
//! values into their required positions before operating.

use super::{CodeGen, CodeGenError};
use crate::ast::{BinaryOp, Expr, UnaryOp};

impl CodeGen {
    pub(super) fn codegen_expr(&mut self, expr: &Expr) -> Result<(), CodeGenError> {
        match expr {
            Expr::IntLit(value) => {
                self.instr(format!("mov rax, {}", value));
                Ok(())
            }
            Expr::Var(name) => {
                let offset = self.lookup_variable(name)?;
                self.instr(format!("mov rax, [rbp - {}]", offset));
                Ok(())
            }
            Expr::Assign { name, value } => {
                self.codegen_expr(value)?;
                let offset = self.lookup_variable(name)?;
                // The assigned value stays in rax, so `a = b = 1` chains.
                self.instr(format!("mov [rbp - {}], rax", offset));
                Ok(())
            }
            Expr::Unary { op, operand } => self.codegen_unary(*op, operand),
            Expr::Binary { op, left, right } => match op {
                BinaryOp::And | BinaryOp::Or => self.codegen_logical(*op, left, right),
                _ => self.codegen_binary(*op, left, right),
            },
            Expr::Ternary {
                cond,
                then_expr,
                else_expr,
            } => self.codegen_ternary(cond, then_expr, else_expr),
            Expr::Call { name, args } => self.codegen_call(name, args),
        }
    }

    fn codegen_unary(&mut self, op: UnaryOp, operand: &Expr) -> Result<(), CodeGenError> {
        self.codegen_expr(operand)?;
        match op {
            UnaryOp::Neg => self.instr("neg rax"),
            UnaryOp::BitNot => self.instr("not rax"),
            UnaryOp::Not => {
                self.instr("cmp rax, 0");
                self.instr("sete al");
                self.instr("movzx rax, al");
            }
        }
        Ok(())
    }

    /// Short-circuiting `&&` / `||`.
    ///
    /// The right operand is only reached when the left did not already
    /// decide the result; the join then squeezes whatever is in rax down to
    /// a strict 0/1 boolean, matching C semantics on both paths.
    fn codegen_logical(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
    ) -> Result<(), CodeGenError> {
        let end_label = self.fresh_label("logical_end");

        self.codegen_expr(left)?;
        self.instr("cmp rax, 0");
        match op {
            BinaryOp::Or => self.instr(format!("jne {}", end_label)),
            BinaryOp::And => self.instr(format!("je {}", end_label)),
            _ => unreachable!("codegen_logical only handles && and ||"),
        }
        self.codegen_expr(right)?;
        self.label(&end_label);

        self.instr("cmp rax, 0");
        self.instr("setne al");
        self.instr("movzx rax, al");
        Ok(())
    }

    fn codegen_binary(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
    ) -> Result<(), CodeGenError> {
        self.codegen_expr(left)?;
        self.instr("push rax");
        self.codegen_expr(right)?;
        // rbx = LEFT, rax = RIGHT from here on.
        self.instr("pop rbx");

        match op {
            BinaryOp::Add => self.instr("add rax, rbx"),
            BinaryOp::Sub => {
                self.instr("sub rbx, rax");
                self.instr("mov rax, rbx");
            }
            // One-operand form: rdx:rax = rax * rbx, truncated to rax.
            BinaryOp::Mul => self.instr("imul rbx"),
            BinaryOp::Div => self.emit_division(),
            BinaryOp::Rem => {
                self.emit_division();
                self.instr("mov rax, rdx");
            }
            BinaryOp::BitAnd => self.instr("and rax, rbx"),
            BinaryOp::BitOr => self.instr("or rax, rbx"),
            BinaryOp::BitXor => self.instr("xor rax, rbx"),
            BinaryOp::ShiftLeft => {
                self.emit_shift_operands();
                self.instr("shl rax, cl");
            }
            // All values are signed 64-bit, so >> is arithmetic.
            BinaryOp::ShiftRight => {
                self.emit_shift_operands();
                self.instr("sar rax, cl");
            }
            BinaryOp::Eq => self.emit_comparison("sete"),
            BinaryOp::Ne => self.emit_comparison("setne"),
            BinaryOp::Lt => self.emit_comparison("setl"),
            BinaryOp::Le => self.emit_comparison("setle"),
            BinaryOp::Gt => self.emit_comparison("setg"),
            BinaryOp::Ge => self.emit_comparison("setge"),
            BinaryOp::And | BinaryOp::Or => {
                unreachable!("short-circuit operators lower via codegen_logical")
            }
        }
        Ok(())
    }

    /// Signed division of LEFT by RIGHT: quotient in rax, remainder in rdx.
    fn emit_division(&mut self) {
        self.instr("mov rcx, rax"); // divisor
        self.instr("mov rax, rbx"); // dividend
        self.instr("cqo"); // sign-extend rax into rdx:rax
        self.instr("idiv rcx");
    }

    /// Shift count into cl, shifted value into rax.
    fn emit_shift_operands(&mut self) {
        self.instr("mov rcx, rax");
        self.instr("mov rax, rbx");
    }

    /// Flags from LEFT cmp RIGHT, then a 0/1 result via setCC.
    fn emit_comparison(&mut self, set_instr: &str) {
        self.instr("cmp rbx, rax");
        self.instr(format!("{} al", set_instr));
        self.instr("movzx rax, al");
    }

    fn codegen_ternary(
        &mut self,
        cond: &Expr,
        then_expr: &Expr,
        else_expr: &Expr,
    ) -> Result<(), CodeGenError> {
        let end_label = self.fresh_label("end");
        let else_label = self.fresh_label("else");

        self.codegen_expr(cond)?;
        self.instr("cmp rax, 0");
        self.instr(format!("je {}", else_label));

        self.codegen_expr(then_expr)?;
        self.instr(format!("jmp {}", end_label));

        self.label(&else_label);
        self.codegen_expr(else_expr)?;

        self.label(&end_label);
        Ok(())
    }
}
