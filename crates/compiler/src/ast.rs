//! Abstract syntax tree for the C subset
//!
//! The tree is fully normalized at parse time: operator nodes carry operator
//! kinds rather than tokens, and name-bearing nodes carry plain identifier
//! strings. Every accepted construct has exactly one variant, so the code
//! generator can match exhaustively.

use std::fmt;

/// A whole translation unit: an ordered sequence of prototypes and
/// definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub items: Vec<Item>,
}

impl Program {
    pub fn new() -> Self {
        Program { items: Vec::new() }
    }

    /// Find a function definition by name.
    pub fn find_definition(&self, name: &str) -> Option<&FunctionDef> {
        self.items.iter().find_map(|item| match item {
            Item::Definition(def) if def.name == name => Some(def),
            _ => None,
        })
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

/// A top-level item: a bodiless prototype or a full definition.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Declaration(FunctionDecl),
    Definition(FunctionDef),
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Item::Declaration(decl) => &decl.name,
            Item::Definition(def) => &def.name,
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Item::Declaration(decl) => decl.params.len(),
            Item::Definition(def) => def.params.len(),
        }
    }
}

/// Forward declaration: `int add(int a, int b);`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Param>,
}

/// Function definition with a body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<Param>,
    pub body: Block,
}

/// A formal parameter. The only type is the machine word, so the name is
/// all there is to record.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
}

/// A brace-delimited statement sequence with its own scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `int x;` or `int x = expr;`
    Declaration { name: String, init: Option<Expr> },
    /// `return;` or `return expr;`
    Return(Option<Expr>),
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        update: Option<Expr>,
        body: Box<Stmt>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        cond: Expr,
    },
    Break,
    Continue,
    Block(Block),
    /// An expression evaluated for its effect, e.g. `x = 1;` or `f();`
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IntLit(i64),
    Var(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `name = value`; the target must be a bare identifier.
    Assign {
        name: String,
        value: Box<Expr>,
    },
    Ternary {
        cond: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-`
    Neg,
    /// `!`
    Not,
    /// `~`
    BitNot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
    /// Short-circuiting `&&`
    And,
    /// Short-circuiting `||`
    Or,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
        };
        f.write_str(s)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        };
        f.write_str(s)
    }
}

/// Render a program as an indented tree, one node per line.
///
/// Debugging aid behind the `-p/--parse` flag; nothing downstream consumes
/// this format.
pub fn format_program(program: &Program) -> String {
    let mut out = String::new();
    out.push_str("Program\n");
    for item in &program.items {
        match item {
            Item::Declaration(decl) => {
                out.push_str(&format!(
                    "  FunctionDecl: int {}/{}\n",
                    decl.name,
                    decl.params.len()
                ));
            }
            Item::Definition(def) => {
                out.push_str(&format!("  Function: int {}\n", def.name));
                if !def.params.is_empty() {
                    out.push_str("    Parameters:\n");
                    for param in &def.params {
                        out.push_str(&format!("      {}\n", param.name));
                    }
                }
                out.push_str("    Body:\n");
                for stmt in &def.body.statements {
                    write_stmt(&mut out, stmt, 3);
                }
            }
        }
    }
    out
}

fn pad(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn write_stmt(out: &mut String, stmt: &Stmt, depth: usize) {
    pad(out, depth);
    match stmt {
        Stmt::Declaration { name, init } => {
            out.push_str(&format!("Declaration: {}\n", name));
            if let Some(expr) = init {
                pad(out, depth + 1);
                out.push_str("Initializer:\n");
                write_expr(out, expr, depth + 2);
            }
        }
        Stmt::Return(expr) => {
            out.push_str("Return:\n");
            if let Some(expr) = expr {
                write_expr(out, expr, depth + 1);
            }
        }
        Stmt::If {
            cond,
            then_branch,
            else_branch,
        } => {
            out.push_str("If:\n");
            pad(out, depth + 1);
            out.push_str("Condition:\n");
            write_expr(out, cond, depth + 2);
            pad(out, depth + 1);
            out.push_str("Then:\n");
            write_stmt(out, then_branch, depth + 2);
            if let Some(else_branch) = else_branch {
                pad(out, depth + 1);
                out.push_str("Else:\n");
                write_stmt(out, else_branch, depth + 2);
            }
        }
        Stmt::For {
            init,
            cond,
            update,
            body,
        } => {
            out.push_str("For:\n");
            if let Some(init) = init {
                pad(out, depth + 1);
                out.push_str("Init:\n");
                write_stmt(out, init, depth + 2);
            }
            if let Some(cond) = cond {
                pad(out, depth + 1);
                out.push_str("Condition:\n");
                write_expr(out, cond, depth + 2);
            }
            if let Some(update) = update {
                pad(out, depth + 1);
                out.push_str("Update:\n");
                write_expr(out, update, depth + 2);
            }
            write_stmt(out, body, depth + 1);
        }
        Stmt::While { cond, body } => {
            out.push_str("While:\n");
            pad(out, depth + 1);
            out.push_str("Condition:\n");
            write_expr(out, cond, depth + 2);
            write_stmt(out, body, depth + 1);
        }
        Stmt::DoWhile { body, cond } => {
            out.push_str("Do:\n");
            write_stmt(out, body, depth + 1);
            pad(out, depth + 1);
            out.push_str("While:\n");
            write_expr(out, cond, depth + 2);
        }
        Stmt::Break => out.push_str("Break\n"),
        Stmt::Continue => out.push_str("Continue\n"),
        Stmt::Block(block) => {
            out.push_str("Block:\n");
            for stmt in &block.statements {
                write_stmt(out, stmt, depth + 1);
            }
        }
        Stmt::Expr(expr) => {
            out.push_str("ExprStmt:\n");
            write_expr(out, expr, depth + 1);
        }
    }
}

fn write_expr(out: &mut String, expr: &Expr, depth: usize) {
    pad(out, depth);
    match expr {
        Expr::IntLit(value) => out.push_str(&format!("Number: {}\n", value)),
        Expr::Var(name) => out.push_str(&format!("Variable: {}\n", name)),
        Expr::Unary { op, operand } => {
            out.push_str(&format!("Unary: {}\n", op));
            write_expr(out, operand, depth + 1);
        }
        Expr::Binary { op, left, right } => {
            out.push_str(&format!("Binary: {}\n", op));
            write_expr(out, left, depth + 1);
            write_expr(out, right, depth + 1);
        }
        Expr::Assign { name, value } => {
            out.push_str(&format!("Assign: {}\n", name));
            write_expr(out, value, depth + 1);
        }
        Expr::Ternary {
            cond,
            then_expr,
            else_expr,
        } => {
            out.push_str("Ternary:\n");
            write_expr(out, cond, depth + 1);
            write_expr(out, then_expr, depth + 1);
            write_expr(out, else_expr, depth + 1);
        }
        Expr::Call { name, args } => {
            out.push_str(&format!("Call: {}\n", name));
            for arg in args {
                write_expr(out, arg, depth + 1);
            }
        }
    }
}
