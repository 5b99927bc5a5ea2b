//! Recursive-descent parser for the C subset
//!
//! Consumes the token stream left-to-right with one token of lookahead and
//! builds the typed AST. The precedence cascade is the grammar's dominant
//! design point and is spelled out one method per tier, lowest binding
//! first:
//!
//! ```text
//! expression  = assignment
//! assignment  = ternary ( "=" assignment )?          right-assoc
//! ternary     = bit_or ( "?" expression ":" ternary )?
//! bit_or      = bit_xor ( "|" bit_xor )*
//! bit_xor     = bit_and ( "^" bit_and )*
//! bit_and     = log_or ( "&" log_or )*
//! log_or      = log_and ( "||" log_and )*
//! log_and     = equality ( "&&" equality )*
//! equality    = relation ( ("==" | "!=") relation )*
//! relation    = shift ( ("<" | ">" | "<=" | ">=") shift )*
//! shift       = additive ( ("<<" | ">>") additive )*
//! additive    = term ( ("+" | "-") term )*
//! term        = factor ( ("*" | "/" | "%") factor )*
//! factor      = "(" expression ")" | ("!" | "~" | "-") factor
//!             | NUMBER | IDENT ( "(" arguments? ")" )?
//! ```
//!
//! All binary tiers are left-associative; only `?:` and `=` associate to
//! the right. Any token mismatch is a fatal parse error.

use crate::ast::{
    BinaryOp, Block, Expr, FunctionDecl, FunctionDef, Item, Param, Program, Stmt, UnaryOp,
};
use crate::lexer::{Token, TokenKind, tokenize};

/// Hard cap on call arguments.
const MAX_CALL_ARGS: usize = 255;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Lex `source` and set up a parser over the resulting tokens.
    pub fn new(source: &str) -> Result<Self, String> {
        let tokens = tokenize(source)?;
        Ok(Parser { tokens, pos: 0 })
    }

    /// Build a parser over an already-lexed token stream.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    pub fn parse(&mut self) -> Result<Program, String> {
        let mut program = Program::new();
        while self.check(TokenKind::Int) {
            program.items.push(self.function()?);
        }
        if !self.is_at_end() {
            return Err(format!(
                "Expected function definition, got '{}'",
                self.peek().text
            ));
        }
        Ok(program)
    }

    // ------------------------------------------------------------------
    // Token stream helpers
    // ------------------------------------------------------------------

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.pos - 1]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        self.previous()
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consume the next token if it has the given kind.
    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            return true;
        }
        false
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> Result<&Token, String> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        Err(message.to_string())
    }

    fn describe_current(&self) -> String {
        if self.is_at_end() {
            "end of input".to_string()
        } else {
            format!("'{}'", self.peek().text)
        }
    }

    // ------------------------------------------------------------------
    // Items
    // ------------------------------------------------------------------

    fn function(&mut self) -> Result<Item, String> {
        self.consume(TokenKind::Int, "Expected function return type.")?;
        let name = self
            .consume(TokenKind::Identifier, "Expected function name.")?
            .text
            .clone();
        self.consume(TokenKind::LeftParen, "Expected '(' after function name.")?;
        let params = self.parameter_list()?;
        self.consume(TokenKind::RightParen, "Expected ')' after parameters.")?;

        if self.matches(TokenKind::Semicolon) {
            return Ok(Item::Declaration(FunctionDecl { name, params }));
        }
        if self.check(TokenKind::LeftBrace) {
            let body = self.block()?;
            return Ok(Item::Definition(FunctionDef { name, params, body }));
        }
        Err("Expected ';' or '{' after function signature.".to_string())
    }

    fn parameter_list(&mut self) -> Result<Vec<Param>, String> {
        let mut params = Vec::new();
        if self.matches(TokenKind::Int) {
            let name = self
                .consume(TokenKind::Identifier, "Expected parameter name.")?
                .text
                .clone();
            params.push(Param { name });
            while self.matches(TokenKind::Comma) {
                self.consume(TokenKind::Int, "Expected parameter type.")?;
                let name = self
                    .consume(TokenKind::Identifier, "Expected parameter name.")?
                    .text
                    .clone();
                params.push(Param { name });
            }
        }
        Ok(params)
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn block(&mut self) -> Result<Block, String> {
        self.consume(TokenKind::LeftBrace, "Expected '{' before block.")?;
        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            statements.push(self.declaration_or_statement()?);
        }
        self.consume(TokenKind::RightBrace, "Expected '}' after block.")?;
        Ok(Block { statements })
    }

    fn declaration_or_statement(&mut self) -> Result<Stmt, String> {
        if self.matches(TokenKind::Int) {
            return self.declaration();
        }
        self.statement()
    }

    fn declaration(&mut self) -> Result<Stmt, String> {
        let name = self
            .consume(TokenKind::Identifier, "Expected variable name.")?
            .text
            .clone();
        let init = if self.matches(TokenKind::Assign) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(
            TokenKind::Semicolon,
            "Expected ';' after variable declaration.",
        )?;
        Ok(Stmt::Declaration { name, init })
    }

    fn statement(&mut self) -> Result<Stmt, String> {
        if self.matches(TokenKind::Return) {
            return self.return_statement();
        }
        if self.matches(TokenKind::If) {
            return self.if_statement();
        }
        if self.matches(TokenKind::For) {
            return self.for_statement();
        }
        if self.matches(TokenKind::While) {
            return self.while_statement();
        }
        if self.matches(TokenKind::Do) {
            return self.do_while_statement();
        }
        if self.matches(TokenKind::Break) {
            self.consume(TokenKind::Semicolon, "Expected ';' after break.")?;
            return Ok(Stmt::Break);
        }
        if self.matches(TokenKind::Continue) {
            self.consume(TokenKind::Semicolon, "Expected ';' after continue.")?;
            return Ok(Stmt::Continue);
        }
        if self.check(TokenKind::LeftBrace) {
            return Ok(Stmt::Block(self.block()?));
        }
        self.expression_statement()
    }

    fn expression_statement(&mut self) -> Result<Stmt, String> {
        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expected ';' after expression.")?;
        Ok(Stmt::Expr(expr))
    }

    fn return_statement(&mut self) -> Result<Stmt, String> {
        if self.matches(TokenKind::Semicolon) {
            return Ok(Stmt::Return(None));
        }
        let expr = self.expression()?;
        // Historical lenience: the ';' may be omitted when the return is the
        // last statement before a closing brace.
        if !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            self.consume(TokenKind::Semicolon, "Expected ';' after return statement.")?;
        }
        Ok(Stmt::Return(Some(expr)))
    }

    fn if_statement(&mut self) -> Result<Stmt, String> {
        self.consume(TokenKind::LeftParen, "Expected '(' after if.")?;
        let cond = self.expression()?;
        self.consume(TokenKind::RightParen, "Expected ')' after condition.")?;

        let then_branch = Box::new(self.statement_or_block()?);
        let else_branch = if self.matches(TokenKind::Else) {
            Some(Box::new(self.statement_or_block()?))
        } else {
            None
        };
        Ok(Stmt::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    fn for_statement(&mut self) -> Result<Stmt, String> {
        self.consume(TokenKind::LeftParen, "Expected '(' after for.")?;

        // The init clause swallows its own ';' (declarations and expression
        // statements both end in one).
        let init = if self.matches(TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.declaration_or_statement()?))
        };

        let cond = if self.matches(TokenKind::Semicolon) {
            None
        } else {
            let cond = self.expression()?;
            self.consume(TokenKind::Semicolon, "Expected ';' after loop condition.")?;
            Some(cond)
        };

        let update = if self.matches(TokenKind::RightParen) {
            None
        } else {
            let update = self.expression()?;
            self.consume(TokenKind::RightParen, "Expected ')' after for clauses.")?;
            Some(update)
        };

        let body = Box::new(self.statement_or_block()?);
        Ok(Stmt::For {
            init,
            cond,
            update,
            body,
        })
    }

    fn while_statement(&mut self) -> Result<Stmt, String> {
        self.consume(TokenKind::LeftParen, "Expected '(' after while.")?;
        let cond = self.expression()?;
        self.consume(TokenKind::RightParen, "Expected ')' after condition.")?;
        let body = Box::new(self.statement_or_block()?);
        Ok(Stmt::While { cond, body })
    }

    fn do_while_statement(&mut self) -> Result<Stmt, String> {
        let body = Box::new(self.statement_or_block()?);
        self.consume(TokenKind::While, "Expected 'while' after do body.")?;
        self.consume(TokenKind::LeftParen, "Expected '(' after while.")?;
        let cond = self.expression()?;
        self.consume(TokenKind::RightParen, "Expected ')' after condition.")?;
        self.consume(TokenKind::Semicolon, "Expected ';' after do-while.")?;
        Ok(Stmt::DoWhile { body, cond })
    }

    fn statement_or_block(&mut self) -> Result<Stmt, String> {
        if self.check(TokenKind::LeftBrace) {
            return Ok(Stmt::Block(self.block()?));
        }
        self.statement()
    }

    // ------------------------------------------------------------------
    // Expressions, lowest precedence first
    // ------------------------------------------------------------------

    fn expression(&mut self) -> Result<Expr, String> {
        self.assignment()
    }

    fn assignment(&mut self) -> Result<Expr, String> {
        let expr = self.ternary()?;
        if self.matches(TokenKind::Assign) {
            // Right-associative, and the target must be a bare identifier.
            return match expr {
                Expr::Var(name) => {
                    let value = Box::new(self.assignment()?);
                    Ok(Expr::Assign { name, value })
                }
                _ => Err("Invalid assignment target.".to_string()),
            };
        }
        Ok(expr)
    }

    fn ternary(&mut self) -> Result<Expr, String> {
        let expr = self.bit_or()?;
        if self.matches(TokenKind::Question) {
            let then_expr = Box::new(self.expression()?);
            self.consume(TokenKind::Colon, "Expected ':' in ternary expression.")?;
            let else_expr = Box::new(self.ternary()?);
            return Ok(Expr::Ternary {
                cond: Box::new(expr),
                then_expr,
                else_expr,
            });
        }
        Ok(expr)
    }

    fn bit_or(&mut self) -> Result<Expr, String> {
        let mut expr = self.bit_xor()?;
        while self.matches(TokenKind::Pipe) {
            let right = self.bit_xor()?;
            expr = binary(BinaryOp::BitOr, expr, right);
        }
        Ok(expr)
    }

    fn bit_xor(&mut self) -> Result<Expr, String> {
        let mut expr = self.bit_and()?;
        while self.matches(TokenKind::Caret) {
            let right = self.bit_and()?;
            expr = binary(BinaryOp::BitXor, expr, right);
        }
        Ok(expr)
    }

    fn bit_and(&mut self) -> Result<Expr, String> {
        let mut expr = self.logical_or()?;
        while self.matches(TokenKind::Ampersand) {
            let right = self.logical_or()?;
            expr = binary(BinaryOp::BitAnd, expr, right);
        }
        Ok(expr)
    }

    fn logical_or(&mut self) -> Result<Expr, String> {
        let mut expr = self.logical_and()?;
        while self.matches(TokenKind::OrOr) {
            let right = self.logical_and()?;
            expr = binary(BinaryOp::Or, expr, right);
        }
        Ok(expr)
    }

    fn logical_and(&mut self) -> Result<Expr, String> {
        let mut expr = self.equality()?;
        while self.matches(TokenKind::AndAnd) {
            let right = self.equality()?;
            expr = binary(BinaryOp::And, expr, right);
        }
        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr, String> {
        let mut expr = self.relation()?;
        loop {
            let op = if self.matches(TokenKind::EqualEqual) {
                BinaryOp::Eq
            } else if self.matches(TokenKind::BangEqual) {
                BinaryOp::Ne
            } else {
                break;
            };
            let right = self.relation()?;
            expr = binary(op, expr, right);
        }
        Ok(expr)
    }

    fn relation(&mut self) -> Result<Expr, String> {
        let mut expr = self.shift()?;
        loop {
            let op = if self.matches(TokenKind::Less) {
                BinaryOp::Lt
            } else if self.matches(TokenKind::LessEqual) {
                BinaryOp::Le
            } else if self.matches(TokenKind::Greater) {
                BinaryOp::Gt
            } else if self.matches(TokenKind::GreaterEqual) {
                BinaryOp::Ge
            } else {
                break;
            };
            let right = self.shift()?;
            expr = binary(op, expr, right);
        }
        Ok(expr)
    }

    fn shift(&mut self) -> Result<Expr, String> {
        let mut expr = self.additive()?;
        loop {
            let op = if self.matches(TokenKind::ShiftLeft) {
                BinaryOp::ShiftLeft
            } else if self.matches(TokenKind::ShiftRight) {
                BinaryOp::ShiftRight
            } else {
                break;
            };
            let right = self.additive()?;
            expr = binary(op, expr, right);
        }
        Ok(expr)
    }

    fn additive(&mut self) -> Result<Expr, String> {
        let mut expr = self.term()?;
        loop {
            let op = if self.matches(TokenKind::Plus) {
                BinaryOp::Add
            } else if self.matches(TokenKind::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };
            let right = self.term()?;
            expr = binary(op, expr, right);
        }
        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr, String> {
        let mut expr = self.factor()?;
        loop {
            let op = if self.matches(TokenKind::Star) {
                BinaryOp::Mul
            } else if self.matches(TokenKind::Slash) {
                BinaryOp::Div
            } else if self.matches(TokenKind::Percent) {
                BinaryOp::Rem
            } else {
                break;
            };
            let right = self.factor()?;
            expr = binary(op, expr, right);
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr, String> {
        if self.matches(TokenKind::LeftParen) {
            let expr = self.expression()?;
            self.consume(TokenKind::RightParen, "Expected ')' after expression.")?;
            return Ok(expr);
        }

        let unary_op = if self.matches(TokenKind::Bang) {
            Some(UnaryOp::Not)
        } else if self.matches(TokenKind::Tilde) {
            Some(UnaryOp::BitNot)
        } else if self.matches(TokenKind::Minus) {
            Some(UnaryOp::Neg)
        } else {
            None
        };
        if let Some(op) = unary_op {
            let operand = Box::new(self.factor()?);
            return Ok(Expr::Unary { op, operand });
        }

        if self.matches(TokenKind::Number) {
            let text = &self.previous().text;
            let value: i64 = text
                .parse()
                .map_err(|_| format!("Integer literal out of range: {}", text))?;
            return Ok(Expr::IntLit(value));
        }

        if self.matches(TokenKind::Identifier) {
            let name = self.previous().text.clone();
            if self.check(TokenKind::LeftParen) {
                return self.call(name);
            }
            return Ok(Expr::Var(name));
        }

        Err(format!("Expected expression, got {}.", self.describe_current()))
    }

    fn call(&mut self, name: String) -> Result<Expr, String> {
        self.consume(TokenKind::LeftParen, "Expected '(' after function name.")?;
        let mut args = Vec::new();
        if !self.check(TokenKind::RightParen) {
            args.push(self.expression()?);
            while self.matches(TokenKind::Comma) {
                if args.len() >= MAX_CALL_ARGS {
                    return Err("Cannot have more than 255 arguments.".to_string());
                }
                args.push(self.expression()?);
            }
        }
        self.consume(TokenKind::RightParen, "Expected ')' after arguments.")?;
        Ok(Expr::Call { name, args })
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_program(source: &str) -> Program {
        Parser::new(source).unwrap().parse().unwrap()
    }

    fn parse_error(source: &str) -> String {
        Parser::new(source).unwrap().parse().unwrap_err()
    }

    /// Parse a full expression out of an expression-only source snippet.
    fn parse_expr(source: &str) -> Expr {
        let mut parser = Parser::new(source).unwrap();
        let expr = parser.expression().unwrap();
        assert!(parser.is_at_end(), "expression did not consume all tokens");
        expr
    }

    fn int(value: i64) -> Expr {
        Expr::IntLit(value)
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        assert_eq!(
            parse_expr("1 + 2 * 3"),
            binary(BinaryOp::Add, int(1), binary(BinaryOp::Mul, int(2), int(3)))
        );
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        assert_eq!(
            parse_expr("1 - 2 - 3"),
            binary(BinaryOp::Sub, binary(BinaryOp::Sub, int(1), int(2)), int(3))
        );
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert_eq!(
            parse_expr("a = b = 1"),
            Expr::Assign {
                name: "a".to_string(),
                value: Box::new(Expr::Assign {
                    name: "b".to_string(),
                    value: Box::new(int(1)),
                }),
            }
        );
    }

    #[test]
    fn test_logical_and_binds_tighter_than_or() {
        assert_eq!(
            parse_expr("1 || 2 && 3"),
            binary(BinaryOp::Or, int(1), binary(BinaryOp::And, int(2), int(3)))
        );
    }

    #[test]
    fn test_bitwise_tier_sits_above_logical_tier() {
        // In this grammar `|` binds looser than `||` (the historical
        // cascade): `1 | 2 || 3` is Or under BitOr.
        assert_eq!(
            parse_expr("1 | 2 || 3"),
            binary(BinaryOp::BitOr, int(1), binary(BinaryOp::Or, int(2), int(3)))
        );
    }

    #[test]
    fn test_shift_binds_tighter_than_relation() {
        assert_eq!(
            parse_expr("1 << 2 < 3"),
            binary(
                BinaryOp::Lt,
                binary(BinaryOp::ShiftLeft, int(1), int(2)),
                int(3)
            )
        );
    }

    #[test]
    fn test_ternary_is_right_associative() {
        assert_eq!(
            parse_expr("1 ? 2 : 3 ? 4 : 5"),
            Expr::Ternary {
                cond: Box::new(int(1)),
                then_expr: Box::new(int(2)),
                else_expr: Box::new(Expr::Ternary {
                    cond: Box::new(int(3)),
                    then_expr: Box::new(int(4)),
                    else_expr: Box::new(int(5)),
                }),
            }
        );
    }

    #[test]
    fn test_unary_operators_nest() {
        assert_eq!(
            parse_expr("!~-1"),
            Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(Expr::Unary {
                    op: UnaryOp::BitNot,
                    operand: Box::new(Expr::Unary {
                        op: UnaryOp::Neg,
                        operand: Box::new(int(1)),
                    }),
                }),
            }
        );
    }

    #[test]
    fn test_parenthesized_grouping_overrides_precedence() {
        assert_eq!(
            parse_expr("(1 + 2) * 3"),
            binary(BinaryOp::Mul, binary(BinaryOp::Add, int(1), int(2)), int(3))
        );
    }

    #[test]
    fn test_invalid_assignment_target_is_fatal() {
        let mut parser = Parser::new("1 = 2").unwrap();
        let err = parser.expression().unwrap_err();
        assert_eq!(err, "Invalid assignment target.");

        let mut parser = Parser::new("a + b = 2").unwrap();
        let err = parser.expression().unwrap_err();
        assert_eq!(err, "Invalid assignment target.");
    }

    #[test]
    fn test_program_with_declaration_and_definition() {
        let program =
            parse_program("int add(int a, int b); int main() { return add(3, 4); }");
        assert_eq!(program.items.len(), 2);
        match &program.items[0] {
            Item::Declaration(decl) => {
                assert_eq!(decl.name, "add");
                assert_eq!(decl.params.len(), 2);
                assert_eq!(decl.params[0].name, "a");
            }
            other => panic!("expected declaration, got {:?}", other),
        }
        let main = program.find_definition("main").unwrap();
        assert_eq!(main.body.statements.len(), 1);
    }

    #[test]
    fn test_return_semicolon_optional_before_closing_brace() {
        let program = parse_program("int main() { return 2 }");
        let main = program.find_definition("main").unwrap();
        assert_eq!(main.body.statements, vec![Stmt::Return(Some(int(2)))]);

        // The semicolon form parses identically.
        assert_eq!(parse_program("int main() { return 2; }"), program);
    }

    #[test]
    fn test_return_without_expression() {
        let program = parse_program("int main() { return; }");
        let main = program.find_definition("main").unwrap();
        assert_eq!(main.body.statements, vec![Stmt::Return(None)]);
    }

    #[test]
    fn test_missing_semicolon_mid_block_is_fatal() {
        let err = parse_error("int main() { return 2 return 3; }");
        assert!(err.contains("Expected ';'"), "got: {}", err);
    }

    #[test]
    fn test_for_loop_clauses() {
        let program =
            parse_program("int main() { for (int i = 0; i < 10; i = i + 1) { } return 0; }");
        let main = program.find_definition("main").unwrap();
        match &main.body.statements[0] {
            Stmt::For {
                init,
                cond,
                update,
                body,
            } => {
                assert!(matches!(init.as_deref(), Some(Stmt::Declaration { .. })));
                assert!(matches!(cond, Some(Expr::Binary { .. })));
                assert!(matches!(update, Some(Expr::Assign { .. })));
                assert!(matches!(body.as_ref(), Stmt::Block(_)));
            }
            other => panic!("expected for loop, got {:?}", other),
        }
    }

    #[test]
    fn test_for_loop_all_clauses_empty() {
        let program = parse_program("int main() { for (;;) break; return 0; }");
        let main = program.find_definition("main").unwrap();
        match &main.body.statements[0] {
            Stmt::For {
                init,
                cond,
                update,
                body,
            } => {
                assert!(init.is_none());
                assert!(cond.is_none());
                assert!(update.is_none());
                assert_eq!(body.as_ref(), &Stmt::Break);
            }
            other => panic!("expected for loop, got {:?}", other),
        }
    }

    #[test]
    fn test_do_while_statement() {
        let program = parse_program("int main() { int n = 0; do { n = n + 1; } while (n < 3); return n; }");
        let main = program.find_definition("main").unwrap();
        assert!(matches!(main.body.statements[1], Stmt::DoWhile { .. }));
    }

    #[test]
    fn test_if_without_braces_takes_single_statement() {
        let program = parse_program("int main() { if (1) return 2; else return 3; }");
        let main = program.find_definition("main").unwrap();
        match &main.body.statements[0] {
            Stmt::If {
                then_branch,
                else_branch,
                ..
            } => {
                assert!(matches!(then_branch.as_ref(), Stmt::Return(_)));
                assert!(matches!(
                    else_branch.as_deref(),
                    Some(Stmt::Return(_))
                ));
            }
            other => panic!("expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_call_with_no_arguments() {
        assert_eq!(
            parse_expr("f()"),
            Expr::Call {
                name: "f".to_string(),
                args: vec![],
            }
        );
    }

    #[test]
    fn test_too_many_arguments_is_fatal() {
        let args: Vec<String> = (0..300).map(|i| i.to_string()).collect();
        let source = format!("f({})", args.join(", "));
        let mut parser = Parser::new(&source).unwrap();
        let err = parser.expression().unwrap_err();
        assert_eq!(err, "Cannot have more than 255 arguments.");
    }

    #[test]
    fn test_integer_literal_out_of_range() {
        let mut parser = Parser::new("99999999999999999999").unwrap();
        let err = parser.expression().unwrap_err();
        assert!(err.contains("out of range"), "got: {}", err);
    }

    #[test]
    fn test_trailing_garbage_after_functions_is_fatal() {
        let err = parse_error("int main() { return 0; } 42");
        assert!(err.contains("Expected function definition"), "got: {}", err);
    }

    #[test]
    fn test_missing_expression_is_fatal() {
        let err = parse_error("int main() { return +; }");
        assert!(err.contains("Expected expression"), "got: {}", err);
    }
}
