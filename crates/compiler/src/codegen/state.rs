//! CodeGen state and core types
//!
//! The CodeGen struct owns everything the single-pass traversal mutates:
//! the assembly line buffer, the scope stack, the loop stack, and the
//! label counter.

use super::CodeGenError;
use std::collections::{HashMap, HashSet};

/// System V AMD64 integer argument registers, in passing order.
pub(super) const ARG_REGISTERS: [&str; 6] = ["rdi", "rsi", "rdx", "rcx", "r8", "r9"];

/// Jump targets for the innermost enclosing loop.
///
/// `continue` lands on the loop's iteration point (the update expression of
/// a `for`, the condition of a `do`, the top of a `while`); `break` lands
/// just past the loop.
pub(super) struct LoopLabels {
    pub continue_label: String,
    pub break_label: String,
}

pub struct CodeGen {
    /// Emitted assembly, one line per entry, prelude first.
    pub(super) lines: Vec<String>,
    /// Lexical scopes for locals: name -> positive byte offset below rbp.
    /// The innermost frame is last.
    pub(super) scopes: Vec<HashMap<String, i64>>,
    /// Known functions (prototypes and definitions): name -> arity.
    /// Kept apart from the local scopes; the two namespaces never mix.
    pub(super) functions: HashMap<String, usize>,
    /// Names with a definition in this translation unit.
    pub(super) defined: HashSet<String>,
    /// Call targets with neither prototype nor definition, in first-call
    /// order. They get `extern` directives alongside undefined prototypes.
    pub(super) undeclared_calls: Vec<String>,
    pub(super) loop_stack: Vec<LoopLabels>,
    /// Next local slot, in bytes below rbp. Grows on declaration, shrinks
    /// on scope exit.
    pub(super) stack_index: i64,
    /// Shared counter behind every generated label.
    pub(super) label_count: usize,
    /// Epilogue label of the function currently being lowered.
    pub(super) function_end: String,
}

impl Default for CodeGen {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGen {
    pub fn new() -> Self {
        CodeGen {
            lines: Vec::new(),
            scopes: Vec::new(),
            functions: HashMap::new(),
            defined: HashSet::new(),
            undeclared_calls: Vec::new(),
            loop_stack: Vec::new(),
            stack_index: 0,
            label_count: 0,
            function_end: String::new(),
        }
    }

    /// Emit a line verbatim (directives and labels).
    pub(super) fn raw(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Emit an indented instruction line.
    pub(super) fn instr(&mut self, text: impl Into<String>) {
        self.lines.push(format!("    {}", text.into()));
    }

    /// Emit a local label definition.
    pub(super) fn label(&mut self, name: &str) {
        self.lines.push(format!("{}:", name));
    }

    /// Mint a unique local label. One counter serves every prefix, so no
    /// two labels in a translation unit ever collide.
    pub(super) fn fresh_label(&mut self, prefix: &str) -> String {
        self.label_count += 1;
        format!(".{}_{}", prefix, self.label_count)
    }

    pub(super) fn enter_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Pop the innermost frame, releasing its slots both in the offset
    /// accounting and on the machine stack.
    pub(super) fn exit_scope(&mut self) {
        let frame = self.scopes.pop().unwrap_or_default();
        if !frame.is_empty() {
            self.stack_index -= 8 * frame.len() as i64;
            self.instr(format!("add rsp, {}", 8 * frame.len()));
        }
    }

    pub(super) fn enter_loop(&mut self, continue_label: String, break_label: String) {
        self.loop_stack.push(LoopLabels {
            continue_label,
            break_label,
        });
    }

    pub(super) fn exit_loop(&mut self) {
        self.loop_stack.pop();
    }

    /// Allocate the next 8-byte slot and bind `name` to it in the
    /// innermost frame.
    pub(super) fn bind_local(&mut self, name: &str) -> i64 {
        self.stack_index += 8;
        if let Some(frame) = self.scopes.last_mut() {
            frame.insert(name.to_string(), self.stack_index);
        }
        self.stack_index
    }

    /// Innermost-first lookup of a local or parameter.
    pub(super) fn lookup_variable(&self, name: &str) -> Result<i64, CodeGenError> {
        for frame in self.scopes.iter().rev() {
            if let Some(&offset) = frame.get(name) {
                return Ok(offset);
            }
        }
        if self.functions.contains_key(name) {
            return Err(CodeGenError::NotAVariable(name.to_string()));
        }
        Err(CodeGenError::UndefinedVariable(name.to_string()))
    }

    /// True when `name` is bound as a local or parameter in any live scope.
    pub(super) fn is_local(&self, name: &str) -> bool {
        self.scopes.iter().any(|frame| frame.contains_key(name))
    }

    /// Remember a call target that has no prototype and no definition; it
    /// becomes an `extern` when the program is assembled.
    pub(super) fn record_undeclared_call(&mut self, name: &str) {
        if !self.undeclared_calls.iter().any(|n| n == name) {
            self.undeclared_calls.push(name.to_string());
        }
    }
}
