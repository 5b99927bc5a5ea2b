//! Regex-driven scanner for the C subset
//!
//! Turns source text into a flat token stream terminated by an EOF sentinel.
//! The vocabulary is a single alternation compiled once per process; maximal
//! munch falls out of the alternation order (the regex engine prefers the
//! leftmost alternative, so every two-character operator is listed ahead of
//! its one-character prefix).

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// The closed set of terminal symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Structural
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    Semicolon,
    Comma,

    // Keywords
    Int,
    Return,
    If,
    Else,
    For,
    While,
    Do,
    Break,
    Continue,

    // Literals and names
    Identifier,
    Number,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Tilde,
    Bang,
    Ampersand,
    Pipe,
    Caret,
    ShiftLeft,
    ShiftRight,
    AndAnd,
    OrOr,
    EqualEqual,
    BangEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Assign,
    Question,
    Colon,

    /// End-of-stream sentinel, always the last token.
    Eof,
}

/// A terminal symbol: its kind and the exact source text it was cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    fn new(kind: TokenKind, text: &str) -> Self {
        Token {
            kind,
            text: text.to_string(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({:?}, {:?})", self.kind, self.text)
    }
}

/// Token vocabulary as one alternation.
///
/// Order matters twice over: keywords are tried (with word boundaries)
/// before the identifier rule, and every two-character operator comes
/// before the one-character operator that is its prefix.
const TOKEN_PATTERN: &str = concat!(
    r"\{|\}|\(|\)|;|,",
    r"|\b(?:int|return|if|else|for|while|do|break|continue)\b",
    r"|[A-Za-z_][A-Za-z0-9_]*",
    r"|[0-9]+",
    r"|<<|>>|<=|>=|==|!=|&&|\|\|",
    r"|[-+*/%~!&|^<>=?:]",
);

fn token_regex() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is valid"))
}

/// Classify a lexeme the vocabulary regex matched.
///
/// Total by construction: every match is either an exact symbol, a keyword,
/// a digit run, or an identifier.
fn classify(text: &str) -> TokenKind {
    match text {
        "{" => TokenKind::LeftBrace,
        "}" => TokenKind::RightBrace,
        "(" => TokenKind::LeftParen,
        ")" => TokenKind::RightParen,
        ";" => TokenKind::Semicolon,
        "," => TokenKind::Comma,
        "int" => TokenKind::Int,
        "return" => TokenKind::Return,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "for" => TokenKind::For,
        "while" => TokenKind::While,
        "do" => TokenKind::Do,
        "break" => TokenKind::Break,
        "continue" => TokenKind::Continue,
        "+" => TokenKind::Plus,
        "-" => TokenKind::Minus,
        "*" => TokenKind::Star,
        "/" => TokenKind::Slash,
        "%" => TokenKind::Percent,
        "~" => TokenKind::Tilde,
        "!" => TokenKind::Bang,
        "&" => TokenKind::Ampersand,
        "|" => TokenKind::Pipe,
        "^" => TokenKind::Caret,
        "<<" => TokenKind::ShiftLeft,
        ">>" => TokenKind::ShiftRight,
        "&&" => TokenKind::AndAnd,
        "||" => TokenKind::OrOr,
        "==" => TokenKind::EqualEqual,
        "!=" => TokenKind::BangEqual,
        "<" => TokenKind::Less,
        "<=" => TokenKind::LessEqual,
        ">" => TokenKind::Greater,
        ">=" => TokenKind::GreaterEqual,
        "=" => TokenKind::Assign,
        "?" => TokenKind::Question,
        ":" => TokenKind::Colon,
        _ if text.starts_with(|c: char| c.is_ascii_digit()) => TokenKind::Number,
        _ => TokenKind::Identifier,
    }
}

/// Scan source text into an ordered token sequence ending in `Eof`.
///
/// Whitespace is skipped; there are no comments. Any character the
/// vocabulary cannot account for is a fatal lexical error.
pub fn tokenize(source: &str) -> Result<Vec<Token>, String> {
    let re = token_regex();
    let mut tokens = Vec::new();
    let mut pos = 0;

    for m in re.find_iter(source) {
        // The regex silently skips what it cannot match; any non-whitespace
        // in the gap between matches is an unrecognized character.
        check_gap(&source[pos..m.start()])?;
        let text = m.as_str();
        tokens.push(Token::new(classify(text), text));
        pos = m.end();
    }
    check_gap(&source[pos..])?;

    tokens.push(Token::new(TokenKind::Eof, ""));
    Ok(tokens)
}

fn check_gap(gap: &str) -> Result<(), String> {
    match gap.chars().find(|c| !c.is_whitespace()) {
        Some(bad) => Err(format!("Unexpected character '{}' in input", bad)),
        None => Ok(()),
    }
}
