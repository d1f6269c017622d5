use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    /// Reserved word spellings paired directly with their token kinds.
    ///
    /// The identifier matcher is a superset of every keyword spelling, so
    /// reclassification happens inside the identifier handler via this table.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("our", TokenKind::Our);
        map.insert("my", TokenKind::My);
        map.insert("let", TokenKind::Let);
        map.insert("var", TokenKind::Var);
        map.insert("native", TokenKind::Native);
        map.insert("force", TokenKind::Force);
        map.insert("pkg", TokenKind::Pkg);
        map.insert("import", TokenKind::Import);
        map.insert("from", TokenKind::From);
        map.insert("type", TokenKind::Type);
        map.insert("match", TokenKind::Match);
        map.insert("end", TokenKind::End);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    /// Significant newline, a potential statement terminator.
    Line,

    Identifier,
    Number,
    String,
    Char,

    SemiSemi,
    Dot,
    DotDot,
    Comma,
    Semi,
    Colon,
    Define, // := or : =
    Lambda,       // ->
    BlockLambda,  // =>

    OpenCurly,
    CloseCurly,
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,

    Question,
    QuestionQuestion,
    Or,   // ||
    Pipe, // |
    And,  // &&
    Hat,
    Ampersand,

    Equals,    // ==
    NotEquals, // !=
    LessEquals,
    GreaterEquals,
    Assignment, // =
    Less,
    Greater,
    ShiftLeft,
    ShiftRight,
    ShiftRightUnsigned,

    PlusPlus,
    MinusMinus,
    Plus,
    Dash,
    Star,
    Slash,
    Percent,
    Tilde,
    Not, // !
    Dollar,

    // Reserved
    Our,
    My,
    Let,
    Var,
    Native,
    Force,
    Pkg,
    Import,
    From,
    Type,
    Match,
    End,

    EOF,
}

/// Number of token kinds; used to size the ordinal-indexed dispatch tables.
pub const TOKEN_KIND_COUNT: usize = TokenKind::EOF as usize + 1;

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\ntext: {}}}", self.kind, self.text)
    }
}

impl Token {
    fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    pub fn debug(&self) {
        if self.is_one_of_many(&[
            TokenKind::String,
            TokenKind::Char,
            TokenKind::Identifier,
            TokenKind::Number,
        ]) {
            println!("{} ({})", self.kind, self.text);
        } else {
            println!("{} ()", self.kind);
        }
    }
}
