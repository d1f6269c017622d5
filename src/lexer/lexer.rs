use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use crate::{SourcePointer, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type MatchHandler = fn(&mut Lexer, SourcePointer, &str) -> Option<Token>;

/// What a matcher tries against the start of the remaining input: either a
/// fixed spelling or an anchored pattern.
pub enum Symbol {
    Literal(&'static str),
    Pattern(Regex),
}

impl Symbol {
    fn match_length(&self, remaining: &str) -> Option<usize> {
        match self {
            Symbol::Literal(text) => remaining.starts_with(text).then(|| text.len()),
            Symbol::Pattern(regex) => regex.find(remaining).map(|found| found.end()),
        }
    }
}

pub struct Matcher {
    symbol: Symbol,
    handler: MatchHandler,
}

lazy_static! {
    /// Ordered matcher table, built once. Order encodes precedence: keywords
    /// hide inside the identifier matcher, longer operators come before their
    /// prefixes.
    static ref MATCHERS: Vec<Matcher> = vec![
        Matcher { symbol: Symbol::Pattern(Regex::new(r"\A[a-zA-Z_]\w*").unwrap()), handler: identifier_handler },
        Matcher { symbol: Symbol::Pattern(Regex::new(r"\A\n").unwrap()), handler: line_handler },
        Matcher { symbol: Symbol::Pattern(Regex::new(r"\A[^\S\n]+").unwrap()), handler: skip_handler },
        Matcher { symbol: Symbol::Pattern(Regex::new(r"\A#[^\n]*\n").unwrap()), handler: line_handler },
        Matcher { symbol: Symbol::Pattern(Regex::new(r"\A/\*(?s:.)*?\*/").unwrap()), handler: block_comment_handler },
        Matcher { symbol: Symbol::Pattern(Regex::new(r"\A\d[\d_]*([^\S\n]+\d[\d_]*)*").unwrap()), handler: MK_DEFAULT_HANDLER!(TokenKind::Number) },
        Matcher { symbol: Symbol::Pattern(Regex::new("\\A(\"[^\"\n]*\"|'[^'\n]*')").unwrap()), handler: string_char_handler },
        Matcher { symbol: Symbol::Pattern(Regex::new(r"\A:\s*=").unwrap()), handler: MK_DEFAULT_HANDLER!(TokenKind::Define) },
        Matcher { symbol: Symbol::Literal(".."), handler: MK_DEFAULT_HANDLER!(TokenKind::DotDot) },
        Matcher { symbol: Symbol::Literal(";;"), handler: MK_DEFAULT_HANDLER!(TokenKind::SemiSemi) },
        Matcher { symbol: Symbol::Literal("->"), handler: MK_DEFAULT_HANDLER!(TokenKind::Lambda) },
        Matcher { symbol: Symbol::Literal("=>"), handler: MK_DEFAULT_HANDLER!(TokenKind::BlockLambda) },
        Matcher { symbol: Symbol::Literal("."), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot) },
        Matcher { symbol: Symbol::Literal(","), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma) },
        Matcher { symbol: Symbol::Literal(";"), handler: MK_DEFAULT_HANDLER!(TokenKind::Semi) },
        Matcher { symbol: Symbol::Literal(":"), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon) },
        Matcher { symbol: Symbol::Literal("{"), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly) },
        Matcher { symbol: Symbol::Literal("}"), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly) },
        Matcher { symbol: Symbol::Literal("["), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket) },
        Matcher { symbol: Symbol::Literal("]"), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket) },
        Matcher { symbol: Symbol::Literal("("), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen) },
        Matcher { symbol: Symbol::Literal(")"), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen) },
        Matcher { symbol: Symbol::Literal("??"), handler: MK_DEFAULT_HANDLER!(TokenKind::QuestionQuestion) },
        Matcher { symbol: Symbol::Literal("?"), handler: MK_DEFAULT_HANDLER!(TokenKind::Question) },
        Matcher { symbol: Symbol::Literal("||"), handler: MK_DEFAULT_HANDLER!(TokenKind::Or) },
        Matcher { symbol: Symbol::Literal("|"), handler: MK_DEFAULT_HANDLER!(TokenKind::Pipe) },
        Matcher { symbol: Symbol::Literal("&&"), handler: MK_DEFAULT_HANDLER!(TokenKind::And) },
        Matcher { symbol: Symbol::Literal("^"), handler: MK_DEFAULT_HANDLER!(TokenKind::Hat) },
        Matcher { symbol: Symbol::Literal("&"), handler: MK_DEFAULT_HANDLER!(TokenKind::Ampersand) },
        Matcher { symbol: Symbol::Literal("=="), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals) },
        Matcher { symbol: Symbol::Literal("!="), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals) },
        Matcher { symbol: Symbol::Literal("<="), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals) },
        Matcher { symbol: Symbol::Literal(">="), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals) },
        Matcher { symbol: Symbol::Literal("="), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment) },
        Matcher { symbol: Symbol::Literal("<<"), handler: MK_DEFAULT_HANDLER!(TokenKind::ShiftLeft) },
        Matcher { symbol: Symbol::Literal(">>>"), handler: MK_DEFAULT_HANDLER!(TokenKind::ShiftRightUnsigned) },
        Matcher { symbol: Symbol::Literal(">>"), handler: MK_DEFAULT_HANDLER!(TokenKind::ShiftRight) },
        Matcher { symbol: Symbol::Literal("<"), handler: MK_DEFAULT_HANDLER!(TokenKind::Less) },
        Matcher { symbol: Symbol::Literal(">"), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater) },
        Matcher { symbol: Symbol::Literal("++"), handler: MK_DEFAULT_HANDLER!(TokenKind::PlusPlus) },
        Matcher { symbol: Symbol::Literal("--"), handler: MK_DEFAULT_HANDLER!(TokenKind::MinusMinus) },
        Matcher { symbol: Symbol::Literal("-"), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash) },
        Matcher { symbol: Symbol::Literal("+"), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus) },
        Matcher { symbol: Symbol::Literal("*"), handler: MK_DEFAULT_HANDLER!(TokenKind::Star) },
        Matcher { symbol: Symbol::Literal("/"), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash) },
        Matcher { symbol: Symbol::Literal("%"), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent) },
        Matcher { symbol: Symbol::Literal("~"), handler: MK_DEFAULT_HANDLER!(TokenKind::Tilde) },
        Matcher { symbol: Symbol::Literal("!"), handler: MK_DEFAULT_HANDLER!(TokenKind::Not) },
        Matcher { symbol: Symbol::Literal("$"), handler: MK_DEFAULT_HANDLER!(TokenKind::Dollar) },
    ];
}

/// Pull-based tokenizer.
///
/// Always holds one fully computed `current` token and remembers the raw
/// token that preceded it (`before`), which may be a line token that was
/// skipped while advancing. That memory is what lets `next(true)` reveal an
/// implicit statement terminator without re-scanning.
#[derive(Clone)]
pub struct Lexer {
    source: Rc<str>,
    position: usize,
    line: usize,
    column: usize,
    current: Token,
    before: Token,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        let mut lexer = Lexer {
            source: Rc::from(source),
            position: 0,
            line: 1,
            column: 0,
            current: MK_TOKEN!(TokenKind::EOF, String::from("NULL"), Span::default()),
            before: MK_TOKEN!(TokenKind::EOF, String::from("NULL"), Span::default()),
        };
        lexer.current = lexer.next_unwrapped();
        lexer
    }

    /// The full source text, for diagnostic rendering.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Peeks the upcoming token without consuming it.
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Consumes the upcoming token and returns it.
    ///
    /// Line tokens are normally skipped while advancing. With `reveal_line`
    /// set, a line token skipped just before the current token is returned
    /// instead, so statement grammars can see implicit terminators. The
    /// revealed token is not re-consumed; the cursor does not move.
    pub fn next(&mut self, reveal_line: bool) -> Token {
        if reveal_line && self.before.kind == TokenKind::Line {
            return self.before.clone();
        }
        let passed = self.current.clone();
        loop {
            let upcoming = self.next_unwrapped();
            self.before = std::mem::replace(&mut self.current, upcoming);
            if self.current.kind != TokenKind::Line {
                break;
            }
        }
        passed
    }

    /// Independent lexer positioned identically to this one, for speculative
    /// lookahead: advance the copy freely, the original stays put.
    pub fn copy(&self) -> Lexer {
        self.clone()
    }

    fn pointer(&self) -> SourcePointer {
        SourcePointer {
            index: self.position,
            line: self.line,
            column: self.column,
        }
    }

    fn next_unwrapped(&mut self) -> Token {
        let source = Rc::clone(&self.source);
        'scan: loop {
            if self.position >= source.len() {
                return MK_TOKEN!(
                    TokenKind::EOF,
                    String::from("EOF"),
                    Span::empty(self.pointer())
                );
            }
            let remaining = &source[self.position..];
            for matcher in MATCHERS.iter() {
                let Some(length) = matcher.symbol.match_length(remaining) else {
                    continue;
                };
                let start = self.pointer();
                let text = &remaining[..length];
                self.position += length;
                self.column += length;
                if let Some(token) = (matcher.handler)(self, start, text) {
                    return token;
                }
                // Skip handler: fall through and rescan from the first matcher.
                continue 'scan;
            }
            // Best-effort recovery: drop one character and keep scanning.
            let character = remaining.chars().next().unwrap();
            warn!(
                "could not tokenize character {:?} at {}:{}, skipping",
                character, self.line, self.column
            );
            self.position += character.len_utf8();
            self.column += character.len_utf8();
        }
    }
}

fn identifier_handler(_lexer: &mut Lexer, start: SourcePointer, text: &str) -> Option<Token> {
    if let Some(kind) = RESERVED_LOOKUP.get(text) {
        Some(MK_TOKEN!(
            *kind,
            String::from(text),
            Span::at(start, text.len())
        ))
    } else {
        Some(MK_TOKEN!(
            TokenKind::Identifier,
            String::from(text),
            Span::at(start, text.len())
        ))
    }
}

fn string_char_handler(_lexer: &mut Lexer, start: SourcePointer, text: &str) -> Option<Token> {
    let kind = if text.starts_with('"') {
        TokenKind::String
    } else {
        TokenKind::Char
    };
    Some(MK_TOKEN!(kind, String::from(text), Span::at(start, text.len())))
}

fn skip_handler(_lexer: &mut Lexer, _start: SourcePointer, _text: &str) -> Option<Token> {
    None
}

fn line_handler(lexer: &mut Lexer, start: SourcePointer, text: &str) -> Option<Token> {
    // The newline is the last consumed byte; the token sits on it and its
    // span ends at column zero of the following line.
    let newline = SourcePointer {
        index: start.index + text.len() - 1,
        line: start.line,
        column: start.column + text.len() - 1,
    };
    let token = MK_TOKEN!(
        TokenKind::Line,
        String::from("\n"),
        Span {
            start: newline,
            end: SourcePointer {
                index: newline.index + 1,
                line: start.line + 1,
                column: 0,
            },
        }
    );
    lexer.line += 1;
    lexer.column = 0;
    Some(token)
}

fn block_comment_handler(lexer: &mut Lexer, _start: SourcePointer, text: &str) -> Option<Token> {
    // A block comment is pure whitespace, but it still has to move the
    // line/column counters when it spans lines.
    let newlines = text.matches('\n').count();
    if newlines > 0 {
        lexer.line += newlines;
        lexer.column = text.len() - (text.rfind('\n').unwrap() + 1);
    }
    None
}
