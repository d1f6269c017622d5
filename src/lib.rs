#![allow(clippy::module_inception)]

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

use ast::statements::Statement;
use errors::errors::Diagnostic;

/// A single position in the source text.
///
/// `index` is the byte offset into the whole source, `line` is 1-based and
/// `column` is the byte offset within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourcePointer {
    pub index: usize,
    pub line: usize,
    pub column: usize,
}

/// A half-open range of source text, attached to every token and AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: SourcePointer,
    pub end: SourcePointer,
}

impl Span {
    /// Span covering `length` bytes on a single line starting at `start`.
    pub fn at(start: SourcePointer, length: usize) -> Span {
        Span {
            start,
            end: SourcePointer {
                index: start.index + length,
                line: start.line,
                column: start.column + length,
            },
        }
    }

    /// Zero-width span at `point`.
    pub fn empty(point: SourcePointer) -> Span {
        Span {
            start: point,
            end: point,
        }
    }
}

/// Parses a whole compilation unit into its top-level block.
///
/// The caller supplies the source text; file names and I/O stay outside the
/// core (see `main.rs` for the glue).
pub fn parse_source(source: &str) -> Result<Statement, Diagnostic> {
    parser::parser::parse(lexer::lexer::Lexer::new(source))
}
