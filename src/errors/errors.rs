use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Span};

/// The closed set of parse-time failures.
///
/// `NoInfixHandler` means a token kind carries a binding power but no
/// handler; that is a table-consistency bug and should be unreachable with
/// the shipped registrations. The lexical unrecognized-character case is not
/// here on purpose: it is logged and recovered from, never surfaced as a
/// diagnostic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    #[error("could not find a prefix handler ({grammar}) for token kind {kind}")]
    NoPrefixHandler {
        kind: TokenKind,
        grammar: &'static str,
    },
    #[error("no infix handler registered ({grammar}) for token kind {kind}")]
    NoInfixHandler {
        kind: TokenKind,
        grammar: &'static str,
    },
    #[error("expected {expected}, found {found}")]
    UnexpectedTokenKind { expected: String, found: TokenKind },
    #[error("not a statement: {detail}")]
    NotAStatement { detail: String },
}

/// Which pipeline stage produced a diagnostic; only the rendered header label
/// differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Syntax,
    Semantic,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Syntax => "SyntaxError",
            Stage::Semantic => "SemanticError",
        }
    }
}

/// A spanned, immutable error value. Rendering is a pure function of the
/// diagnostic plus the original source split into lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    stage: Stage,
    span: Span,
}

impl Diagnostic {
    pub fn syntax(kind: DiagnosticKind, span: Span) -> Self {
        Diagnostic {
            kind,
            stage: Stage::Syntax,
            span,
        }
    }

    pub fn semantic(kind: DiagnosticKind, span: Span) -> Self {
        Diagnostic {
            kind,
            stage: Stage::Semantic,
            span,
        }
    }

    pub fn kind(&self) -> &DiagnosticKind {
        &self.kind
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Renders the diagnostic as a pointed-to source excerpt.
    ///
    /// The window holds up to two lines of context before and after the
    /// spanned lines (fewer at the file boundaries). A span confined to one
    /// line with the full five-line window gets a single caret run under the
    /// offending columns; otherwise the start line is underlined from its
    /// start column to the end of the line, fully enclosed lines across their
    /// whole width, and the end line up to the end column.
    pub fn render(&self, source_lines: &[&str]) -> String {
        let start = self.span.start;
        let end = self.span.end;

        let window: Vec<(usize, &str)> = source_lines
            .iter()
            .enumerate()
            .filter(|(i, _)| i + 3 >= start.line && *i < end.line + 2)
            .map(|(i, line)| (i + 1, *line))
            .collect();

        let gutter = window
            .iter()
            .map(|(number, _)| number.to_string().len())
            .max()
            .unwrap_or(1);

        let single_line = window.len() == 5 && start.line == end.line;

        let mut output = format!("{}\nMessage: {}", self.stage.label(), self.kind);
        for (number, text) in &window {
            output.push('\n');
            output.push_str(&format!("{:>gutter$} | {}", number, text));

            let caret = if *number == start.line {
                if single_line {
                    Some((start.column, usize::max(1, end.column.saturating_sub(start.column))))
                } else {
                    Some((start.column, usize::max(1, text.len().saturating_sub(start.column))))
                }
            } else if *number > start.line && *number < end.line && !text.is_empty() {
                Some((0, text.len()))
            } else if *number == end.line && *number != start.line && end.column > 0 {
                Some((0, end.column))
            } else {
                None
            };

            if let Some((indent, width)) = caret {
                output.push('\n');
                output.push_str(&" ".repeat(gutter + 3 + indent));
                output.push_str(&"^".repeat(width));
            }
        }
        output
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.stage.label(), self.kind)
    }
}
