//! Utility macros for the front end.
//!
//! This module defines helper macros used by the lexer:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default matcher handler for simple tokens
//!
//! These macros reduce boilerplate in the matcher table.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$text` - The token's matched text
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $text:expr, $span:expr) => {
        Token {
            kind: $kind,
            text: $text,
            span: $span,
        }
    };
}

/// Creates a default matcher handler for simple single-token symbols.
///
/// Generates a handler function that turns the matched text into a token of
/// the given kind, spanning exactly the match.
///
/// # Example
///
/// ```ignore
/// Matcher {
///     symbol: Symbol::Literal("+"),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr) => {
        |_lexer: &mut Lexer, start: $crate::SourcePointer, text: &str| {
            Some(MK_TOKEN!(
                $kind,
                String::from(text),
                $crate::Span::at(start, text.len())
            ))
        }
    };
}
