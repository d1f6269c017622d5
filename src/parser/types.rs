//! Type-annotation parsing.
//!
//! A second, smaller prefix-dispatch grammar over the same parser state,
//! sharing the binding-power vocabulary with the expression engine. It
//! supports:
//!
//! - Symbol types (bare identifiers)
//! - Array types `[size?]Element`
//! - Function types `(P1, P2): R?`
//! - Object types `{ name type; ... }`
//!
//! The infix climb is wired but its table is empty: union types are reserved
//! in the AST and their grammar is an open design item.

use crate::{
    ast::types::{ObjectTypeMember, Type},
    errors::errors::{Diagnostic, DiagnosticKind},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    lookups::BindingPower,
    parser::{expect_one_of, Parser},
};

/// Registers the type-grammar handlers.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_prefix(TokenKind::Identifier, parse_symbol_type);
    parser.type_prefix(TokenKind::OpenBracket, parse_array_type);
    parser.type_prefix(TokenKind::OpenParen, parse_function_type);
    parser.type_prefix(TokenKind::OpenCurly, parse_object_type);
}

/// Prefix dispatch plus the (currently idle) infix climb, mirroring
/// `parse_expression`.
pub fn parse_type(parser: &mut Parser, min_bp: BindingPower) -> Result<Type, Diagnostic> {
    let kind = parser.current_kind();
    let Some(prefix) = parser.type_prefix_lookup().get(kind) else {
        return Err(Diagnostic::syntax(
            DiagnosticKind::NoPrefixHandler {
                kind,
                grammar: "type",
            },
            parser.current().span,
        ));
    };

    let mut left = prefix(parser)?;

    loop {
        let kind = parser.current_kind();
        let Some(binding_power) = parser.type_binding_power_lookup().get(kind) else {
            break;
        };
        if binding_power <= min_bp {
            break;
        }
        let Some(infix) = parser.type_infix_lookup().get(kind) else {
            return Err(Diagnostic::syntax(
                DiagnosticKind::NoInfixHandler {
                    kind,
                    grammar: "type",
                },
                parser.current().span,
            ));
        };
        left = infix(parser, left, binding_power)?;
    }

    Ok(left)
}

pub fn parse_symbol_type(parser: &mut Parser) -> Result<Type, Diagnostic> {
    let token = parser.expect(TokenKind::Identifier)?;
    Ok(Type::Symbol {
        symbol: token.text,
        span: token.span,
    })
}

/// `[5]Int` or `[]Str`; the size stays textual, like every other literal.
pub fn parse_array_type(parser: &mut Parser) -> Result<Type, Diagnostic> {
    let open = parser.advance();

    let size = if parser.current_kind() == TokenKind::Number {
        Some(parser.advance().text)
    } else {
        None
    };
    parser.expect(TokenKind::CloseBracket)?;

    let element = parse_type(parser, BindingPower::Default)?;
    let span = Span {
        start: open.span.start,
        end: element.span().end,
    };
    Ok(Type::Array {
        size,
        element: Box::new(element),
        span,
    })
}

/// `(Int, Str): Bool`: comma-separated parameter types, optional colon and
/// return type.
pub fn parse_function_type(parser: &mut Parser) -> Result<Type, Diagnostic> {
    let open = parser.advance();

    let mut parameters = Vec::new();
    if parser.current_kind() != TokenKind::CloseParen {
        loop {
            parameters.push(parse_type(parser, BindingPower::Default)?);
            if parser.current_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }
    let close = parser.expect(TokenKind::CloseParen)?;

    if parser.current_kind() == TokenKind::Colon {
        parser.advance();
        let return_type = parse_type(parser, BindingPower::Default)?;
        let span = Span {
            start: open.span.start,
            end: return_type.span().end,
        };
        return Ok(Type::Function {
            parameters,
            return_type: Some(Box::new(return_type)),
            span,
        });
    }

    Ok(Type::Function {
        parameters,
        return_type: None,
        span: Span {
            start: open.span.start,
            end: close.span.end,
        },
    })
}

/// `{ name type; ... }`; each member is terminated by `;` or a line token.
pub fn parse_object_type(parser: &mut Parser) -> Result<Type, Diagnostic> {
    let open = parser.advance();
    let mut members = Vec::new();

    while parser.current_kind() != TokenKind::CloseCurly {
        let member_start = parser.current().span.start;
        let name = parser.expect(TokenKind::Identifier)?.text;
        let member_type = parse_type(parser, BindingPower::Default)?;
        let span = Span {
            start: member_start,
            end: member_type.span().end,
        };
        members.push(ObjectTypeMember {
            name,
            member_type,
            span,
        });

        let terminator = parser.reveal_next();
        expect_one_of(terminator, &[TokenKind::Semi, TokenKind::Line])?;
    }

    let close = parser.advance();
    Ok(Type::Object {
        members,
        span: Span {
            start: open.span.start,
            end: close.span.end,
        },
    })
}
