use crate::{
    ast::expressions::{Expression, ObjectMember},
    errors::errors::{Diagnostic, DiagnosticKind},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    lookups::BindingPower,
    parser::{expect_one_of, Parser},
    stmt::{parse_modifiers, parse_terminated_expression, skip_empty_statements},
    types::parse_type,
};

/// The precedence climb shared by every expression-like grammar.
///
/// A prefix handler produces the left node, then infix handlers fold it as
/// long as the next operator binds strictly stronger than `min_bp`. Infix
/// handlers re-enter with their own strength, so equal-strength operators
/// chain left-to-right.
pub fn parse_expression(
    parser: &mut Parser,
    min_bp: BindingPower,
) -> Result<Expression, Diagnostic> {
    let kind = parser.current_kind();
    let Some(prefix) = parser.prefix_lookup().get(kind) else {
        return Err(Diagnostic::syntax(
            DiagnosticKind::NoPrefixHandler {
                kind,
                grammar: "expression",
            },
            parser.current().span,
        ));
    };

    let mut left = prefix(parser)?;

    loop {
        let kind = parser.current_kind();
        let Some(binding_power) = parser.binding_power_lookup().get(kind) else {
            break;
        };
        if binding_power <= min_bp {
            break;
        }
        let Some(infix) = parser.infix_lookup().get(kind) else {
            return Err(Diagnostic::syntax(
                DiagnosticKind::NoInfixHandler {
                    kind,
                    grammar: "expression",
                },
                parser.current().span,
            ));
        };
        left = infix(parser, left, binding_power)?;
    }

    Ok(left)
}

pub fn parse_primary(parser: &mut Parser) -> Result<Expression, Diagnostic> {
    let token = parser.advance();
    match token.kind {
        TokenKind::Identifier => Ok(Expression::Identifier {
            symbol: token.text,
            span: token.span,
        }),
        TokenKind::Number => Ok(Expression::Number {
            value: token.text,
            span: token.span,
        }),
        TokenKind::String => Ok(Expression::String {
            value: token.text,
            span: token.span,
        }),
        TokenKind::Char => Ok(Expression::Character {
            value: token.text,
            span: token.span,
        }),
        _ => Err(Diagnostic::syntax(
            DiagnosticKind::UnexpectedTokenKind {
                expected: String::from("a literal or identifier"),
                found: token.kind,
            },
            token.span,
        )),
    }
}

/// Generic binary builder: records the operator's literal text. Shared by
/// assignment, logical, relational, additive, multiplicative, member-dot and
/// colon-lambda operators.
pub fn parse_binary(
    parser: &mut Parser,
    left: Expression,
    bp: BindingPower,
) -> Result<Expression, Diagnostic> {
    let operator = parser.advance();
    let right = parse_expression(parser, bp)?;
    let span = Span {
        start: left.span().start,
        end: right.span().end,
    };
    Ok(Expression::Binary {
        left: Box::new(left),
        op: operator.text,
        right: Box::new(right),
        span,
    })
}

/// Prefix unary; recurses at unary strength, so chains nest rightward.
pub fn parse_pre_unary(parser: &mut Parser) -> Result<Expression, Diagnostic> {
    let operator = parser.advance();
    let right = parse_expression(parser, BindingPower::Unary)?;
    let span = Span {
        start: operator.span.start,
        end: right.span().end,
    };
    Ok(Expression::PreUnary {
        op: operator.text,
        right: Box::new(right),
        span,
    })
}

pub fn parse_post_unary(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Diagnostic> {
    let operator = parser.advance();
    let span = Span {
        start: left.span().start,
        end: operator.span.end,
    };
    Ok(Expression::PostUnary {
        op: operator.text,
        left: Box::new(left),
        span,
    })
}

/// `target (a, b, c)`; the arguments become a listing, or an empty group
/// when the parentheses are empty. Argument expressions parse at comma
/// strength: a bare comma listing cannot leak past the closing parenthesis,
/// while everything binding stronger nests inside an argument.
pub fn parse_call(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Diagnostic> {
    let open = parser.advance();

    let arguments = if parser.current_kind() == TokenKind::CloseParen {
        Expression::EmptyGroup {
            span: Span {
                start: open.span.start,
                end: parser.current().span.end,
            },
        }
    } else {
        let mut expressions = vec![parse_expression(parser, BindingPower::Comma)?];
        while parser.current_kind() == TokenKind::Comma {
            parser.advance();
            expressions.push(parse_expression(parser, BindingPower::Comma)?);
        }
        let span = Span {
            start: open.span.start,
            end: expressions.last().unwrap().span().end,
        };
        Expression::Listing { expressions, span }
    };

    let close = parser.expect(TokenKind::CloseParen)?;
    let span = Span {
        start: left.span().start,
        end: close.span.end,
    };
    Ok(Expression::Call {
        target: Box::new(left),
        arguments: Box::new(arguments),
        span,
    })
}

/// `x | f`, a call taking the left expression as its single argument.
pub fn parse_piped_call(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Diagnostic> {
    parser.advance();
    let target = parse_expression(parser, BindingPower::Call)?;
    let span = Span {
        start: left.span().start,
        end: target.span().end,
    };
    Ok(Expression::PipedCall {
        target: Box::new(target),
        argument: Box::new(left),
        span,
    })
}

/// Flattens a run of comma/line-separated expressions into one listing,
/// seeded with the already-parsed left expression.
pub fn parse_comma_listing(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Diagnostic> {
    let start = left.span().start;
    let mut expressions = vec![left];
    while matches!(parser.current_kind(), TokenKind::Comma | TokenKind::Line) {
        skip_empty_statements(parser);
        if parser.current_kind() == TokenKind::Comma {
            parser.advance();
        }
        expressions.push(parse_expression(parser, BindingPower::Comma)?);
    }
    let span = Span {
        start,
        end: expressions.last().unwrap().span().end,
    };
    Ok(Expression::Listing { expressions, span })
}

/// Parenthesized grouping. `()` becomes an explicit empty-group node; any
/// other content is parsed as one expression whose span is widened over the
/// delimiters before it escapes.
pub fn parse_group(parser: &mut Parser) -> Result<Expression, Diagnostic> {
    let open = parser.advance();

    if parser.current_kind() == TokenKind::CloseParen {
        let close = parser.advance();
        return Ok(Expression::EmptyGroup {
            span: Span {
                start: open.span.start,
                end: close.span.end,
            },
        });
    }

    let expression = parse_expression(parser, BindingPower::Default)?;
    let close = parser.expect(TokenKind::CloseParen)?;
    Ok(expression.with_span(Span {
        start: open.span.start,
        end: close.span.end,
    }))
}

/// Brace-delimited object literal: `{ modifiers? name Type? = value ... }`.
/// A member is typed when the token after its name is not `=`.
pub fn parse_object(parser: &mut Parser) -> Result<Expression, Diagnostic> {
    let open = parser.advance();
    let mut members = Vec::new();

    while parser.current_kind() != TokenKind::CloseCurly {
        let member_start = parser.current().span.start;
        let modifiers = parse_modifiers(parser);
        let name = parser.expect(TokenKind::Identifier)?.text;
        let member_type = if parser.current_kind() == TokenKind::Assignment {
            None
        } else {
            Some(parse_type(parser, BindingPower::Default)?)
        };
        parser.expect(TokenKind::Assignment)?;
        let value = parse_terminated_expression(parser)?;
        let span = Span {
            start: member_start,
            end: value.span().end,
        };
        members.push(ObjectMember {
            modifiers,
            name,
            member_type,
            value,
            span,
        });
    }

    let close = parser.expect(TokenKind::CloseCurly)?;
    Ok(Expression::Object {
        members,
        span: Span {
            start: open.span.start,
            end: close.span.end,
        },
    })
}

/// `left match branch ((line|,) branch)* end`; the scrutinee is the
/// already-parsed left expression; at least two branches are required.
pub fn parse_match(
    parser: &mut Parser,
    left: Expression,
    bp: BindingPower,
) -> Result<Expression, Diagnostic> {
    parser.advance();

    let mut branches = vec![parse_expression(parser, bp)?];
    while parser.current_kind() != TokenKind::End {
        let separator = parser.reveal_next();
        expect_one_of(separator, &[TokenKind::Line, TokenKind::Comma])?;
        branches.push(parse_expression(parser, bp)?);
    }
    let end_token = parser.advance();

    if branches.len() < 2 {
        return Err(Diagnostic::syntax(
            DiagnosticKind::UnexpectedTokenKind {
                expected: String::from("at least two match branches"),
                found: TokenKind::End,
            },
            end_token.span,
        ));
    }

    let span = Span {
        start: left.span().start,
        end: branches.last().unwrap().span().end,
    };
    Ok(Expression::Match {
        left: Box::new(left),
        branches,
        span,
    })
}
