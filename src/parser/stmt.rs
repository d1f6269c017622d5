use crate::{
    ast::{
        expressions::Expression,
        statements::{Definition, Modifier, Statement},
        types::Type,
    },
    errors::errors::{Diagnostic, DiagnosticKind},
    lexer::tokens::TokenKind,
    SourcePointer, Span,
};

use super::{
    expr::parse_expression,
    lookups::BindingPower,
    parser::{expect_one_of, Parser},
    types::parse_type,
};

/// Consumes blank separators (bare `;` or line tokens) between statements.
pub fn skip_empty_statements(parser: &mut Parser) {
    while matches!(parser.current_kind(), TokenKind::Semi | TokenKind::Line) {
        parser.advance();
    }
}

/// Parses statements until a terminator kind is seen (end of input always
/// terminates) and returns a block spanning its first to last statement. The
/// terminator itself is consumed.
pub fn parse_block(parser: &mut Parser, terminators: &[TokenKind]) -> Result<Statement, Diagnostic> {
    let mut statements = Vec::new();
    loop {
        skip_empty_statements(parser);
        let kind = parser.current_kind();
        if kind == TokenKind::EOF || terminators.contains(&kind) {
            break;
        }
        statements.push(parse_statement(parser)?);
    }
    parser.advance();

    let span = match (statements.first(), statements.last()) {
        (Some(first), Some(last)) => Span {
            start: first.span().start,
            end: last.span().end,
        },
        _ => Span::empty(parser.current().span.start),
    };

    Ok(Statement::Block { statements, span })
}

/// Dispatches on the current token's statement handler, falling back to a
/// bare expression statement. A token that can start neither a statement nor
/// an expression reports `NotAStatement`; deeper failures inside the
/// fallback keep their own kind and span.
pub fn parse_statement(parser: &mut Parser) -> Result<Statement, Diagnostic> {
    if let Some(handler) = parser.stmt_lookup().get(parser.current_kind()) {
        return handler(parser);
    }

    parse_expression_statement(parser).map_err(|error| {
        if matches!(error.kind(), DiagnosticKind::NoPrefixHandler { .. }) {
            let span = error.span();
            Diagnostic::syntax(
                DiagnosticKind::NotAStatement {
                    detail: error.kind().to_string(),
                },
                span,
            )
        } else {
            error
        }
    })
}

/// A bare expression in statement position, terminator included.
pub fn parse_expression_statement(parser: &mut Parser) -> Result<Statement, Diagnostic> {
    let expression = parse_terminated_expression(parser)?;
    Ok(Statement::Expression {
        span: expression.span(),
        expression,
    })
}

/// Parses one expression and checks its statement terminator.
pub fn parse_terminated_expression(parser: &mut Parser) -> Result<Expression, Diagnostic> {
    let expression = parse_expression(parser, BindingPower::Default)?;
    expect_statement_terminator(parser)?;
    Ok(expression)
}

/// A statement ends with `;` or a revealed line token. A `;;` or end of
/// input also ends it, but stays in the stream: the enclosing multi-arm
/// group or block owns that token.
fn expect_statement_terminator(parser: &mut Parser) -> Result<(), Diagnostic> {
    match parser.current_kind() {
        TokenKind::SemiSemi | TokenKind::EOF => Ok(()),
        _ => {
            let terminator = parser.reveal_next();
            expect_one_of(terminator, &[TokenKind::Semi, TokenKind::Line]).map(|_| ())
        }
    }
}

/// Fixed modifier order: access flag (`our`/`my`/absent), then `native`,
/// then `force`. The result always leads with an access flag.
pub fn parse_modifiers(parser: &mut Parser) -> Vec<Modifier> {
    let mut modifiers = Vec::new();

    match parser.current_kind() {
        TokenKind::Our => {
            parser.advance();
            modifiers.push(Modifier::Public);
        }
        TokenKind::My => {
            parser.advance();
            modifiers.push(Modifier::Private);
        }
        _ => modifiers.push(Modifier::AccessNone),
    }

    if parser.current_kind() == TokenKind::Native {
        parser.advance();
        modifiers.push(Modifier::Native);
    }
    if parser.current_kind() == TokenKind::Force {
        parser.advance();
        modifiers.push(Modifier::Force);
    }

    modifiers
}

/// Statement handler for everything that may start with modifiers: named
/// definitions and type declarations.
pub fn parse_modified_statement(parser: &mut Parser) -> Result<Statement, Diagnostic> {
    let start = parser.current().span.start;
    let modifiers = parse_modifiers(parser);
    if parser.current_kind() == TokenKind::Type {
        parse_type_declaration(parser, modifiers, start)
    } else {
        parse_named_definition(parser, modifiers, start)
    }
}

/// `name Type? = value`, or the multi-arm form
/// `name: (modifiers? Type? = value)+ ;;`.
fn parse_named_definition(
    parser: &mut Parser,
    modifiers: Vec<Modifier>,
    start: SourcePointer,
) -> Result<Statement, Diagnostic> {
    let name = parser.expect(TokenKind::Identifier)?.text;

    if parser.current_kind() != TokenKind::Colon {
        let (var_type, value) = parse_definition_body(parser)?;
        let span = Span {
            start,
            end: value.span().end,
        };
        return Ok(Statement::NamedDefinition {
            name,
            modifiers,
            var_type,
            value,
            span,
        });
    }
    parser.advance();

    let mut definitions = Vec::new();
    while parser.current_kind() != TokenKind::SemiSemi {
        let arm_start = parser.current().span.start;
        let arm_modifiers = parse_modifiers(parser);
        let (var_type, value) = parse_definition_body(parser)?;
        let span = Span {
            start: arm_start,
            end: value.span().end,
        };
        definitions.push(Definition {
            modifiers: arm_modifiers,
            var_type,
            value,
            span,
        });
    }
    let end = parser.advance().span.end;

    Ok(Statement::NamedDefinitions {
        name,
        modifiers,
        definitions,
        span: Span { start, end },
    })
}

/// The `Type? = value` tail shared by single definitions and multi-arm arms.
/// The definition is typed exactly when the next token is not `=`.
fn parse_definition_body(parser: &mut Parser) -> Result<(Option<Type>, Expression), Diagnostic> {
    let var_type = if parser.current_kind() == TokenKind::Assignment {
        None
    } else {
        Some(parse_type(parser, BindingPower::Default)?)
    };
    parser.expect(TokenKind::Assignment)?;
    let value = parse_terminated_expression(parser)?;
    Ok((var_type, value))
}

/// `import <source> [ a, b ]`, or the alternate ordering
/// `import [ a, b ] from <source>`.
pub fn parse_get_import(parser: &mut Parser) -> Result<Statement, Diagnostic> {
    let start = parser.advance().span.start;

    if parser.current_kind() == TokenKind::OpenBracket {
        let (targets, _) = parse_import_targets(parser)?;
        parser.expect(TokenKind::From)?;
        let from = parse_expression(parser, BindingPower::Default)?;
        let span = Span {
            start,
            end: from.span().end,
        };
        return Ok(Statement::GetImport {
            targets,
            from,
            span,
        });
    }

    let from = parse_expression(parser, BindingPower::Default)?;
    let (targets, end) = parse_import_targets(parser)?;
    Ok(Statement::GetImport {
        targets,
        from,
        span: Span { start, end },
    })
}

fn parse_import_targets(parser: &mut Parser) -> Result<(Vec<String>, SourcePointer), Diagnostic> {
    parser.expect(TokenKind::OpenBracket)?;
    let mut targets = Vec::new();
    loop {
        targets.push(parser.expect(TokenKind::Identifier)?.text);
        if parser.current_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }
    let close = parser.expect(TokenKind::CloseBracket)?;
    Ok((targets, close.span.end))
}

/// `pkg <name expression>`
pub fn parse_package(parser: &mut Parser) -> Result<Statement, Diagnostic> {
    let start = parser.advance().span.start;
    let name = parse_expression(parser, BindingPower::Default)?;
    let span = Span {
        start,
        end: name.span().end,
    };
    Ok(Statement::Package { name, span })
}

/// Statement handler for a bare `type` keyword (no leading modifiers).
pub fn parse_type_statement(parser: &mut Parser) -> Result<Statement, Diagnostic> {
    let start = parser.current().span.start;
    parse_type_declaration(parser, vec![Modifier::AccessNone], start)
}

/// `type Name <one type>`, terminated like a statement, or the grouped form
/// `type Name: (<type> terminator)+ ;;`.
fn parse_type_declaration(
    parser: &mut Parser,
    modifiers: Vec<Modifier>,
    start: SourcePointer,
) -> Result<Statement, Diagnostic> {
    parser.advance();
    let name = parser.expect(TokenKind::Identifier)?.text;

    if parser.current_kind() != TokenKind::Colon {
        let only_type = parse_type(parser, BindingPower::Default)?;
        expect_statement_terminator(parser)?;
        let span = Span {
            start,
            end: only_type.span().end,
        };
        return Ok(Statement::SimpleType {
            name,
            modifiers,
            only_type,
            span,
        });
    }
    parser.advance();

    let mut types = Vec::new();
    loop {
        types.push(parse_type(parser, BindingPower::Default)?);
        expect_statement_terminator(parser)?;
        if parser.current_kind() == TokenKind::SemiSemi {
            break;
        }
    }
    let end = parser.advance().span.end;

    Ok(Statement::MultiType {
        name,
        modifiers,
        types,
        span: Span { start, end },
    })
}
