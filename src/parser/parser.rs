//! Parser state and the top-level parse entry point.
//!
//! The `Parser` owns the lexer and the dispatch tables for both grammars:
//! one table group for expressions and statements, one for types. Tables are
//! populated once at construction and read-only afterwards; every grammar
//! layer works through free functions borrowing this shared state.

use crate::{
    ast::statements::Statement,
    errors::errors::{Diagnostic, DiagnosticKind},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
};

use super::{
    lookups::{
        create_token_lookups, BindingPower, BindingPowerLookup, HandlerTable, InfixHandler,
        InfixLookup, PrefixHandler, PrefixLookup, StmtHandler, StmtLookup, TypeInfixHandler,
        TypeInfixLookup, TypePrefixHandler, TypePrefixLookup,
    },
    stmt::parse_block,
    types::create_token_type_lookups,
};

/// The shared parser state: one token cursor plus the handler tables.
pub struct Parser {
    /// The token source; grammars advance it through `advance`/`reveal_next`.
    lexer: Lexer,
    /// Statement handlers by leading token kind.
    stmt_lookup: StmtLookup,
    /// Prefix (expression-starting) handlers.
    prefix_lookup: PrefixLookup,
    /// Infix (expression-continuing) handlers.
    infix_lookup: InfixLookup,
    /// Operator strengths for the expression climb.
    binding_power_lookup: BindingPowerLookup,
    /// Prefix handlers of the type grammar.
    type_prefix_lookup: TypePrefixLookup,
    /// Infix handlers of the type grammar; empty until union types land.
    type_infix_lookup: TypeInfixLookup,
    /// Operator strengths for the type climb.
    type_binding_power_lookup: BindingPowerLookup,
}

impl Parser {
    /// Builds a parser over `lexer` with both table groups registered.
    pub fn new(lexer: Lexer) -> Self {
        let mut parser = Parser {
            lexer,
            stmt_lookup: HandlerTable::new(),
            prefix_lookup: HandlerTable::new(),
            infix_lookup: HandlerTable::new(),
            binding_power_lookup: HandlerTable::new(),
            type_prefix_lookup: HandlerTable::new(),
            type_infix_lookup: HandlerTable::new(),
            type_binding_power_lookup: HandlerTable::new(),
        };
        create_token_lookups(&mut parser);
        create_token_type_lookups(&mut parser);
        parser
    }

    /// The current token, not consumed.
    pub fn current(&self) -> &Token {
        self.lexer.current()
    }

    /// The kind of the current token.
    pub fn current_kind(&self) -> TokenKind {
        self.lexer.current().kind
    }

    /// Consumes the current token; line tokens are skipped transparently.
    pub fn advance(&mut self) -> Token {
        self.lexer.next(false)
    }

    /// Consumes the current token, but returns a pending line token instead
    /// if one was just skipped; used wherever a newline may terminate a
    /// statement.
    pub fn reveal_next(&mut self) -> Token {
        self.lexer.next(true)
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    /// Checks the current token's kind and consumes it.
    pub fn expect(&mut self, expected: TokenKind) -> Result<Token, Diagnostic> {
        let found = self.current_kind();
        if found != expected {
            return Err(Diagnostic::syntax(
                DiagnosticKind::UnexpectedTokenKind {
                    expected: expected.to_string(),
                    found,
                },
                self.current().span,
            ));
        }
        Ok(self.advance())
    }

    pub fn stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn prefix_lookup(&self) -> &PrefixLookup {
        &self.prefix_lookup
    }

    pub fn infix_lookup(&self) -> &InfixLookup {
        &self.infix_lookup
    }

    pub fn binding_power_lookup(&self) -> &BindingPowerLookup {
        &self.binding_power_lookup
    }

    pub fn type_prefix_lookup(&self) -> &TypePrefixLookup {
        &self.type_prefix_lookup
    }

    pub fn type_infix_lookup(&self) -> &TypeInfixLookup {
        &self.type_infix_lookup
    }

    pub fn type_binding_power_lookup(&self) -> &BindingPowerLookup {
        &self.type_binding_power_lookup
    }

    /// Registers an infix handler with its binding power.
    pub fn infix(&mut self, kind: TokenKind, binding_power: BindingPower, handler: InfixHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.infix_lookup.insert(kind, handler);
    }

    /// Registers a prefix handler. Prefix registration never touches the
    /// binding-power table: a kind with a binding power but no infix handler
    /// must stay impossible.
    pub fn prefix(&mut self, kind: TokenKind, handler: PrefixHandler) {
        self.prefix_lookup.insert(kind, handler);
    }

    /// Registers a statement handler; the kind gets the default binding power
    /// so it halts any in-flight expression loop.
    pub fn statement(&mut self, kind: TokenKind, handler: StmtHandler) {
        self.binding_power_lookup.insert(kind, BindingPower::Default);
        self.stmt_lookup.insert(kind, handler);
    }

    /// Registers a type infix handler with its binding power.
    pub fn type_infix(
        &mut self,
        kind: TokenKind,
        binding_power: BindingPower,
        handler: TypeInfixHandler,
    ) {
        self.type_binding_power_lookup.insert(kind, binding_power);
        self.type_infix_lookup.insert(kind, handler);
    }

    /// Registers a type prefix handler.
    pub fn type_prefix(&mut self, kind: TokenKind, handler: TypePrefixHandler) {
        self.type_prefix_lookup.insert(kind, handler);
    }
}

/// Checks an already-consumed token against an accepted set of kinds.
pub fn expect_one_of(token: Token, kinds: &[TokenKind]) -> Result<Token, Diagnostic> {
    if kinds.contains(&token.kind) {
        return Ok(token);
    }
    Err(Diagnostic::syntax(
        DiagnosticKind::UnexpectedTokenKind {
            expected: format!(
                "one of {}",
                kinds
                    .iter()
                    .map(|kind| kind.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            found: token.kind,
        },
        token.span,
    ))
}

/// Parses a whole token stream into one top-level block.
pub fn parse(lexer: Lexer) -> Result<Statement, Diagnostic> {
    let mut parser = Parser::new(lexer);
    parse_block(&mut parser, &[])
}
