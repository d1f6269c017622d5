use crate::{
    ast::{expressions::Expression, statements::Statement, types::Type},
    errors::errors::Diagnostic,
    lexer::tokens::{TokenKind, TOKEN_KIND_COUNT},
};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator strength, lowest to highest. The parsing loops keep consuming
/// infix operators only while the next operator is strictly stronger than
/// the caller's minimum, which makes equal-strength operators chain
/// left-to-right.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Comma,
    Assignment,
    Lambda,
    Unary,
    Ternary,
    Logical,
    Relational,
    Additive,
    Multiplicative,
    Call,
    Member,
    Label,
    Primary,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Statement, Diagnostic>;
pub type PrefixHandler = fn(&mut Parser) -> Result<Expression, Diagnostic>;
pub type InfixHandler = fn(&mut Parser, Expression, BindingPower) -> Result<Expression, Diagnostic>;
pub type TypePrefixHandler = fn(&mut Parser) -> Result<Type, Diagnostic>;
pub type TypeInfixHandler = fn(&mut Parser, Type, BindingPower) -> Result<Type, Diagnostic>;

/// Dispatch table indexed by token-kind ordinal.
///
/// A fixed-size array instead of a hash map: registration happens once at
/// parser construction, lookups are O(1), and a missing handler is a cheap,
/// explicit `None`.
pub struct HandlerTable<H> {
    entries: [Option<H>; TOKEN_KIND_COUNT],
}

impl<H: Copy> HandlerTable<H> {
    pub fn new() -> Self {
        HandlerTable {
            entries: [None; TOKEN_KIND_COUNT],
        }
    }

    pub fn insert(&mut self, kind: TokenKind, handler: H) {
        self.entries[kind as usize] = Some(handler);
    }

    pub fn get(&self, kind: TokenKind) -> Option<H> {
        self.entries[kind as usize]
    }
}

impl<H: Copy> Default for HandlerTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

pub type StmtLookup = HandlerTable<StmtHandler>;
pub type PrefixLookup = HandlerTable<PrefixHandler>;
pub type InfixLookup = HandlerTable<InfixHandler>;
pub type BindingPowerLookup = HandlerTable<BindingPower>;
pub type TypePrefixLookup = HandlerTable<TypePrefixHandler>;
pub type TypeInfixLookup = HandlerTable<TypeInfixHandler>;

/// Registers every expression and statement handler.
pub fn create_token_lookups(parser: &mut Parser) {
    // Assignment-like
    parser.infix(TokenKind::Assignment, BindingPower::Assignment, parse_binary);
    parser.infix(TokenKind::Define, BindingPower::Assignment, parse_binary);

    parser.infix(TokenKind::Comma, BindingPower::Comma, parse_comma_listing);

    // Prefix unary
    parser.prefix(TokenKind::PlusPlus, parse_pre_unary);
    parser.prefix(TokenKind::MinusMinus, parse_pre_unary);
    parser.prefix(TokenKind::Plus, parse_pre_unary);
    parser.prefix(TokenKind::Dash, parse_pre_unary);
    parser.prefix(TokenKind::Not, parse_pre_unary);

    // Logical
    parser.infix(TokenKind::And, BindingPower::Logical, parse_binary);
    parser.infix(TokenKind::Or, BindingPower::Logical, parse_binary);
    parser.infix(TokenKind::DotDot, BindingPower::Logical, parse_binary);

    // Relational
    parser.infix(TokenKind::Equals, BindingPower::Relational, parse_binary);
    parser.infix(TokenKind::NotEquals, BindingPower::Relational, parse_binary);
    parser.infix(TokenKind::Less, BindingPower::Relational, parse_binary);
    parser.infix(TokenKind::LessEquals, BindingPower::Relational, parse_binary);
    parser.infix(TokenKind::Greater, BindingPower::Relational, parse_binary);
    parser.infix(TokenKind::GreaterEquals, BindingPower::Relational, parse_binary);

    // Additive and multiplicative
    parser.infix(TokenKind::Plus, BindingPower::Additive, parse_binary);
    parser.infix(TokenKind::Dash, BindingPower::Additive, parse_binary);
    parser.infix(TokenKind::Star, BindingPower::Multiplicative, parse_binary);
    parser.infix(TokenKind::Slash, BindingPower::Multiplicative, parse_binary);
    parser.infix(TokenKind::Percent, BindingPower::Multiplicative, parse_binary);

    // Calls
    parser.infix(TokenKind::OpenParen, BindingPower::Call, parse_call);
    parser.infix(TokenKind::Pipe, BindingPower::Call, parse_piped_call);

    // Member access and colon lambdas
    parser.infix(TokenKind::Dot, BindingPower::Member, parse_binary);
    parser.infix(TokenKind::Colon, BindingPower::Lambda, parse_binary);

    // Match binds at assignment strength: branches parse at the match's own
    // strength, so colon lambdas fit inside a branch while a surrounding
    // definition's `=` stays outside.
    parser.infix(TokenKind::Match, BindingPower::Assignment, parse_match);

    // Postfix unary
    parser.infix(TokenKind::PlusPlus, BindingPower::Unary, parse_post_unary);
    parser.infix(TokenKind::MinusMinus, BindingPower::Unary, parse_post_unary);

    // Literals and symbols
    parser.prefix(TokenKind::Identifier, parse_primary);
    parser.prefix(TokenKind::Number, parse_primary);
    parser.prefix(TokenKind::String, parse_primary);
    parser.prefix(TokenKind::Char, parse_primary);
    parser.prefix(TokenKind::OpenParen, parse_group);
    parser.prefix(TokenKind::OpenCurly, parse_object);

    // Statements
    parser.statement(TokenKind::Identifier, parse_modified_statement);
    parser.statement(TokenKind::Our, parse_modified_statement);
    parser.statement(TokenKind::My, parse_modified_statement);
    parser.statement(TokenKind::Native, parse_modified_statement);
    parser.statement(TokenKind::Force, parse_modified_statement);
    parser.statement(TokenKind::Import, parse_get_import);
    parser.statement(TokenKind::Pkg, parse_package);
    parser.statement(TokenKind::Type, parse_type_statement);
}
