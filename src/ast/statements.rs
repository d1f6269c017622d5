use crate::Span;

use super::{expressions::Expression, types::Type};

/// Access and behavior flags on definitions, type declarations and object
/// members. At most three: one access flag, then optionally `Native`, then
/// optionally `Force`. A parsed modifier list always leads with an access
/// flag, `AccessNone` when no keyword was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// `our`
    Public,
    /// No access keyword written.
    AccessNone,
    /// `my`
    Private,
    /// `native`
    Native,
    /// `force`
    Force,
}

/// Statement kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A run of statements up to a terminator token or end of input.
    Block {
        statements: Vec<Statement>,
        span: Span,
    },
    /// A bare expression in statement position.
    Expression {
        expression: Expression,
        span: Span,
    },
    /// `import <source> [ a, b ]` or `import [ a, b ] from <source>`
    GetImport {
        targets: Vec<String>,
        from: Expression,
        span: Span,
    },
    /// `pkg <name expression>`
    Package {
        name: Expression,
        span: Span,
    },
    /// `modifiers? name Type? = value`
    NamedDefinition {
        name: String,
        modifiers: Vec<Modifier>,
        var_type: Option<Type>,
        value: Expression,
        span: Span,
    },
    /// `name: (modifiers? Type? = value)+ ;;`, one name bound to several
    /// differently-typed implementations.
    NamedDefinitions {
        name: String,
        modifiers: Vec<Modifier>,
        definitions: Vec<Definition>,
        span: Span,
    },
    /// `type Name <one type>`
    SimpleType {
        name: String,
        modifiers: Vec<Modifier>,
        only_type: Type,
        span: Span,
    },
    /// `type Name: (<type> term)+ ;;`
    MultiType {
        name: String,
        modifiers: Vec<Modifier>,
        types: Vec<Type>,
        span: Span,
    },
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Block { span, .. }
            | Statement::Expression { span, .. }
            | Statement::GetImport { span, .. }
            | Statement::Package { span, .. }
            | Statement::NamedDefinition { span, .. }
            | Statement::NamedDefinitions { span, .. }
            | Statement::SimpleType { span, .. }
            | Statement::MultiType { span, .. } => *span,
        }
    }
}

/// One arm of a multi-arm named definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub modifiers: Vec<Modifier>,
    pub var_type: Option<Type>,
    pub value: Expression,
    pub span: Span,
}
