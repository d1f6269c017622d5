/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - expressions: The expression kinds
/// - statements: The statement kinds and modifiers
/// - types: The type-annotation kinds
pub mod expressions;
pub mod statements;
pub mod types;
