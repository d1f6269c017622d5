//! Unit tests for the parser module.
//!
//! Covers the expression engine (precedence, associativity, calls, groups,
//! objects, match), the statement grammar (definitions, imports, package and
//! type declarations, terminators) and the type grammar.

use crate::{
    ast::{
        expressions::Expression,
        statements::{Modifier, Statement},
        types::Type,
    },
    errors::errors::{Diagnostic, DiagnosticKind},
    lexer::lexer::Lexer,
};

use super::{
    expr::parse_expression,
    lookups::BindingPower,
    parser::{parse, Parser},
    types::parse_type,
};

fn parse_program(source: &str) -> Result<Statement, Diagnostic> {
    parse(Lexer::new(source))
}

fn parse_single_expression(source: &str) -> Result<Expression, Diagnostic> {
    let mut parser = Parser::new(Lexer::new(source));
    parse_expression(&mut parser, BindingPower::Default)
}

fn parse_single_type(source: &str) -> Result<Type, Diagnostic> {
    let mut parser = Parser::new(Lexer::new(source));
    parse_type(&mut parser, BindingPower::Default)
}

fn block_statements(statement: Statement) -> Vec<Statement> {
    match statement {
        Statement::Block { statements, .. } => statements,
        other => panic!("expected a block, got {:?}", other),
    }
}

fn symbol_of(expression: &Expression) -> &str {
    match expression {
        Expression::Identifier { symbol, .. } => symbol,
        other => panic!("expected an identifier, got {:?}", other),
    }
}

#[test]
fn test_parse_empty_program() {
    let result = parse_program("");
    assert!(result.is_ok());
    assert!(block_statements(result.unwrap()).is_empty());
}

#[test]
fn test_parse_blank_program() {
    let result = parse_program("\n\n ; \n");
    assert!(result.is_ok());
    assert!(block_statements(result.unwrap()).is_empty());
}

#[test]
fn test_parse_package_declaration() {
    let statements = block_statements(parse_program("pkg gatto.nero.example\n").unwrap());

    assert_eq!(statements.len(), 1);
    let Statement::Package { name, .. } = &statements[0] else {
        panic!("expected a package declaration");
    };
    let Expression::Binary { op, .. } = name else {
        panic!("expected a dotted name");
    };
    assert_eq!(op, ".");
}

#[test]
fn test_parse_get_import() {
    let statements =
        block_statements(parse_program("import gatto.nero.lang [ Str, Int ]\n").unwrap());

    let Statement::GetImport { targets, from, .. } = &statements[0] else {
        panic!("expected an import");
    };
    assert_eq!(targets, &["Str".to_string(), "Int".to_string()]);
    assert!(matches!(from, Expression::Binary { .. }));
}

#[test]
fn test_parse_get_import_from_ordering() {
    let statements =
        block_statements(parse_program("import [ Str ] from gatto.nero.lang\n").unwrap());

    let Statement::GetImport { targets, from, .. } = &statements[0] else {
        panic!("expected an import");
    };
    assert_eq!(targets, &["Str".to_string()]);
    assert!(matches!(from, Expression::Binary { .. }));
}

#[test]
fn test_parse_expression_statement() {
    let statements = block_statements(parse_program("1 + 2\n").unwrap());

    assert_eq!(statements.len(), 1);
    let Statement::Expression { expression, .. } = &statements[0] else {
        panic!("expected an expression statement");
    };
    assert!(matches!(expression, Expression::Binary { .. }));
}

#[test]
fn test_left_associative_chain() {
    // a OP b OP c at one strength is ((a OP b) OP c), never right-nested.
    let expression = parse_single_expression("a - b - c").unwrap();

    let Expression::Binary {
        left, op, right, ..
    } = expression
    else {
        panic!("expected a binary expression");
    };
    assert_eq!(op, "-");
    assert_eq!(symbol_of(&right), "c");

    let Expression::Binary {
        left: inner_left,
        right: inner_right,
        ..
    } = *left
    else {
        panic!("expected the left side to be the first subtraction");
    };
    assert_eq!(symbol_of(&inner_left), "a");
    assert_eq!(symbol_of(&inner_right), "b");
}

#[test]
fn test_multiplicative_binds_tighter() {
    let expression = parse_single_expression("1 + 2 * 3").unwrap();

    let Expression::Binary { op, right, .. } = expression else {
        panic!("expected a binary expression");
    };
    assert_eq!(op, "+");
    assert!(matches!(*right, Expression::Binary { ref op, .. } if op == "*"));
}

#[test]
fn test_prefix_chain_nests_right() {
    let expression = parse_single_expression("!-x").unwrap();

    let Expression::PreUnary { op, right, .. } = expression else {
        panic!("expected a prefix expression");
    };
    assert_eq!(op, "!");
    let Expression::PreUnary {
        op: inner_op,
        right: inner_right,
        ..
    } = *right
    else {
        panic!("expected a nested prefix expression");
    };
    assert_eq!(inner_op, "-");
    assert_eq!(symbol_of(&inner_right), "x");
}

#[test]
fn test_postfix_unary() {
    let expression = parse_single_expression("x++").unwrap();

    let Expression::PostUnary { op, left, .. } = expression else {
        panic!("expected a postfix expression");
    };
    assert_eq!(op, "++");
    assert_eq!(symbol_of(&left), "x");
}

#[test]
fn test_call_arguments_listing() {
    // Three comma-separated arguments become one three-element listing.
    let expression = parse_single_expression("f (a, b, c)").unwrap();

    let Expression::Call {
        target, arguments, ..
    } = expression
    else {
        panic!("expected a call");
    };
    assert_eq!(symbol_of(&target), "f");

    let Expression::Listing { expressions, .. } = *arguments else {
        panic!("expected a listing of arguments");
    };
    assert_eq!(expressions.len(), 3);
    assert_eq!(symbol_of(&expressions[0]), "a");
    assert_eq!(symbol_of(&expressions[1]), "b");
    assert_eq!(symbol_of(&expressions[2]), "c");
}

#[test]
fn test_empty_call_arguments() {
    let expression = parse_single_expression("f ()").unwrap();

    let Expression::Call { arguments, .. } = expression else {
        panic!("expected a call");
    };
    assert!(matches!(*arguments, Expression::EmptyGroup { .. }));
}

#[test]
fn test_piped_call() {
    let expression = parse_single_expression("x | f").unwrap();

    let Expression::PipedCall {
        target, argument, ..
    } = expression
    else {
        panic!("expected a piped call");
    };
    assert_eq!(symbol_of(&target), "f");
    assert_eq!(symbol_of(&argument), "x");
}

#[test]
fn test_comma_listing_keeps_first_element() {
    let expression = parse_single_expression("a, b, c").unwrap();

    let Expression::Listing { expressions, .. } = expression else {
        panic!("expected a listing");
    };
    assert_eq!(expressions.len(), 3);
    assert_eq!(symbol_of(&expressions[0]), "a");
}

#[test]
fn test_group_span_is_widened() {
    let source = "(1 + 2)";
    let expression = parse_single_expression(source).unwrap();

    assert!(matches!(expression, Expression::Binary { .. }));
    let span = expression.span();
    assert_eq!(&source[span.start.index..span.end.index], "(1 + 2)");
}

#[test]
fn test_empty_group() {
    let source = "()";
    let expression = parse_single_expression(source).unwrap();

    let Expression::EmptyGroup { span } = expression else {
        panic!("expected an empty group");
    };
    assert_eq!(&source[span.start.index..span.end.index], "()");
}

#[test]
fn test_unterminated_group_diagnostic() {
    let source = "(1 + 2";
    let error = parse_single_expression(source).unwrap_err();

    assert!(matches!(
        error.kind(),
        DiagnosticKind::UnexpectedTokenKind { .. }
    ));
    // The span points at the actual end of input.
    assert_eq!(error.span().start.index, source.len());
}

#[test]
fn test_no_prefix_handler_diagnostic() {
    let error = parse_single_expression(")").unwrap_err();

    assert!(matches!(
        error.kind(),
        DiagnosticKind::NoPrefixHandler { .. }
    ));
}

#[test]
fn test_named_definition_with_function_type() {
    let source = "foo (Int): Int = n: n * factorial (n - 1)";
    let statements = block_statements(parse_program(source).unwrap());

    assert_eq!(statements.len(), 1);
    let Statement::NamedDefinition {
        name,
        modifiers,
        var_type,
        value,
        ..
    } = &statements[0]
    else {
        panic!("expected a named definition");
    };
    assert_eq!(name, "foo");
    assert_eq!(modifiers, &[Modifier::AccessNone]);

    let Some(Type::Function {
        parameters,
        return_type,
        ..
    }) = var_type
    else {
        panic!("expected a declared function type");
    };
    assert_eq!(parameters.len(), 1);
    assert!(matches!(parameters[0], Type::Symbol { ref symbol, .. } if symbol == "Int"));
    assert!(return_type.is_some());

    // The value is a colon lambda whose body multiplies into a recursive call.
    let Expression::Binary {
        op, left, right, ..
    } = value
    else {
        panic!("expected a lambda value");
    };
    assert_eq!(op, ":");
    assert_eq!(symbol_of(left), "n");
    let Expression::Binary {
        op: body_op, right: body_right, ..
    } = right.as_ref()
    else {
        panic!("expected a binary lambda body");
    };
    assert_eq!(body_op, "*");
    assert!(matches!(body_right.as_ref(), Expression::Call { .. }));

    // Span round-trip: the value's span reproduces its exact source text.
    let span = value.span();
    assert_eq!(
        &source[span.start.index..span.end.index],
        "n: n * factorial (n - 1)"
    );
}

#[test]
fn test_multi_arm_definition() {
    let statements = block_statements(parse_program("f: our (Int) = x: x;; ").unwrap());

    assert_eq!(statements.len(), 1);
    let Statement::NamedDefinitions {
        name, definitions, ..
    } = &statements[0]
    else {
        panic!("expected a multi-arm definition");
    };
    assert_eq!(name, "f");
    assert_eq!(definitions.len(), 1);
    assert_eq!(definitions[0].modifiers, vec![Modifier::Public]);
    assert!(matches!(
        definitions[0].var_type,
        Some(Type::Function { .. })
    ));
}

#[test]
fn test_multi_arm_definition_several_arms() {
    let source = "recurse:\n  our (Str) = value: recurse (value, 10)\n  my (Str, Int) = value, index\n;;\n";
    let statements = block_statements(parse_program(source).unwrap());

    let Statement::NamedDefinitions { definitions, .. } = &statements[0] else {
        panic!("expected a multi-arm definition");
    };
    assert_eq!(definitions.len(), 2);
    assert_eq!(definitions[0].modifiers, vec![Modifier::Public]);
    assert_eq!(definitions[1].modifiers, vec![Modifier::Private]);
}

#[test]
fn test_modifier_order() {
    let statements =
        block_statements(parse_program("our native force stdout Stream = handle\n").unwrap());

    let Statement::NamedDefinition {
        name, modifiers, ..
    } = &statements[0]
    else {
        panic!("expected a named definition");
    };
    assert_eq!(name, "stdout");
    assert_eq!(
        modifiers,
        &[Modifier::Public, Modifier::Native, Modifier::Force]
    );
}

#[test]
fn test_object_literal_members() {
    let source = "o = { a = 1\n b Int = 2\n }\n";
    let statements = block_statements(parse_program(source).unwrap());

    let Statement::NamedDefinition { value, .. } = &statements[0] else {
        panic!("expected a named definition");
    };
    let Expression::Object { members, .. } = value else {
        panic!("expected an object literal value");
    };
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].name, "a");
    assert!(members[0].member_type.is_none());
    assert_eq!(members[0].modifiers, vec![Modifier::AccessNone]);
    assert_eq!(members[1].name, "b");
    assert!(matches!(
        members[1].member_type,
        Some(Type::Symbol { ref symbol, .. }) if symbol == "Int"
    ));
}

#[test]
fn test_unclosed_object_literal_errors() {
    let result = parse_program("o = { a = 1\n");
    assert!(result.is_err());
}

#[test]
fn test_match_expression() {
    let source = "result = x match\n  1: \"one\"\n  2: \"two\"\nend\n";
    let statements = block_statements(parse_program(source).unwrap());

    let Statement::NamedDefinition { value, .. } = &statements[0] else {
        panic!("expected a named definition");
    };
    let Expression::Match { left, branches, .. } = value else {
        panic!("expected a match value");
    };
    assert_eq!(symbol_of(left), "x");
    assert_eq!(branches.len(), 2);
    assert!(matches!(&branches[0], Expression::Binary { op, .. } if op == ":"));
}

#[test]
fn test_match_with_comma_separators() {
    let expression = parse_single_expression("x match 1: \"one\", 2: \"two\" end").unwrap();

    let Expression::Match { branches, .. } = expression else {
        panic!("expected a match");
    };
    assert_eq!(branches.len(), 2);
}

#[test]
fn test_match_requires_two_branches() {
    let error = parse_single_expression("x match 1: \"one\" end").unwrap_err();

    assert!(matches!(
        error.kind(),
        DiagnosticKind::UnexpectedTokenKind { .. }
    ));
}

#[test]
fn test_missing_statement_terminator_errors() {
    let result = parse_program("a = 1 b = 2");
    assert!(result.is_err());
}

#[test]
fn test_semicolon_terminates_statement() {
    let result = parse_program("a = 1; b = 2;");
    assert!(result.is_ok());
    assert_eq!(block_statements(result.unwrap()).len(), 2);
}

#[test]
fn test_not_a_statement_diagnostic() {
    let error = parse_program(")\n").unwrap_err();

    assert!(matches!(
        error.kind(),
        DiagnosticKind::NotAStatement { .. }
    ));
}

#[test]
fn test_structural_error_keeps_its_kind() {
    // A failure deeper inside the expression fallback is not rewrapped.
    let error = parse_program("(1 + 2\n").unwrap_err();

    assert!(matches!(
        error.kind(),
        DiagnosticKind::UnexpectedTokenKind { .. }
    ));
}

#[test]
fn test_simple_type_declaration() {
    let statements = block_statements(parse_program("type Name Str\n").unwrap());

    let Statement::SimpleType {
        name, only_type, ..
    } = &statements[0]
    else {
        panic!("expected a type declaration");
    };
    assert_eq!(name, "Name");
    assert!(matches!(only_type, Type::Symbol { symbol, .. } if symbol == "Str"));
}

#[test]
fn test_object_type_declaration() {
    let source = "type Person {\n  name (): Str\n  age (): Int\n}\n";
    let statements = block_statements(parse_program(source).unwrap());

    let Statement::SimpleType { only_type, .. } = &statements[0] else {
        panic!("expected a type declaration");
    };
    let Type::Object { members, .. } = only_type else {
        panic!("expected an object type");
    };
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].name, "name");
    assert!(matches!(members[0].member_type, Type::Function { .. }));
}

#[test]
fn test_multi_type_declaration() {
    let source = "type overloaded:\n  (Str)\n  (Int)\n;;\n";
    let statements = block_statements(parse_program(source).unwrap());

    let Statement::MultiType { name, types, .. } = &statements[0] else {
        panic!("expected a grouped type declaration");
    };
    assert_eq!(name, "overloaded");
    assert_eq!(types.len(), 2);
}

#[test]
fn test_modified_type_declaration() {
    let statements = block_statements(parse_program("our type Name Str\n").unwrap());

    let Statement::SimpleType { modifiers, .. } = &statements[0] else {
        panic!("expected a type declaration");
    };
    assert_eq!(modifiers, &[Modifier::Public]);
}

#[test]
fn test_parse_sized_array_type() {
    let parsed = parse_single_type("[5]Int").unwrap();

    let Type::Array { size, element, .. } = parsed else {
        panic!("expected an array type");
    };
    assert_eq!(size.as_deref(), Some("5"));
    assert!(matches!(*element, Type::Symbol { ref symbol, .. } if symbol == "Int"));
}

#[test]
fn test_parse_unsized_array_type() {
    let parsed = parse_single_type("[]Str").unwrap();

    let Type::Array { size, .. } = parsed else {
        panic!("expected an array type");
    };
    assert!(size.is_none());
}

#[test]
fn test_parse_function_type() {
    let parsed = parse_single_type("(Int, Str): Bool").unwrap();

    let Type::Function {
        parameters,
        return_type,
        ..
    } = parsed
    else {
        panic!("expected a function type");
    };
    assert_eq!(parameters.len(), 2);
    let return_type = return_type.expect("expected a return type");
    assert!(matches!(*return_type, Type::Symbol { ref symbol, .. } if symbol == "Bool"));
}

#[test]
fn test_parse_function_type_without_return() {
    let parsed = parse_single_type("(Int)").unwrap();

    let Type::Function {
        parameters,
        return_type,
        ..
    } = parsed
    else {
        panic!("expected a function type");
    };
    assert_eq!(parameters.len(), 1);
    assert!(return_type.is_none());
}

#[test]
fn test_type_no_prefix_handler() {
    let error = parse_single_type("= x").unwrap_err();

    assert!(matches!(
        error.kind(),
        DiagnosticKind::NoPrefixHandler { grammar: "type", .. }
    ));
}

#[test]
fn test_nested_array_of_functions() {
    let parsed = parse_single_type("[](Int): Str").unwrap();

    let Type::Array { element, .. } = parsed else {
        panic!("expected an array type");
    };
    assert!(matches!(*element, Type::Function { .. }));
}
