use sadc_handler::{Dummy, Storage};
use sadc_lexical::token::{Category, TokenStream};

use super::parse;
use crate::{
    cst::Label,
    error::{Expected, SyntaxError},
};

fn parse_source(
    source: &str,
) -> (Result<super::Tree, sadc_abort::Abort>, Vec<SyntaxError>) {
    let tokens = TokenStream::tokenize(source, 1, &Dummy);
    let storage = Storage::<SyntaxError>::new();
    let result = parse(&tokens, &storage);

    (result, storage.into_vec())
}

#[test]
fn accepts_every_statement_kind() {
    const SOURCE: &str = r#"{
        int a
        a = 1 + 2 + a
        string s
        s = "hi there"
        boolean b
        b = (a == 3)
        while (b != false) { b = false }
        if true { print(s) }
        { print("") }
    }$"#;

    let (result, errors) = parse_source(SOURCE);

    assert!(errors.is_empty(), "{errors:?}");
    assert!(result.is_ok());
}

#[test]
fn renders_the_concrete_tree() {
    let (result, _) = parse_source("{int a}$");
    let tree = result.unwrap();

    assert_eq!(
        tree.render(),
        "<Program>\n\
         -<Block>\n\
         --[{]\n\
         --<StatementList>\n\
         ---<Statement>\n\
         ----<VarDecl>\n\
         -----<Type>\n\
         ------[int]\n\
         -----<Identifier>\n\
         ------[a]\n\
         ---<StatementList>\n\
         --[}]\n\
         -[$]\n"
    );
}

#[test]
fn nested_addition_is_right_recursive() {
    let (result, _) = parse_source("{a = 1 + 2}$");
    let tree = result.unwrap();

    let int_expressions = tree
        .depth_first()
        .filter(|(id, _)| *tree.label(*id) == Label::IntExpression)
        .map(|(_, depth)| depth)
        .collect::<Vec<_>>();

    assert_eq!(int_expressions.len(), 2);
    assert!(int_expressions[0] < int_expressions[1]);
}

#[test]
fn missing_right_brace() {
    let (result, errors) = parse_source("{ int a $");

    assert!(result.is_err());
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].expected,
        Expected::Category(Category::RightBrace)
    );
    assert_eq!(
        errors[0].found.as_ref().map(|x| x.category),
        Some(Category::EndOfProgram)
    );
}

#[test]
fn missing_expression() {
    let (result, errors) = parse_source("{\n a = \n}$");

    assert!(result.is_err());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].expected, Expected::Expression);
    assert_eq!(errors[0].found.as_ref().map(|x| x.line), Some(3));
}

#[test]
fn missing_boolean_operator() {
    let (_, errors) = parse_source("{ if (a + b) { } }$");

    // `a + b` isn't an expression of the grammar: the digit is missing
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].expected, Expected::BooleanOperator);
}

#[test]
fn condition_must_be_boolean() {
    let (_, errors) = parse_source("{ while a { } }$");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].expected, Expected::BooleanExpression);
}

#[test]
fn stops_at_first_error() {
    let (_, errors) = parse_source("{ print( } int }$");

    assert_eq!(errors.len(), 1);
}
