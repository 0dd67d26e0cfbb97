use proptest::{prop_assert_eq, proptest};
use sadc_handler::Storage;

use super::{Category, Keyword, TokenStream};
use crate::error::{self, Terminator};

fn tokenize(source: &str) -> (Vec<super::Token>, Vec<error::Error>) {
    let storage = Storage::<error::Error>::new();
    let tokens = TokenStream::tokenize(source, 1, &storage).into_vec();

    (tokens, storage.into_vec())
}

fn categories(source: &str) -> Vec<Category> {
    tokenize(source).0.into_iter().map(|x| x.category).collect()
}

#[test]
fn symbols() {
    assert_eq!(categories("{ ( ) = == != + }$"), vec![
        Category::LeftBrace,
        Category::LeftParenthesis,
        Category::RightParenthesis,
        Category::Assign,
        Category::Equal,
        Category::NotEqual,
        Category::Addition,
        Category::RightBrace,
        Category::EndOfProgram,
    ]);
}

#[test]
fn keyword_longest_match_then_identifiers() {
    let (tokens, errors) = tokenize("intx printa whilez$");

    assert!(errors.is_empty());
    assert_eq!(
        tokens
            .iter()
            .map(|x| (x.category, x.lexeme.as_str()))
            .collect::<Vec<_>>(),
        vec![
            (Category::Keyword(Keyword::Int), "int"),
            (Category::Identifier, "x"),
            (Category::Keyword(Keyword::Print), "print"),
            (Category::Identifier, "a"),
            (Category::Keyword(Keyword::While), "while"),
            (Category::Identifier, "z"),
            (Category::EndOfProgram, "$"),
        ]
    );
}

#[test]
fn digits_are_single_characters() {
    let (tokens, _) = tokenize("123$");

    assert_eq!(
        tokens.iter().map(|x| x.lexeme.as_str()).collect::<Vec<_>>(),
        vec!["1", "2", "3", "$"]
    );
    assert!(tokens[..3].iter().all(|x| x.category == Category::Digit));
}

#[test]
fn string_literal_characters() {
    assert_eq!(categories("\"a b\"$"), vec![
        Category::Quote,
        Category::Character,
        Category::Space,
        Category::Character,
        Category::Quote,
        Category::EndOfProgram,
    ]);

    // keywords are not recognized inside of a string
    assert_eq!(categories("\"if\"$"), vec![
        Category::Quote,
        Category::Character,
        Category::Character,
        Category::Quote,
        Category::EndOfProgram,
    ]);
}

#[test]
fn illegal_string_character() {
    let (tokens, errors) = tokenize("\"aB\"$");

    assert_eq!(errors.len(), 1);
    let error = errors[0].as_illegal_string_character().unwrap();
    assert_eq!(error.character, 'B');
    assert_eq!(error.column, 3);
    assert!(errors[0].is_error());

    assert_eq!(tokens[2].category, Category::Error);
}

#[test]
fn unrecognized_token() {
    let (tokens, errors) = tokenize("{ @ }$");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].as_unrecognized_token().unwrap().lexeme, "@");
    assert_eq!(tokens[1].category, Category::Error);
}

#[test]
fn comments_are_skipped() {
    assert_eq!(categories("{ /* print(a) \n int b */ }$"), vec![
        Category::LeftBrace,
        Category::RightBrace,
        Category::EndOfProgram,
    ]);
}

#[test]
fn unterminated_comment_and_quote() {
    let (_, errors) = tokenize("{ /* never closed");
    assert!(errors.iter().any(|x| x
        .as_missing_terminator()
        .is_some_and(|x| x.terminator == Terminator::Comment)));

    let (_, errors) = tokenize("{ \"abc");
    assert!(errors.iter().any(|x| x
        .as_missing_terminator()
        .is_some_and(|x| x.terminator == Terminator::Quote)));
}

#[test]
fn missing_end_marker_is_synthesized() {
    let (tokens, errors) = tokenize("{}");

    assert_eq!(errors.len(), 1);
    let warning = errors[0].as_missing_terminator().unwrap();
    assert_eq!(warning.terminator, Terminator::EndOfProgram);
    assert!(!errors[0].is_error());

    assert_eq!(tokens.last().unwrap().category, Category::EndOfProgram);
}

#[test]
fn line_numbers_start_at_first_line() {
    let storage = Storage::<error::Error>::new();
    let tokens = TokenStream::tokenize("{\n  int a\n}$", 7, &storage);

    assert_eq!(
        tokens.iter().map(|x| (x.lexeme.as_str(), x.line)).collect::<Vec<_>>(),
        vec![("{", 7), ("int", 8), ("a", 8), ("}", 9), ("$", 9)]
    );
    assert_eq!(tokens[1].column, 3);
}

proptest! {
    #[test]
    fn separated_identifiers(
        identifiers in proptest::collection::vec("[a-z]", 1..16)
    ) {
        let source = format!("{}$", identifiers.join(" "));
        let (tokens, errors) = tokenize(&source);

        prop_assert_eq!(errors.len(), 0);
        prop_assert_eq!(tokens.len(), identifiers.len() + 1);

        for (token, identifier) in tokens.iter().zip(&identifiers) {
            prop_assert_eq!(token.category, Category::Identifier);
            prop_assert_eq!(&token.lexeme, identifier);
        }
    }

    #[test]
    fn every_stream_ends_with_one_marker(source in "[a-z0-9{}()=+ \n]{0,64}") {
        let (tokens, _) = tokenize(&source);

        let markers = tokens
            .iter()
            .filter(|x| x.category == Category::EndOfProgram)
            .count();

        prop_assert_eq!(markers, 1);
        prop_assert_eq!(
            tokens.last().map(|x| x.category),
            Some(Category::EndOfProgram)
        );
    }
}
