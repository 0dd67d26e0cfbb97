use proptest::{prop_assert_eq, proptest};
use sadc_handler::{Dummy, Storage};
use sadc_lexical::token::TokenStream;

use super::{analyze, Program};
use crate::{
    error::Error,
    ty::{Reduction, Type},
};

fn analyze_source(source: &str) -> (Option<Program>, Vec<Error>) {
    let tokens = TokenStream::tokenize(source, 1, &Dummy);
    sadc_syntax::parser::parse(&tokens, &Dummy)
        .expect("test sources should be grammatically valid");

    let storage = Storage::<Error>::new();
    let program = analyze(&tokens, &storage).ok();

    (program, storage.into_vec())
}

fn errors(diagnostics: &[Error]) -> Vec<Error> {
    diagnostics.iter().copied().filter(Error::is_error).collect()
}

#[test]
fn well_typed_program() {
    const SOURCE: &str = r#"{
        int a
        a = 1 + 2
        string s
        s = "hello"
        boolean b
        b = true
        print(a)
        print(s)
        print(b)
    }$"#;

    let (program, diagnostics) = analyze_source(SOURCE);

    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let program = program.unwrap();

    let symbols = program.table().symbols().collect::<Vec<_>>();
    assert_eq!(symbols.len(), 3);
    assert_eq!(symbols[0].1.value().as_deref(), Some("1 + 2"));
    assert_eq!(symbols[1].1.value().as_deref(), Some("\"hello\""));
    assert_eq!(symbols[2].1.ty(), Type::Boolean);
}

#[test]
fn single_variable_round_trip() {
    let (program, diagnostics) = analyze_source("{int a\na=5\nprint(a)}$");

    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(
        program.unwrap().ast().render(),
        "<Program>\n\
         -<Block>\n\
         --<VarDecl>\n\
         ---[int]\n\
         ---[a]\n\
         --<AssignStatement>\n\
         ---[a]\n\
         ---[5]\n\
         --<PrintStatement>\n\
         ---[a]\n"
    );
}

#[test]
fn redeclaration_in_same_scope() {
    let (program, diagnostics) = analyze_source("{int a\nint a}$");

    assert!(program.is_none());

    let errors = errors(&diagnostics);
    assert_eq!(errors.len(), 1);

    let error = errors[0].as_redeclared_variable().unwrap();
    assert_eq!(error.name, 'a');
    assert_eq!(error.line, 2);
    assert_eq!(error.previous_line, 1);
}

#[test]
fn redeclaration_ignores_types() {
    let (_, diagnostics) = analyze_source("{int a\nstring a}$");

    let errors = errors(&diagnostics);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].as_redeclared_variable().is_some());
}

#[test]
fn shadowing_is_legal() {
    const SOURCE: &str = r#"{
        int a
        a = 1
        {
            string a
            a = "inner"
            print(a)
        }
        print(a)
    }$"#;

    let (program, diagnostics) = analyze_source(SOURCE);

    assert!(diagnostics.is_empty(), "{diagnostics:?}");

    let program = program.unwrap();
    let depths = program
        .table()
        .symbols()
        .map(|(_, x)| (x.ty(), x.depth()))
        .collect::<Vec<_>>();
    assert_eq!(depths, vec![(Type::Int, 0), (Type::String, 1)]);
}

#[test]
fn undeclared_uses() {
    for source in ["{a = 1}$", "{print(b)}$", "{int a\na = b}$"] {
        let (program, diagnostics) = analyze_source(source);

        assert!(program.is_none(), "{source}");

        let errors = errors(&diagnostics);
        assert_eq!(errors.len(), 1, "{source}");
        assert!(errors[0].as_undeclared_variable().is_some(), "{source}");
    }
}

#[test]
fn sibling_blocks_do_not_share_declarations() {
    const SOURCE: &str = "{\n{int a\na = 1\nprint(a)}\n{a = 2}\n}$";

    let (_, diagnostics) = analyze_source(SOURCE);

    let errors = errors(&diagnostics);
    assert_eq!(errors.len(), 1);

    let error = errors[0].as_undeclared_variable().unwrap();
    assert_eq!(error.name, 'a');
    assert_eq!(error.line, 5);
}

#[test]
fn assignment_type_mismatch() {
    let (program, diagnostics) = analyze_source("{boolean b\nb=1}$");

    assert!(program.is_none());

    let errors = errors(&diagnostics);
    assert_eq!(errors.len(), 1);

    let error = errors[0].as_type_mismatch().unwrap();
    assert_eq!(error.target, Some('b'));
    assert_eq!(error.expected, Reduction::Homogeneous(Type::Boolean));
    assert_eq!(error.found, Reduction::Homogeneous(Type::Int));
    assert_eq!(error.line, 2);
}

#[test]
fn mixed_expression_only_fits_a_string() {
    let (program, diagnostics) =
        analyze_source("{string s\ns = 1 + \"ab\"\nprint(s)}$");

    assert!(errors(&diagnostics).is_empty(), "{diagnostics:?}");
    assert!(program.is_some());

    let (_, diagnostics) = analyze_source("{int a\na = 1 + \"ab\"\nprint(a)}$");

    let errors = errors(&diagnostics);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].as_type_mismatch().unwrap().found, Reduction::Mixed);
}

#[test]
fn undeclared_operand_is_reported_once() {
    let (program, diagnostics) = analyze_source("{string s\ns = 1 + b}$");

    assert!(program.is_none());

    let errors = errors(&diagnostics);
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert_eq!(errors[0].as_undeclared_variable().unwrap().name, 'b');
}

#[test]
fn comparison_type_mismatch() {
    let (_, diagnostics) =
        analyze_source("{boolean b\nb = (1 == \"a\")\nprint(b)}$");

    let errors = errors(&diagnostics);
    assert_eq!(errors.len(), 1);

    let error = errors[0].as_type_mismatch().unwrap();
    assert_eq!(error.target, None);
    assert_eq!(error.expected, Reduction::Homogeneous(Type::Int));
    assert_eq!(error.found, Reduction::Homogeneous(Type::String));
}

#[test]
fn comparison_result_is_boolean() {
    let (program, diagnostics) = analyze_source(
        "{int a\na = 1\nboolean b\nb = (a != 2)\nif (b == true) {print(b)}}$",
    );

    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert!(program.is_some());
}

#[test]
fn only_first_unassigned_variable_is_reported() {
    let (program, diagnostics) =
        analyze_source("{int a\nint b\nprint(a)\nprint(b)}$");

    // warnings only
    assert!(program.is_some());

    let unassigned = diagnostics
        .iter()
        .filter_map(Error::as_unassigned_variable)
        .collect::<Vec<_>>();
    assert_eq!(unassigned.len(), 1);
    assert_eq!(unassigned[0].name, 'a');

    assert_eq!(
        diagnostics
            .iter()
            .filter(|x| x.as_uninitialized_use().is_some())
            .count(),
        2
    );
    assert!(diagnostics.iter().all(|x| x.as_unused_variable().is_none()));
}

#[test]
fn unused_variable() {
    let (program, diagnostics) =
        analyze_source("{int a\na = 1\nint b\nb = 2}$");

    assert!(program.is_some());
    assert_eq!(
        diagnostics
            .iter()
            .filter_map(Error::as_unused_variable)
            .map(|x| x.name)
            .collect::<Vec<_>>(),
        vec!['a', 'b']
    );
}

#[test]
fn while_loop_scopes() {
    const SOURCE: &str = r#"{
        int i
        i = 0
        while (i != 3) {
            int j
            j = i
            print(j)
            i = 1 + i
        }
    }$"#;

    let (program, diagnostics) = analyze_source(SOURCE);

    assert!(diagnostics.is_empty(), "{diagnostics:?}");

    let program = program.unwrap();
    assert_eq!(program.table().scopes().len(), 2);
}

proptest! {
    #[test]
    fn repeated_declarations(count in 1usize..10, name in "[a-z]") {
        let mut source = "{".to_owned();
        for _ in 0..count {
            source.push_str("int ");
            source.push_str(&name);
            source.push('\n');
        }
        source.push_str("}$");

        let (_, diagnostics) = analyze_source(&source);

        let redeclared = diagnostics
            .iter()
            .filter(|x| x.as_redeclared_variable().is_some())
            .count();
        prop_assert_eq!(redeclared, count - 1);
    }
}
