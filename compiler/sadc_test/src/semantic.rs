#![allow(missing_docs)]

//! Runs whole programs through the pipeline and checks the diagnostics of the
//! semantic analysis together with what reaches the code generator.

use proptest::{prop_assert, proptest, sample::select};
use sadc_codegen::instruction::{disassemble, Instruction};
use sadc_driver::{Compilation, Error};
use sadc_handler::Storage;
use sadc_semantic::error;

fn compile(source: &str) -> (Compilation, Vec<Error>) {
    let storage = Storage::<Error>::new();
    let compilation = sadc_driver::compile(source, 1, &storage);

    (compilation, storage.into_vec())
}

fn semantic_errors(diagnostics: &[Error]) -> Vec<error::Error> {
    diagnostics
        .iter()
        .filter_map(Error::as_semantic)
        .copied()
        .filter(error::Error::is_error)
        .collect()
}

#[test]
fn single_variable_program() {
    let (compilation, diagnostics) = compile("{int a\na=5\nprint(a)}$");

    assert!(diagnostics.is_empty(), "{diagnostics:?}");

    let output = compilation.output().as_ref().unwrap();
    assert_eq!(output.variables().len(), 1);

    let instructions = disassemble(output.image())
        .unwrap()
        .into_iter()
        .map(|(_, x)| x)
        .collect::<Vec<_>>();
    assert_eq!(instructions, vec![
        Instruction::LoadAccumulatorConstant(0),
        Instruction::StoreAccumulator(0x11),
        Instruction::LoadAccumulatorConstant(5),
        Instruction::StoreAccumulator(0x11),
        Instruction::LoadY(0x11),
        Instruction::LoadXConstant(1),
        Instruction::SystemCall,
        Instruction::Break,
    ]);
}

#[test]
fn redeclaration_produces_no_image() {
    let (compilation, diagnostics) = compile("{int a\nint a}$");

    let errors = semantic_errors(&diagnostics);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].as_redeclared_variable().is_some());
    assert!(compilation.output().is_none());
}

#[test]
fn string_takes_three_heap_bytes() {
    let (compilation, diagnostics) = compile("{string s\ns=\"ab\"}$");

    assert!(semantic_errors(&diagnostics).is_empty());

    let image = compilation.output().as_ref().unwrap().image();
    // `s` sits at 0x0B, right after the code
    assert_eq!(&image[0xFD..], b"ab\0");
    assert!(image[0x0C..0xFD].iter().all(|x| *x == 0));
    assert!(disassemble(image)
        .unwrap()
        .contains(&(5, Instruction::LoadAccumulatorConstant(0xFD))));
}

#[test]
fn boolean_assigned_an_integer() {
    let (compilation, diagnostics) = compile("{boolean b\nb=1}$");

    let errors = semantic_errors(&diagnostics);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].as_type_mismatch().is_some());
    assert!(compilation.program().is_none());
}

#[test]
fn sibling_blocks_are_separate_scopes() {
    const SOURCE: &str = "{
        {
            int a
            a = 1
            print(a)
        }
        {
            print(a)
        }
    }$";

    let (_, diagnostics) = compile(SOURCE);

    let errors = semantic_errors(&diagnostics);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].as_undeclared_variable().unwrap().line, 8);
}

#[test]
fn undeclared_uses_are_reported_everywhere() {
    const SOURCE: &str = "{
        a = 1
        print(b)
        while (c == 1) {}
        if (1 != d) {}
    }$";

    let (_, diagnostics) = compile(SOURCE);

    let names = semantic_errors(&diagnostics)
        .into_iter()
        .map(|x| x.into_undeclared_variable().unwrap().name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!['a', 'b', 'c', 'd']);
}

proptest! {
    #[test]
    fn well_typed_declarations(
        declarations in proptest::collection::vec(
            select(vec![
                ("int", "7"),
                ("int", "1 + 2"),
                ("string", "\"hi there\""),
                ("boolean", "false"),
                ("boolean", "(1 == 1)"),
            ]),
            1..6,
        )
    ) {
        let mut source = "{\n".to_owned();
        for ((ty, value), name) in declarations.iter().zip('a'..) {
            source.push_str(&format!("{ty} {name}\n{name} = {value}\n"));
        }
        source.push_str("}$");

        let (compilation, diagnostics) = compile(&source);

        prop_assert!(semantic_errors(&diagnostics).is_empty());
        prop_assert!(compilation.is_success());
    }
}
