use proptest::{collection::vec, prop_assert_eq, proptest};

use super::{split, Program};

#[test]
fn programs_keep_their_end_marker() {
    let programs = split("{}$\n{int a}$");

    assert_eq!(programs, vec![
        Program { number: 1, first_line: 1, text: "{}$" },
        Program { number: 2, first_line: 1, text: "\n{int a}$" },
    ]);
}

#[test]
fn trailing_text() {
    // blank text after the last `$` is not a program
    assert_eq!(split("{}$\n\n  \n").len(), 1);

    let programs = split("{}$\n\n{print(1)}\n");
    assert_eq!(programs.len(), 2);
    assert_eq!(programs[1].text, "\n\n{print(1)}\n");
    assert_eq!(programs[1].first_line, 1);
}

#[test]
fn line_numbers_carry_over() {
    let programs = split("{\n}$\n{\n\n}$ {}$");

    let lines = programs.iter().map(|x| x.first_line).collect::<Vec<_>>();
    assert_eq!(lines, vec![1, 2, 5]);
}

#[test]
fn empty_input() {
    assert!(split("").is_empty());
    assert!(split(" \n\t").is_empty());
}

proptest! {
    #[test]
    fn one_program_per_marker(bodies in vec("[a-z{}\n ]{1,8}", 0..8)) {
        let input = bodies
            .iter()
            .map(|x| format!("{{{x}}}$"))
            .collect::<String>();

        let programs = split(&input);

        prop_assert_eq!(programs.len(), bodies.len());
        for (index, program) in programs.iter().enumerate() {
            prop_assert_eq!(program.number, index + 1);
            prop_assert_eq!(program.text, format!("{{{}}}$", bodies[index]));
        }
    }
}
