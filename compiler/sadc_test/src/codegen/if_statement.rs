use crate::compile_and_run;

const SOURCE: &str = r#"
{
    int a
    a = 3
    if (a == 3) {
        print("yes")
    }
    if (a != 3) {
        print("no")
    }
    if (2 + 1 == a) {
        print(a)
    }
}$
"#;

#[test]
fn if_statement() {
    assert_eq!(compile_and_run(SOURCE), "yes3");
}
