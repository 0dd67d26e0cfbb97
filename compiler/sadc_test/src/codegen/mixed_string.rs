use crate::compile_and_run;

const SOURCE: &str = r#"
{
    string s
    s = 1 + "ab"
    print(s)
    print(2 + true)
}$
"#;

#[test]
fn mixed_string() {
    // a mixed expression prints as its own text
    assert_eq!(compile_and_run(SOURCE), "1 + \"ab\"2 + true");
}
