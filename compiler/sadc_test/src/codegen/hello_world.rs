use crate::compile_and_run;

const SOURCE: &str = r#"
{
    string s
    s = "hello world"
    print(s)
}$
"#;

#[test]
fn hello_world() {
    assert_eq!(compile_and_run(SOURCE), "hello world");
}
