use crate::compile_and_run;

const SOURCE: &str = r#"
{
    int a
    a = 1
    {
        int a
        a = 2
        print(a)
    }
    {
        string a
        a = "x"
        print(a)
    }
    print(a)
}$
"#;

#[test]
fn shadowing() {
    assert_eq!(compile_and_run(SOURCE), "2x1");
}
