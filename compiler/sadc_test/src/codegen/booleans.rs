use crate::compile_and_run;

const SOURCE: &str = r#"
{
    boolean b
    b = (1 == 2)
    print(b)
    b = true
    print(b)
    print((b != false))
    if (b == (false == false)) {
        print("nested")
    }
}$
"#;

#[test]
fn booleans() {
    assert_eq!(compile_and_run(SOURCE), "falsetruetruenested");
}
