use crate::compile_and_run;

const SOURCE: &str = r#"
{
    string s
    s = "ab"
    if (s == "ab") {
        print("same")
    }
    if (s != "cd") {
        print(" different")
    }
}$
"#;

#[test]
fn string_comparison() {
    // identical literals share their heap address
    assert_eq!(compile_and_run(SOURCE), "same different");
}
