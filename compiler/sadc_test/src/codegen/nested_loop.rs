use crate::compile_and_run;

const SOURCE: &str = r#"
{
    int i
    i = 0
    while (i != 3) {
        int j
        j = 0
        while (j != i) {
            print(j)
            j = 1 + j
        }
        print(" ")
        i = 1 + i
    }
}$
"#;

#[test]
fn nested_loop() {
    // the inner declaration resets `j` on every iteration
    assert_eq!(compile_and_run(SOURCE), " 0 01 ");
}
