use crate::compile_and_run;

const SOURCE: &str = r#"
{
    int i
    i = 0

    /* counts to five */
    while (i != 5) {
        print(i)
        i = 1 + i
    }

    print("done")
}$
"#;

#[test]
fn while_loop() {
    assert_eq!(compile_and_run(SOURCE), "01234done");
}
