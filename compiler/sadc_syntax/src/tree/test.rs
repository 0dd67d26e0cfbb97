use proptest::{prop_assert_eq, proptest};

use super::SyntaxTree;

#[test]
fn depth_and_parent() {
    let mut tree = SyntaxTree::new("<Program>");
    let block = tree.add_child(tree.root(), "<Block>");
    let print = tree.add_child(block, "<PrintStatement>");
    let digit = tree.add_child(print, "[5]");

    assert_eq!(tree.depth(tree.root()), 0);
    assert_eq!(tree.depth(digit), 3);
    assert_eq!(tree.parent(digit), Some(print));
    assert_eq!(tree.parent(tree.root()), None);
    assert_eq!(tree.children(block), &[print]);
}

#[test]
fn attach_moves_the_subtree() {
    let mut subtree = SyntaxTree::new("<Block>");
    let declaration = subtree.add_child(subtree.root(), "<VarDecl>");
    subtree.add_child(declaration, "[int]");
    subtree.add_child(declaration, "[a]");

    let mut tree = SyntaxTree::new("<Program>");
    let block = tree.attach(tree.root(), subtree);
    tree.add_child(tree.root(), "[$]");

    assert_eq!(*tree.label(block), "<Block>");
    assert_eq!(tree.parent(block), Some(tree.root()));

    let declaration = tree.children(block)[0];
    assert_eq!(*tree.label(declaration), "<VarDecl>");
    assert_eq!(tree.parent(declaration), Some(block));
    assert_eq!(
        tree.children(declaration)
            .iter()
            .map(|x| *tree.label(*x))
            .collect::<Vec<_>>(),
        vec!["[int]", "[a]"]
    );

    assert_eq!(
        tree.render(),
        "<Program>\n-<Block>\n--<VarDecl>\n---[int]\n---[a]\n-[$]\n"
    );
}

proptest! {
    #[test]
    fn chain_depth(length in 0usize..64) {
        let mut tree = SyntaxTree::new(0);
        let mut last = tree.root();

        for label in 1..=length {
            last = tree.add_child(last, label);
        }

        prop_assert_eq!(tree.depth(last), length);
        prop_assert_eq!(tree.depth_first().count(), length + 1);

        for (id, depth) in tree.depth_first() {
            prop_assert_eq!(*tree.label(id), depth);
        }
    }
}
