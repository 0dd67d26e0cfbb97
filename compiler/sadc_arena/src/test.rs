use proptest::{prop_assert_eq, proptest};

use crate::{Arena, ID};

#[test]
fn insert_and_index() {
    let mut arena = Arena::new();

    let first = arena.insert("first");
    let second = arena.insert("second");

    assert_eq!(arena.len(), 2);
    assert_eq!(arena[first], "first");
    assert_eq!(arena[second], "second");
    assert!(arena.contains_id(second));
    assert!(!arena.contains_id(ID::new(2)));
}

#[test]
fn insert_with_sees_its_own_id() {
    let mut arena = Arena::new();

    let id = arena.insert_with(|id| id.index() * 10);
    let next = arena.insert_with(|id| id.index() * 10);

    assert_eq!(arena[id], 0);
    assert_eq!(arena[next], 10);
}

proptest! {
    #[test]
    fn iteration_follows_insertion_order(
        items in proptest::collection::vec(0u32..1000, 0..64)
    ) {
        let mut arena = Arena::new();
        let ids = items.iter().map(|x| arena.insert(*x)).collect::<Vec<_>>();

        prop_assert_eq!(arena.ids().collect::<Vec<_>>(), ids);
        prop_assert_eq!(arena.items().copied().collect::<Vec<_>>(), items);
    }
}
