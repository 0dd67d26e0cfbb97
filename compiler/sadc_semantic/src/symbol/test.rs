use proptest::{prop_assert_eq, proptest};

use super::Table;
use crate::ty::Type;

#[test]
fn duplicate_in_same_scope() {
    let mut table = Table::new();
    let scope = table.new_scope(None);

    let first = table.declare(scope, 'a', Type::Int, 1).unwrap();
    assert_eq!(table.declare(scope, 'a', Type::String, 2), Err(first));
    assert_eq!(table.symbols().len(), 1);
}

#[test]
fn shadowing_and_lookup() {
    let mut table = Table::new();
    let outer = table.new_scope(None);
    let inner = table.new_scope(Some(outer));

    let outer_a = table.declare(outer, 'a', Type::Int, 1).unwrap();
    let b = table.declare(outer, 'b', Type::Boolean, 1).unwrap();
    let inner_a = table.declare(inner, 'a', Type::String, 2).unwrap();

    assert_eq!(table.lookup(inner, 'a'), Some(inner_a));
    assert_eq!(table.lookup(inner, 'b'), Some(b));
    assert_eq!(table.lookup(outer, 'a'), Some(outer_a));
    assert_eq!(table.lookup(outer, 'c'), None);

    assert_eq!(table.symbol(inner_a).depth(), 1);
    assert_eq!(table.scope(inner).parent(), Some(outer));
}

#[test]
fn siblings_are_distinct() {
    let mut table = Table::new();
    let outer = table.new_scope(None);
    let first = table.new_scope(Some(outer));
    let second = table.new_scope(Some(outer));

    table.declare(first, 'x', Type::Int, 2).unwrap();

    assert_eq!(table.scope(first).depth(), table.scope(second).depth());
    assert_eq!(table.lookup(second, 'x'), None);
    assert!(table.declare(second, 'x', Type::Int, 3).is_ok());
}

#[test]
fn render() {
    let mut table = Table::new();
    let outer = table.new_scope(None);
    let inner = table.new_scope(Some(outer));

    table.declare(outer, 'a', Type::Int, 1).unwrap();
    table.declare(inner, 'b', Type::Boolean, 3).unwrap();

    assert_eq!(
        table.to_string(),
        "-----------------------------\n\
         Name  | Type  | Scope | Line\n\
         -----------------------------\n\
         a     | int   | 0     | 1\n\
         b     | boolean| 1     | 3"
    );
}

proptest! {
    #[test]
    fn lookup_finds_nearest(depth in 1usize..16, declared_at in 0usize..16) {
        let declared_at = declared_at % depth;

        let mut table = Table::new();
        let mut scopes = vec![table.new_scope(None)];
        for _ in 1..depth {
            let parent = scopes.last().copied();
            scopes.push(table.new_scope(parent));
        }

        let id = table.declare(scopes[declared_at], 'v', Type::Int, 1).unwrap();

        for (level, scope) in scopes.iter().enumerate() {
            let expected = (level >= declared_at).then_some(id);
            prop_assert_eq!(table.lookup(*scope, 'v'), expected);
        }
    }
}
