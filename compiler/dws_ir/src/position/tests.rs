use super::*;

#[test]
fn builtin_sentinel() {
    assert!(Position::BUILTIN.is_builtin());
    assert!(Position::default().is_builtin());
    assert!(!Position::at(1, 1).is_builtin());
}

#[test]
fn display_uses_line_and_column() {
    assert_eq!(Position::new(12, 5, 340).to_string(), "12:5");
    assert_eq!(Position::BUILTIN.to_string(), "<builtin>");
}

#[test]
fn debug_includes_offset() {
    assert_eq!(format!("{:?}", Position::new(3, 7, 42)), "3:7@42");
}

#[test]
fn line_range_is_inclusive() {
    let pos = Position::at(10, 1);
    assert!(pos.on_lines(10, 10));
    assert!(pos.on_lines(1, 20));
    assert!(!pos.on_lines(11, 20));
    assert!(!pos.on_lines(1, 9));
}

#[test]
fn same_location_ignores_offset() {
    assert!(Position::new(4, 2, 10).same_location(Position::new(4, 2, 99)));
    assert!(!Position::at(4, 2).same_location(Position::at(4, 3)));
}

#[test]
fn positions_hash_by_value() {
    use std::collections::HashSet;
    let mut set = HashSet::new();
    set.insert(Position::at(1, 1));
    set.insert(Position::at(1, 1)); // duplicate
    set.insert(Position::at(2, 1));
    assert_eq!(set.len(), 2);
}
