use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_intern_is_idempotent() {
    let interner = StringInterner::new();
    let a = interner.intern("count");
    let b = interner.intern("count");
    assert_eq!(a, b);
    assert_eq!(interner.lookup(a), "count");
}

#[test]
fn test_distinct_strings_get_distinct_names() {
    let interner = StringInterner::new();
    let a = interner.intern("a");
    let b = interner.intern("b");
    assert_ne!(a, b);
    assert_eq!(interner.len(), 3);
}

#[test]
fn test_empty_string_is_preinterned() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn test_lookup_foreign_name_is_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::from_raw(999)), "");
}

#[test]
fn test_shared_interner_shares_table() {
    let shared = SharedInterner::new();
    let other = shared.clone();
    let name = shared.intern("x");
    assert_eq!(other.lookup(name), "x");
    assert_eq!(other.intern("x"), name);
}
