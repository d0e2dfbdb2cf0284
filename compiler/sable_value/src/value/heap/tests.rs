use super::*;

#[test]
fn test_heap_deref() {
    let h = Heap::new(42i64);
    assert_eq!(*h, 42);
}

#[test]
fn test_heap_clone_shares_allocation() {
    let h1 = Heap::new(vec![1, 2, 3]);
    let h2 = h1.clone();
    assert_eq!(*h1, *h2);
    assert!(h1.ptr_eq(&h2));
}

#[test]
fn test_heap_eq_by_content() {
    let h1 = Heap::new("hello".to_string());
    let h2 = Heap::new("hello".to_string());
    let h3 = Heap::new("world".to_string());
    assert_eq!(h1, h2);
    assert_ne!(h1, h3);
    assert!(!h1.ptr_eq(&h2));
}

#[test]
fn test_heap_unwrap_or_clone() {
    let h1 = Heap::new(String::from("x"));
    let h2 = h1.clone();
    assert_eq!(h1.unwrap_or_clone(), "x");
    assert_eq!(h2.unwrap_or_clone(), "x");
}

#[test]
fn test_shared_write_visible_through_alias() {
    let a = Shared::new(vec![1]);
    let b = a.clone();
    a.write().push(2);
    assert_eq!(*b.read(), vec![1, 2]);
    assert!(a.ptr_eq(&b));
}

#[test]
fn test_shared_distinct_allocations() {
    let a = Shared::new(0u8);
    let b = Shared::new(0u8);
    assert!(!a.ptr_eq(&b));
}
