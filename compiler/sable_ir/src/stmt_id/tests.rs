use super::*;

#[test]
fn test_stmt_id_invalid() {
    assert!(!StmtId::INVALID.is_valid());
    assert!(StmtId::new(3).is_valid());
    assert_eq!(StmtId::default(), StmtId::INVALID);
}

#[test]
fn test_stmt_range_iter_in_order() {
    let range = StmtRange::new(4, 3);
    let ids: Vec<_> = range.iter().map(StmtId::index).collect();
    assert_eq!(ids, vec![4, 5, 6]);
    assert_eq!(range.len(), 3);
    assert!(!range.is_empty());
}

#[test]
fn test_stmt_range_empty() {
    assert!(StmtRange::EMPTY.is_empty());
    assert_eq!(StmtRange::EMPTY.iter().count(), 0);
    assert_eq!(format!("{:?}", StmtRange::new(2, 2)), "StmtRange(2..4)");
}
