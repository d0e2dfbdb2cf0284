#![allow(clippy::unwrap_used, reason = "tests panic on unexpected state")]

use pretty_assertions::assert_eq;
use sable_ir::SharedInterner;
use sable_value::{unwrap_value, Value, ValueTag};

use super::*;

fn num(n: f64) -> NormalValue {
    unwrap_value(Value::num(n))
}

#[test]
fn test_define_and_get() {
    let names = SharedInterner::new();
    let x = names.intern("x");
    let scope = Scope::root();

    scope.define(x, num(5.0), Mutability::Mutable).unwrap();
    assert_eq!(scope.get(x).unwrap().as_num(), Some(5.0));
    assert_eq!(scope.len(), 1);
}

#[test]
fn test_assign_updates_slot_in_place() {
    let names = SharedInterner::new();
    let x = names.intern("x");
    let scope = Scope::root();

    let slot = scope.define(x, num(5.0), Mutability::Mutable).unwrap();
    scope.assign(x, num(6.0)).unwrap();

    assert_eq!(scope.get(x).unwrap().as_num(), Some(6.0));
    assert_eq!(slot.get().as_num(), Some(6.0));
    assert!(scope.lookup(x).unwrap().ptr_eq(&slot));
}

#[test]
fn test_nested_scope_sees_and_updates_parent() {
    let names = SharedInterner::new();
    let x = names.intern("x");
    let root = Scope::root();
    root.define(x, num(1.0), Mutability::Mutable).unwrap();

    let inner = Scope::child(&root);
    assert!(inner.is_empty());
    assert_eq!(inner.get(x).unwrap().as_num(), Some(1.0));

    inner.assign(x, num(2.0)).unwrap();
    assert_eq!(root.get(x).unwrap().as_num(), Some(2.0));
}

#[test]
fn test_shadowing() {
    let names = SharedInterner::new();
    let x = names.intern("x");
    let root = Scope::root();
    root.define(x, num(1.0), Mutability::Mutable).unwrap();

    let inner = Scope::child(&root);
    inner.define(x, num(10.0), Mutability::Mutable).unwrap();
    inner.assign(x, num(11.0)).unwrap();

    assert_eq!(inner.get(x).unwrap().as_num(), Some(11.0));
    assert_eq!(root.get(x).unwrap().as_num(), Some(1.0));
}

#[test]
fn test_assign_errors() {
    let names = SharedInterner::new();
    let x = names.intern("x");
    let y = names.intern("y");
    let scope = Scope::root();
    scope.define(x, num(1.0), Mutability::Immutable).unwrap();

    assert_eq!(
        scope.assign(x, num(2.0)),
        Err(AssignError::Immutable { name: x })
    );
    assert_eq!(
        scope.assign(y, num(2.0)),
        Err(AssignError::Undefined { name: y })
    );
    assert_eq!(scope.get(x).unwrap().as_num(), Some(1.0));
}

#[test]
fn test_mutability_flags() {
    assert!(Mutability::Mutable.is_mutable());
    assert!(!Mutability::Immutable.is_mutable());
}

#[test]
fn test_control_signals_are_not_storable() {
    let names = SharedInterner::new();
    let x = names.intern("x");
    let scope = Scope::root();

    let err = scope
        .define(x, unwrap_value(Value::BREAK), Mutability::Mutable)
        .unwrap_err();
    assert_eq!(
        err,
        ValueError::InvalidValueConstruction {
            tag: ValueTag::Break
        }
    );
    assert!(scope.lookup(x).is_none());

    scope.define(x, num(1.0), Mutability::Mutable).unwrap();
    let err = scope
        .assign(x, unwrap_value(Value::ret(Value::NULL)))
        .unwrap_err();
    assert!(matches!(err, AssignError::InvalidValue(_)));
    assert_eq!(scope.get(x).unwrap().as_num(), Some(1.0));
}

#[test]
fn test_environment_trait_round_trip() {
    let names = SharedInterner::new();
    let p = names.intern("p");
    let root = Scope::root();
    let env: EnvRef = root.clone();

    let frame = env.child();
    frame.declare(p, Variable::new(num(3.0)).unwrap());
    assert_eq!(frame.lookup(p).unwrap().get().as_num(), Some(3.0));
    assert!(root.lookup(p).is_none());
}
