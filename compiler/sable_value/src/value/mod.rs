//! Runtime values for the Sable interpreter.
//!
//! # Shape
//!
//! A [`Value`] is either a [`NormalValue`] or a [`Variable`] binding slot.
//! A normal value is a [`ValueKind`] plus an ordered [`Attributes`] list;
//! the kind is fixed at construction, only array/object storage and the
//! attribute list change in place.
//!
//! `return`, `break` and `continue` are ordinary kinds. Statement execution
//! returns them like any other result and the enclosing loop or call
//! boundary inspects the tag to decide how far to unwind.
//!
//! # Allocation
//!
//! Heap payloads go through the factory methods on `Value`: `Heap::new` and
//! `Shared::new` are `pub(super)`.
//!
//! ```text
//! let s = Value::str("hello");                       // OK
//! let xs = Value::arr(vec![Value::num(1.0)]);        // OK
//! let s = ValueKind::Str(Heap::new("x".into()));     // ERROR: Heap::new is private
//! ```
//!
//! `null`, `true`, `false`, `break` and `continue` carry no payload and are
//! `const` singletons.
//!
//! # Aliasing
//!
//! Cloning a `Value` never copies array or object storage. Every clone of an
//! `arr`/`obj` value is an alias, and a write through one is visible through
//! all of them.

mod attrs;
mod function;
mod heap;

use std::fmt;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use sable_ir::{Name, StmtRange};

use crate::errors::ValueError;
use crate::native::NativeCall;
use crate::variable::Variable;

pub use attrs::{Attribute, Attributes};
pub use function::{
    EnvRef, Environment, FunctionValue, NativeFn, NativeFunction, NativeOutput, UserFunction,
};
pub use heap::{Heap, Shared};

/// Object storage: unique string keys in first-insertion order.
///
/// Re-inserting an existing key replaces its payload in place. Two objects
/// are equal only when their entries match in order.
pub type ObjMap = IndexMap<String, Value, FxBuildHasher>;

/// Payload-free tag of a value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueTag {
    Null,
    Bool,
    Num,
    Str,
    Arr,
    Obj,
    Fn,
    Return,
    Break,
    Continue,
    Variable,
}

impl ValueTag {
    /// Script-visible type name.
    pub const fn as_str(self) -> &'static str {
        match self {
            ValueTag::Null => "null",
            ValueTag::Bool => "bool",
            ValueTag::Num => "num",
            ValueTag::Str => "str",
            ValueTag::Arr => "arr",
            ValueTag::Obj => "obj",
            ValueTag::Fn => "fn",
            ValueTag::Return => "return",
            ValueTag::Break => "break",
            ValueTag::Continue => "continue",
            ValueTag::Variable => "variable",
        }
    }

    /// `return`, `break` or `continue`.
    #[inline]
    pub const fn is_control_signal(self) -> bool {
        matches!(self, ValueTag::Return | ValueTag::Break | ValueTag::Continue)
    }
}

impl fmt::Display for ValueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed set of normal value shapes.
#[derive(Clone)]
pub enum ValueKind {
    Null,
    Bool(bool),
    Num(f64),
    Str(Heap<String>),
    Arr(Shared<Vec<Value>>),
    Obj(Shared<ObjMap>),
    Fn(FunctionValue),
    /// Unwind to the nearest call boundary with this value.
    Return(Heap<Value>),
    /// Unwind to the nearest loop and stop iterating.
    Break,
    /// Unwind to the nearest loop and start the next iteration.
    Continue,
}

impl ValueKind {
    pub fn tag(&self) -> ValueTag {
        match self {
            ValueKind::Null => ValueTag::Null,
            ValueKind::Bool(_) => ValueTag::Bool,
            ValueKind::Num(_) => ValueTag::Num,
            ValueKind::Str(_) => ValueTag::Str,
            ValueKind::Arr(_) => ValueTag::Arr,
            ValueKind::Obj(_) => ValueTag::Obj,
            ValueKind::Fn(_) => ValueTag::Fn,
            ValueKind::Return(_) => ValueTag::Return,
            ValueKind::Break => ValueTag::Break,
            ValueKind::Continue => ValueTag::Continue,
        }
    }
}

/// A directly usable value: a kind plus its attribute decoration.
#[derive(Clone, PartialEq)]
pub struct NormalValue {
    kind: ValueKind,
    attrs: Attributes,
}

/// Universal runtime value.
#[derive(Clone)]
pub enum Value {
    Normal(NormalValue),
    /// Binding slot; only scopes hand these out.
    Variable(Variable),
}

// Factory Methods

impl Value {
    pub const NULL: Value = Value::Normal(NormalValue::new(ValueKind::Null));
    pub const TRUE: Value = Value::Normal(NormalValue::new(ValueKind::Bool(true)));
    pub const FALSE: Value = Value::Normal(NormalValue::new(ValueKind::Bool(false)));
    pub const BREAK: Value = Value::Normal(NormalValue::new(ValueKind::Break));
    pub const CONTINUE: Value = Value::Normal(NormalValue::new(ValueKind::Continue));

    #[inline]
    pub const fn bool(b: bool) -> Self {
        if b {
            Value::TRUE
        } else {
            Value::FALSE
        }
    }

    #[inline]
    pub const fn num(n: f64) -> Self {
        Value::Normal(NormalValue::new(ValueKind::Num(n)))
    }

    /// Create a string value.
    #[inline]
    pub fn str(s: impl Into<String>) -> Self {
        Value::Normal(NormalValue::new(ValueKind::Str(Heap::new(s.into()))))
    }

    /// Create an array value with fresh storage.
    ///
    /// ```text
    /// let empty = Value::arr(vec![]);
    /// let xs = Value::arr(vec![Value::num(1.0), Value::str("x")]);
    /// ```
    #[inline]
    pub fn arr(items: Vec<Value>) -> Self {
        Value::Normal(NormalValue::new(ValueKind::Arr(Shared::new(items))))
    }

    /// Create an object value with fresh storage.
    ///
    /// Entries keep first-insertion order; a repeated key replaces the
    /// earlier payload without moving it.
    ///
    /// ```text
    /// let point = Value::obj([("x", Value::num(1.0)), ("y", Value::num(2.0))]);
    /// ```
    pub fn obj<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let map: ObjMap = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        Value::Normal(NormalValue::new(ValueKind::Obj(Shared::new(map))))
    }

    /// Create a user-defined closure.
    pub fn func(params: Vec<Name>, body: StmtRange, env: EnvRef) -> Self {
        Value::Normal(NormalValue::new(ValueKind::Fn(FunctionValue::user(
            params, body, env,
        ))))
    }

    /// Create a native bridge.
    pub fn native<F>(func: F) -> Self
    where
        F: Fn(&[Value], &NativeCall) -> NativeOutput + Send + Sync + 'static,
    {
        Value::Normal(NormalValue::new(ValueKind::Fn(FunctionValue::Native(
            NativeFunction::new(func),
        ))))
    }

    /// Create a native bridge with a diagnostic name.
    pub fn native_named<F>(name: &'static str, func: F) -> Self
    where
        F: Fn(&[Value], &NativeCall) -> NativeOutput + Send + Sync + 'static,
    {
        Value::Normal(NormalValue::new(ValueKind::Fn(FunctionValue::Native(
            NativeFunction::named(name, func),
        ))))
    }

    /// Create a `return` signal carrying `value`.
    #[inline]
    pub fn ret(value: Value) -> Self {
        Value::Normal(NormalValue::new(ValueKind::Return(Heap::new(value))))
    }

    /// Box a value into a fresh binding slot.
    ///
    /// Fails for control signals and for values that already are a slot.
    pub fn variable(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Normal(normal) => Variable::new(normal).map(Value::Variable),
            Value::Variable(_) => Err(ValueError::InvalidValueConstruction {
                tag: ValueTag::Variable,
            }),
        }
    }
}

// Value Methods

impl Value {
    pub fn tag(&self) -> ValueTag {
        match self {
            Value::Normal(normal) => normal.tag(),
            Value::Variable(_) => ValueTag::Variable,
        }
    }

    /// Get the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        self.tag().as_str()
    }

    #[inline]
    pub fn is_control_signal(&self) -> bool {
        self.tag().is_control_signal()
    }

    pub fn as_normal(&self) -> Option<&NormalValue> {
        match self {
            Value::Normal(normal) => Some(normal),
            Value::Variable(_) => None,
        }
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Value::Variable(slot) => Some(slot),
            Value::Normal(_) => None,
        }
    }
}

impl NormalValue {
    #[inline]
    pub const fn new(kind: ValueKind) -> Self {
        NormalValue {
            kind,
            attrs: Attributes::new(),
        }
    }

    #[inline]
    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    #[inline]
    pub fn tag(&self) -> ValueTag {
        self.kind.tag()
    }

    /// Get the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        self.tag().as_str()
    }

    #[inline]
    pub fn is_control_signal(&self) -> bool {
        self.tag().is_control_signal()
    }

    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut Attributes {
        &mut self.attrs
    }

    /// Append an attribute, builder style.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attrs.push(name, value);
        self
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.kind {
            ValueKind::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_num(&self) -> Option<f64> {
        match self.kind {
            ValueKind::Num(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            ValueKind::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Array storage; writes through the handle are visible to every alias.
    pub fn as_arr(&self) -> Option<&Shared<Vec<Value>>> {
        match &self.kind {
            ValueKind::Arr(items) => Some(items),
            _ => None,
        }
    }

    /// Object storage; writes through the handle are visible to every alias.
    pub fn as_obj(&self) -> Option<&Shared<ObjMap>> {
        match &self.kind {
            ValueKind::Obj(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_fn(&self) -> Option<&FunctionValue> {
        match &self.kind {
            ValueKind::Fn(func) => Some(func),
            _ => None,
        }
    }

    /// Payload of a `return` signal.
    pub fn return_payload(&self) -> Option<&Value> {
        match &self.kind {
            ValueKind::Return(payload) => Some(payload),
            _ => None,
        }
    }
}

impl From<ValueKind> for NormalValue {
    fn from(kind: ValueKind) -> Self {
        NormalValue::new(kind)
    }
}

impl From<NormalValue> for Value {
    fn from(normal: NormalValue) -> Self {
        Value::Normal(normal)
    }
}

impl From<Variable> for Value {
    fn from(slot: Variable) -> Self {
        Value::Variable(slot)
    }
}

// Trait Implementations

impl PartialEq for ValueKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ValueKind::Null, ValueKind::Null)
            | (ValueKind::Break, ValueKind::Break)
            | (ValueKind::Continue, ValueKind::Continue) => true,
            (ValueKind::Bool(a), ValueKind::Bool(b)) => a == b,
            (ValueKind::Num(a), ValueKind::Num(b)) => a == b,
            (ValueKind::Str(a), ValueKind::Str(b)) => a == b,
            (ValueKind::Arr(a), ValueKind::Arr(b)) => a.ptr_eq(b) || *a.read() == *b.read(),
            (ValueKind::Obj(a), ValueKind::Obj(b)) => {
                // Entries compare in insertion order.
                a.ptr_eq(b) || a.read().iter().eq(b.read().iter())
            }
            (ValueKind::Fn(a), ValueKind::Fn(b)) => a == b,
            (ValueKind::Return(a), ValueKind::Return(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Normal(a), Value::Normal(b)) => a == b,
            // Slots are equal only when they are the same binding.
            (Value::Variable(a), Value::Variable(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Null => write!(f, "Null"),
            ValueKind::Bool(b) => write!(f, "Bool({b})"),
            ValueKind::Num(n) => write!(f, "Num({n})"),
            ValueKind::Str(s) => write!(f, "Str({:?})", &***s),
            ValueKind::Arr(items) => write!(f, "Arr({items:?})"),
            ValueKind::Obj(map) => write!(f, "Obj({map:?})"),
            ValueKind::Fn(func) => write!(f, "Fn({func:?})"),
            ValueKind::Return(v) => write!(f, "Return({:?})", &**v),
            ValueKind::Break => write!(f, "Break"),
            ValueKind::Continue => write!(f, "Continue"),
        }
    }
}

impl fmt::Debug for NormalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.attrs.is_empty() {
            fmt::Debug::fmt(&self.kind, f)
        } else {
            f.debug_struct("NormalValue")
                .field("kind", &self.kind)
                .field("attrs", &self.attrs)
                .finish()
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Normal(normal) => fmt::Debug::fmt(normal, f),
            Value::Variable(slot) => fmt::Debug::fmt(slot, f),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Null => write!(f, "null"),
            ValueKind::Bool(b) => write!(f, "{b}"),
            ValueKind::Num(n) => write!(f, "{n}"),
            ValueKind::Str(s) => write!(f, "\"{}\"", &***s),
            ValueKind::Arr(items) => {
                write!(f, "[")?;
                for (i, item) in items.read().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            ValueKind::Obj(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.read().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            ValueKind::Fn(FunctionValue::User(_)) => write!(f, "<fn>"),
            ValueKind::Fn(FunctionValue::Native(func)) => match func.name() {
                Some(name) => write!(f, "<native fn {name}>"),
                None => write!(f, "<native fn>"),
            },
            ValueKind::Return(v) => write!(f, "<return {}>", &**v),
            ValueKind::Break => write!(f, "<break>"),
            ValueKind::Continue => write!(f, "<continue>"),
        }
    }
}

impl fmt::Display for NormalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Normal(normal) => fmt::Display::fmt(normal, f),
            Value::Variable(slot) => fmt::Display::fmt(&slot.get(), f),
        }
    }
}
