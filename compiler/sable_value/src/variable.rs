//! Binding slots.
//!
//! A scope hands out `Variable`s so that assignment mutates the slot in
//! place and every holder of the same binding observes it. Everything else
//! works with plain values (see [`unwrap_value`](crate::unwrap_value)).
//!
//! A slot always holds a data value: never another slot (the payload type
//! is `NormalValue`) and never a control signal (rejected at runtime).

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::errors::ValueError;
use crate::value::NormalValue;

/// Mutable binding slot. Clones share the slot.
#[derive(Clone)]
pub struct Variable(Arc<RwLock<NormalValue>>);

impl Variable {
    /// Box a value into a fresh slot.
    pub fn new(value: NormalValue) -> Result<Self, ValueError> {
        check_storable(&value)?;
        Ok(Variable(Arc::new(RwLock::new(value))))
    }

    /// Current contents.
    pub fn get(&self) -> NormalValue {
        self.0.read().clone()
    }

    /// Inspect the contents without cloning them.
    pub fn with<R>(&self, f: impl FnOnce(&NormalValue) -> R) -> R {
        f(&self.0.read())
    }

    /// Overwrite the contents.
    pub fn set(&self, value: NormalValue) -> Result<(), ValueError> {
        self.replace(value).map(drop)
    }

    /// Overwrite the contents, returning the previous value.
    pub fn replace(&self, value: NormalValue) -> Result<NormalValue, ValueError> {
        check_storable(&value)?;
        Ok(std::mem::replace(&mut *self.0.write(), value))
    }

    /// Whether both handles are the same binding.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

fn check_storable(value: &NormalValue) -> Result<(), ValueError> {
    if value.is_control_signal() {
        tracing::debug!(tag = %value.tag(), "rejected control signal as variable payload");
        return Err(ValueError::InvalidValueConstruction { tag: value.tag() });
    }
    Ok(())
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Variable({:?})", &*self.0.read())
    }
}
