//! Lexical scopes for variable binding.
//!
//! A scope maps names to `Variable` slots. Assignment writes into the
//! existing slot, so closures that captured the scope and callers holding
//! the slot all observe the new value.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use sable_ir::Name;
use sable_value::{unwrap_value, EnvRef, Environment, NormalValue, ValueError, Variable};

/// Whether a variable binding can be reassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    /// Binding can be reassigned (`var x = ...`).
    Mutable,
    /// Binding cannot be reassigned (`let x = ...`).
    Immutable,
}

impl Mutability {
    /// Returns `true` if this is `Mutable`.
    #[inline]
    pub fn is_mutable(self) -> bool {
        matches!(self, Mutability::Mutable)
    }
}

/// Error returned by `Scope::assign` when assignment fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AssignError {
    /// Variable not found in any scope.
    #[error("undefined variable {name:?}")]
    Undefined { name: Name },
    /// Variable exists but is immutable.
    #[error("cannot assign to immutable variable {name:?}")]
    Immutable { name: Name },
    #[error(transparent)]
    InvalidValue(#[from] ValueError),
}

/// A variable binding.
#[derive(Clone, Debug)]
struct Binding {
    slot: Variable,
    mutability: Mutability,
}

/// A single scope containing variable bindings.
pub struct Scope {
    bindings: RwLock<FxHashMap<Name, Binding>>,
    /// Parent scope (for lexical scoping).
    parent: Option<Arc<Scope>>,
}

impl Scope {
    /// Create a new empty scope with no parent.
    pub fn root() -> Arc<Self> {
        Arc::new(Scope {
            bindings: RwLock::new(FxHashMap::default()),
            parent: None,
        })
    }

    /// Create a new scope nested in `parent`.
    pub fn child(parent: &Arc<Scope>) -> Arc<Self> {
        Arc::new(Scope {
            bindings: RwLock::new(FxHashMap::default()),
            parent: Some(Arc::clone(parent)),
        })
    }

    /// Define a variable in this scope, shadowing any outer binding.
    ///
    /// Returns the fresh slot. Fails if `value` is a control signal.
    pub fn define(
        &self,
        name: Name,
        value: NormalValue,
        mutability: Mutability,
    ) -> Result<Variable, ValueError> {
        let slot = Variable::new(value)?;
        self.bind(name, slot.clone(), mutability);
        Ok(slot)
    }

    fn bind(&self, name: Name, slot: Variable, mutability: Mutability) {
        self.bindings
            .write()
            .insert(name, Binding { slot, mutability });
    }

    /// Look up a variable's slot by name.
    pub fn lookup(&self, name: Name) -> Option<Variable> {
        if let Some(binding) = self.bindings.read().get(&name) {
            return Some(binding.slot.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.lookup(name))
    }

    /// Read a variable's current value.
    pub fn get(&self, name: Name) -> Option<NormalValue> {
        self.lookup(name).map(|slot| unwrap_value(slot.into()))
    }

    /// Assign to an existing variable.
    pub fn assign(&self, name: Name, value: NormalValue) -> Result<(), AssignError> {
        let found = self
            .bindings
            .read()
            .get(&name)
            .map(|binding| (binding.slot.clone(), binding.mutability));
        match found {
            Some((slot, mutability)) if mutability.is_mutable() => Ok(slot.set(value)?),
            Some(_) => {
                tracing::debug!(?name, "rejected assignment to immutable variable");
                Err(AssignError::Immutable { name })
            }
            None => match &self.parent {
                Some(parent) => parent.assign(name, value),
                None => {
                    tracing::debug!(?name, "rejected assignment to undefined variable");
                    Err(AssignError::Undefined { name })
                }
            },
        }
    }

    /// Number of bindings in this scope, not counting parents.
    pub fn len(&self) -> usize {
        self.bindings.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.read().is_empty()
    }
}

impl Environment for Scope {
    fn lookup(&self, name: Name) -> Option<Variable> {
        Scope::lookup(self, name)
    }

    /// Parameters and other host-introduced bindings are mutable.
    fn declare(&self, name: Name, slot: Variable) {
        self.bind(name, slot, Mutability::Mutable);
    }

    fn child(self: Arc<Self>) -> EnvRef {
        Scope::child(&self)
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("bindings", &*self.bindings.read())
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests;
