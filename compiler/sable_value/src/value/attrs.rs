//! Attribute decoration attached to normal values.
//!
//! Attributes are opaque metadata (for example type annotations) that the
//! evaluator attaches to a value. They never influence the value's tag.

use super::Value;

/// A single `(name, value)` metadata pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: Value,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Attribute {
            name: name.into(),
            value,
        }
    }
}

/// Ordered attribute list. Names may repeat; order is preserved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes(Vec<Attribute>);

impl Attributes {
    /// Empty list (no allocation).
    #[inline]
    pub const fn new() -> Self {
        Attributes(Vec::new())
    }

    /// Append an attribute after any existing ones.
    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.0.push(Attribute::new(name, value));
    }

    /// First attribute value with the given name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| &attr.value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.0.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Attribute> for Attributes {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        Attributes(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
