// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property accessors.
//!
//! A task never looks properties up by itself. It is handed an [`Accessor`]
//! bound to exactly one property when it is created. Hosts either build one
//! from closures ([`FnAccessor`]) or expose their objects through
//! [`PropertyTarget`] and let [`PropertyAccessor::resolve`] check the name
//! and value kind once, up front.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::{Result, TweenError};
use crate::value::{Tweenable, Value};

/// Read/write capability for one property of one target
pub trait Accessor<V> {
    /// Read the current value
    fn get(&self) -> V;

    /// Write a new value
    fn set(&mut self, value: V);
}

/// Accessor built from a getter and a setter closure
pub struct FnAccessor<G, S> {
    getter: G,
    setter: S,
}

impl<G, S> FnAccessor<G, S> {
    /// Create an accessor from closures
    pub fn new(getter: G, setter: S) -> Self {
        Self { getter, setter }
    }
}

impl<V, G, S> Accessor<V> for FnAccessor<G, S>
where
    G: Fn() -> V,
    S: FnMut(V),
{
    fn get(&self) -> V {
        (self.getter)()
    }

    fn set(&mut self, value: V) {
        (self.setter)(value);
    }
}

/// Shorthand for [`FnAccessor::new`]
pub fn accessor<V, G, S>(getter: G, setter: S) -> FnAccessor<G, S>
where
    G: Fn() -> V,
    S: FnMut(V),
{
    FnAccessor::new(getter, setter)
}

/// An object whose properties can be read and written by name.
///
/// Targets are shared as `Rc<RefCell<_>>`. A write that arrives while the
/// host holds a borrow of the target is dropped with a warning, including a
/// task's final write, so the property may then not end on the goal. Release
/// target borrows before calling [`Tweener::tick`](crate::Tweener::tick).
pub trait PropertyTarget {
    /// Current value of a property, or `None` if the name is unknown
    fn property(&self, name: &str) -> Option<Value>;

    /// Overwrite a property. Only called with names and kinds that
    /// [`PropertyTarget::property`] reported.
    fn set_property(&mut self, name: &str, value: Value);
}

/// Property bags are usable as targets directly
impl PropertyTarget for IndexMap<String, Value> {
    fn property(&self, name: &str) -> Option<Value> {
        self.get(name).copied()
    }

    fn set_property(&mut self, name: &str, value: Value) {
        if let Some(slot) = self.get_mut(name) {
            *slot = value;
        }
    }
}

/// Accessor for a named property on a shared [`PropertyTarget`]
pub struct PropertyAccessor<T: ?Sized, V> {
    target: Rc<RefCell<T>>,
    property: String,
    last: V,
}

impl<T, V> PropertyAccessor<T, V>
where
    T: PropertyTarget + ?Sized,
    V: Tweenable,
{
    /// Bind to `property` on `target`, checking that it exists and holds
    /// a value of kind `V`.
    pub fn resolve(target: &Rc<RefCell<T>>, property: &str) -> Result<Self> {
        let current = target.borrow().property(property).ok_or_else(|| {
            TweenError::PropertyNotFound {
                property: property.to_string(),
            }
        })?;

        let found = current.kind();
        let last = V::from_value(current).ok_or_else(|| TweenError::TypeMismatch {
            property: property.to_string(),
            expected: V::KIND,
            found,
        })?;

        Ok(Self {
            target: Rc::clone(target),
            property: property.to_string(),
            last,
        })
    }

    /// Name of the bound property
    pub fn property(&self) -> &str {
        &self.property
    }
}

impl<T, V> Accessor<V> for PropertyAccessor<T, V>
where
    T: PropertyTarget + ?Sized,
    V: Tweenable,
{
    fn get(&self) -> V {
        let current = self
            .target
            .try_borrow()
            .ok()
            .and_then(|target| target.property(&self.property))
            .and_then(V::from_value);

        match current {
            Some(value) => value,
            None => {
                tracing::warn!(
                    "Property '{}' unreadable; using last known value",
                    self.property
                );
                self.last.clone()
            }
        }
    }

    /// Skips the write (with a warning) if the target is currently borrowed
    fn set(&mut self, value: V) {
        self.last = value.clone();
        match self.target.try_borrow_mut() {
            Ok(mut target) => target.set_property(&self.property, value.into_value()),
            Err(_) => tracing::warn!(
                "Target of property '{}' is borrowed; write skipped",
                self.property
            ),
        }
    }
}
