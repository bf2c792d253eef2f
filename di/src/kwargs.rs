//! Keyword arguments passed into, and resolved for, an injected call.

use crate::core::Instance;
use crate::error::{Error, Result};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Named arguments of one call to an [`Injected`](crate::Injected) function.
///
/// The caller fills it with whatever it wants to pass by name; injection then
/// merges resolved dependencies into it before the target function sees it.
/// Every value is stored as an `Arc`, so reading one back never moves it out.
#[derive(Clone, Default)]
pub struct Kwargs {
  values: HashMap<String, Instance>,
}

impl Kwargs {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder-style [`insert`](Self::insert).
  pub fn with<T: Any + Send + Sync>(mut self, name: impl Into<String>, value: T) -> Self {
    self.insert(name, value);
    self
  }

  /// Builder-style [`insert_arc`](Self::insert_arc).
  pub fn with_arc<T: ?Sized + Any + Send + Sync>(mut self, name: impl Into<String>, value: Arc<T>) -> Self {
    self.insert_arc(name, value);
    self
  }

  /// Sets `name` to an owned value, returning what it replaced.
  pub fn insert<T: Any + Send + Sync>(&mut self, name: impl Into<String>, value: T) -> Option<Instance> {
    self.insert_instance(name, Instance::from_value(value))
  }

  /// Sets `name` to a shared value, typically a trait object.
  pub fn insert_arc<T: ?Sized + Any + Send + Sync>(
    &mut self,
    name: impl Into<String>,
    value: Arc<T>,
  ) -> Option<Instance> {
    self.insert_instance(name, Instance::new(value))
  }

  pub fn insert_instance(&mut self, name: impl Into<String>, value: Instance) -> Option<Instance> {
    self.values.insert(name.into(), value)
  }

  /// Reads `name` as a `T`. Returns `None` if it is absent or holds another type.
  pub fn get<T: ?Sized + Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
    self.values.get(name)?.downcast::<T>()
  }

  /// Reads `name` as a `T`, reporting why that failed.
  pub fn require<T: ?Sized + Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
    let instance = self.values.get(name).ok_or_else(|| Error::MissingArgument {
      name: name.to_owned(),
    })?;
    instance.downcast::<T>().ok_or_else(|| Error::ArgumentType {
      name: name.to_owned(),
      expected: std::any::type_name::<T>(),
    })
  }

  pub fn instance(&self, name: &str) -> Option<&Instance> {
    self.values.get(name)
  }

  pub fn remove(&mut self, name: &str) -> Option<Instance> {
    self.values.remove(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.values.contains_key(name)
  }

  /// Argument names in no particular order.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.values.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
}

impl fmt::Debug for Kwargs {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut map = f.debug_map();
    for (name, value) in &self.values {
      map.entry(name, &value.key().type_name());
    }
    map.finish()
  }
}
