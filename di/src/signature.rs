//! Declared parameter tables for auto injection.

use crate::core::TypeKey;
use std::any::Any;

/// One declared parameter: the keyword name and the type it expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
  name: String,
  key: TypeKey,
}

impl Param {
  pub fn new(name: impl Into<String>, key: TypeKey) -> Self {
    Self {
      name: name.into(),
      key,
    }
  }

  pub fn of<T: ?Sized + Any>(name: impl Into<String>) -> Self {
    Self::new(name, TypeKey::of::<T>())
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn key(&self) -> TypeKey {
    self.key
  }
}

/// The declared keyword parameters of an injectable function, in order.
///
/// Declaring a name twice keeps its original position and takes the newer
/// type. Usually built with [`signature!`](crate::signature) or
/// [`Inject::param`](crate::Inject::param).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
  params: Vec<Param>,
}

impl Signature {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder-style [`push`](Self::push) for a parameter of type `T`.
  pub fn param<T: ?Sized + Any>(mut self, name: impl Into<String>) -> Self {
    self.push(Param::of::<T>(name));
    self
  }

  pub fn push(&mut self, param: Param) {
    match self.params.iter_mut().find(|existing| existing.name == param.name) {
      Some(existing) => existing.key = param.key,
      None => self.params.push(param),
    }
  }

  pub fn get(&self, name: &str) -> Option<&Param> {
    self.params.iter().find(|param| param.name == name)
  }

  pub fn params(&self) -> &[Param] {
    &self.params
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Param> {
    self.params.iter()
  }

  pub fn len(&self) -> usize {
    self.params.len()
  }

  pub fn is_empty(&self) -> bool {
    self.params.is_empty()
  }
}

impl<'a> IntoIterator for &'a Signature {
  type Item = &'a Param;
  type IntoIter = std::slice::Iter<'a, Param>;

  fn into_iter(self) -> Self::IntoIter {
    self.params.iter()
  }
}

impl FromIterator<Param> for Signature {
  fn from_iter<I: IntoIterator<Item = Param>>(iter: I) -> Self {
    let mut signature = Signature::new();
    for param in iter {
      signature.push(param);
    }
    signature
  }
}
