//! The `Provider` struct: an owned set of type-to-factory bindings.

use crate::core::{Factory, TypeKey};
use crate::error::{Error, Result};
use dashmap::DashMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A set of bindings from abstract types to the factories that build them.
///
/// Every type has at most one binding; binding again replaces the previous
/// factory. The map is internally synchronized, so a provider can keep being
/// mutated after it has been shared with a [`Registry`](crate::Registry).
#[derive(Default)]
pub struct Provider {
  bindings: DashMap<TypeKey, Factory>,
}

impl Provider {
  /// Creates a new, empty `Provider`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- Binding ---

  /// Binds `T` to a factory producing `T`.
  ///
  /// Any zero-argument constructor works, e.g. `provider.bind(Config::default)`.
  pub fn bind<T: Any + Send + Sync>(&self, factory: impl Fn() -> T + Send + Sync + 'static) {
    self.bind_factory(Factory::new(factory));
  }

  /// Binds an interface, usually a trait object, to a factory producing it.
  pub fn bind_trait<I: ?Sized + Any + Send + Sync>(
    &self,
    factory: impl Fn() -> Arc<I> + Send + Sync + 'static,
  ) {
    self.bind_factory(Factory::from_arc(factory));
  }

  /// Binds `T` to a factory that hands out clones of one shared value.
  pub fn bind_instance<T: Any + Send + Sync>(&self, instance: T) {
    let shared = Arc::new(instance);
    self.bind_factory(Factory::from_arc(move || Arc::clone(&shared)));
  }

  /// Inserts a prebuilt factory under the key it produces, replacing any
  /// existing binding for that key.
  pub fn bind_factory(&self, factory: Factory) {
    let key = factory.key();
    let replaced = self.bindings.insert(key, factory).is_some();
    tracing::trace!(type_name = key.type_name(), replaced, "bound factory");
  }

  /// Removes the binding for `T` and returns its factory.
  pub fn unbind<T: ?Sized + Any>(&self) -> Result<Factory> {
    self.unbind_key(TypeKey::of::<T>())
  }

  /// Removes the binding for `key` and returns its factory.
  ///
  /// Fails with [`Error::BindingNotFound`] and leaves the map untouched if
  /// `key` has no binding.
  pub fn unbind_key(&self, key: TypeKey) -> Result<Factory> {
    match self.bindings.remove(&key) {
      Some((_, factory)) => {
        tracing::trace!(type_name = key.type_name(), "unbound factory");
        Ok(factory)
      }
      None => Err(Error::BindingNotFound {
        type_name: key.type_name(),
      }),
    }
  }

  /// Removes every binding.
  pub fn clear_bindings(&self) {
    self.bindings.clear();
  }

  // --- Inspection ---

  /// A live view of the binding map.
  ///
  /// This is not a copy: inserting or removing through the returned map
  /// changes this provider, exactly like `bind` and `unbind` do.
  pub fn bindings(&self) -> &DashMap<TypeKey, Factory> {
    &self.bindings
  }

  /// Returns the factory bound to `T`.
  pub fn factory<T: ?Sized + Any>(&self) -> Option<Factory> {
    self.factory_for(TypeKey::of::<T>())
  }

  /// Returns the factory bound to `key`.
  ///
  /// The factory is cloned out so no map guard is held while it runs.
  pub fn factory_for(&self, key: TypeKey) -> Option<Factory> {
    self.bindings.get(&key).map(|entry| entry.value().clone())
  }

  pub fn contains<T: ?Sized + Any>(&self) -> bool {
    self.contains_key(TypeKey::of::<T>())
  }

  pub fn contains_key(&self, key: TypeKey) -> bool {
    self.bindings.contains_key(&key)
  }

  pub fn len(&self) -> usize {
    self.bindings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bindings.is_empty()
  }

  // --- Resolution ---

  /// Builds a `T` with its bound factory.
  ///
  /// Returns `None` if `T` is unbound, or if its binding was replaced through
  /// [`bindings`](Self::bindings) by a factory producing some other type.
  pub fn resolve<T: ?Sized + Any + Send + Sync>(&self) -> Option<Arc<T>> {
    self.factory::<T>()?.produce::<T>()
  }
}

impl fmt::Debug for Provider {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut types: Vec<&'static str> = self.bindings.iter().map(|entry| entry.key().type_name()).collect();
    types.sort_unstable();
    f.debug_struct("Provider").field("bindings", &types).finish()
  }
}
