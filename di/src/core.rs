//! Core data structures shared by providers, registries and injection.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identifies the abstract type a factory is bound to.
///
/// Any `'static` type can serve as a key, including unsized trait objects such
/// as `dyn Greeter`. Two keys are equal when their `TypeId`s are equal; the
/// captured type name is only carried along for diagnostics.
#[derive(Clone, Copy)]
pub struct TypeKey {
  type_id: TypeId,
  type_name: &'static str,
}

impl TypeKey {
  /// Returns the key for `T`.
  pub fn of<T: ?Sized + Any>() -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      type_name: std::any::type_name::<T>(),
    }
  }

  pub fn type_id(&self) -> TypeId {
    self.type_id
  }

  pub fn type_name(&self) -> &'static str {
    self.type_name
  }
}

impl PartialEq for TypeKey {
  fn eq(&self, other: &Self) -> bool {
    self.type_id == other.type_id
  }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.type_id.hash(state);
  }
}

impl fmt::Debug for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "TypeKey({})", self.type_name)
  }
}

impl fmt::Display for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.type_name)
  }
}

/// A type-erased, shared dependency value.
///
/// Internally this is an `Arc<T>` boxed behind `dyn Any`, so cloning an
/// `Instance` never clones the value itself.
#[derive(Clone)]
pub struct Instance {
  key: TypeKey,
  value: Arc<dyn Any + Send + Sync>,
}

impl Instance {
  /// Wraps an already shared value.
  pub fn new<T: ?Sized + Any + Send + Sync>(value: Arc<T>) -> Self {
    Self {
      key: TypeKey::of::<T>(),
      value: Arc::new(value),
    }
  }

  /// Wraps an owned value.
  pub fn from_value<T: Any + Send + Sync>(value: T) -> Self {
    Self::new(Arc::new(value))
  }

  /// The key of the type this instance holds.
  pub fn key(&self) -> TypeKey {
    self.key
  }

  /// Recovers the typed `Arc<T>`, or `None` if the instance holds another type.
  pub fn downcast<T: ?Sized + Any + Send + Sync>(&self) -> Option<Arc<T>> {
    self.value.downcast_ref::<Arc<T>>().cloned()
  }
}

impl fmt::Debug for Instance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Instance").field("type", &self.key.type_name).finish_non_exhaustive()
  }
}

type ErasedFactory = dyn Fn() -> Instance + Send + Sync;

/// A zero-argument callable producing instances of one type.
///
/// The factory decides whether repeated calls share an instance; nothing here
/// caches results.
#[derive(Clone)]
pub struct Factory {
  key: TypeKey,
  produce: Arc<ErasedFactory>,
}

impl Factory {
  /// Creates a factory for a concrete type. Every value it returns is moved
  /// into a fresh `Arc`.
  pub fn new<T: Any + Send + Sync>(factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
    Self {
      key: TypeKey::of::<T>(),
      produce: Arc::new(move || Instance::new(Arc::new(factory()))),
    }
  }

  /// Creates a factory that hands out `Arc<I>`, usually a trait object.
  pub fn from_arc<I: ?Sized + Any + Send + Sync>(
    factory: impl Fn() -> Arc<I> + Send + Sync + 'static,
  ) -> Self {
    Self {
      key: TypeKey::of::<I>(),
      produce: Arc::new(move || Instance::new(factory())),
    }
  }

  /// The key of the type this factory produces.
  pub fn key(&self) -> TypeKey {
    self.key
  }

  /// Calls the factory once.
  pub fn invoke(&self) -> Instance {
    (self.produce)()
  }

  /// Calls the factory and downcasts the result.
  pub fn produce<T: ?Sized + Any + Send + Sync>(&self) -> Option<Arc<T>> {
    self.invoke().downcast::<T>()
  }

  /// Returns `true` if both handles point at the same underlying callable.
  pub fn ptr_eq(&self, other: &Factory) -> bool {
    Arc::ptr_eq(&self.produce, &other.produce)
  }
}

impl fmt::Debug for Factory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Factory").field("produces", &self.key.type_name).finish_non_exhaustive()
  }
}
