//! The `Registry`: a guarded slot holding at most one active provider.

use crate::error::{Error, Result};
use crate::provider::Provider;
use parking_lot::RwLock;
use std::any::Any;
use std::sync::Arc;

/// A single-assignment slot for the active [`Provider`].
///
/// The slot is either empty or holds one provider. `configure` only fills an
/// empty slot, `configure_after_clear` always replaces, and `clear` empties it.
/// Writers take the write lock; readers take the read lock and clone the
/// `Arc` out, so no factory ever runs while the slot is locked.
///
/// Most applications use the process-wide [`global()`](crate::global)
/// registry. Tests that want isolation can create their own.
#[derive(Default)]
pub struct Registry {
  slot: RwLock<Option<Arc<Provider>>>,
}

impl Registry {
  /// Creates a new, empty `Registry`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Installs `provider` as the active provider.
  ///
  /// Fails with [`Error::AlreadyConfigured`] if one is already active, in
  /// which case the active provider stays in place.
  pub fn configure(&self, provider: impl Into<Arc<Provider>>) -> Result<()> {
    let mut slot = self.slot.write();
    if slot.is_some() {
      tracing::warn!("rejected configure: a provider is already active");
      return Err(Error::AlreadyConfigured);
    }
    let provider = provider.into();
    tracing::debug!(bindings = provider.len(), "configured provider");
    *slot = Some(provider);
    Ok(())
  }

  /// Clears the slot, then installs `provider`. Never fails.
  ///
  /// Returns the provider that was replaced, if any.
  pub fn configure_after_clear(&self, provider: impl Into<Arc<Provider>>) -> Option<Arc<Provider>> {
    let provider = provider.into();
    let mut slot = self.slot.write();
    let previous = slot.take();
    tracing::debug!(
      bindings = provider.len(),
      replaced = previous.is_some(),
      "configured provider after clear"
    );
    *slot = Some(provider);
    previous
  }

  /// Empties the slot, returning the provider that was active.
  ///
  /// Clearing an empty slot is a no-op.
  pub fn clear(&self) -> Option<Arc<Provider>> {
    let previous = self.slot.write().take();
    if previous.is_some() {
      tracing::debug!("cleared active provider");
    }
    previous
  }

  /// Returns the active provider.
  pub fn active(&self) -> Option<Arc<Provider>> {
    self.slot.read().clone()
  }

  pub fn is_configured(&self) -> bool {
    self.slot.read().is_some()
  }

  /// Like [`active`](Self::active), but reports an empty slot as an error.
  pub fn require_active(&self) -> Result<Arc<Provider>> {
    self.active().ok_or(Error::NoProviderConfigured)
  }

  /// Builds a `T` with the active provider's binding.
  ///
  /// Lets a factory pull its own dependencies from the same registry.
  pub fn resolve<T: ?Sized + Any + Send + Sync>(&self) -> Result<Arc<T>> {
    self.require_active()?.resolve::<T>().ok_or(Error::BindingNotFound {
      type_name: std::any::type_name::<T>(),
    })
  }
}

impl std::fmt::Debug for Registry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Registry").field("active", &*self.slot.read()).finish()
  }
}
