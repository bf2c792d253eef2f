//! The global registry instance and the lifecycle functions that act on it.

use crate::error::Result;
use crate::provider::Provider;
use crate::registry::Registry;
use once_cell::sync::Lazy;
use std::sync::Arc;

// The process-wide active-provider slot, created empty on first access.
static GLOBAL_REGISTRY: Lazy<Registry> = Lazy::new(Registry::default);

/// Provides a reference to the global registry.
///
/// # Examples
///
/// ```
/// use fibre_di::{global, Provider};
///
/// let provider = Provider::new();
/// provider.bind(|| String::from("Hello from global!"));
///
/// global().configure_after_clear(provider);
/// assert_eq!(*global().resolve::<String>().unwrap(), "Hello from global!");
/// global().clear();
/// ```
pub fn global() -> &'static Registry {
  &GLOBAL_REGISTRY
}

/// Installs `provider` in the global registry. See [`Registry::configure`].
pub fn configure(provider: impl Into<Arc<Provider>>) -> Result<()> {
  global().configure(provider)
}

/// Replaces whatever the global registry holds. See
/// [`Registry::configure_after_clear`].
pub fn configure_after_clear(provider: impl Into<Arc<Provider>>) -> Option<Arc<Provider>> {
  global().configure_after_clear(provider)
}

/// Empties the global registry. See [`Registry::clear`].
pub fn clear() -> Option<Arc<Provider>> {
  global().clear()
}
