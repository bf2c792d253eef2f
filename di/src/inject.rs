//! Call-time dependency injection for plain functions.
//!
//! [`inject()`] starts an [`Inject`] builder. Wrapping a target function with
//! it produces an [`Injected`] function that, on every call, fills in keyword
//! arguments before running the target:
//!
//! - **Manual injection**: if any explicit factories were given with
//!   [`Inject::factory`], each one is invoked and stored under its name. The
//!   registry is never consulted.
//! - **Auto injection**: otherwise every declared parameter whose type is bound
//!   in the active provider is built with that binding. Unbound parameters are
//!   left for the caller, unless [`UnboundPolicy::Fail`] is set.
//!
//! Positional arguments pass straight through to the target.

use crate::core::{Factory, Instance};
use crate::error::{Error, Result, Unresolvable};
use crate::global::global;
use crate::kwargs::Kwargs;
use crate::registry::Registry;
use crate::signature::{Param, Signature};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Which value a keyword argument ends up with when both the caller and
/// injection supply it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precedence {
  /// The caller's value is kept, and the factory for that name is not run.
  #[default]
  CallerWins,
  /// The injected value overwrites the caller's.
  InjectionWins,
}

/// What auto injection does with a declared parameter whose type is unbound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnboundPolicy {
  /// Leave the argument unset; the target must cope with it being absent.
  #[default]
  LeaveUnset,
  /// Fail the call with [`Error::UnresolvableDependency`].
  Fail,
}

/// Resolution settings shared by an [`Inject`] builder and the function it wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InjectConfig {
  pub precedence: Precedence,
  pub unbound: UnboundPolicy,
}

/// Starts an injection builder bound to the [`global()`] registry.
///
/// # Examples
///
/// ```
/// use fibre_di::{inject, Kwargs};
///
/// let greet = inject()
///   .factory("name", || String::from("world"))
///   .wrap(|greeting: &str, kwargs: Kwargs| {
///     format!("{greeting}, {}!", kwargs.get::<String>("name").unwrap())
///   });
///
/// assert_eq!(greet.invoke("Hello").unwrap(), "Hello, world!");
/// ```
pub fn inject() -> Inject<'static> {
  Inject::with_registry(global())
}

/// A builder describing how to inject a function's dependencies.
pub struct Inject<'r> {
  registry: &'r Registry,
  explicit: Vec<(String, Factory)>,
  signature: Signature,
  config: InjectConfig,
}

impl<'r> Inject<'r> {
  /// Starts a builder that resolves against `registry` instead of the global one.
  pub fn with_registry(registry: &'r Registry) -> Self {
    Self {
      registry,
      explicit: Vec::new(),
      signature: Signature::new(),
      config: InjectConfig::default(),
    }
  }

  /// Declares a keyword parameter of type `T` for auto injection.
  pub fn param<T: ?Sized + Any>(mut self, name: impl Into<String>) -> Self {
    self.signature.push(Param::of::<T>(name));
    self
  }

  /// Replaces the declared parameters with `signature`.
  pub fn signature(mut self, signature: Signature) -> Self {
    self.signature = signature;
    self
  }

  /// Supplies an explicit factory for `name`, switching to manual injection.
  pub fn factory<T: Any + Send + Sync>(
    self,
    name: impl Into<String>,
    factory: impl Fn() -> T + Send + Sync + 'static,
  ) -> Self {
    self.explicit_factory(name, Factory::new(factory))
  }

  /// Like [`factory`](Self::factory), for factories returning `Arc<I>`.
  pub fn factory_arc<I: ?Sized + Any + Send + Sync>(
    self,
    name: impl Into<String>,
    factory: impl Fn() -> Arc<I> + Send + Sync + 'static,
  ) -> Self {
    self.explicit_factory(name, Factory::from_arc(factory))
  }

  /// Supplies a prebuilt explicit factory for `name`. A later factory for the
  /// same name replaces the earlier one.
  pub fn explicit_factory(mut self, name: impl Into<String>, factory: Factory) -> Self {
    let name = name.into();
    match self.explicit.iter_mut().find(|(existing, _)| *existing == name) {
      Some(slot) => slot.1 = factory,
      None => self.explicit.push((name, factory)),
    }
    self
  }

  pub fn precedence(mut self, precedence: Precedence) -> Self {
    self.config.precedence = precedence;
    self
  }

  pub fn unbound(mut self, unbound: UnboundPolicy) -> Self {
    self.config.unbound = unbound;
    self
  }

  pub fn config(mut self, config: InjectConfig) -> Self {
    self.config = config;
    self
  }

  /// Wraps `target`, which must have the shape `Fn(A, Kwargs) -> R`.
  pub fn wrap<F>(self, target: F) -> Injected<'r, F> {
    let mode = if self.explicit.is_empty() {
      Mode::Auto(self.signature)
    } else {
      Mode::Manual(self.explicit)
    };
    Injected {
      target,
      name: std::any::type_name::<F>(),
      registry: self.registry,
      mode,
      config: self.config,
    }
  }
}

impl fmt::Debug for Inject<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Inject")
      .field("explicit", &self.explicit.iter().map(|(name, _)| name).collect::<Vec<_>>())
      .field("signature", &self.signature)
      .field("config", &self.config)
      .finish_non_exhaustive()
  }
}

#[derive(Clone)]
enum Mode {
  Manual(Vec<(String, Factory)>),
  Auto(Signature),
}

/// A function whose keyword arguments are injected on every call.
#[derive(Clone)]
pub struct Injected<'r, F> {
  target: F,
  name: &'static str,
  registry: &'r Registry,
  mode: Mode,
  config: InjectConfig,
}

impl<'r, F> Injected<'r, F> {
  /// Resolves dependencies into `kwargs`, then calls the target with `args`
  /// and the merged keyword arguments, returning whatever it returns.
  pub fn call<A, R>(&self, args: A, kwargs: Kwargs) -> Result<R>
  where
    F: Fn(A, Kwargs) -> R,
  {
    let kwargs = self.resolve(kwargs)?;
    Ok((self.target)(args, kwargs))
  }

  /// Calls with positional arguments only.
  pub fn invoke<A, R>(&self, args: A) -> Result<R>
  where
    F: Fn(A, Kwargs) -> R,
  {
    self.call(args, Kwargs::new())
  }

  /// Runs the resolution step alone and returns the merged keyword arguments.
  ///
  /// A fresh set of instances is built on every call.
  pub fn resolve(&self, mut kwargs: Kwargs) -> Result<Kwargs> {
    let resolved = match &self.mode {
      Mode::Manual(explicit) => self.resolve_manual(explicit, &kwargs),
      Mode::Auto(signature) => self.resolve_auto(signature, &kwargs)?,
    };
    let injected = resolved.len();
    for (name, instance) in resolved {
      kwargs.insert_instance(name, instance);
    }
    tracing::debug!(
      function = self.name,
      manual = self.is_manual(),
      injected,
      "resolved dependencies"
    );
    Ok(kwargs)
  }

  /// The type name of the wrapped function.
  pub fn name(&self) -> &'static str {
    self.name
  }

  /// `true` if explicit factories were supplied.
  pub fn is_manual(&self) -> bool {
    matches!(self.mode, Mode::Manual(_))
  }

  /// The declared parameters, or `None` under manual injection.
  pub fn signature(&self) -> Option<&Signature> {
    match &self.mode {
      Mode::Auto(signature) => Some(signature),
      Mode::Manual(_) => None,
    }
  }

  pub fn config(&self) -> InjectConfig {
    self.config
  }

  /// Unwraps the target function.
  pub fn into_inner(self) -> F {
    self.target
  }

  fn wants(&self, kwargs: &Kwargs, name: &str) -> bool {
    match self.config.precedence {
      Precedence::CallerWins => !kwargs.contains(name),
      Precedence::InjectionWins => true,
    }
  }

  fn resolve_manual(&self, explicit: &[(String, Factory)], kwargs: &Kwargs) -> Vec<(String, Instance)> {
    explicit
      .iter()
      .filter(|(name, _)| self.wants(kwargs, name))
      .map(|(name, factory)| (name.clone(), factory.invoke()))
      .collect()
  }

  fn resolve_auto(&self, signature: &Signature, kwargs: &Kwargs) -> Result<Vec<(String, Instance)>> {
    let pending: Vec<&Param> = signature
      .iter()
      .filter(|param| self.wants(kwargs, param.name()))
      .collect();
    if pending.is_empty() {
      return Ok(Vec::new());
    }

    // Clone the provider out of the slot; no registry lock is held below.
    let provider = self.registry.require_active()?;

    let mut resolved = Vec::with_capacity(pending.len());
    for param in pending {
      match provider.factory_for(param.key()) {
        Some(factory) if factory.key() == param.key() => {
          tracing::trace!(function = self.name, param = param.name(), "injecting parameter");
          resolved.push((param.name().to_owned(), factory.invoke()));
        }
        Some(factory) => {
          return Err(unresolvable(
            param,
            Unresolvable::KeyMismatch {
              produces: factory.key().type_name(),
            },
          ))
        }
        None => match self.config.unbound {
          UnboundPolicy::LeaveUnset => {
            tracing::trace!(function = self.name, param = param.name(), "parameter unbound, left unset");
          }
          UnboundPolicy::Fail => return Err(unresolvable(param, Unresolvable::NotBound)),
        },
      }
    }
    Ok(resolved)
  }
}

fn unresolvable(param: &Param, reason: Unresolvable) -> Error {
  Error::UnresolvableDependency {
    param: param.name().to_owned(),
    type_name: param.key().type_name(),
    reason,
  }
}

impl<F> fmt::Debug for Injected<'_, F> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut debug = f.debug_struct("Injected");
    debug.field("name", &self.name);
    match &self.mode {
      Mode::Manual(explicit) => {
        debug.field("explicit", &explicit.iter().map(|(name, _)| name).collect::<Vec<_>>())
      }
      Mode::Auto(signature) => debug.field("signature", signature),
    };
    debug.field("config", &self.config).finish_non_exhaustive()
  }
}
