use thiserror::Error;

/// The main error type for the `fibre_di` library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("a provider is already configured; clear it or use configure_after_clear")]
  AlreadyConfigured,

  #[error("no binding found for type `{type_name}`")]
  BindingNotFound { type_name: &'static str },

  #[error("no provider is configured")]
  NoProviderConfigured,

  #[error("cannot resolve parameter `{param}` of type `{type_name}`: {reason}")]
  UnresolvableDependency {
    param: String,
    type_name: &'static str,
    reason: Unresolvable,
  },

  #[error("argument `{name}` was not supplied")]
  MissingArgument { name: String },

  #[error("argument `{name}` is not a `{expected}`")]
  ArgumentType { name: String, expected: &'static str },
}

/// Why a declared parameter could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unresolvable {
  #[error("the active provider has no binding for it")]
  NotBound,

  #[error("its binding produces `{produces}` instead")]
  KeyMismatch { produces: &'static str },
}

/// A specialized `Result` type for `fibre_di` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
