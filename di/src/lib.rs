//! # Fibre DI
//!
//! A minimal, thread-safe dependency injection registry with call-time
//! parameter injection for Rust.
//!
//! ## Core Concepts
//!
//! - **Provider**: Maps abstract types (concrete types or trait objects) to
//!   zero-argument factories. One factory per type.
//! - **Registry**: A guarded slot holding at most one active provider. The
//!   process-wide one is reached through `global()`, and `configure`,
//!   `configure_after_clear` and `clear` manage its lifecycle.
//! - **Injection**: `inject()` wraps a function of shape `Fn(A, Kwargs) -> R`.
//!   Each call builds the function's declared dependencies, either from
//!   explicit factories given at wrap time or from the active provider's
//!   bindings, and passes them in as keyword arguments.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_di::{configure_after_clear, inject, Kwargs, Provider};
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self, name: &str) -> String;
//! }
//!
//! struct EnglishGreeter;
//!
//! impl Greeter for EnglishGreeter {
//!     fn greet(&self, name: &str) -> String {
//!         format!("Hello, {name}!")
//!     }
//! }
//!
//! fn main() {
//!     // Bind the abstraction to an implementation, once at startup.
//!     let provider = Provider::new();
//!     provider.bind_trait::<dyn Greeter>(|| Arc::new(EnglishGreeter));
//!     configure_after_clear(provider);
//!
//!     // Declare which keyword parameter wants a `dyn Greeter`.
//!     let welcome = inject()
//!         .param::<dyn Greeter>("greeter")
//!         .wrap(|name: &str, kwargs: Kwargs| {
//!             let greeter = kwargs.require::<dyn Greeter>("greeter")?;
//!             Ok::<_, fibre_di::Error>(greeter.greet(name))
//!         });
//!
//!     let message = welcome.invoke("World").unwrap().unwrap();
//!     assert_eq!(message, "Hello, World!");
//! }
//! ```

mod core;
mod error;
mod global;
mod inject;
mod kwargs;
mod macros;
mod provider;
mod registry;
mod signature;

pub use crate::core::{Factory, Instance, TypeKey};
pub use error::{Error, Result, Unresolvable};
pub use global::{clear, configure, configure_after_clear, global};
pub use inject::{inject, Inject, InjectConfig, Injected, Precedence, UnboundPolicy};
pub use kwargs::Kwargs;
pub use provider::Provider;
pub use registry::Registry;
pub use signature::{Param, Signature};
