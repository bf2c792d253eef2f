use fibre_di::{
  clear, configure, configure_after_clear, global, inject, signature, Error, Factory, Inject,
  Kwargs, Precedence, Provider, Registry, TypeKey, UnboundPolicy, Unresolvable,
};
use serial_test::serial;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use std::thread;

// --- Test Fixtures ---

trait Service: Send + Sync {
  fn name(&self) -> &'static str;
}

struct ServiceImpl;
impl Service for ServiceImpl {
  fn name(&self) -> &'static str {
    "impl"
  }
}

struct OtherImpl;
impl Service for OtherImpl {
  fn name(&self) -> &'static str {
    "other"
  }
}

fn service_provider() -> Provider {
  let provider = Provider::new();
  provider.bind_trait::<dyn Service>(|| Arc::new(ServiceImpl));
  provider
}

// --- Auto Injection (global registry) ---

#[test]
#[serial]
fn test_auto_injection_fills_bound_parameter() {
  // Arrange
  clear();
  configure(service_provider()).unwrap();

  let wrapped = inject()
    .signature(signature!(x: i32, svc: dyn Service))
    .wrap(|x: i32, kwargs: Kwargs| {
      let svc = kwargs.require::<dyn Service>("svc")?;
      Ok::<_, Error>((x, svc.name(), kwargs.contains("x")))
    });

  // Act
  let result = wrapped.invoke(5).unwrap().unwrap();

  // Assert: `svc` was injected, the unbound `i32` parameter was left alone.
  assert_eq!(result, (5, "impl", false));

  clear();
}

#[test]
#[serial]
fn test_auto_injection_without_provider_fails() {
  clear();
  let wrapped = inject()
    .param::<dyn Service>("svc")
    .wrap(|(), _kwargs: Kwargs| ());

  assert_eq!(wrapped.invoke(()), Err(Error::NoProviderConfigured));
}

#[test]
#[serial]
fn test_empty_signature_runs_without_provider() {
  clear();
  let wrapped = inject().wrap(|n: u8, kwargs: Kwargs| (n, kwargs.len()));

  assert_eq!(wrapped.invoke(9).unwrap(), (9, 0));
}

#[test]
#[serial]
fn test_resolution_sees_the_provider_active_at_call_time() {
  // The wrapper is built before any provider exists.
  clear();
  let wrapped = inject()
    .param::<dyn Service>("svc")
    .wrap(|(), kwargs: Kwargs| kwargs.get::<dyn Service>("svc").map(|svc| svc.name()));

  configure(service_provider()).unwrap();
  assert_eq!(wrapped.invoke(()).unwrap(), Some("impl"));

  let other = Provider::new();
  other.bind_trait::<dyn Service>(|| Arc::new(OtherImpl));
  configure_after_clear(other);
  assert_eq!(wrapped.invoke(()).unwrap(), Some("other"));

  // Bindings changed on the active provider are picked up too.
  global().active().unwrap().clear_bindings();
  assert_eq!(wrapped.invoke(()).unwrap(), None);

  clear();
}

// --- Manual Injection ---

#[test]
#[serial]
fn test_manual_injection_ignores_missing_provider() {
  clear();
  let wrapped = inject()
    .factory("svc", || 42_i32)
    .wrap(|(), kwargs: Kwargs| *kwargs.get::<i32>("svc").unwrap());

  assert!(wrapped.is_manual());
  assert_eq!(wrapped.invoke(()).unwrap(), 42);
}

#[test]
fn test_manual_injection_ignores_declared_types() {
  // `svc` is declared as `dyn Service`, bound in the registry, yet the
  // explicit factory still decides the value.
  let registry = Registry::new();
  registry.configure(service_provider()).unwrap();

  let wrapped = Inject::with_registry(&registry)
    .param::<dyn Service>("svc")
    .factory("svc", || "explicit")
    .wrap(|(), kwargs: Kwargs| kwargs.get::<&str>("svc").map(|s| *s));

  assert_eq!(wrapped.invoke(()).unwrap(), Some("explicit"));
  assert!(wrapped.signature().is_none());
}

#[test]
fn test_manual_trait_factory_and_replacement() {
  let registry = Registry::new();
  let wrapped = Inject::with_registry(&registry)
    .factory_arc::<dyn Service>("svc", || Arc::new(ServiceImpl))
    .factory_arc::<dyn Service>("svc", || Arc::new(OtherImpl))
    .wrap(|(), kwargs: Kwargs| kwargs.require::<dyn Service>("svc").map(|svc| svc.name()));

  assert_eq!(wrapped.invoke(()).unwrap(), Ok("other"));
}

// --- Precedence & Policies ---

#[test]
fn test_caller_supplied_keyword_wins_by_default() {
  let registry = Registry::new();
  registry.configure(service_provider()).unwrap();

  let wrapped = Inject::with_registry(&registry)
    .param::<dyn Service>("svc")
    .wrap(|(), kwargs: Kwargs| kwargs.require::<dyn Service>("svc").map(|svc| svc.name()));

  let kwargs = Kwargs::new().with_arc::<dyn Service>("svc", Arc::new(OtherImpl));
  assert_eq!(wrapped.call((), kwargs).unwrap(), Ok("other"));
}

#[test]
fn test_injection_wins_when_configured() {
  let registry = Registry::new();
  registry.configure(service_provider()).unwrap();

  let wrapped = Inject::with_registry(&registry)
    .param::<dyn Service>("svc")
    .precedence(Precedence::InjectionWins)
    .wrap(|(), kwargs: Kwargs| kwargs.require::<dyn Service>("svc").map(|svc| svc.name()));

  let kwargs = Kwargs::new().with_arc::<dyn Service>("svc", Arc::new(OtherImpl));
  assert_eq!(wrapped.call((), kwargs).unwrap(), Ok("impl"));
}

#[test]
fn test_unbound_parameter_is_left_for_the_caller() {
  let registry = Registry::new();
  registry.configure(Provider::new()).unwrap();

  let wrapped = Inject::with_registry(&registry)
    .param::<dyn Service>("svc")
    .wrap(|(), kwargs: Kwargs| kwargs.require::<dyn Service>("svc").map(|svc| svc.name()));

  assert_eq!(
    wrapped.invoke(()).unwrap(),
    Err(Error::MissingArgument { name: "svc".into() })
  );
  let kwargs = Kwargs::new().with_arc::<dyn Service>("svc", Arc::new(OtherImpl));
  assert_eq!(wrapped.call((), kwargs).unwrap(), Ok("other"));
}

#[test]
fn test_unbound_parameter_fails_under_strict_policy() {
  let registry = Registry::new();
  registry.configure(Provider::new()).unwrap();

  let wrapped = Inject::with_registry(&registry)
    .param::<dyn Service>("svc")
    .unbound(UnboundPolicy::Fail)
    .wrap(|(), _kwargs: Kwargs| ());

  assert_eq!(
    wrapped.invoke(()),
    Err(Error::UnresolvableDependency {
      param: "svc".into(),
      type_name: std::any::type_name::<dyn Service>(),
      reason: Unresolvable::NotBound,
    })
  );
}

#[test]
fn test_mismatched_binding_is_unresolvable() {
  // A factory producing the wrong type can only get in through the live view.
  let registry = Registry::new();
  let provider = Provider::new();
  provider
    .bindings()
    .insert(TypeKey::of::<dyn Service>(), Factory::new(|| 1u8));
  registry.configure(provider).unwrap();

  let wrapped = Inject::with_registry(&registry)
    .param::<dyn Service>("svc")
    .wrap(|(), _kwargs: Kwargs| ());

  let err = wrapped.invoke(()).unwrap_err();
  assert_eq!(
    err,
    Error::UnresolvableDependency {
      param: "svc".into(),
      type_name: std::any::type_name::<dyn Service>(),
      reason: Unresolvable::KeyMismatch { produces: "u8" },
    }
  );
}

// --- Invocation ---

#[test]
fn test_every_call_builds_fresh_instances() {
  static BUILT: AtomicUsize = AtomicUsize::new(0);
  struct Connection {
    id: usize,
  }

  let registry = Registry::new();
  let provider = Provider::new();
  provider.bind(|| Connection {
    id: BUILT.fetch_add(1, Ordering::SeqCst),
  });
  registry.configure(provider).unwrap();

  let wrapped = Inject::with_registry(&registry)
    .param::<Connection>("conn")
    .wrap(|(), kwargs: Kwargs| kwargs.get::<Connection>("conn").unwrap().id);

  assert_eq!(wrapped.invoke(()).unwrap(), 0);
  assert_eq!(wrapped.invoke(()).unwrap(), 1);
  assert_eq!(BUILT.load(Ordering::SeqCst), 2);
}

#[test]
fn test_positional_arguments_and_return_value_pass_through() {
  let registry = Registry::new();
  let provider = Provider::new();
  provider.bind(|| 10_i64);
  registry.configure(provider).unwrap();

  let add = Inject::with_registry(&registry)
    .param::<i64>("offset")
    .wrap(|(a, b): (i64, i64), kwargs: Kwargs| a + b + *kwargs.get::<i64>("offset").unwrap());

  assert_eq!(add.invoke((1, 2)).unwrap(), 13);
}

#[test]
fn test_resolve_returns_merged_kwargs() {
  let registry = Registry::new();
  registry.configure(service_provider()).unwrap();

  let wrapped = Inject::with_registry(&registry)
    .param::<dyn Service>("svc")
    .wrap(|(), _kwargs: Kwargs| ());

  let merged = wrapped
    .resolve(Kwargs::new().with("request_id", 77u64))
    .unwrap();

  let mut names: Vec<&str> = merged.names().collect();
  names.sort_unstable();
  assert_eq!(names, ["request_id", "svc"]);
  assert_eq!(merged.get::<dyn Service>("svc").unwrap().name(), "impl");
}

fn handler(greeting: &'static str, kwargs: Kwargs) -> String {
  format!("{greeting} {}", kwargs.get::<String>("who").unwrap())
}

#[test]
fn test_wrapped_function_keeps_its_name() {
  let registry = Registry::new();
  let wrapped = Inject::with_registry(&registry)
    .factory("who", || String::from("there"))
    .wrap(handler);

  assert!(wrapped.name().ends_with("handler"));
  assert_eq!(wrapped.invoke("hi").unwrap(), "hi there");
  assert_eq!((wrapped.into_inner())("hey", Kwargs::new().with("who", String::from("you"))), "hey you");
}

#[test]
fn test_concurrent_calls_share_one_wrapper() {
  let registry = Registry::new();
  registry.configure(service_provider()).unwrap();

  let wrapped = Inject::with_registry(&registry)
    .param::<dyn Service>("svc")
    .wrap(|n: usize, kwargs: Kwargs| (n, kwargs.get::<dyn Service>("svc").unwrap().name()));

  thread::scope(|s| {
    for n in 0..8usize {
      let wrapped = &wrapped;
      s.spawn(move || {
        for _ in 0..100 {
          assert_eq!(wrapped.invoke(n).unwrap(), (n, "impl"));
        }
      });
    }
    s.spawn(|| {
      for _ in 0..100 {
        registry.configure_after_clear(service_provider());
      }
    });
  });
}
