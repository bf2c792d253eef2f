use fibre_di::{clear, configure, configure_after_clear, inject, Error, Kwargs, Provider};
use std::sync::Arc;

trait Clock: Send + Sync {
  fn now(&self) -> u64;
}

struct SystemClock;
impl Clock for SystemClock {
  fn now(&self) -> u64 {
    std::time::SystemTime::now()
      .duration_since(std::time::UNIX_EPOCH)
      .map(|elapsed| elapsed.as_secs())
      .unwrap_or_default()
  }
}

struct FixedClock(u64);
impl Clock for FixedClock {
  fn now(&self) -> u64 {
    self.0
  }
}

fn main() {
  let stamp = inject()
    .param::<dyn Clock>("clock")
    .wrap(|event: &str, kwargs: Kwargs| {
      kwargs
        .require::<dyn Clock>("clock")
        .map(|clock| format!("{} @ {}", event, clock.now()))
    });

  // --- Before any wiring, auto injection reports the missing provider ---
  assert_eq!(stamp.invoke("boot").unwrap_err(), Error::NoProviderConfigured);

  // --- Production wiring ---
  let production = Provider::new();
  production.bind_trait::<dyn Clock>(|| Arc::new(SystemClock));
  configure(production).unwrap();
  println!("{}", stamp.invoke("started").unwrap().unwrap());

  // A second `configure` is rejected and leaves the first provider active.
  assert_eq!(configure(Provider::new()), Err(Error::AlreadyConfigured));

  // --- Test-style swap: replace the provider wholesale ---
  let fixed = Provider::new();
  fixed.bind_trait::<dyn Clock>(|| Arc::new(FixedClock(1_700_000_000)));
  configure_after_clear(fixed);
  assert_eq!(stamp.invoke("tick").unwrap().unwrap(), "tick @ 1700000000");
  println!("Swapped in a fixed clock for deterministic output.");

  // --- Teardown ---
  clear();
  clear(); // a second clear is a no-op
}
