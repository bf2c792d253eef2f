use fibre_di::{global, Inject, Kwargs, Provider, Registry};

// A function that runs against whichever registry it is handed.
// By accepting a `&Registry`, it can be tested with a controlled environment.
fn process_data(registry: &Registry) -> String {
  let greet = Inject::with_registry(registry)
    .param::<String>("data")
    .wrap(|prefix: &str, kwargs: Kwargs| {
      let data = kwargs.get::<String>("data").expect("Data not bound in registry");
      format!("{}: {}", prefix, data.to_uppercase())
    });
  greet.invoke("Processed").expect("registry is configured")
}

fn main() {
  // --- Test Scenario with a Local Registry ---
  println!("--- Running with a local registry ---");
  let test_registry = Registry::new();
  let provider = Provider::new();
  provider.bind(|| "test data".to_string());
  test_registry.configure(provider).unwrap();

  let result = process_data(&test_registry);
  println!("Result: {}", result);
  assert_eq!(result, "Processed: TEST DATA");

  // --- Verify Isolation ---
  // Nothing was installed in the global registry.
  assert!(
    !global().is_configured(),
    "Provider should not have leaked into the global registry!"
  );

  println!("\nVerified that the local registry is isolated from the global one.");
}
