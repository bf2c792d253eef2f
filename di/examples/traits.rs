use fibre_di::{configure, inject, signature, Error, Kwargs, Provider};
use std::sync::Arc;

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {}", message);
  }
}

// 3. A function that depends on the abstraction, not on `ConsoleLogger`.
fn generate_report(title: &'static str, kwargs: Kwargs) -> Result<usize, Error> {
  let logger = kwargs.require::<dyn Logger>("logger")?;
  logger.log(&format!("Starting report '{}'.", title));
  // ... logic to generate report ...
  logger.log("Finished report generation.");
  Ok(title.len())
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  // --- Wiring, once at startup ---
  let provider = Provider::new();
  provider.bind_trait::<dyn Logger>(|| Arc::new(ConsoleLogger));
  configure(provider).expect("startup wiring runs once");

  // --- Declare what the function wants, by parameter name and type ---
  let report = inject()
    .signature(signature!(logger: dyn Logger))
    .wrap(generate_report);

  // --- Call it with positional arguments only ---
  println!("Calling {}...", report.name());
  let written = report.invoke("quarterly").expect("logger is bound").expect("report succeeds");
  println!("Report title had {} characters.", written);
}
