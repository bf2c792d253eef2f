use fibre_di::{inject, Kwargs};
use std::sync::atomic::{AtomicUsize, Ordering};

// A counter standing in for something expensive to construct.
static CONNECTIONS: AtomicUsize = AtomicUsize::new(0);

struct Connection {
  id: usize,
}

fn main() {
  // No provider is configured: explicit factories never need one.
  let query = inject()
    .factory("conn", || {
      let id = CONNECTIONS.fetch_add(1, Ordering::SeqCst);
      println!("Opening connection #{}", id);
      Connection { id }
    })
    .wrap(|sql: &str, kwargs: Kwargs| {
      let conn = kwargs.get::<Connection>("conn").expect("injected above");
      format!("conn #{} ran `{}`", conn.id, sql)
    });

  // The factory runs on every call.
  println!("{}", query.invoke("SELECT 1").unwrap());
  println!("{}", query.invoke("SELECT 2").unwrap());

  // A caller-supplied keyword wins, and the factory is skipped.
  let supplied = Kwargs::new().with("conn", Connection { id: 99 });
  println!("{}", query.call("SELECT 3", supplied).unwrap());

  assert_eq!(CONNECTIONS.load(Ordering::SeqCst), 2);
}
