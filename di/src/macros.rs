//! Public macros for declaring injectable parameters.

/// Builds a [`Signature`](crate::Signature) from `name: Type` pairs.
///
/// Types may be concrete types or trait objects.
///
/// # Examples
///
/// ```
/// use fibre_di::{signature, TypeKey};
///
/// trait Clock: Send + Sync {}
///
/// let signature = signature!(retries: u32, clock: dyn Clock);
///
/// assert_eq!(signature.len(), 2);
/// assert_eq!(signature.get("clock").unwrap().key(), TypeKey::of::<dyn Clock>());
/// ```
#[macro_export]
macro_rules! signature {
  () => {
    $crate::Signature::new()
  };

  ($($name:ident : $type:ty),+ $(,)?) => {
    $crate::Signature::new()
      $(.param::<$type>(stringify!($name)))+
  };
}
