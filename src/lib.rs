//! Populate annotated struct fields from a single `key -> text` lookup.
//!
//! ```
//! use tagconf::Bind;
//!
//! #[derive(Debug, Default, Bind)]
//! struct Conf {
//!     #[conf(key = "app_env", default = "dev", desc = "Current environment")]
//!     env: String,
//!     #[conf(key = "app_workers", default = "4")]
//!     workers: u8,
//!     #[conf(key = "app_hosts")]
//!     hosts: Vec<String>,
//! }
//!
//! let conf: Conf = tagconf::load(|key: &str| match key {
//!     "app_hosts" => "a.local,b.local".to_string(),
//!     _ => String::new(),
//! })?;
//!
//! assert_eq!(conf.env, "dev");
//! assert_eq!(conf.workers, 4);
//! assert_eq!(conf.hosts, ["a.local", "b.local"]);
//! # Ok::<(), tagconf::Error>(())
//! ```

pub mod bind;
mod error;
pub mod lookup;
pub mod value;

pub use bind::{bind, bind_atomic, describe, load, Bind, FieldDescriptor, Fields};
pub use error::Error;

#[doc(hidden)]
pub mod __private {
    pub use crate::bind::registrar::{RegisterOther, RegisterValue, Registrar};
}
pub use value::{CoerceError, FieldKind, FieldValue, Scalar, ScalarKind, Value};

/// Derives [`Bind`] from `#[conf(...)]` field attributes.
///
/// | attribute | meaning |
/// |-----------|---------|
/// | `key = "name"` | lookup key; empty or `"-"` skips the field |
/// | `required` / `required = "true"` | empty lookup result is an error |
/// | `default = "text"` | used when the lookup returns empty |
/// | `desc = "text"` | description, carried in [`FieldDescriptor`] only |
///
/// Fields without `#[conf]` are listed by [`describe`] but never bound. A keyed
/// field whose type does not implement [`FieldValue`] is registered as
/// [`FieldKind::Other`]: it is looked up and `required` applies, but it is
/// never written.
pub use tagconf_derive::Bind;
