//! Managed attributes for host types.
//!
//! A [`Class`] carries a table of [`AttrDescriptor`]s: defaults, getters,
//! setters, validators and read-only or write-once guards. Subclasses created
//! with [`Class::extend`] inherit the table and may add to it. Every
//! [`Instance`] of a class exposes the same accessor protocol:
//!
//! - [`Instance::get`] / [`Instance::get_all`] read resolved values
//! - [`Instance::set`] / [`Instance::set_many`] write, all-or-nothing
//! - [`Instance::add_attr`] / [`Instance::remove_attr`] adjust the
//!   descriptors visible to one instance
//!
//! Rejected writes are reported as `false`, never as panics.
//!
//! ```ignore
//! use attrkit_registry::{AttrRegistry, attrs, values};
//!
//! let registry = AttrRegistry::<()>::new();
//! let class = registry.define("A");
//! attrkit_registry::patch(&class, attrs! {
//!     b: { value: 1, setter: |v| v.map_int(|n| n + 1) },
//!     c: { validator: |v| v.as_str().is_some() },
//! });
//!
//! let mut obj = class.instantiate(());
//! assert!(obj.set("b", 2));
//! assert!(!obj.set_many(values! { b: 5, c: 1 }));
//! assert_eq!(obj.get("b").as_int(), Some(3));
//! ```

pub mod class;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod instance;
mod macros;
pub mod registry;
mod resolver;
pub mod validators;

#[cfg(test)]
use tracing_subscriber as _;

pub use attrkit_primitives::{AttrMap, AttrType, AttrValue, FromAttrValue};
pub use class::Class;
pub use config::DescriptorSpec;
pub use descriptor::{AttrDescriptor, Descriptors, MethodSetter, Setter, Validator};
pub use error::{ConfigError, SetError};
pub use instance::Instance;
pub use registry::{AttrRegistry, ClassEntry, ClassId, RegistrySnapshot};

/// Merges `descriptors` into the table of `class`.
///
/// Repeated calls accumulate; a name declared again replaces only that
/// entry. Subclasses see the merged table immediately.
pub fn patch<H>(class: &Class<H>, descriptors: Descriptors<H>) {
	class.patch(descriptors);
}
