//! Descriptor resolution for a single instance.
//!
//! # Resolution Order
//!
//! 1. Instance override (from `add_attr` or `remove_attr`)
//! 2. The instance's own class table
//! 3. Ancestor tables, nearest first
//!
//! A `remove_attr` override hides every declaration below it.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::descriptor::AttrDescriptor;
use crate::registry::{ClassId, RegistrySnapshot};


/// Per-instance descriptor override.
pub(crate) enum Override<H> {
	Declared(Arc<AttrDescriptor<H>>),
	Removed,
}

impl<H> Clone for Override<H> {
	fn clone(&self) -> Self {
		match self {
			Override::Declared(d) => Override::Declared(d.clone()),
			Override::Removed => Override::Removed,
		}
	}
}

pub(crate) type Overrides<H> = IndexMap<Box<str>, Override<H>>;

/// Resolves descriptors through instance overrides and the class chain.
///
/// Stateless; created per operation against one loaded snapshot.
pub(crate) struct AttrResolver<'a, H> {
	snap: &'a RegistrySnapshot<H>,
	class: ClassId,
	overrides: &'a Overrides<H>,
}

impl<'a, H> AttrResolver<'a, H> {
	pub(crate) fn new(
		snap: &'a RegistrySnapshot<H>,
		class: ClassId,
		overrides: &'a Overrides<H>,
	) -> Self {
		Self {
			snap,
			class,
			overrides,
		}
	}

	/// Returns the effective descriptor for `name`, if any.
	pub(crate) fn resolve(&self, name: &str) -> Option<&'a Arc<AttrDescriptor<H>>> {
		match self.overrides.get(name) {
			Some(Override::Declared(desc)) => Some(desc),
			Some(Override::Removed) => None,
			None => self.snap.lookup(self.class, name),
		}
	}

	/// Effective declared names: class chain first, then instance additions.
	pub(crate) fn names(&self) -> Vec<&'a str> {
		let mut names = self.snap.attr_names(self.class);
		for (name, ov) in self.overrides {
			if matches!(ov, Override::Declared(_)) && !names.contains(&&**name) {
				names.push(&**name);
			}
		}
		names.retain(|name| !matches!(self.overrides.get(*name), Some(Override::Removed)));
		names
	}
}
