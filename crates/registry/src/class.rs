//! Class handles.

use std::sync::Arc;

use crate::descriptor::{AttrDescriptor, Descriptors};
use crate::error::{ConfigError, SetError};
use crate::instance::Instance;
use crate::registry::{AttrRegistry, ClassId};
use crate::{AttrMap, config};

/// Handle to a class registered in an [`AttrRegistry`].
///
/// Cloning a handle is cheap; all clones refer to the same descriptor table.
pub struct Class<H> {
	registry: Arc<AttrRegistry<H>>,
	id: ClassId,
}

impl<H> Clone for Class<H> {
	fn clone(&self) -> Self {
		Self {
			registry: self.registry.clone(),
			id: self.id,
		}
	}
}

impl<H> core::fmt::Debug for Class<H> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Class")
			.field("id", &self.id)
			.field("name", &self.name())
			.finish()
	}
}

impl<H> PartialEq for Class<H> {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.registry, &other.registry) && self.id == other.id
	}
}

impl<H> Eq for Class<H> {}

impl<H> Class<H> {
	pub(crate) fn new(registry: Arc<AttrRegistry<H>>, id: ClassId) -> Self {
		Self { registry, id }
	}

	pub fn id(&self) -> ClassId {
		self.id
	}

	pub fn name(&self) -> String {
		self.registry
			.with_snapshot(|snap| snap.class_name(self.id).to_string())
	}

	pub fn registry(&self) -> &Arc<AttrRegistry<H>> {
		&self.registry
	}

	pub fn parent(&self) -> Option<Class<H>> {
		let parent = self
			.registry
			.with_snapshot(|snap| snap.class(self.id).and_then(|c| c.parent()))?;
		Some(Class::new(self.registry.clone(), parent))
	}

	/// Declares a subclass inheriting every descriptor of this class.
	pub fn extend(&self, name: &str) -> Class<H> {
		let id = self.registry.register_class(name, Some(self.id));
		Class::new(self.registry.clone(), id)
	}

	/// Returns true if `self` is `other` or one of its descendants.
	pub fn is_subclass_of(&self, other: &Class<H>) -> bool {
		if !Arc::ptr_eq(&self.registry, &other.registry) {
			return false;
		}
		self.registry
			.with_snapshot(|snap| snap.ancestry(self.id).any(|(id, _)| id == other.id))
	}

	/// Merges descriptors into this class's table.
	pub fn patch(&self, descriptors: Descriptors<H>) {
		self.registry.merge(self.id, descriptors);
	}

	/// Parses TOML descriptor declarations and merges them.
	///
	/// Nothing is merged if any declaration is invalid.
	pub fn patch_from_toml(&self, src: &str) -> Result<(), ConfigError> {
		let descriptors = config::parse_descriptors(src)?;
		self.patch(descriptors);
		Ok(())
	}

	/// Resolves the effective descriptor for `name`, walking ancestors.
	pub fn descriptor(&self, name: &str) -> Option<Arc<AttrDescriptor<H>>> {
		self.registry
			.with_snapshot(|snap| snap.lookup(self.id, name).cloned())
	}

	/// Declared attribute names, ancestors first.
	pub fn attr_names(&self) -> Vec<String> {
		self.registry.with_snapshot(|snap| {
			snap.attr_names(self.id)
				.into_iter()
				.map(str::to_string)
				.collect()
		})
	}

	/// Wraps `host` in a new instance with an empty store.
	pub fn instantiate(&self, host: H) -> Instance<H> {
		Instance::new(self.clone(), host)
	}

	/// Wraps `host` and applies construction-time values.
	///
	/// Construction values go through the same all-or-nothing write as
	/// [`Instance::set_many`], except that read-only attributes accept them.
	pub fn instantiate_with(&self, host: H, values: AttrMap) -> Result<Instance<H>, SetError> {
		let mut instance = Instance::new(self.clone(), host);
		instance.construct(values)?;
		Ok(instance)
	}
}
