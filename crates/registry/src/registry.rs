//! Class registry.
//!
//! Descriptor tables live in an immutable [`RegistrySnapshot`] published
//! through [`ArcSwap`]. Readers load the current snapshot without locking;
//! writers clone it, apply their change and swap it in, retrying if another
//! writer won the race.

use std::sync::Arc;

use arc_swap::ArcSwap;
use indexmap::IndexMap;
use tracing::trace;

use crate::class::Class;
use crate::descriptor::AttrDescriptor;

/// Dense identifier of a class within its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u32);

impl ClassId {
	pub fn as_u32(self) -> u32 {
		self.0
	}

	fn index(self) -> usize {
		self.0 as usize
	}
}

/// Descriptor table and parent link of one class.
pub struct ClassEntry<H> {
	name: Box<str>,
	parent: Option<ClassId>,
	table: IndexMap<Box<str>, Arc<AttrDescriptor<H>>>,
}

impl<H> Clone for ClassEntry<H> {
	fn clone(&self) -> Self {
		Self {
			name: self.name.clone(),
			parent: self.parent,
			table: self.table.clone(),
		}
	}
}

impl<H> ClassEntry<H> {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn parent(&self) -> Option<ClassId> {
		self.parent
	}

	/// Descriptors declared directly on this class.
	pub fn own(&self) -> impl Iterator<Item = (&str, &Arc<AttrDescriptor<H>>)> {
		self.table.iter().map(|(k, v)| (&**k, v))
	}
}

/// Immutable view of every class in a registry.
pub struct RegistrySnapshot<H> {
	classes: Vec<ClassEntry<H>>,
}

impl<H> Clone for RegistrySnapshot<H> {
	fn clone(&self) -> Self {
		Self {
			classes: self.classes.clone(),
		}
	}
}

impl<H> RegistrySnapshot<H> {
	fn empty() -> Self {
		Self {
			classes: Vec::new(),
		}
	}

	#[inline]
	pub fn class(&self, id: ClassId) -> Option<&ClassEntry<H>> {
		self.classes.get(id.index())
	}

	pub fn class_name(&self, id: ClassId) -> &str {
		self.class(id).map_or("<unknown>", |c| c.name())
	}

	/// Iterates `id` and its ancestors, nearest first.
	pub fn ancestry(&self, id: ClassId) -> impl Iterator<Item = (ClassId, &ClassEntry<H>)> {
		let mut next = Some(id);
		std::iter::from_fn(move || {
			let cur = next?;
			let entry = self.class(cur)?;
			next = entry.parent;
			Some((cur, entry))
		})
	}

	/// Finds the nearest declaration of `name` along the ancestry of `id`.
	pub fn lookup(&self, id: ClassId, name: &str) -> Option<&Arc<AttrDescriptor<H>>> {
		self.ancestry(id).find_map(|(_, entry)| entry.table.get(name))
	}

	/// Declared attribute names of `id`, ancestors first, without duplicates.
	pub fn attr_names(&self, id: ClassId) -> Vec<&str> {
		let chain: Vec<_> = self.ancestry(id).collect();
		let mut names: Vec<&str> = Vec::new();
		for (_, entry) in chain.into_iter().rev() {
			for name in entry.table.keys() {
				if !names.contains(&&**name) {
					names.push(name);
				}
			}
		}
		names
	}

	pub fn len(&self) -> usize {
		self.classes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.classes.is_empty()
	}
}

/// Registry of classes and their descriptor tables.
///
/// Shared behind an [`Arc`]; [`Class`] handles and instances keep it alive.
pub struct AttrRegistry<H> {
	snap: ArcSwap<RegistrySnapshot<H>>,
}

impl<H> AttrRegistry<H> {
	pub fn new() -> Arc<Self> {
		Arc::new(Self {
			snap: ArcSwap::from_pointee(RegistrySnapshot::empty()),
		})
	}

	/// Declares a root class.
	pub fn define(self: &Arc<Self>, name: &str) -> Class<H> {
		let id = self.register_class(name, None);
		Class::new(self.clone(), id)
	}

	/// Loads the current snapshot.
	#[inline]
	pub fn snapshot(&self) -> Arc<RegistrySnapshot<H>> {
		self.snap.load_full()
	}

	pub fn with_snapshot<R>(&self, f: impl FnOnce(&RegistrySnapshot<H>) -> R) -> R {
		let snap = self.snap.load();
		f(&snap)
	}

	pub fn len(&self) -> usize {
		self.snap.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.snap.load().is_empty()
	}

	pub(crate) fn register_class(&self, name: &str, parent: Option<ClassId>) -> ClassId {
		let id = self.update(|next| {
			let id = ClassId(next.classes.len() as u32);
			next.classes.push(ClassEntry {
				name: Box::from(name),
				parent,
				table: IndexMap::new(),
			});
			id
		});
		trace!(domain = "attributes", class = name, id = id.as_u32(), "class registered");
		id
	}

	/// Merges descriptors into the table of `id`.
	///
	/// Existing entries with the same name are replaced; every other entry is
	/// kept.
	pub(crate) fn merge<I>(&self, id: ClassId, descriptors: I)
	where
		I: IntoIterator<Item = (String, AttrDescriptor<H>)>,
	{
		let incoming: Vec<(Box<str>, Arc<AttrDescriptor<H>>)> = descriptors
			.into_iter()
			.map(|(name, desc)| (name.into_boxed_str(), Arc::new(desc)))
			.collect();
		if incoming.is_empty() {
			return;
		}

		self.update(|next| {
			let Some(entry) = next.classes.get_mut(id.index()) else {
				return;
			};
			for (name, desc) in &incoming {
				trace!(
					domain = "attributes",
					class = &*entry.name,
					attr = &**name,
					"descriptor registered"
				);
				entry.table.insert(name.clone(), desc.clone());
			}
		});
	}

	fn update<R>(&self, mut apply: impl FnMut(&mut RegistrySnapshot<H>) -> R) -> R {
		loop {
			let cur = self.snap.load_full();
			let mut next = (*cur).clone();
			let out = apply(&mut next);

			let next_arc = Arc::new(next);
			let prev = self.snap.compare_and_swap(&cur, next_arc);
			if Arc::ptr_eq(&prev, &cur) {
				return out;
			}
		}
	}
}
