//! Instances and the accessor protocol.
//!
//! An [`Instance`] pairs a host value with a private attribute store. Reads
//! resolve stored value, then default, then [`AttrValue::Undefined`]. Writes
//! are planned for every key first and committed only when every key passed.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::class::Class;
use crate::descriptor::{AttrDescriptor, Descriptors, MethodSetter, Setter};
use crate::error::SetError;
use crate::registry::RegistrySnapshot;
use crate::resolver::{AttrResolver, Override, Overrides};
use crate::{AttrMap, AttrValue, FromAttrValue};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteMode {
	Runtime,
	Construction,
}

/// A single planned write, produced before anything is committed.
enum Planned<H> {
	/// `seal` marks a write-once slot as used once committed.
	Store {
		name: Box<str>,
		value: AttrValue,
		seal: bool,
	},
	Invoke {
		name: Box<str>,
		method: MethodSetter<H>,
		value: AttrValue,
		seal: bool,
	},
	/// Write-once slot already written; tolerated without effect.
	Skip,
}

/// A host value with managed attributes.
pub struct Instance<H> {
	class: Class<H>,
	host: H,
	store: IndexMap<Box<str>, AttrValue>,
	written: FxHashSet<Box<str>>,
	overrides: Overrides<H>,
}

impl<H: core::fmt::Debug> core::fmt::Debug for Instance<H> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Instance")
			.field("class", &self.class)
			.field("host", &self.host)
			.field("store", &self.store)
			.finish_non_exhaustive()
	}
}

impl<H> Instance<H> {
	pub(crate) fn new(class: Class<H>, host: H) -> Self {
		Self {
			class,
			host,
			store: IndexMap::new(),
			written: FxHashSet::default(),
			overrides: Overrides::default(),
		}
	}

	pub fn class(&self) -> &Class<H> {
		&self.class
	}

	pub fn host(&self) -> &H {
		&self.host
	}

	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}

	pub fn into_host(self) -> H {
		self.host
	}

	fn resolver<'a>(&'a self, snap: &'a RegistrySnapshot<H>) -> AttrResolver<'a, H> {
		AttrResolver::new(snap, self.class.id(), &self.overrides)
	}

	/// Returns the resolved value of `name`.
	///
	/// Stored value if present, else the descriptor default, else
	/// [`AttrValue::Undefined`]; passed through the getter when one is
	/// declared.
	pub fn get(&self, name: &str) -> AttrValue {
		let snap = self.class.registry().snapshot();
		self.read(self.resolver(&snap).resolve(name), name)
	}

	/// Typed read; `None` when the resolved value has another type.
	pub fn get_as<T: FromAttrValue>(&self, name: &str) -> Option<T> {
		T::from_attr(&self.get(name))
	}

	/// Snapshot of every attribute's resolved value.
	///
	/// Declared names come first (ancestors, subclasses, then instance
	/// additions), followed by free-form stored names. The returned map is
	/// independent of the instance.
	pub fn get_all(&self) -> AttrMap {
		let snap = self.class.registry().snapshot();
		let resolver = self.resolver(&snap);

		let mut out = AttrMap::new();
		for name in resolver.names() {
			out.insert(name.to_string(), self.read(resolver.resolve(name), name));
		}
		for (name, value) in &self.store {
			if !out.contains_key(&**name) {
				out.insert(name.to_string(), value.clone());
			}
		}
		out
	}

	fn read(&self, desc: Option<&Arc<AttrDescriptor<H>>>, name: &str) -> AttrValue {
		let raw = self
			.store
			.get(name)
			.cloned()
			.or_else(|| desc.and_then(|d| d.default_value().cloned()))
			.unwrap_or_default();
		match desc {
			Some(desc) => desc.read(raw),
			None => raw,
		}
	}

	/// Writes a single attribute. Returns `false` if the write was rejected.
	pub fn set(&mut self, name: &str, value: impl Into<AttrValue>) -> bool {
		self.try_set(name, value).is_ok()
	}

	/// Writes every key of `values` or none of them.
	pub fn set_many(&mut self, values: AttrMap) -> bool {
		self.try_set_many(values).is_ok()
	}

	/// Like [`Instance::set`], reporting why a write was rejected.
	pub fn try_set(&mut self, name: &str, value: impl Into<AttrValue>) -> Result<(), SetError> {
		let mut values = AttrMap::with_capacity(1);
		values.insert(name.to_string(), value.into());
		self.write(values, WriteMode::Runtime)
	}

	/// Like [`Instance::set_many`], reporting the first rejected key.
	pub fn try_set_many(&mut self, values: AttrMap) -> Result<(), SetError> {
		self.write(values, WriteMode::Runtime)
	}

	pub(crate) fn construct(&mut self, values: AttrMap) -> Result<(), SetError> {
		self.write(values, WriteMode::Construction)
	}

	fn write(&mut self, values: AttrMap, mode: WriteMode) -> Result<(), SetError> {
		let snap = self.class.registry().snapshot();
		let plan = {
			let resolver = self.resolver(&snap);
			let mut plan = Vec::with_capacity(values.len());
			for (name, value) in values {
				match self.plan(&resolver, name, value, mode) {
					Ok(step) => plan.push(step),
					Err(err) => {
						debug!(
							domain = "attributes",
							class = snap.class_name(self.class.id()),
							attr = err.attr(),
							error = %err,
							"write rejected; batch discarded",
						);
						return Err(err);
					}
				}
			}
			plan
		};

		for step in plan {
			self.commit(step);
		}
		Ok(())
	}

	fn plan(
		&self,
		resolver: &AttrResolver<'_, H>,
		name: String,
		value: AttrValue,
		mode: WriteMode,
	) -> Result<Planned<H>, SetError> {
		let Some(desc) = resolver.resolve(&name) else {
			return Ok(Planned::Store {
				name: name.into_boxed_str(),
				value,
				seal: false,
			});
		};

		if desc.is_read_only() && mode == WriteMode::Runtime {
			return Err(SetError::ReadOnly { name });
		}
		if desc.is_write_once() && self.written.contains(name.as_str()) {
			trace!(domain = "attributes", attr = %name, "write-once slot already set; ignored");
			return Ok(Planned::Skip);
		}
		if let Err(reason) = desc.validate(&value) {
			return Err(SetError::Invalid { name, reason });
		}

		let name = name.into_boxed_str();
		let seal = desc.is_write_once();
		Ok(match desc.setter_kind() {
			Some(Setter::Transform(transform)) => Planned::Store {
				name,
				value: transform(value),
				seal,
			},
			Some(Setter::Method(method)) => Planned::Invoke {
				name,
				method: *method,
				value,
				seal,
			},
			None => Planned::Store { name, value, seal },
		})
	}

	fn commit(&mut self, step: Planned<H>) {
		match step {
			Planned::Store { name, value, seal } => {
				trace!(domain = "attributes", attr = &*name, "attribute stored");
				if seal {
					self.written.insert(name.clone());
				}
				self.store.insert(name, value);
			}
			Planned::Invoke {
				name,
				method,
				value,
				seal,
			} => {
				trace!(
					domain = "attributes",
					attr = &*name,
					method = method.name(),
					"attribute routed to host method"
				);
				method.invoke(&mut self.host, value);
				if seal {
					self.written.insert(name);
				}
			}
			Planned::Skip => {}
		}
	}

	/// Adds descriptors visible to this instance only.
	///
	/// The descriptors are copied, so the caller's map is never affected by
	/// later writes to this instance. A value stored before a name became
	/// write-once does not use up its single write.
	pub fn add_attr(&mut self, descriptors: &Descriptors<H>) {
		for (name, desc) in descriptors {
			debug!(domain = "attributes", attr = %name, "instance attribute added");
			self.overrides.insert(
				Box::from(name.as_str()),
				Override::Declared(Arc::new(desc.clone())),
			);
		}
	}

	/// Forgets `name` on this instance: its descriptor, stored value and
	/// write-once state.
	pub fn remove_attr(&mut self, name: &str) {
		debug!(domain = "attributes", attr = name, "instance attribute removed");
		self.store.shift_remove(name);
		self.written.remove(name);
		self.overrides.insert(Box::from(name), Override::Removed);
	}
}
