//! Attribute descriptors.
//!
//! An [`AttrDescriptor`] configures one attribute name on a class: its
//! default value, read and write transforms, validation and write guards.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::AttrValue;

/// Read transform applied to the raw value on every `get`.
pub type GetterFn = Arc<dyn Fn(AttrValue) -> AttrValue + Send + Sync>;

/// Write transform whose return value is stored.
pub type TransformFn = Arc<dyn Fn(AttrValue) -> AttrValue + Send + Sync>;

/// Reasoned validation check.
pub type CheckFn = Arc<dyn Fn(&AttrValue) -> Result<(), String> + Send + Sync>;

/// Descriptors keyed by attribute name, in declaration order.
pub type Descriptors<H> = IndexMap<String, AttrDescriptor<H>>;

/// Named host method invoked for effect when its attribute is written.
///
/// The method receives the incoming value and owns whatever side effect it
/// performs. Nothing is written to the instance store.
pub struct MethodSetter<H> {
	name: &'static str,
	call: fn(&mut H, AttrValue),
}

impl<H> MethodSetter<H> {
	pub const fn new(name: &'static str, call: fn(&mut H, AttrValue)) -> Self {
		Self { name, call }
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub(crate) fn invoke(&self, host: &mut H, value: AttrValue) {
		(self.call)(host, value)
	}
}

impl<H> Clone for MethodSetter<H> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<H> Copy for MethodSetter<H> {}

impl<H> core::fmt::Debug for MethodSetter<H> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "MethodSetter({})", self.name)
	}
}

/// Write-side behavior of an attribute.
pub enum Setter<H> {
	/// Pure transform; the returned value is stored.
	Transform(TransformFn),
	/// Host method invoked for effect; its attribute store slot is untouched.
	Method(MethodSetter<H>),
}

impl<H> Clone for Setter<H> {
	fn clone(&self) -> Self {
		match self {
			Setter::Transform(f) => Setter::Transform(f.clone()),
			Setter::Method(m) => Setter::Method(*m),
		}
	}
}

impl<H> core::fmt::Debug for Setter<H> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			Setter::Transform(_) => f.write_str("Setter::Transform(..)"),
			Setter::Method(m) => write!(f, "Setter::Method({})", m.name),
		}
	}
}

/// Validation applied to incoming values before they are committed.
#[derive(Clone)]
pub struct Validator(CheckFn);

impl Validator {
	/// Wraps a check that explains its rejections.
	pub fn new<F>(check: F) -> Self
	where
		F: Fn(&AttrValue) -> Result<(), String> + Send + Sync + 'static,
	{
		Self(Arc::new(check))
	}

	/// Wraps a plain predicate.
	pub fn predicate<F>(pred: F) -> Self
	where
		F: Fn(&AttrValue) -> bool + Send + Sync + 'static,
	{
		Self::new(move |value| {
			if pred(value) {
				Ok(())
			} else {
				Err(format!("{} value rejected by validator", value.type_name()))
			}
		})
	}

	pub fn check(&self, value: &AttrValue) -> Result<(), String> {
		(self.0)(value)
	}
}

impl core::fmt::Debug for Validator {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str("Validator(..)")
	}
}

/// Configuration of a single attribute.
///
/// Built with chained calls, usually through the [`attrs!`](crate::attrs)
/// macro:
///
/// ```ignore
/// let desc = AttrDescriptor::<()>::new()
///     .value(1)
///     .setter(|v| v.map_int(|n| n + 1))
///     .write_once(true);
/// ```
pub struct AttrDescriptor<H> {
	default: Option<AttrValue>,
	getter: Option<GetterFn>,
	setter: Option<Setter<H>>,
	validator: Option<Validator>,
	read_only: bool,
	write_once: bool,
}

impl<H> Default for AttrDescriptor<H> {
	fn default() -> Self {
		Self {
			default: None,
			getter: None,
			setter: None,
			validator: None,
			read_only: false,
			write_once: false,
		}
	}
}

impl<H> Clone for AttrDescriptor<H> {
	fn clone(&self) -> Self {
		Self {
			default: self.default.clone(),
			getter: self.getter.clone(),
			setter: self.setter.clone(),
			validator: self.validator.clone(),
			read_only: self.read_only,
			write_once: self.write_once,
		}
	}
}

impl<H> core::fmt::Debug for AttrDescriptor<H> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("AttrDescriptor")
			.field("default", &self.default)
			.field("getter", &self.getter.is_some())
			.field("setter", &self.setter)
			.field("validator", &self.validator.is_some())
			.field("read_only", &self.read_only)
			.field("write_once", &self.write_once)
			.finish()
	}
}

impl<H> AttrDescriptor<H> {
	/// Creates an unconstrained descriptor with no default.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the default value.
	pub fn value(mut self, value: impl Into<AttrValue>) -> Self {
		self.default = Some(value.into());
		self
	}

	pub fn getter<F>(mut self, getter: F) -> Self
	where
		F: Fn(AttrValue) -> AttrValue + Send + Sync + 'static,
	{
		self.getter = Some(Arc::new(getter));
		self
	}

	/// Installs a transform setter whose result is stored.
	pub fn setter<F>(mut self, setter: F) -> Self
	where
		F: Fn(AttrValue) -> AttrValue + Send + Sync + 'static,
	{
		self.setter = Some(Setter::Transform(Arc::new(setter)));
		self
	}

	/// Installs a host method as the setter.
	pub fn method(mut self, method: MethodSetter<H>) -> Self {
		self.setter = Some(Setter::Method(method));
		self
	}

	/// Installs a predicate validator.
	pub fn validator<F>(mut self, pred: F) -> Self
	where
		F: Fn(&AttrValue) -> bool + Send + Sync + 'static,
	{
		self.validator = Some(Validator::predicate(pred));
		self
	}

	/// Installs a validator that reports a reason on rejection.
	pub fn check<F>(mut self, check: F) -> Self
	where
		F: Fn(&AttrValue) -> Result<(), String> + Send + Sync + 'static,
	{
		self.validator = Some(Validator::new(check));
		self
	}

	pub fn with_validator(mut self, validator: Validator) -> Self {
		self.validator = Some(validator);
		self
	}

	pub fn read_only(mut self, read_only: bool) -> Self {
		self.read_only = read_only;
		self
	}

	pub fn write_once(mut self, write_once: bool) -> Self {
		self.write_once = write_once;
		self
	}

	pub fn default_value(&self) -> Option<&AttrValue> {
		self.default.as_ref()
	}

	pub fn setter_kind(&self) -> Option<&Setter<H>> {
		self.setter.as_ref()
	}

	pub fn has_getter(&self) -> bool {
		self.getter.is_some()
	}

	pub fn has_validator(&self) -> bool {
		self.validator.is_some()
	}

	pub fn is_read_only(&self) -> bool {
		self.read_only
	}

	pub fn is_write_once(&self) -> bool {
		self.write_once
	}

	/// Runs the validator, if any, against an incoming value.
	pub fn validate(&self, value: &AttrValue) -> Result<(), String> {
		match &self.validator {
			Some(validator) => validator.check(value),
			None => Ok(()),
		}
	}

	/// Produces the externally visible value from a raw stored value.
	pub fn read(&self, raw: AttrValue) -> AttrValue {
		match &self.getter {
			Some(getter) => getter(raw),
			None => raw,
		}
	}
}
