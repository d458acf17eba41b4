use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered name to value mapping, used for batch writes and snapshots.
pub type AttrMap = IndexMap<String, AttrValue>;

/// The value of an attribute.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
	/// Explicit null.
	Null,
	/// Boolean value.
	Bool(bool),
	/// Integer value.
	Int(i64),
	/// Floating point value.
	Float(f64),
	/// String value.
	String(String),
	/// Ordered list of values.
	List(Vec<AttrValue>),
	/// Nested mapping.
	Map(AttrMap),
	/// No stored value and no default.
	#[default]
	#[serde(skip_deserializing)]
	Undefined,
}

impl AttrValue {
	/// Returns true for the [`AttrValue::Undefined`] sentinel.
	pub fn is_undefined(&self) -> bool {
		matches!(self, AttrValue::Undefined)
	}

	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			AttrValue::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the integer value if this is an `Int` variant.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			AttrValue::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the value as `f64` for both `Float` and `Int` variants.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			AttrValue::Float(v) => Some(*v),
			AttrValue::Int(v) => Some(*v as f64),
			_ => None,
		}
	}

	/// Returns the string value if this is a `String` variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			AttrValue::String(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the list elements if this is a `List` variant.
	pub fn as_list(&self) -> Option<&[AttrValue]> {
		match self {
			AttrValue::List(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the nested mapping if this is a `Map` variant.
	pub fn as_map(&self) -> Option<&AttrMap> {
		match self {
			AttrValue::Map(v) => Some(v),
			_ => None,
		}
	}

	/// Applies `f` to an integer payload, leaving every other variant untouched.
	pub fn map_int(self, f: impl FnOnce(i64) -> i64) -> AttrValue {
		match self {
			AttrValue::Int(v) => AttrValue::Int(f(v)),
			other => other,
		}
	}

	/// Returns the type tag of this value.
	pub fn value_type(&self) -> AttrType {
		match self {
			AttrValue::Null => AttrType::Null,
			AttrValue::Bool(_) => AttrType::Bool,
			AttrValue::Int(_) => AttrType::Int,
			AttrValue::Float(_) => AttrType::Float,
			AttrValue::String(_) => AttrType::String,
			AttrValue::List(_) => AttrType::List,
			AttrValue::Map(_) => AttrType::Map,
			AttrValue::Undefined => AttrType::Undefined,
		}
	}

	/// Returns true if this value matches the given type.
	pub fn matches_type(&self, ty: AttrType) -> bool {
		self.value_type() == ty
	}

	/// Returns the type name of this value.
	pub fn type_name(&self) -> &'static str {
		self.value_type().name()
	}
}

impl From<bool> for AttrValue {
	fn from(v: bool) -> Self {
		AttrValue::Bool(v)
	}
}

impl From<i64> for AttrValue {
	fn from(v: i64) -> Self {
		AttrValue::Int(v)
	}
}

impl From<i32> for AttrValue {
	fn from(v: i32) -> Self {
		AttrValue::Int(v.into())
	}
}

impl From<f64> for AttrValue {
	fn from(v: f64) -> Self {
		AttrValue::Float(v)
	}
}

impl From<String> for AttrValue {
	fn from(v: String) -> Self {
		AttrValue::String(v)
	}
}

impl From<&str> for AttrValue {
	fn from(v: &str) -> Self {
		AttrValue::String(v.to_string())
	}
}

impl<T: Into<AttrValue>> From<Vec<T>> for AttrValue {
	fn from(v: Vec<T>) -> Self {
		AttrValue::List(v.into_iter().map(Into::into).collect())
	}
}

impl From<AttrMap> for AttrValue {
	fn from(v: AttrMap) -> Self {
		AttrValue::Map(v)
	}
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
	fn from(v: Option<T>) -> Self {
		v.map_or(AttrValue::Null, Into::into)
	}
}

/// The type of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrType {
	/// Explicit null.
	Null,
	/// Boolean type.
	Bool,
	/// Integer type.
	Int,
	/// Floating point type.
	Float,
	/// String type.
	String,
	/// List type.
	List,
	/// Mapping type.
	Map,
	/// The undefined sentinel.
	Undefined,
}

impl AttrType {
	/// Returns the lowercase name used in diagnostics.
	pub fn name(self) -> &'static str {
		match self {
			AttrType::Null => "null",
			AttrType::Bool => "bool",
			AttrType::Int => "int",
			AttrType::Float => "float",
			AttrType::String => "string",
			AttrType::List => "list",
			AttrType::Map => "map",
			AttrType::Undefined => "undefined",
		}
	}
}

impl core::fmt::Display for AttrType {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(self.name())
	}
}

// Seal the FromAttrValue trait to prevent external implementations.
mod sealed {
	pub trait Sealed {}
	impl Sealed for i64 {}
	impl Sealed for f64 {}
	impl Sealed for bool {}
	impl Sealed for String {}
}

/// Trait for types that can be extracted from an [`AttrValue`].
pub trait FromAttrValue: sealed::Sealed + Sized {
	/// Extracts the value, returning `None` if the type doesn't match.
	fn from_attr(value: &AttrValue) -> Option<Self>;

	/// Returns the `AttrType` corresponding to this Rust type.
	fn attr_type() -> AttrType;
}

impl FromAttrValue for i64 {
	fn from_attr(value: &AttrValue) -> Option<Self> {
		value.as_int()
	}

	fn attr_type() -> AttrType {
		AttrType::Int
	}
}

impl FromAttrValue for f64 {
	fn from_attr(value: &AttrValue) -> Option<Self> {
		value.as_float()
	}

	fn attr_type() -> AttrType {
		AttrType::Float
	}
}

impl FromAttrValue for bool {
	fn from_attr(value: &AttrValue) -> Option<Self> {
		value.as_bool()
	}

	fn attr_type() -> AttrType {
		AttrType::Bool
	}
}

impl FromAttrValue for String {
	fn from_attr(value: &AttrValue) -> Option<Self> {
		value.as_str().map(|s| s.to_string())
	}

	fn attr_type() -> AttrType {
		AttrType::String
	}
}
