//! Value model for managed attributes.
//!
//! Attributes hold dynamically typed [`AttrValue`]s. [`AttrValue::Undefined`]
//! is the sentinel reported for attributes that have neither a stored value
//! nor a default.

/// Dynamic attribute values and their type tags.
pub mod value;

pub use value::{AttrMap, AttrType, AttrValue, FromAttrValue};
