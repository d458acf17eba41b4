//! Standard validators for attribute values.
//!
//! Usable directly with [`AttrDescriptor::check`](crate::AttrDescriptor::check)
//! or by name from TOML declarations.

use crate::AttrValue;

pub type ValidatorFn = fn(&AttrValue) -> Result<(), String>;

/// Validator names accepted in declarations, paired with their checks.
pub const STANDARD: &[(&str, ValidatorFn)] = &[
	("string", string),
	("int", int),
	("float", float),
	("bool", boolean),
	("positive_int", positive_int),
	("non_empty", non_empty),
];

/// Looks up a standard validator by name.
pub fn by_name(name: &str) -> Option<ValidatorFn> {
	STANDARD
		.iter()
		.find(|(n, _)| *n == name)
		.map(|&(_, f)| f)
}

/// Suggests a similar validator name using fuzzy matching.
pub fn suggest(name: &str) -> Option<String> {
	STANDARD
		.iter()
		.map(|(n, _)| *n)
		.min_by_key(|n| strsim::levenshtein(name, n))
		.filter(|n| strsim::levenshtein(name, n) <= 3)
		.map(str::to_string)
}

fn expected(what: &str, value: &AttrValue) -> Result<(), String> {
	Err(format!("expected {what}, got {}", value.type_name()))
}

pub fn string(value: &AttrValue) -> Result<(), String> {
	match value {
		AttrValue::String(_) => Ok(()),
		other => expected("string", other),
	}
}

pub fn int(value: &AttrValue) -> Result<(), String> {
	match value {
		AttrValue::Int(_) => Ok(()),
		other => expected("integer", other),
	}
}

/// Accepts floats and integers.
pub fn float(value: &AttrValue) -> Result<(), String> {
	match value {
		AttrValue::Float(_) | AttrValue::Int(_) => Ok(()),
		other => expected("number", other),
	}
}

pub fn boolean(value: &AttrValue) -> Result<(), String> {
	match value {
		AttrValue::Bool(_) => Ok(()),
		other => expected("boolean", other),
	}
}

/// Validates that an integer is positive (>= 1).
pub fn positive_int(value: &AttrValue) -> Result<(), String> {
	match value {
		AttrValue::Int(n) if *n >= 1 => Ok(()),
		AttrValue::Int(n) => Err(format!("must be at least 1, got {n}")),
		other => expected("integer", other),
	}
}

/// Rejects empty strings, lists and maps.
pub fn non_empty(value: &AttrValue) -> Result<(), String> {
	let empty = match value {
		AttrValue::String(s) => s.is_empty(),
		AttrValue::List(l) => l.is_empty(),
		AttrValue::Map(m) => m.is_empty(),
		other => return expected("string, list or map", other),
	};
	if empty {
		Err("must not be empty".to_string())
	} else {
		Ok(())
	}
}
