//! Error types for attribute writes and descriptor configuration.

use thiserror::Error;

/// Reason a write was rejected.
///
/// [`Instance::set`](crate::Instance::set) and
/// [`Instance::set_many`](crate::Instance::set_many) collapse this into a
/// `false` return; the `try_*` variants surface it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetError {
	/// The attribute only accepts its default or construction value.
	#[error("attribute '{name}' is read-only")]
	ReadOnly { name: String },

	/// The attribute's validator rejected the incoming value.
	#[error("invalid value for attribute '{name}': {reason}")]
	Invalid { name: String, reason: String },
}

impl SetError {
	/// Name of the attribute that caused the rejection.
	pub fn attr(&self) -> &str {
		match self {
			SetError::ReadOnly { name } | SetError::Invalid { name, .. } => name,
		}
	}
}

/// Errors that can occur when loading descriptor declarations.
#[derive(Error, Debug)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// A declaration names a validator that does not exist.
	#[error("unknown validator '{validator}' for attribute '{attr}'{}", suggestion_suffix(.suggestion))]
	UnknownValidator {
		attr: String,
		validator: String,
		suggestion: Option<String>,
	},

	/// A declared default fails the declaration's own validator.
	#[error("default for attribute '{attr}' fails its validator: {reason}")]
	DefaultRejected { attr: String, reason: String },
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
	match suggestion {
		Some(s) => format!(" (did you mean '{s}'?)"),
		None => String::new(),
	}
}
