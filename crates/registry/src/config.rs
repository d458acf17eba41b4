//! Declarative descriptor tables.
//!
//! Attribute declarations can be written in TOML, one table per attribute:
//!
//! ```toml
//! [title]
//! value = "untitled"
//! validator = "string"
//!
//! [id]
//! write_once = true
//! validator = "positive_int"
//! ```
//!
//! Getters and setters are code-only; declarations cover defaults, the
//! write guards and the [standard validators](crate::validators).

use indexmap::IndexMap;
use serde::Deserialize;

use crate::descriptor::{AttrDescriptor, Descriptors, Validator};
use crate::error::ConfigError;
use crate::{AttrValue, validators};

/// One attribute declaration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DescriptorSpec {
	#[serde(default)]
	pub value: Option<AttrValue>,
	#[serde(default, alias = "readOnly")]
	pub read_only: bool,
	#[serde(default, alias = "writeOnce")]
	pub write_once: bool,
	/// Name of a standard validator.
	#[serde(default)]
	pub validator: Option<String>,
}

impl DescriptorSpec {
	/// Builds the descriptor for attribute `attr`.
	pub fn into_descriptor<H>(self, attr: &str) -> Result<AttrDescriptor<H>, ConfigError> {
		let mut desc = AttrDescriptor::new()
			.read_only(self.read_only)
			.write_once(self.write_once);

		if let Some(name) = self.validator {
			let Some(check) = validators::by_name(&name) else {
				return Err(ConfigError::UnknownValidator {
					attr: attr.to_string(),
					suggestion: validators::suggest(&name),
					validator: name,
				});
			};
			if let Some(value) = &self.value {
				check(value).map_err(|reason| ConfigError::DefaultRejected {
					attr: attr.to_string(),
					reason,
				})?;
			}
			desc = desc.with_validator(Validator::new(check));
		}

		if let Some(value) = self.value {
			desc = desc.value(value);
		}
		Ok(desc)
	}
}

/// Parses a TOML document of attribute declarations, preserving order.
pub fn parse_specs(src: &str) -> Result<IndexMap<String, DescriptorSpec>, ConfigError> {
	Ok(toml::from_str(src)?)
}

/// Parses a TOML document straight into descriptors.
///
/// Fails without partial output if any declaration is invalid.
pub fn parse_descriptors<H>(src: &str) -> Result<Descriptors<H>, ConfigError> {
	parse_specs(src)?
		.into_iter()
		.map(|(name, spec)| {
			let desc = spec.into_descriptor(&name)?;
			Ok((name, desc))
		})
		.collect()
}
