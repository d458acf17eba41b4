use pretty_assertions::assert_eq;

use super::*;
use crate::{AttrRegistry, attrs, values};

#[derive(Debug, Default)]
struct Widget {
	b: Option<i64>,
}

impl Widget {
	fn set_a(&mut self, value: AttrValue) {
		self.b = value.as_int().map(|n| n * 10);
	}
}

fn scenario_class() -> Class<Widget> {
	let registry = AttrRegistry::new();
	let class = registry.define("A");
	class.patch(attrs! {
		a: {},
		b: { value: 1, setter: |v| v.map_int(|n| n + 1) },
		c: { validator: |v| v.as_str().is_some() },
	});
	class
}

#[test]
fn test_get_defaults() {
	let registry = AttrRegistry::<Widget>::new();
	let class = registry.define("A");
	class.patch(attrs! {
		a: {},
		b: { value: 1 },
		c: { value: 1, getter: |v| v.map_int(|n| n + 1) },
	});
	let obj = class.instantiate(Widget::default());

	assert_eq!(obj.get("a"), AttrValue::Undefined);
	assert_eq!(obj.get("b"), AttrValue::Int(1));
	assert_eq!(obj.get("c"), AttrValue::Int(2));
	assert_eq!(obj.get("undeclared"), AttrValue::Undefined);
}

#[test]
fn test_getter_applies_to_stored_value() {
	let registry = AttrRegistry::<Widget>::new();
	let class = registry.define("A");
	class.patch(attrs! { c: { value: 1, getter: |v| v.map_int(|n| n * 2) } });
	let mut obj = class.instantiate(Widget::default());

	assert!(obj.set("c", 5));
	assert_eq!(obj.get("c"), AttrValue::Int(10));
}

#[test]
fn test_get_as() {
	let mut obj = scenario_class().instantiate(Widget::default());
	assert!(obj.set("a", "text"));

	assert_eq!(obj.get_as::<String>("a"), Some("text".to_string()));
	assert_eq!(obj.get_as::<i64>("a"), None);
	assert_eq!(obj.get_as::<i64>("b"), Some(1));
}

#[test]
fn test_get_all_is_a_detached_copy() {
	let registry = AttrRegistry::<Widget>::new();
	let class = registry.define("A");
	class.patch(attrs! {
		a: { value: 1 },
		b: { value: 2 },
		c: { value: 3 },
	});
	let obj = class.instantiate(Widget::default());

	let mut attrs = obj.get_all();
	assert_eq!(attrs, values! { a: 1, b: 2, c: 3 });

	attrs.insert("c".to_string(), AttrValue::Int(5));
	assert_eq!(obj.get("c"), AttrValue::Int(3));
}

#[test]
fn test_get_all_includes_free_form_values() {
	let mut obj = scenario_class().instantiate(Widget::default());
	assert!(obj.set("extra", true));

	let all = obj.get_all();
	let names: Vec<&str> = all.keys().map(String::as_str).collect();
	assert_eq!(names, vec!["a", "b", "c", "extra"]);
	assert_eq!(all["extra"], AttrValue::Bool(true));
	assert_eq!(all["c"], AttrValue::Undefined);
}

#[test]
fn test_set_single() {
	let mut obj = scenario_class().instantiate(Widget::default());

	assert!(obj.set("a", 1));
	assert_eq!(obj.get("a"), AttrValue::Int(1));

	assert!(obj.set("b", 1));
	assert_eq!(obj.get("b"), AttrValue::Int(2));

	assert!(!obj.set("c", 1));
	assert_eq!(obj.get("c"), AttrValue::Undefined);

	assert!(obj.set("c", "ok"));
	assert_eq!(obj.get("c"), AttrValue::from("ok"));
}

#[test]
fn test_set_many_is_atomic() {
	let mut obj = scenario_class().instantiate(Widget::default());

	assert!(obj.set_many(values! { a: 1, b: 2 }));
	assert_eq!(obj.get("a"), AttrValue::Int(1));
	assert_eq!(obj.get("b"), AttrValue::Int(3));

	assert!(!obj.set_many(values! { c: 1, b: 2, a: 9 }));
	assert_eq!(obj.get("c"), AttrValue::Undefined);
	assert_eq!(obj.get("b"), AttrValue::Int(3));
	assert_eq!(obj.get("a"), AttrValue::Int(1));
}

#[test]
fn test_failed_batch_on_fresh_instance_writes_nothing() {
	let mut obj = scenario_class().instantiate(Widget::default());

	assert!(!obj.set_many(values! { b: 2, c: 1 }));
	assert_eq!(obj.get("b"), AttrValue::Int(1));
	assert_eq!(obj.get_all().len(), 3);
}

#[test]
fn test_try_set_reports_reason() {
	let mut obj = scenario_class().instantiate(Widget::default());

	let err = obj.try_set_many(values! { a: 1, c: 2 }).unwrap_err();
	assert!(matches!(&err, SetError::Invalid { name, .. } if name == "c"));
	assert_eq!(err.attr(), "c");
}

#[test]
fn test_method_setter_bypasses_store() {
	let registry = AttrRegistry::<Widget>::new();
	let class = registry.define("A");
	class.patch(attrs! {
		a: { method: MethodSetter::new("set_a", Widget::set_a) },
	});
	let mut obj = class.instantiate(Widget::default());

	assert_eq!(obj.get("a"), AttrValue::Undefined);
	assert_eq!(obj.host().b, None);
	assert!(obj.set("a", 2));
	assert_eq!(obj.get("a"), AttrValue::Undefined);
	assert_eq!(obj.host().b, Some(20));
}

#[test]
fn test_method_setter_skipped_when_batch_fails() {
	let registry = AttrRegistry::<Widget>::new();
	let class = registry.define("A");
	class.patch(attrs! {
		a: { method: MethodSetter::new("set_a", Widget::set_a) },
		c: { validator: |v| v.as_str().is_some() },
	});
	let mut obj = class.instantiate(Widget::default());

	assert!(!obj.set_many(values! { a: 2, c: 1 }));
	assert_eq!(obj.host().b, None);
}

#[test]
fn test_read_only_rejects_runtime_writes() {
	let registry = AttrRegistry::<Widget>::new();
	let class = registry.define("A");
	class.patch(attrs! { a: { value: 1, read_only: true } });
	let mut obj = class.instantiate(Widget::default());

	assert_eq!(obj.get("a"), AttrValue::Int(1));
	assert_eq!(
		obj.try_set("a", 3),
		Err(SetError::ReadOnly {
			name: "a".to_string()
		})
	);
	assert_eq!(obj.get("a"), AttrValue::Int(1));
}

#[test]
fn test_read_only_accepts_construction_value() {
	let registry = AttrRegistry::<Widget>::new();
	let class = registry.define("A");
	class.patch(attrs! { a: { value: 1, read_only: true } });

	let mut obj = class
		.instantiate_with(Widget::default(), values! { a: 7 })
		.unwrap();
	assert_eq!(obj.get("a"), AttrValue::Int(7));
	assert!(!obj.set("a", 8));
	assert_eq!(obj.get("a"), AttrValue::Int(7));
}

#[test]
fn test_construction_still_validates() {
	let class = scenario_class();
	let err = class
		.instantiate_with(Widget::default(), values! { c: 1 })
		.unwrap_err();
	assert_eq!(err.attr(), "c");
}

#[test]
fn test_write_once_is_absorbing() {
	let registry = AttrRegistry::<Widget>::new();
	let class = registry.define("A");
	class.patch(attrs! { b: { value: 1, write_once: true } });
	let mut obj = class
		.instantiate_with(Widget::default(), values! { b: 2 })
		.unwrap();

	assert_eq!(obj.get("b"), AttrValue::Int(2));
	assert!(obj.set("b", 3));
	assert_eq!(obj.get("b"), AttrValue::Int(2));
}

#[test]
fn test_write_once_does_not_fail_batch() {
	let registry = AttrRegistry::<Widget>::new();
	let class = registry.define("A");
	class.patch(attrs! { a: {}, b: { write_once: true } });
	let mut obj = class.instantiate(Widget::default());

	assert!(obj.set("b", 1));
	assert!(obj.set_many(values! { a: 5, b: 2 }));
	assert_eq!(obj.get("a"), AttrValue::Int(5));
	assert_eq!(obj.get("b"), AttrValue::Int(1));
}

#[test]
fn test_add_attr_copies_descriptors() {
	let registry = AttrRegistry::<Widget>::new();
	let class = registry.define("A");
	class.patch(attrs! {});

	let attr = attrs! { a: { value: 1 } };
	let mut obj = class.instantiate(Widget::default());
	obj.add_attr(&attr);

	assert_eq!(obj.get("a"), AttrValue::Int(1));
	assert!(obj.set("a", 123));
	assert_eq!(obj.get("a"), AttrValue::Int(123));
	assert_eq!(attr["a"].default_value(), Some(&AttrValue::Int(1)));

	let other = class.instantiate(Widget::default());
	assert_eq!(other.get("a"), AttrValue::Undefined);
}

#[test]
fn test_add_attr_overrides_class_descriptor() {
	let mut obj = scenario_class().instantiate(Widget::default());
	obj.add_attr(&attrs! { c: { value: "fixed", read_only: true } });

	assert_eq!(obj.get("c"), AttrValue::from("fixed"));
	assert!(!obj.set("c", "other"));
}

#[test]
fn test_remove_attr_drops_constraints() {
	let registry = AttrRegistry::<Widget>::new();
	let class = registry.define("A");
	class.patch(attrs! {
		a: { value: 1 },
		c: { validator: |v| v.as_str().is_some() },
	});
	let mut obj = class.instantiate(Widget::default());

	obj.remove_attr("a");
	assert_eq!(obj.get("a"), AttrValue::Undefined);
	assert!(!obj.get_all().contains_key("a"));

	obj.remove_attr("c");
	assert!(obj.set("c", 1));
	assert_eq!(obj.get("c"), AttrValue::Int(1));

	let fresh = class.instantiate(Widget::default());
	assert_eq!(fresh.get("a"), AttrValue::Int(1));
}

#[test]
fn test_remove_attr_clears_stored_value() {
	let mut obj = scenario_class().instantiate(Widget::default());
	assert!(obj.set("a", 4));

	obj.remove_attr("a");
	assert_eq!(obj.get("a"), AttrValue::Undefined);
}

#[test]
fn test_free_form_names_are_unconstrained() {
	let mut obj = scenario_class().instantiate(Widget::default());
	assert!(obj.set("free", 1));
	assert!(obj.set("free", "two"));
	assert_eq!(obj.get("free"), AttrValue::from("two"));
}

#[test]
fn test_read_only_aborts_batch() {
	let registry = AttrRegistry::<Widget>::new();
	let base = registry.define("A");
	base.patch(attrs! { w: {}, r: { value: 1, read_only: true } });
	let sub = base.extend("B");

	for class in [base, sub] {
		let mut obj = class.instantiate(Widget::default());
		let err = obj.try_set_many(values! { w: 5, r: 2 }).unwrap_err();
		assert_eq!(
			err,
			SetError::ReadOnly {
				name: "r".to_string()
			}
		);
		assert_eq!(obj.get("w"), AttrValue::Undefined);
		assert_eq!(obj.get("r"), AttrValue::Int(1));
	}
}

#[test]
fn test_free_form_write_does_not_use_up_write_once() {
	let mut obj = scenario_class().instantiate(Widget::default());
	assert!(obj.set("x", 1));

	obj.add_attr(&attrs! { x: { write_once: true } });
	assert!(obj.set("x", 2));
	assert_eq!(obj.get("x"), AttrValue::Int(2));

	assert!(obj.set("x", 3));
	assert_eq!(obj.get("x"), AttrValue::Int(2));
}
