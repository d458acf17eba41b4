/// Builds a [`Descriptors`](crate::Descriptors) map.
///
/// Each field name calls the [`AttrDescriptor`](crate::AttrDescriptor)
/// builder method of the same name.
///
/// ```ignore
/// let descriptors = attrs! {
///     a: {},
///     b: { value: 1, setter: |v| v.map_int(|n| n + 1) },
///     c: { validator: |v| v.as_str().is_some() },
///     d: { method: MethodSetter::new("set_d", Host::set_d) },
/// };
/// ```
#[macro_export]
macro_rules! attrs {
	($($name:ident : { $($field:ident : $val:expr),* $(,)? }),* $(,)?) => {{
		#[allow(unused_mut)]
		let mut map = $crate::Descriptors::new();
		$(
			map.insert(
				stringify!($name).to_string(),
				$crate::AttrDescriptor::new()$(.$field($val))*,
			);
		)*
		map
	}};
}

/// Builds an [`AttrMap`](crate::AttrMap) for batch writes.
///
/// ```ignore
/// instance.set_many(values! { a: 1, b: "two" });
/// ```
#[macro_export]
macro_rules! values {
	($($name:ident : $val:expr),* $(,)?) => {{
		#[allow(unused_mut)]
		let mut map = $crate::AttrMap::new();
		$(
			map.insert(stringify!($name).to_string(), $crate::AttrValue::from($val));
		)*
		map
	}};
}
