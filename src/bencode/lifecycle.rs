use super::BValue;

/// Tears down a value tree and returns how many nodes were released.
///
/// Containers are opened with an explicit stack instead of recursion, so
/// hand-built trees far deeper than the decoder would accept are released
/// without exhausting the call stack. `None` is a no-op.
pub fn destroy(value: Option<BValue>) -> usize {
	let Some(root) = value else {
		return 0;
	};

	let mut released = 0;
	let mut stack = vec![root];
	while let Some(node) = stack.pop() {
		match node {
			BValue::List(items) => stack.extend(items),
			BValue::Dict(pairs) => {
				for (key, val) in pairs {
					stack.push(key);
					stack.push(val);
				}
			}
			BValue::Integer(_) | BValue::ByteString(_) => {}
		}
		released += 1;
	}
	released
}

#[cfg(test)]
mod tests {
	use super::*;

	fn nested(depth: usize) -> BValue {
		let mut value = BValue::string("leaf");
		for level in 0..depth {
			value = if level % 2 == 0 {
				BValue::List(vec![value, BValue::Integer(level as i64)])
			} else {
				BValue::Dict(vec![(BValue::string("k"), value)])
			};
		}
		value
	}

	#[test]
	fn test_destroy_none_is_noop() {
		assert_eq!(destroy(None), 0);
	}

	#[test]
	fn test_destroy_scalar() {
		assert_eq!(destroy(Some(BValue::Integer(1))), 1);
		assert_eq!(destroy(Some(BValue::string("x"))), 1);
	}

	#[test]
	fn test_destroy_releases_every_node() {
		for depth in 1..=32 {
			let value = nested(depth);
			let expected = value.node_count();
			assert_eq!(destroy(Some(value)), expected, "depth {}", depth);
		}
	}

	#[test]
	fn test_destroy_very_deep_tree() {
		let mut value = BValue::Integer(0);
		for _ in 0..200_000 {
			value = BValue::List(vec![value]);
		}
		assert_eq!(destroy(Some(value)), 200_001);
	}
}
