/// A decoded bencode node. Every child is owned by exactly one parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BValue {
	ByteString(Vec<u8>), // raw bytes, not necessarily UTF-8
	Integer(i64),
	List(Vec<BValue>),
	Dict(Vec<(BValue, BValue)>) // input order, keys of any kind
}

impl BValue {
	/// Builds a byte string from UTF-8 text.
	pub fn string(s: &str) -> Self {
		BValue::ByteString(s.as_bytes().to_vec())
	}

	pub fn as_integer(&self) -> Option<i64> {
		match self {
			BValue::Integer(i) => Some(*i),
			_ => None,
		}
	}

	pub fn as_bytes(&self) -> Option<&[u8]> {
		match self {
			BValue::ByteString(b) => Some(b),
			_ => None,
		}
	}

	/// Returns the byte string as text when it is valid UTF-8.
	pub fn as_str(&self) -> Option<&str> {
		self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
	}

	pub fn as_list(&self) -> Option<&[BValue]> {
		match self {
			BValue::List(items) => Some(items),
			_ => None,
		}
	}

	pub fn as_dict(&self) -> Option<&[(BValue, BValue)]> {
		match self {
			BValue::Dict(pairs) => Some(pairs),
			_ => None,
		}
	}

	/// Looks up the first pair whose key is the byte string `key`.
	///
	/// Returns `None` when `self` is not a dictionary or no key matches.
	pub fn get(&self, key: &[u8]) -> Option<&BValue> {
		self.as_dict()?
			.iter()
			.find(|(k, _)| k.as_bytes() == Some(key))
			.map(|(_, v)| v)
	}

	pub fn kind(&self) -> &'static str {
		match self {
			BValue::ByteString(_) => "byte string",
			BValue::Integer(_) => "integer",
			BValue::List(_) => "list",
			BValue::Dict(_) => "dictionary",
		}
	}

	/// Number of nodes in the tree, `self` included.
	pub fn node_count(&self) -> usize {
		let mut count = 0;
		let mut pending = vec![self];
		while let Some(node) = pending.pop() {
			count += 1;
			match node {
				BValue::List(items) => pending.extend(items.iter()),
				BValue::Dict(pairs) => {
					for (k, v) in pairs {
						pending.push(k);
						pending.push(v);
					}
				}
				_ => {}
			}
		}
		count
	}

	/// Maximum number of container levels enclosing any leaf. Scalars have depth 0.
	pub fn nesting_depth(&self) -> usize {
		let mut deepest = 0;
		let mut pending = vec![(self, 0usize)];
		while let Some((node, depth)) = pending.pop() {
			match node {
				BValue::List(items) => {
					deepest = deepest.max(depth + 1);
					pending.extend(items.iter().map(|item| (item, depth + 1)));
				}
				BValue::Dict(pairs) => {
					deepest = deepest.max(depth + 1);
					for (k, v) in pairs {
						pending.push((k, depth + 1));
						pending.push((v, depth + 1));
					}
				}
				_ => {}
			}
		}
		deepest
	}
}

impl From<i64> for BValue {
	fn from(i: i64) -> Self {
		BValue::Integer(i)
	}
}

impl From<&str> for BValue {
	fn from(s: &str) -> Self {
		BValue::string(s)
	}
}

impl From<Vec<u8>> for BValue {
	fn from(bytes: Vec<u8>) -> Self {
		BValue::ByteString(bytes)
	}
}

impl From<Vec<BValue>> for BValue {
	fn from(items: Vec<BValue>) -> Self {
		BValue::List(items)
	}
}

impl From<Vec<(BValue, BValue)>> for BValue {
	fn from(pairs: Vec<(BValue, BValue)>) -> Self {
		BValue::Dict(pairs)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> BValue {
		BValue::Dict(vec![
			(BValue::string("announce"), BValue::string("http://tracker")),
			(
				BValue::string("info"),
				BValue::Dict(vec![
					(BValue::string("length"), BValue::Integer(1024)),
					(BValue::string("files"), BValue::List(vec![BValue::string("a")])),
				]),
			),
			(BValue::string("announce"), BValue::string("shadowed")),
		])
	}

	#[test]
	fn test_get_returns_first_matching_key() {
		let value = sample();
		assert_eq!(value.get(b"announce").and_then(BValue::as_str), Some("http://tracker"));
		assert_eq!(value.get(b"missing"), None);
		assert_eq!(BValue::Integer(1).get(b"announce"), None);
	}

	#[test]
	fn test_get_ignores_non_string_keys() {
		let value = BValue::Dict(vec![(BValue::Integer(1), BValue::Integer(2))]);
		assert_eq!(value.get(b"1"), None);
	}

	#[test]
	fn test_accessors() {
		assert_eq!(BValue::Integer(-7).as_integer(), Some(-7));
		assert_eq!(BValue::string("x").as_integer(), None);
		assert_eq!(BValue::ByteString(vec![0xff, 0xfe]).as_str(), None);
		assert_eq!(BValue::ByteString(vec![0xff]).as_bytes(), Some(&[0xff][..]));
		assert_eq!(BValue::List(vec![]).as_list().map(|l| l.len()), Some(0));
		assert!(BValue::List(vec![]).as_dict().is_none());
	}

	#[test]
	fn test_node_count_and_depth() {
		let value = sample();
		// root, 3 keys, 3 values, 2 inner keys, 2 inner values, 1 list element
		assert_eq!(value.node_count(), 12);
		assert_eq!(value.nesting_depth(), 3);
		assert_eq!(BValue::Integer(0).nesting_depth(), 0);
		assert_eq!(BValue::List(vec![]).nesting_depth(), 1);
	}

	#[test]
	fn test_from_conversions() {
		assert_eq!(BValue::from(5i64), BValue::Integer(5));
		assert_eq!(BValue::from("hi"), BValue::ByteString(b"hi".to_vec()));
		assert_eq!(BValue::from(vec![1u8, 2]), BValue::ByteString(vec![1, 2]));
		assert_eq!(BValue::from(vec![BValue::Integer(1)]).kind(), "list");
		assert_eq!(BValue::from(Vec::<(BValue, BValue)>::new()).kind(), "dictionary");
	}
}
