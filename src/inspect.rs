use serde_json::{json, Value};

use crate::bencode::{encode_bvalue, BValue};

/// Convert a `BValue` into JSON (using Serde JSON `Value`).
///
/// - `Integer(i)` => JSON number
/// - `ByteString(bytes)` => Attempt UTF-8; if invalid, store hex in `"_bytes_hex"`.
/// - `List(...)` => JSON array
/// - `Dict(...)` => JSON object. Keys that are not byte strings are written
///   as their bencoded form; a repeated key keeps its last value.
pub fn bvalue_to_json(bv: &BValue) -> Value {
	match bv {
		BValue::Integer(i) => json!(i),

		BValue::ByteString(bytes) => match std::str::from_utf8(bytes) {
			Ok(utf8_str) => Value::String(utf8_str.to_string()),
			Err(_) => json!({ "_bytes_hex": hex::encode(bytes) }),
		},

		BValue::List(list_items) => Value::Array(list_items.iter().map(bvalue_to_json).collect()),

		BValue::Dict(pairs) => {
			let mut json_map = serde_json::Map::new();
			for (k, v) in pairs {
				json_map.insert(key_text(k), bvalue_to_json(v));
			}
			Value::Object(json_map)
		}
	}
}

/// Renders a value as an indented tree for people to read.
///
/// Byte strings print quoted when they are UTF-8 and as `0x…` hex otherwise.
pub fn pretty(value: &BValue, indent: usize) -> String {
	let mut out = String::new();
	write_pretty(value, indent, 0, &mut out);
	out
}

fn write_pretty(value: &BValue, indent: usize, level: usize, out: &mut String) {
	let pad = |level: usize| " ".repeat(indent * level);

	match value {
		BValue::Integer(i) => out.push_str(&i.to_string()),
		BValue::ByteString(bytes) => out.push_str(&bytes_text(bytes)),
		BValue::List(items) if items.is_empty() => out.push_str("[]"),
		BValue::List(items) => {
			out.push_str("[\n");
			for item in items {
				out.push_str(&pad(level + 1));
				write_pretty(item, indent, level + 1, out);
				out.push_str(",\n");
			}
			out.push_str(&pad(level));
			out.push(']');
		}
		BValue::Dict(pairs) if pairs.is_empty() => out.push_str("{}"),
		BValue::Dict(pairs) => {
			out.push_str("{\n");
			for (k, v) in pairs {
				out.push_str(&pad(level + 1));
				write_pretty(k, indent, level + 1, out);
				out.push_str(": ");
				write_pretty(v, indent, level + 1, out);
				out.push_str(",\n");
			}
			out.push_str(&pad(level));
			out.push('}');
		}
	}
}

fn bytes_text(bytes: &[u8]) -> String {
	match std::str::from_utf8(bytes) {
		Ok(s) => format!("{:?}", s),
		Err(_) => format!("0x{}", hex::encode(bytes)),
	}
}

fn key_text(key: &BValue) -> String {
	match key {
		BValue::ByteString(bytes) => String::from_utf8_lossy(bytes).into_owned(),
		other => String::from_utf8_lossy(&encode_bvalue(other)).into_owned(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::bencode::{decode_from_bytes, DecodeOptions};

	fn decode(input: &[u8]) -> BValue {
		decode_from_bytes(input, &DecodeOptions::default()).unwrap()
	}

	#[test]
	fn test_json_simple() {
		assert_eq!(bvalue_to_json(&decode(b"i42e")), json!(42));
		assert_eq!(bvalue_to_json(&decode(b"4:test")), json!("test"));
		assert_eq!(bvalue_to_json(&decode(b"li1ei2ee")), json!([1, 2]));
		assert_eq!(bvalue_to_json(&decode(b"d3:fooi42ee")), json!({"foo": 42}));
	}

	#[test]
	fn test_json_binary_and_odd_keys() {
		assert_eq!(
			bvalue_to_json(&decode(b"2:\xff\x01")),
			json!({ "_bytes_hex": "ff01" })
		);
		assert_eq!(
			bvalue_to_json(&decode(b"di7e1:xli1eei2ee")),
			json!({ "i7e": "x", "li1ee": 2 })
		);
	}

	#[test]
	fn test_pretty_nested() {
		let value = decode(b"d4:name5:hello5:itemsli1e2:\xff\xfeee");
		let expected = "{\n  \"name\": \"hello\",\n  \"items\": [\n    1,\n    0xfffe,\n  ],\n}";
		assert_eq!(pretty(&value, 2), expected);
	}

	#[test]
	fn test_pretty_empty_containers() {
		assert_eq!(pretty(&decode(b"le"), 4), "[]");
		assert_eq!(pretty(&decode(b"de"), 4), "{}");
		assert_eq!(pretty(&decode(b"i-3e"), 4), "-3");
	}
}
