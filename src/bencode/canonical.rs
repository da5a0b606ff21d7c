//! Canonical form helpers.
//!
//! The decoder and encoder keep dictionaries exactly as read. Callers that
//! need canonical bencode (byte-string keys, strictly ascending, no
//! duplicates) check or rewrite a tree here before encoding it.

use thiserror::Error;

use super::BValue;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CanonicalError {
	#[error("Dictionary key is a {0}, not a byte string")]
	NonStringKey(&'static str),

	#[error("Duplicate dictionary key {:?}", String::from_utf8_lossy(.0))]
	DuplicateKey(Vec<u8>),
}

/// Returns true when every dictionary in the tree has byte-string keys in
/// strictly ascending byte order.
pub fn is_canonical(value: &BValue) -> bool {
	match value {
		BValue::Integer(_) | BValue::ByteString(_) => true,
		BValue::List(items) => items.iter().all(is_canonical),
		BValue::Dict(pairs) => {
			let mut previous: Option<&[u8]> = None;
			for (key, val) in pairs {
				let Some(key) = key.as_bytes() else {
					return false;
				};
				if previous.is_some_and(|p| p >= key) {
					return false;
				}
				if !is_canonical(val) {
					return false;
				}
				previous = Some(key);
			}
			true
		}
	}
}

/// Sorts every dictionary by key, recursively.
///
/// Fails on a non-byte-string key or on two pairs sharing a key, since
/// there is no order-independent way to pick a winner.
pub fn canonicalize(value: BValue) -> Result<BValue, CanonicalError> {
	match value {
		BValue::Integer(_) | BValue::ByteString(_) => Ok(value),
		BValue::List(items) => items
			.into_iter()
			.map(canonicalize)
			.collect::<Result<Vec<_>, _>>()
			.map(BValue::List),
		BValue::Dict(pairs) => {
			let mut sorted = Vec::with_capacity(pairs.len());
			for (key, val) in pairs {
				let key = match key {
					BValue::ByteString(bytes) => bytes,
					other => return Err(CanonicalError::NonStringKey(other.kind())),
				};
				sorted.push((key, canonicalize(val)?));
			}
			sorted.sort_by(|a, b| a.0.cmp(&b.0));
			if let Some(pair) = sorted.windows(2).find(|w| w[0].0 == w[1].0) {
				return Err(CanonicalError::DuplicateKey(pair[0].0.clone()));
			}
			Ok(BValue::Dict(
				sorted
					.into_iter()
					.map(|(k, v)| (BValue::ByteString(k), v))
					.collect(),
			))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::bencode::{decode_from_bytes, encode_bvalue, DecodeOptions};

	fn decode(input: &[u8]) -> BValue {
		decode_from_bytes(input, &DecodeOptions::default()).unwrap()
	}

	#[test]
	fn test_is_canonical() {
		assert!(is_canonical(&decode(b"d1:ai1e1:bi2ee")));
		assert!(is_canonical(&decode(b"li1ed1:xleee")));
		assert!(!is_canonical(&decode(b"d1:bi1e1:ai2ee")));
		assert!(!is_canonical(&decode(b"d1:ai1e1:ai2ee")));
		assert!(!is_canonical(&decode(b"di1ei2ee")));
		assert!(!is_canonical(&decode(b"ld1:bi1e1:ai2eee")));
	}

	#[test]
	fn test_canonicalize_sorts_recursively() {
		let value = decode(b"d4:spaml1:bd1:zi1e1:yi2eee3:cow3:mooe");
		let canonical = canonicalize(value).unwrap();
		assert!(is_canonical(&canonical));
		assert_eq!(
			encode_bvalue(&canonical),
			b"d3:cow3:moo4:spaml1:bd1:yi2e1:zi1eeee".to_vec()
		);
	}

	#[test]
	fn test_canonicalize_sorts_bytewise() {
		let value = decode(b"d1:a0:2:\xff\x000:1:B0:e");
		let canonical = canonicalize(value).unwrap();
		assert_eq!(encode_bvalue(&canonical), b"d1:B0:1:a0:2:\xff\x000:e".to_vec());
	}

	#[test]
	fn test_canonicalize_rejects_duplicates() {
		assert_eq!(
			canonicalize(decode(b"d1:ai1e1:bi2e1:ai3ee")),
			Err(CanonicalError::DuplicateKey(b"a".to_vec()))
		);
	}

	#[test]
	fn test_canonicalize_rejects_non_string_keys() {
		assert_eq!(
			canonicalize(decode(b"li1edi1ei2eee")),
			Err(CanonicalError::NonStringKey("integer"))
		);
	}
}
