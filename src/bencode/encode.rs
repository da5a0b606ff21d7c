use bytes::BufMut;

use super::error::EncodeError;
use super::BValue;

/// Encode a `BValue` back into a bencoded `Vec<u8>`.
///
/// Dictionary pairs are written in stored order; nothing is sorted or
/// deduplicated.
pub fn encode_bvalue(value: &BValue) -> Vec<u8> {
	let mut out: Vec<u8> = Vec::with_capacity(encoded_len(value));
	encode_to(value, &mut out);
	out
}

/// Appends the encoding of `value` to a caller-owned growable buffer.
pub fn encode_to<B: BufMut>(value: &BValue, out: &mut B) {
	match value {
		BValue::Integer(i) => {
			out.put_u8(b'i');
			out.put_slice(i.to_string().as_bytes());
			out.put_u8(b'e');
		}
		BValue::ByteString(bytes) => {
			out.put_slice(bytes.len().to_string().as_bytes());
			out.put_u8(b':');
			out.put_slice(bytes);
		}
		BValue::List(items) => {
			out.put_u8(b'l');
			for item in items {
				encode_to(item, out);
			}
			out.put_u8(b'e');
		}
		BValue::Dict(pairs) => {
			out.put_u8(b'd');
			for (key, val) in pairs {
				encode_to(key, out);
				encode_to(val, out);
			}
			out.put_u8(b'e');
		}
	}
}

/// Writes the encoding of `value` into a fixed caller buffer and returns the
/// number of bytes written. Nothing is written when the buffer is too small.
pub fn encode_into(value: &BValue, out: &mut [u8]) -> Result<usize, EncodeError> {
	let needed = encoded_len(value);
	if needed > out.len() {
		return Err(EncodeError::BufferTooSmall {
			needed,
			available: out.len(),
		});
	}
	let mut window = &mut out[..needed];
	encode_to(value, &mut window);
	Ok(needed)
}

/// Exact number of bytes `encode_bvalue` produces for `value`.
pub fn encoded_len(value: &BValue) -> usize {
	match value {
		BValue::Integer(i) => {
			let sign = usize::from(*i < 0);
			2 + sign + decimal_len(i.unsigned_abs())
		}
		BValue::ByteString(bytes) => decimal_len(bytes.len() as u64) + 1 + bytes.len(),
		BValue::List(items) => 2 + items.iter().map(encoded_len).sum::<usize>(),
		BValue::Dict(pairs) => {
			2 + pairs
				.iter()
				.map(|(k, v)| encoded_len(k) + encoded_len(v))
				.sum::<usize>()
		}
	}
}

fn decimal_len(mut n: u64) -> usize {
	let mut digits = 1;
	while n >= 10 {
		n /= 10;
		digits += 1;
	}
	digits
}
