use std::io::Read;

use log::{debug, trace, warn};

use super::cursor::{ByteCursor, ReaderCursor, SliceCursor};
use super::error::{BencodeError, DigitRunError};
use crate::bencode::bvalue::BValue;

/// Deepest container nesting accepted by default.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Longest digit run accepted by default for integers and string lengths.
/// Twenty digits cover every `u64`.
pub const DEFAULT_MAX_DIGITS: usize = 20;

/// Limits applied while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
	pub max_depth: usize,
	pub max_digits: usize,
	pub allow_trailing_data: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
			max_digits: DEFAULT_MAX_DIGITS,
			allow_trailing_data: false,
		}
	}
}

/// Decodes exactly one value from `cursor`, leaving anything after it unread.
pub fn decode<C: ByteCursor + ?Sized>(
	cursor: &mut C,
	options: &DecodeOptions,
) -> Result<BValue, BencodeError> {
	Decoder { cursor, options }.decode_value(0)
}

/// Decodes a whole in-memory buffer.
pub fn decode_from_bytes(input: &[u8], options: &DecodeOptions) -> Result<BValue, BencodeError> {
	let mut cursor = SliceCursor::new(input);
	let value = decode(&mut cursor, options)?;
	finish(&mut cursor, options)?;
	debug!("Decoded {} from {} bytes", value.kind(), input.len());
	Ok(value)
}

/// Decodes a whole sequentially read source.
pub fn decode_from_source<R: Read>(source: R, options: &DecodeOptions) -> Result<BValue, BencodeError> {
	let mut cursor = ReaderCursor::new(source);
	let value = decode(&mut cursor, options)?;
	finish(&mut cursor, options)?;
	debug!("Decoded {} from {} bytes", value.kind(), cursor.position());
	Ok(value)
}

/// Decodes the value at the start of `input` with default limits and returns
/// how many bytes it occupied. Bytes after the value are ignored.
pub fn decode_bencode(input: &[u8]) -> Result<(usize, BValue), BencodeError> {
	let mut cursor = SliceCursor::new(input);
	let value = decode(&mut cursor, &DecodeOptions::default())?;
	Ok((cursor.position(), value))
}

fn finish<C: ByteCursor + ?Sized>(cursor: &mut C, options: &DecodeOptions) -> Result<(), BencodeError> {
	if cursor.peek()?.is_none() {
		return Ok(());
	}
	let offset = cursor.position();
	if options.allow_trailing_data {
		warn!("Ignoring trailing data after value at offset {}", offset);
		return Ok(());
	}
	Err(BencodeError::TrailingData { offset })
}

struct Decoder<'a, C: ?Sized> {
	cursor: &'a mut C,
	options: &'a DecodeOptions,
}

impl<C: ByteCursor + ?Sized> Decoder<'_, C> {
	/// `depth` is the number of containers enclosing the value about to be read.
	fn decode_value(&mut self, depth: usize) -> Result<BValue, BencodeError> {
		let offset = self.cursor.position();
		match self.cursor.advance()? {
			Some(b'i') => self.decode_integer(),
			Some(c) if c.is_ascii_digit() => {
				self.cursor.pushback(c);
				self.decode_string()
			}
			Some(b'l') => self.decode_list(depth + 1),
			Some(b'd') => self.decode_dict(depth + 1),
			tag => Err(BencodeError::UnknownTag { tag, offset }),
		}
	}

	fn decode_integer(&mut self) -> Result<BValue, BencodeError> {
		let negative = self.cursor.peek()? == Some(b'-');
		if negative {
			self.cursor.advance()?;
		}

		let max_digits = self.options.max_digits;
		let magnitude = self
			.cursor
			.read_digit_run(b'e', max_digits)
			.map_err(|e| match e {
				DigitRunError::Empty => BencodeError::MalformedInteger("no digits".to_string()),
				DigitRunError::InvalidByte(b) => BencodeError::MalformedInteger(format!(
					"unexpected byte 0x{:02x}",
					b
				)),
				DigitRunError::TooLong => BencodeError::LengthFieldTooLong { max_digits },
				DigitRunError::Overflow => {
					BencodeError::IntegerOverflow("magnitude exceeds 64 bits".to_string())
				}
				DigitRunError::EndOfInput => BencodeError::UnexpectedEndOfInput,
				DigitRunError::Io(io) => BencodeError::Io(io),
			})?;

		let parsed = if negative {
			0i64.checked_sub_unsigned(magnitude)
		} else {
			i64::try_from(magnitude).ok()
		};
		let parsed = parsed.ok_or_else(|| {
			BencodeError::IntegerOverflow(format!(
				"{}{} does not fit in i64",
				if negative { "-" } else { "" },
				magnitude
			))
		})?;

		Ok(BValue::Integer(parsed))
	}

	fn decode_string(&mut self) -> Result<BValue, BencodeError> {
		let max_digits = self.options.max_digits;
		let length = self
			.cursor
			.read_digit_run(b':', max_digits)
			.map_err(|e| match e {
				DigitRunError::Empty => BencodeError::MalformedLength("no digits".to_string()),
				DigitRunError::InvalidByte(b) => BencodeError::MalformedLength(format!(
					"unexpected byte 0x{:02x} before ':'",
					b
				)),
				DigitRunError::TooLong | DigitRunError::Overflow => {
					BencodeError::LengthFieldTooLong { max_digits }
				}
				DigitRunError::EndOfInput => BencodeError::UnexpectedEndOfInput,
				DigitRunError::Io(io) => BencodeError::Io(io),
			})?;
		let length = usize::try_from(length)
			.map_err(|_| BencodeError::LengthFieldTooLong { max_digits })?;

		let data = self.cursor.read_bytes(length)?;
		if data.len() < length {
			return Err(BencodeError::TruncatedString {
				expected: length,
				available: data.len(),
			});
		}
		Ok(BValue::ByteString(data))
	}

	fn enter(&self, depth: usize) -> Result<(), BencodeError> {
		if depth > self.options.max_depth {
			debug!("Rejecting container at depth {}", depth);
			return Err(BencodeError::NestingTooDeep { max_depth: self.options.max_depth });
		}
		trace!("Entering container at depth {} (offset {})", depth, self.cursor.position());
		Ok(())
	}

	/// Decodes the body of a list whose `l` was already consumed.
	fn decode_list(&mut self, depth: usize) -> Result<BValue, BencodeError> {
		self.enter(depth)?;
		let mut items = Vec::new();

		loop {
			match self.cursor.peek()? {
				None => return Err(BencodeError::UnterminatedList),
				Some(b'e') => {
					self.cursor.advance()?;
					break;
				}
				Some(_) => items.push(self.decode_value(depth)?),
			}
		}

		Ok(BValue::List(items))
	}

	/// Decodes the body of a dictionary whose `d` was already consumed.
	fn decode_dict(&mut self, depth: usize) -> Result<BValue, BencodeError> {
		self.enter(depth)?;
		let mut pairs = Vec::new();

		loop {
			match self.cursor.peek()? {
				None => return Err(BencodeError::UnterminatedDictionary),
				Some(b'e') => {
					self.cursor.advance()?;
					break;
				}
				Some(_) => {
					let key = self.decode_value(depth)?;
					// A key with nothing after it is still an unclosed dictionary.
					if self.cursor.peek()?.is_none() {
						return Err(BencodeError::UnterminatedDictionary);
					}
					let value = self.decode_value(depth)?;
					pairs.push((key, value));
				}
			}
		}

		Ok(BValue::Dict(pairs))
	}
}
