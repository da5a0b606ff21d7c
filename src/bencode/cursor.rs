use std::io::{self, BufReader, ErrorKind, Read};

use super::error::DigitRunError;

/// Upper bound on the number of bytes reserved up front when reading a
/// length-prefixed string from a stream. The declared length is untrusted.
const READ_CHUNK: usize = 64 * 1024;

/// Forward-only byte source the decoder reads from.
///
/// Implementations hold at most one pushed-back byte. `position` counts the
/// bytes consumed so far, so a pushback moves it back by one.
pub trait ByteCursor {
	/// Next byte without consuming it; `None` at end of input.
	fn peek(&mut self) -> io::Result<Option<u8>>;

	/// Consumes and returns the next byte; `None` at end of input.
	fn advance(&mut self) -> io::Result<Option<u8>>;

	/// Un-consumes `byte`. Only one byte may be outstanding at a time.
	fn pushback(&mut self, byte: u8);

	fn position(&self) -> usize;

	/// Reads up to `len` raw bytes. A shorter result means the input ended.
	fn read_bytes(&mut self, len: usize) -> io::Result<Vec<u8>>;

	/// Consumes ASCII digits up to and including `terminator` and returns
	/// their value.
	///
	/// Fails on an empty run, a byte that is neither digit nor terminator,
	/// more than `max_digits` digits, a value beyond `u64`, or end of input
	/// before the terminator.
	fn read_digit_run(&mut self, terminator: u8, max_digits: usize) -> Result<u64, DigitRunError> {
		let mut value: u64 = 0;
		let mut digits = 0;

		loop {
			let byte = self.advance()?.ok_or(DigitRunError::EndOfInput)?;
			if byte == terminator {
				break;
			}
			if !byte.is_ascii_digit() {
				return Err(DigitRunError::InvalidByte(byte));
			}

			digits += 1;
			if digits > max_digits {
				return Err(DigitRunError::TooLong);
			}
			value = value
				.checked_mul(10)
				.and_then(|v| v.checked_add(u64::from(byte - b'0')))
				.ok_or(DigitRunError::Overflow)?;
		}

		if digits == 0 {
			return Err(DigitRunError::Empty);
		}
		Ok(value)
	}
}

/// Cursor over an in-memory buffer.
#[derive(Debug)]
pub struct SliceCursor<'a> {
	buf: &'a [u8],
	pos: usize,
	pending: Option<u8>,
}

impl<'a> SliceCursor<'a> {
	pub fn new(buf: &'a [u8]) -> Self {
		Self { buf, pos: 0, pending: None }
	}
}

impl ByteCursor for SliceCursor<'_> {
	fn peek(&mut self) -> io::Result<Option<u8>> {
		Ok(self.pending.or_else(|| self.buf.get(self.pos).copied()))
	}

	fn advance(&mut self) -> io::Result<Option<u8>> {
		if let Some(byte) = self.pending.take() {
			return Ok(Some(byte));
		}
		let byte = self.buf.get(self.pos).copied();
		if byte.is_some() {
			self.pos += 1;
		}
		Ok(byte)
	}

	fn pushback(&mut self, byte: u8) {
		debug_assert!(self.pending.is_none(), "only one byte of pushback is supported");
		self.pending = Some(byte);
	}

	fn position(&self) -> usize {
		self.pos.saturating_sub(usize::from(self.pending.is_some()))
	}

	fn read_bytes(&mut self, len: usize) -> io::Result<Vec<u8>> {
		let mut out = Vec::with_capacity(len.min(self.buf.len() - self.pos + 1));
		if len == 0 {
			return Ok(out);
		}
		if let Some(byte) = self.pending.take() {
			out.push(byte);
		}
		let end = self.pos.saturating_add(len - out.len()).min(self.buf.len());
		out.extend_from_slice(&self.buf[self.pos..end]);
		self.pos = end;
		Ok(out)
	}
}

/// Cursor over a sequentially read source such as an open file.
pub struct ReaderCursor<R> {
	reader: BufReader<R>,
	consumed: usize,
	pending: Option<u8>,
}

impl<R: Read> ReaderCursor<R> {
	pub fn new(reader: R) -> Self {
		Self {
			reader: BufReader::new(reader),
			consumed: 0,
			pending: None,
		}
	}

	fn next_byte(&mut self) -> io::Result<Option<u8>> {
		let mut byte = [0u8; 1];
		loop {
			match self.reader.read(&mut byte) {
				Ok(0) => return Ok(None),
				Ok(_) => {
					self.consumed += 1;
					return Ok(Some(byte[0]));
				}
				Err(e) if e.kind() == ErrorKind::Interrupted => continue,
				Err(e) => return Err(e),
			}
		}
	}
}

impl<R: Read> ByteCursor for ReaderCursor<R> {
	fn peek(&mut self) -> io::Result<Option<u8>> {
		if self.pending.is_none() {
			self.pending = self.next_byte()?;
		}
		Ok(self.pending)
	}

	fn advance(&mut self) -> io::Result<Option<u8>> {
		match self.pending.take() {
			Some(byte) => Ok(Some(byte)),
			None => self.next_byte(),
		}
	}

	fn pushback(&mut self, byte: u8) {
		debug_assert!(self.pending.is_none(), "only one byte of pushback is supported");
		self.pending = Some(byte);
	}

	fn position(&self) -> usize {
		self.consumed.saturating_sub(usize::from(self.pending.is_some()))
	}

	fn read_bytes(&mut self, len: usize) -> io::Result<Vec<u8>> {
		let mut out = Vec::with_capacity(len.min(READ_CHUNK));
		if len == 0 {
			return Ok(out);
		}
		if let Some(byte) = self.pending.take() {
			out.push(byte);
		}
		let remaining = (len - out.len()) as u64;
		let read = (&mut self.reader).take(remaining).read_to_end(&mut out)?;
		self.consumed += read;
		Ok(out)
	}
}
