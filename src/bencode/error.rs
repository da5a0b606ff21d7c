use thiserror::Error;

#[derive(Debug, Error)]
pub enum BencodeError {
	#[error("Unknown tag {} at offset {offset}", describe_tag(.tag))]
	UnknownTag { tag: Option<u8>, offset: usize },

	#[error("Malformed integer: {0}")]
	MalformedInteger(String),

	#[error("Integer overflow: {0}")]
	IntegerOverflow(String),

	#[error("Malformed string length: {0}")]
	MalformedLength(String),

	#[error("Digit run longer than {max_digits} digits")]
	LengthFieldTooLong { max_digits: usize },

	#[error("Truncated string: declared {expected} bytes, {available} available")]
	TruncatedString { expected: usize, available: usize },

	#[error("Unterminated list (missing 'e')")]
	UnterminatedList,

	#[error("Unterminated dictionary (missing 'e')")]
	UnterminatedDictionary,

	#[error("Nesting deeper than {max_depth} levels")]
	NestingTooDeep { max_depth: usize },

	#[error("Unexpected end of input")]
	UnexpectedEndOfInput,

	#[error("Trailing data after value at offset {offset}")]
	TrailingData { offset: usize },

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

/// Failure of a bounded digit scan; the decoder maps it to a `BencodeError`
/// depending on whether it was reading an integer or a string length.
#[derive(Debug, Error)]
pub enum DigitRunError {
	#[error("empty digit run")]
	Empty,

	#[error("unexpected byte 0x{0:02x} in digit run")]
	InvalidByte(u8),

	#[error("too many digits")]
	TooLong,

	#[error("digit run overflows u64")]
	Overflow,

	#[error("end of input before terminator")]
	EndOfInput,

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
	#[error("Output buffer too small: need {needed} bytes, have {available}")]
	BufferTooSmall { needed: usize, available: usize },
}

fn describe_tag(tag: &Option<u8>) -> String {
	match *tag {
		Some(b) if b.is_ascii_graphic() => format!("'{}'", b as char),
		Some(b) => format!("0x{:02x}", b),
		None => "<end of input>".to_string(),
	}
}
