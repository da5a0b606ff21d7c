// src/file_io.rs
use std::fs::{self, File};
use std::io::Error;
use std::path::Path;

use log::debug;

use crate::bencode::{decode_from_source, BValue, BencodeError, DecodeOptions};

/// Decodes the file at `path` through a streaming cursor.
///
/// The file handle lives only inside this call and is closed on every exit,
/// whether decoding succeeds or fails.
pub fn decode_file(path: &Path, options: &DecodeOptions) -> Result<BValue, BencodeError> {
	let file = File::open(path)?;
	debug!("Decoding {}", path.display());
	decode_from_source(file, options)
}

pub fn read_file(path: &Path) -> Result<Vec<u8>, Error> {
	let data = fs::read(path)?;
	debug!("Read {} bytes from {}", data.len(), path.display());
	Ok(data)
}

pub fn write_file(path: &Path, data: &[u8]) -> Result<(), Error> {
	fs::write(path, data)?;
	debug!("Wrote {} bytes to {}", data.len(), path.display());
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[test]
	fn test_decode_file() {
		let mut file = NamedTempFile::new().unwrap();
		file.write_all(b"d3:keyi42ee").unwrap();
		let value = decode_file(file.path(), &DecodeOptions::default()).unwrap();
		assert_eq!(value.get(b"key"), Some(&BValue::Integer(42)));
	}

	#[test]
	fn test_decode_file_errors() {
		let mut file = NamedTempFile::new().unwrap();
		file.write_all(b"5:hi").unwrap();
		assert!(matches!(
			decode_file(file.path(), &DecodeOptions::default()),
			Err(BencodeError::TruncatedString { expected: 5, available: 2 })
		));

		let missing = file.path().with_extension("missing");
		assert!(matches!(
			decode_file(&missing, &DecodeOptions::default()),
			Err(BencodeError::Io(_))
		));
	}

	#[test]
	fn test_write_then_read() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("out.bencode");
		write_file(&path, b"le").unwrap();
		assert_eq!(read_file(&path).unwrap(), b"le");
	}
}
