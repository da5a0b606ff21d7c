pub mod bvalue;
pub mod canonical;
pub mod cursor;
pub mod decode;
pub mod encode;
pub mod error;
pub mod lifecycle;

pub use bvalue::BValue;   // re-export
pub use cursor::{ByteCursor, ReaderCursor, SliceCursor};
pub use decode::{decode, decode_bencode, decode_from_bytes, decode_from_source, DecodeOptions};   // re-export
pub use encode::{encode_bvalue, encode_into, encode_to, encoded_len};   // re-export
pub use error::{BencodeError, DigitRunError, EncodeError};
pub use lifecycle::destroy;
