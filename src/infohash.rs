// infohash.rs
use crate::bencode::{encode_bvalue, BValue};

use sha1::{Sha1, Digest};

/// SHA-1 of the bencoded `info` dictionary of a torrent metainfo tree.
///
/// The encoder writes pairs in stored order, so for metainfo decoded from
/// canonical input this hashes exactly the bytes found in the file.
/// Returns `None` when the root is not a dictionary or has no `info` key.
pub fn info_hash(root: &BValue) -> Option<[u8; 20]> {
    let info = root.get(b"info")?;

    let encoded = encode_bvalue(info);

    let mut hasher = Sha1::new();
    hasher.update(&encoded);
    let result = hasher.finalize();

    let mut hash_bytes = [0u8; 20];
    hash_bytes.copy_from_slice(&result);
    Some(hash_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bencode::{decode_from_bytes, DecodeOptions};

    #[test]
    fn test_info_hash_of_encoded_info() {
        let input = b"d8:announce3:url4:infod6:lengthi10e4:name1:aee";
        let root = decode_from_bytes(input, &DecodeOptions::default()).unwrap();

        let mut hasher = Sha1::new();
        hasher.update(b"d6:lengthi10e4:name1:ae");
        let mut expected = [0u8; 20];
        expected.copy_from_slice(&hasher.finalize());

        assert_eq!(info_hash(&root), Some(expected));
    }

    #[test]
    fn test_info_hash_known_digest() {
        let root = BValue::Dict(vec![(BValue::string("info"), BValue::List(vec![]))]);
        assert_eq!(
            info_hash(&root).map(hex::encode),
            Some("593b743b207e10ff55ec63e71a46c07909d0880a".to_string())
        );
    }

    #[test]
    fn test_info_hash_missing() {
        assert_eq!(info_hash(&BValue::Integer(1)), None);
        assert_eq!(info_hash(&BValue::Dict(vec![])), None);
    }
}
