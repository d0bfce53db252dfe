use thiserror::Error;

use crate::hash;

/// Length of the base58check checksum.
pub const CHECKSUM_LEN: usize = 4;

#[derive(Debug)]
pub struct Base58 {
    prefix: Vec<u8>,
    payload: Vec<u8>
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Base58Error {
    #[error("invalid base58: {0}")]
    Decode(#[from] bs58::decode::Error),

    #[error("decoded data is {0} bytes, too short to carry a checksum")]
    TooShort(usize),

    #[error("base58check checksum does not match")]
    BadChecksum
}

impl Base58 {
    /// Version prefix bytes (one byte for addresses and WIF, four for extended keys) and payload.
    pub fn new(prefix: &[u8], payload: &[u8]) -> Base58 {
        Base58 {
            prefix: prefix.to_vec(),
            payload: payload.to_vec()
        }
    }

    /// Check encode data: prefix | payload | first 4 bytes of sha256d(prefix | payload).
    pub fn check_encode(self) -> String {
        let mut bytes: Vec<u8> = self.prefix;
        bytes.extend_from_slice(&self.payload);
        let checksum = hash::sha256d(&bytes);
        bytes.extend_from_slice(&checksum[..CHECKSUM_LEN]);

        bs58::encode(bytes).into_string()
    }

    /// Encode prefix | payload in base58 without a checksum.
    pub fn encode(self) -> String {
        let mut bytes: Vec<u8> = self.prefix;
        bytes.extend_from_slice(&self.payload);
        bs58::encode(bytes).into_string()
    }

    /// Decodes a base58 string into a byte vector.
    /// DOES NOT remove the checksum or version prefix if present.
    pub fn decode(encoded: &str) -> Result<Vec<u8>, Base58Error> {
        Ok(bs58::decode(encoded).into_vec()?)
    }

    /// Checks if a base58check encoded string carries a valid checksum
    pub fn validate_checksum(encoded: &str) -> Result<bool, Base58Error> {
        let bytes = Base58::decode(encoded)?;
        if bytes.len() < CHECKSUM_LEN { return Err(Base58Error::TooShort(bytes.len())) }

        let (data, checksum) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
        Ok(hash::sha256d(data)[..CHECKSUM_LEN] == *checksum)
    }

    /// Returns the decoded data with the checksum removed.
    /// Version prefix is NOT removed as it is variable length depending on context.
    pub fn check_decode(encoded: &str) -> Result<Vec<u8>, Base58Error> {
        if !Self::validate_checksum(encoded)? { return Err(Base58Error::BadChecksum); }

        let mut bytes = Base58::decode(encoded)?;
        bytes.truncate(bytes.len() - CHECKSUM_LEN);
        Ok(bytes)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Tests encoding of data without checksum
    /// Sourced from https://tools.ietf.org/id/draft-msporny-base58-01.html
    fn base58_ietf_test_vectors() {
        let hello_world = b"Hello World!";
        let fox = b"The quick brown fox jumps over the lazy dog.";
        let int = [0x00, 0x00, 0x28, 0x7f, 0xb4, 0xcd];

        assert_eq!(Base58::new(&[], hello_world).encode(), "2NEpo7TZRRrLZSi2U");
        assert_eq!(Base58::new(&[], fox).encode(), "USm3fpXnKG5EUBx2ndxBDMPVciP5hGey2Jh4NDv6gmeo1LkMeiKrLJUUBk6Z");
        assert_eq!(Base58::new(&[], &int).encode(), "11233QC4");
    }

    #[test]
    /// Sourced from the Bitcoin Core repository (src/test/data/base58_encode_decode.json)
    fn base58_bitcoin_core_test_vectors() {
        let test_data: [(&str, &str); 12] = [
            ("", ""),
            ("61", "2g"),
            ("626262", "a3gV"),
            ("636363", "aPEr"),
            ("73696d706c792061206c6f6e6720737472696e67", "2cFupjhnEsSn59qHXstmK2ffpLv2"),
            ("00eb15231dfceb60925886b67d065299925915aeb172c06647", "1NS17iag9jJgTHD1VXjvLCEnZuQ3rJDE9L"),
            ("516b6fcd0f", "ABnLTmg"),
            ("bf4f89001e670274dd", "3SEo3LWLoPntC"),
            ("572e4794", "3EFU7m"),
            ("ecac89cad93923c02321", "EJDM8drfXA6uyA"),
            ("10c8511e", "Rt5zm"),
            ("00000000000000000000", "1111111111")
        ];

        for (data, encoded) in test_data {
            let bytes = hex::decode(data).unwrap();
            assert_eq!(Base58::new(&[], &bytes).encode(), encoded);
            assert_eq!(Base58::decode(encoded).unwrap(), bytes);
        }
    }

    #[test]
    fn check_encode_address_payload() {
        let hash = hex::decode("0b9492c088247d60b4150ed1d10d01c1c1029a1c").unwrap();
        let address = Base58::new(&[0x00], &hash).check_encode();
        assert_eq!(address, "124ERAK4SqHMNWXycHPautn5zDYRKr3b2E");

        let decoded = Base58::check_decode(&address).unwrap();
        assert_eq!(decoded[0], 0x00);
        assert_eq!(decoded[1..], hash[..]);
    }

    #[test]
    fn check_decode_rejects_tampering() {
        //Last character changed
        assert_eq!(Base58::check_decode("124ERAK4SqHMNWXycHPautn5zDYRKr3b2F"), Err(Base58Error::BadChecksum));
        assert!(matches!(Base58::check_decode("0OIl"), Err(Base58Error::Decode(_))));
        assert_eq!(Base58::check_decode("2g"), Err(Base58Error::TooShort(1)));
    }
}
