use std::fmt;

use thiserror::Error;

use crate::{
    Secp256k1,
    PublicKey,
    SecretKey,
    encoding::base58::{Base58, Base58Error},
    hash,
    network::NetworkProfile
};

/// Serialized secret key length.
pub const PRIVATE_KEY_LEN: usize = 32;
/// Compressed public key length.
pub const PUBLIC_KEY_LEN: usize = 33;
/// Uncompressed public key length.
pub const UNCOMPRESSED_PUBLIC_KEY_LEN: usize = 65;

/// Trailing WIF byte marking a key whose public key is used compressed.
const WIF_COMPRESSED_FLAG: u8 = 0x01;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("key material of {0} bytes has the wrong length")]
    InvalidKeyLength(usize),

    #[error("not a valid secp256k1 key: {0}")]
    Secp(#[from] secp256k1::Error),

    #[error("WIF version byte {found:#04x} does not match network version {expected:#04x}")]
    WrongWifVersion { expected: u8, found: u8 },

    #[error("WIF payload is malformed")]
    BadWif,

    #[error(transparent)]
    Base58(#[from] Base58Error)
}

pub trait Key {
    /**
        Parse the key from its serialized bytes.
    */
    fn from_slice(bytes: &[u8]) -> Result<Self, KeyError>
    where Self: Sized;

    /**
        Serialized form. 32 bytes for private keys, 33 (compressed) for public keys.
    */
    fn to_vec(&self) -> Vec<u8>;

    fn hex(&self) -> String {
        hex::encode(self.to_vec())
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PrivKey(SecretKey);

impl Key for PrivKey {
    /**
        Use a predefined byte array as a secret key.
        Fails on anything but 32 bytes, and on zero or values at or above the curve order.
    */
    fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(KeyError::InvalidKeyLength(bytes.len()))
        }
        Ok(Self(SecretKey::from_slice(bytes)?))
    }

    fn to_vec(&self) -> Vec<u8> {
        self.secret_bytes().to_vec()
    }
}

impl PrivKey {
    #[cfg(test)]
    pub(crate) fn new_rand() -> Self {
        Self(SecretKey::new(&mut rand::thread_rng()))
    }

    /// The raw 32 byte scalar.
    pub fn secret_bytes(&self) -> [u8; PRIVATE_KEY_LEN] {
        self.0.secret_bytes()
    }

    pub(crate) fn inner(&self) -> &SecretKey {
        &self.0
    }

    pub(crate) fn from_inner(key: SecretKey) -> Self {
        Self(key)
    }

    /*
        Export the private key in wallet-import-format (Base58Check encoded with the network's WIF prefix)
        * Use the parameter to indicate if WIF should include the compression byte.
    */
    pub fn export_as_wif(&self, compressed: bool, network: &NetworkProfile) -> String {
        let mut key: Vec<u8> = self.to_vec();
        if compressed {
            key.push(WIF_COMPRESSED_FLAG);
        }

        Base58::new(&[network.wif], &key).check_encode()
    }

    /**
        Decode a WIF string. Returns the key and whether it is flagged compressed.
    */
    pub fn decode_wif(wif: &str, network: &NetworkProfile) -> Result<(Self, bool), KeyError> {
        let bytes = Base58::check_decode(wif)?;

        //version | key | optional compression flag
        let (version, payload) = bytes.split_first().ok_or(KeyError::BadWif)?;
        if *version != network.wif {
            return Err(KeyError::WrongWifVersion { expected: network.wif, found: *version })
        }

        let compressed = match payload.len() {
            PRIVATE_KEY_LEN => false,
            n if n == PRIVATE_KEY_LEN + 1 && payload[PRIVATE_KEY_LEN] == WIF_COMPRESSED_FLAG => true,
            _ => return Err(KeyError::BadWif)
        };

        Ok((Self::from_slice(&payload[..PRIVATE_KEY_LEN])?, compressed))
    }

    pub fn from_wif(wif: &str, network: &NetworkProfile) -> Result<Self, KeyError> {
        Ok(Self::decode_wif(wif, network)?.0)
    }
}

//Never print key material
impl fmt::Debug for PrivKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("PrivKey(..)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PubKey(PublicKey);

impl Key for PubKey {
    /**
        Use a predefined byte array as a public key. Compressed (33) or uncompressed (65) bytes.
    */
    fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        match bytes.len() {
            PUBLIC_KEY_LEN | UNCOMPRESSED_PUBLIC_KEY_LEN => Ok(Self(PublicKey::from_slice(bytes)?)),
            n => Err(KeyError::InvalidKeyLength(n))
        }
    }

    fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl PubKey {
    /**
        Finds the public key of a secret key.

        Is the result of static point G on the secp256k1 curve multipled k times, where k is the private key.
    */
    pub fn from_priv_key(k: &PrivKey) -> Self {
        Self(PublicKey::from_secret_key(&Secp256k1::new(), &k.0))
    }

    /**
        Returns the compressed public key as a byte array.
    */
    pub fn as_bytes(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.0.serialize()
    }

    /**
        Returns the uncompressed public key (0x04 | x | y).
    */
    pub fn decompressed_bytes(&self) -> [u8; UNCOMPRESSED_PUBLIC_KEY_LEN] {
        self.0.serialize_uncompressed()
    }

    /**
        Ripemd160(Sha256(compressed key)), the payload of P2PKH and P2WPKH addresses.
    */
    pub fn hash160(&self) -> [u8; 20] {
        hash::hash160(self.as_bytes())
    }

    pub(crate) fn inner(&self) -> &PublicKey {
        &self.0
    }

    pub(crate) fn from_inner(key: PublicKey) -> Self {
        Self(key)
    }
}

impl fmt::Display for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_PRIV_KEY_HEX: &str = "4baa38b7623a40da63836cd9ee8c51d0b6273e766c88adde156fd5fec6e19008";

    fn test_key() -> PrivKey {
        PrivKey::from_slice(&hex::decode(TEST_PRIV_KEY_HEX).unwrap()).unwrap()
    }

    #[test]
    fn public_key_from_private() {
        let pk = PubKey::from_priv_key(&test_key());
        assert_eq!(pk.hex(), "030fe9d8d0e15d432d1ae9b3c52f4cb6e37e3c7a41af0139783da09eab85a182dc");
        assert_eq!(hex::encode(pk.hash160()), "65d4f0444069f3881221e24bb6a99b1d53e008cf");
        assert_eq!(pk.decompressed_bytes()[0], 0x04);
        assert_eq!(PubKey::from_slice(&pk.decompressed_bytes()).unwrap(), pk);
    }

    #[test]
    fn kernelcoin_wif() -> Result<(), KeyError> {
        let network = NetworkProfile::kernelcoin();
        let wif = test_key().export_as_wif(true, &network);
        assert_eq!(wif, "5BmjoqBHxMvuvNbLjys1yYchE18GoXTgKsMEsaHGxJEsTjbyVKTr");

        let (key, compressed) = PrivKey::decode_wif(&wif, &network)?;
        assert!(compressed);
        assert_eq!(key, test_key());
        Ok(())
    }

    #[test]
    fn bitcoin_wif() -> Result<(), KeyError> {
        let network = NetworkProfile::bitcoin();
        //BIP-84 m/84'/0'/0'/0/0 of the all-abandon mnemonic
        let key = PrivKey::from_wif("KyZpNDKnfs94vbrwhJneDi77V6jF64PWPF8x5cdJb8ifgg2DUc9d", &network)?;
        assert_eq!(key.export_as_wif(true, &network), "KyZpNDKnfs94vbrwhJneDi77V6jF64PWPF8x5cdJb8ifgg2DUc9d");

        let uncompressed = key.export_as_wif(false, &network);
        assert!(uncompressed.starts_with('5'));
        assert_eq!(PrivKey::decode_wif(&uncompressed, &network)?, (key, false));
        Ok(())
    }

    #[test]
    fn wif_for_wrong_network_is_rejected() {
        let wif = test_key().export_as_wif(true, &NetworkProfile::kernelcoin());
        assert_eq!(
            PrivKey::from_wif(&wif, &NetworkProfile::bitcoin()),
            Err(KeyError::WrongWifVersion { expected: 0x80, found: 28 })
        );
    }

    #[test]
    fn invalid_key_lengths() {
        assert_eq!(PrivKey::from_slice(&[1u8; 31]), Err(KeyError::InvalidKeyLength(31)));
        assert_eq!(PubKey::from_slice(&[2u8; 32]), Err(KeyError::InvalidKeyLength(32)));
        //Zero is not a valid scalar
        assert!(matches!(PrivKey::from_slice(&[0u8; 32]), Err(KeyError::Secp(_))));
    }

    #[test]
    fn random_keys_compress_to_33_bytes() {
        for _i in 0..5 {
            let pk = PubKey::from_priv_key(&PrivKey::new_rand());
            assert!(matches!(pk.as_bytes()[0], 0x02 | 0x03));
        }
    }

    #[test]
    fn debug_hides_secret() {
        assert_eq!(format!("{:?}", test_key()), "PrivKey(..)");
    }
}
