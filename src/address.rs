use thiserror::Error;

use crate::{
    key::PubKey,
    encoding::{
        base58::{Base58, Base58Error},
        bech32::{self, Bech32Err}
    },
    network::NetworkProfile
};

/// Length of a public key hash (hash160).
pub const PUBKEY_HASH_LEN: usize = 20;

/// Witness version of P2WPKH and P2WSH outputs.
const WITNESS_V0: u8 = 0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressErr {
    #[error("public key hash must be 20 bytes, found {0}")]
    InvalidHashLength(usize),

    #[error("address version byte {found:#04x} does not match network version {expected:#04x}")]
    WrongVersion { expected: u8, found: u8 },

    #[error("expected a witness v0 key hash address, found witness version {0}")]
    WrongWitnessVersion(u8),

    #[error(transparent)]
    Base58(#[from] Base58Error),

    #[error(transparent)]
    Bech32(#[from] Bech32Err)
}

pub struct Address;

impl Address {
    /**
        Creates a legacy P2PKH address from a public key hash.
        * Base58Check( version | hash160 )
    */
    pub fn p2pkh(pubkey_hash: &[u8], network: &NetworkProfile) -> Result<String, AddressErr> {
        check_hash_len(pubkey_hash)?;
        Ok(Base58::new(&[network.pubkey_hash], pubkey_hash).check_encode())
    }

    /**
        Creates a bech32 P2WPKH address (witness v0) from a public key hash.
    */
    pub fn p2wpkh(pubkey_hash: &[u8], network: &NetworkProfile) -> Result<String, AddressErr> {
        check_hash_len(pubkey_hash)?;
        Ok(bech32::encode(&network.bech32_hrp, WITNESS_V0, pubkey_hash)?)
    }

    /**
        Creates the legacy address of a compressed public key.
    */
    pub fn from_pub_key(pk: &PubKey, network: &NetworkProfile) -> Result<String, AddressErr> {
        Self::p2pkh(&pk.hash160(), network)
    }

    /**
        Creates the segwit address of a compressed public key.
    */
    pub fn segwit_from_pub_key(pk: &PubKey, network: &NetworkProfile) -> Result<String, AddressErr> {
        Self::p2wpkh(&pk.hash160(), network)
    }

    /**
        Returns the public key hash inside a legacy address, checking
        checksum, length and the network's version byte.
    */
    pub fn decode_p2pkh(address: &str, network: &NetworkProfile) -> Result<[u8; PUBKEY_HASH_LEN], AddressErr> {
        let decoded = Base58::check_decode(address)?;
        let (version, hash) = decoded.split_first().ok_or(AddressErr::InvalidHashLength(0))?;
        if *version != network.pubkey_hash {
            return Err(AddressErr::WrongVersion { expected: network.pubkey_hash, found: *version })
        }

        to_hash(hash)
    }

    /**
        Returns the public key hash inside a segwit v0 key hash address.
    */
    pub fn decode_p2wpkh(address: &str, network: &NetworkProfile) -> Result<[u8; PUBKEY_HASH_LEN], AddressErr> {
        let (version, program) = bech32::decode(&network.bech32_hrp, address)?;
        if version != WITNESS_V0 {
            return Err(AddressErr::WrongWitnessVersion(version))
        }

        to_hash(&program)
    }

    /**
        Verifies that an address belongs to the network: a base58check P2PKH or
        P2SH address with a 20 byte payload, or a segwit address under the
        network's prefix.
    */
    pub fn is_valid(address: &str, network: &NetworkProfile) -> bool {
        if bech32::decode(&network.bech32_hrp, address).is_ok() {
            return true
        }

        match Base58::check_decode(address) {
            Ok(decoded) => {
                decoded.len() == 1 + PUBKEY_HASH_LEN
                    && (decoded[0] == network.pubkey_hash || decoded[0] == network.script_hash)
            },
            Err(_) => false
        }
    }
}

fn check_hash_len(hash: &[u8]) -> Result<(), AddressErr> {
    if hash.len() != PUBKEY_HASH_LEN {
        return Err(AddressErr::InvalidHashLength(hash.len()))
    }
    Ok(())
}

fn to_hash(bytes: &[u8]) -> Result<[u8; PUBKEY_HASH_LEN], AddressErr> {
    bytes.try_into().map_err(|_| AddressErr::InvalidHashLength(bytes.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{Key, PrivKey};

    const TEST_PUB_KEY_HEX: &str = "0204664c60ceabd82967055ccbd0f56a1585dfbd42032656efa501c463b16fbdfe";
    const KCN_PUB_KEY_HEX: &str = "030fe9d8d0e15d432d1ae9b3c52f4cb6e37e3c7a41af0139783da09eab85a182dc";

    fn key(hex_str: &str) -> PubKey {
        PubKey::from_slice(&hex::decode(hex_str).unwrap()).unwrap()
    }

    #[test]
    fn bitcoin_address_tests() -> Result<(), AddressErr> {
        let network = NetworkProfile::bitcoin();
        let pk = key(TEST_PUB_KEY_HEX);

        assert_eq!(Address::from_pub_key(&pk, &network)?, "124ERAK4SqHMNWXycHPautn5zDYRKr3b2E");
        assert_eq!(Address::p2pkh(&pk.hash160(), &network)?, "124ERAK4SqHMNWXycHPautn5zDYRKr3b2E");
        assert_eq!(Address::segwit_from_pub_key(&pk, &network)?, "bc1qpw2f9sygy37kpdq4pmgazrgpc8qs9xsuv7ecn3");
        Ok(())
    }

    #[test]
    fn kernelcoin_address_tests() -> Result<(), AddressErr> {
        let network = NetworkProfile::kernelcoin();
        let pk = key(KCN_PUB_KEY_HEX);

        let legacy = Address::from_pub_key(&pk, &network)?;
        let segwit = Address::segwit_from_pub_key(&pk, &network)?;
        assert_eq!(legacy, "KGVaeVTBugeBfG2S4MyVirwZvn11ryD7d1");
        assert_eq!(segwit, "kcn1qvh20q3zqd8ecsy3puf9md2vmr4f7qzx0lvt7d2");

        assert_eq!(Address::decode_p2pkh(&legacy, &network)?, pk.hash160());
        assert_eq!(Address::decode_p2wpkh(&segwit, &network)?, pk.hash160());
        Ok(())
    }

    #[test]
    fn random_kernelcoin_addresses_start_with_k() -> Result<(), AddressErr> {
        let network = NetworkProfile::kernelcoin();
        for _i in 0..5 {
            let pk = PubKey::from_priv_key(&PrivKey::new_rand());
            let legacy = Address::from_pub_key(&pk, &network)?;
            let segwit = Address::segwit_from_pub_key(&pk, &network)?;

            assert!(legacy.starts_with('K'));
            assert!(segwit.starts_with("kcn1q"));
            assert!(Address::is_valid(&legacy, &network));
            assert!(Address::is_valid(&segwit, &network));
            assert!(!Address::is_valid(&legacy, &NetworkProfile::bitcoin()));
            assert!(!Address::is_valid(&segwit, &NetworkProfile::bitcoin()));
        }
        Ok(())
    }

    #[test]
    fn pub_key_helpers_match_hash_encoders() -> Result<(), AddressErr> {
        for network in [NetworkProfile::kernelcoin(), NetworkProfile::bitcoin()] {
            let pk = key(KCN_PUB_KEY_HEX);
            assert_eq!(Address::from_pub_key(&pk, &network)?, Address::p2pkh(&pk.hash160(), &network)?);
            assert_eq!(Address::segwit_from_pub_key(&pk, &network)?, Address::p2wpkh(&pk.hash160(), &network)?);
        }
        Ok(())
    }

    #[test]
    fn invalid_hash_lengths() {
        let network = NetworkProfile::kernelcoin();
        assert_eq!(Address::p2pkh(&[0u8; 19], &network), Err(AddressErr::InvalidHashLength(19)));
        assert_eq!(Address::p2wpkh(&[0u8; 32], &network), Err(AddressErr::InvalidHashLength(32)));
    }

    #[test]
    fn decode_rejects_other_networks() {
        let kcn = NetworkProfile::kernelcoin();
        let btc = NetworkProfile::bitcoin();
        assert_eq!(
            Address::decode_p2pkh("124ERAK4SqHMNWXycHPautn5zDYRKr3b2E", &kcn),
            Err(AddressErr::WrongVersion { expected: 45, found: 0 })
        );
        assert!(matches!(
            Address::decode_p2wpkh("kcn1qvh20q3zqd8ecsy3puf9md2vmr4f7qzx0lvt7d2", &btc),
            Err(AddressErr::Bech32(Bech32Err::WrongHrp { .. }))
        ));
        assert!(!Address::is_valid("not an address", &kcn));
    }
}
