/*
    This module implements extended keys that are
    used in BIP32 hierarchal deterministic wallets.

    An extended key is a key paired with a 32 byte chaincode, plus the
    depth, parent fingerprint and child index needed to serialize it.
    Serialized form is 78 bytes, base58check encoded:

        magic (4) | depth (1) | parent fingerprint (4) | index (4) | chaincode (32) | key data (33)

    The magic comes from the network profile, so the same key serializes
    as "xprv..." on Bitcoin and "SNoS..." on Kernelcoin.
*/

use crate::{
    key::{
        PrivKey,
        PubKey,
        Key
    },
    encoding::base58::Base58,
    hdwallet::{
        ckd::{
            derive_xprv,
            derive_xpub,
            ChildOptions,
        },
        HDWError,
        Path
    },
    bip39::Mnemonic,
    hash,
    network::NetworkProfile
};

/// HMAC key of master key generation.
const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// Serialized extended key length, before the checksum.
pub const SERIALIZED_LEN: usize = 78;

const MIN_SEED_LEN: usize = 16;
const MAX_SEED_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xprv {
    key: PrivKey,
    chaincode: [u8; 32],
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    pub index: u32
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xpub {
    key: PubKey,
    chaincode: [u8; 32],
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    pub index: u32
}

pub trait ExtendedKey<T> where T: Key {
    /**
        Constructs the Extended Key.
    */
    fn construct(key: T, chaincode: [u8; 32], depth: u8, pf: [u8; 4], index: u32) -> Self;

    /**
        Import an extended key from its base58check string.
        The version magic must be the network's magic for this key type.
    */
    fn from_str(key: &str, network: &NetworkProfile) -> Result<Self, HDWError>
    where Self: Sized;

    /**
        Returns the chaincode of the extended key
    */
    fn chaincode(&self) -> [u8; 32];

    /**
        Serialize the extended key with the network's version magic
    */
    fn serialize(&self, network: &NetworkProfile) -> String;

    /**
        Derives the child key of self
    */
    fn get_xchild(&self, options: ChildOptions) -> Result<Self, HDWError>
    where Self: Sized;

    /**
        Return the non extended public key of self.
    */
    fn get_pub(&self) -> PubKey;

    /**
        Derive the key at the given path, one level at a time.
        The first failing level aborts the whole derivation.
    */
    fn derive_from_path(&self, path: &Path) -> Result<Self, HDWError>
    where Self: Sized + Clone
    {
        let mut current_key: Self = self.clone();
        for child in &path.children {
            current_key = current_key.get_xchild(*child)?;
        }
        Ok(current_key)
    }
}

impl ExtendedKey<PrivKey> for Xprv {
    fn construct(key: PrivKey, chaincode: [u8; 32], depth: u8, pf: [u8; 4], index: u32) -> Self {
        Self {
            key,
            chaincode,
            //Serialisation info
            depth,
            parent_fingerprint: pf,
            index
        }
    }

    fn from_str(key: &str, network: &NetworkProfile) -> Result<Self, HDWError> {
        let fields = Fields::decode(key, network.hd_private)?;

        //Private key data is 0x00 | key
        if fields.key_data[0] != 0x00 {
            return Err(HDWError::BadKey)
        }
        let key = PrivKey::from_slice(&fields.key_data[1..]).map_err(|_| HDWError::BadKey)?;

        Ok(Self::construct(
            key,
            fields.chaincode,
            fields.depth,
            fields.parent_fingerprint,
            fields.index
        ))
    }

    fn chaincode(&self) -> [u8; 32] {
        self.chaincode
    }

    fn serialize(&self, network: &NetworkProfile) -> String {
        let mut key_data = [0u8; 33];
        key_data[1..].copy_from_slice(&self.key.secret_bytes()); //private key append 0x00

        Fields {
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            index: self.index,
            chaincode: self.chaincode,
            key_data
        }.encode(network.hd_private)
    }

    fn get_xchild(&self, options: ChildOptions) -> Result<Xprv, HDWError> {
        derive_xprv(self, options)
    }

    fn get_pub(&self) -> PubKey {
        PubKey::from_priv_key(&self.key)
    }
}

impl Xprv {
    /**
        Master key generation.
        I = HMAC-SHA512(key = "Bitcoin seed", data = seed), key = IL, chaincode = IR.

        Fails if the seed is outside 16 to 64 bytes, or if IL is zero
        or not below the curve order.
    */
    pub fn from_seed(seed: &[u8]) -> Result<Xprv, HDWError> {
        if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&seed.len()) {
            return Err(HDWError::InvalidSeedLength(seed.len()))
        }

        let bytes = zeroize::Zeroizing::new(hash::hmac_sha512(seed, MASTER_HMAC_KEY));
        let key = PrivKey::from_slice(&bytes[..32]).map_err(|_| HDWError::InvalidMasterKey)?;
        let mut chaincode = [0u8; 32];
        chaincode.copy_from_slice(&bytes[32..]);

        Ok(Xprv::construct(key, chaincode, 0, [0x00; 4], 0))
    }

    /**
        Convert a mnemonic to master private key.
    */
    pub fn from_mnemonic(mnemonic: &Mnemonic, passphrase: &str) -> Result<Xprv, HDWError> {
        Self::from_seed(&*mnemonic.seed(passphrase))
    }

    /**
        Return the private key part of self
    */
    pub fn get_prv(&self) -> PrivKey {
        self.key
    }

    /**
        Find the corresponding xpub
    */
    pub fn get_xpub(&self) -> Xpub {
        Xpub::construct(
            self.get_pub(),
            self.chaincode,
            self.depth,
            self.parent_fingerprint,
            self.index
        )
    }
}

impl ExtendedKey<PubKey> for Xpub {
    fn construct(key: PubKey, chaincode: [u8; 32], depth: u8, pf: [u8; 4], index: u32) -> Self {
        Self {
            key,
            chaincode,
            depth,
            parent_fingerprint: pf,
            index
        }
    }

    fn from_str(key: &str, network: &NetworkProfile) -> Result<Self, HDWError> {
        let fields = Fields::decode(key, network.hd_public)?;
        let key = PubKey::from_slice(&fields.key_data).map_err(|_| HDWError::BadKey)?;

        Ok(Self::construct(
            key,
            fields.chaincode,
            fields.depth,
            fields.parent_fingerprint,
            fields.index
        ))
    }

    fn chaincode(&self) -> [u8; 32] {
        self.chaincode
    }

    fn serialize(&self, network: &NetworkProfile) -> String {
        Fields {
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            index: self.index,
            chaincode: self.chaincode,
            key_data: self.key.as_bytes()
        }.encode(network.hd_public)
    }

    fn get_xchild(&self, options: ChildOptions) -> Result<Xpub, HDWError> {
        derive_xpub(self, options)
    }

    fn get_pub(&self) -> PubKey {
        self.key
    }
}

/*
    The serialized fields shared by both key types, minus the magic.
*/
struct Fields {
    depth: u8,
    parent_fingerprint: [u8; 4],
    index: u32,
    chaincode: [u8; 32],
    key_data: [u8; 33]
}

impl Fields {
    fn encode(&self, magic: [u8; 4]) -> String {
        let mut payload: Vec<u8> = Vec::with_capacity(SERIALIZED_LEN - 4);
        payload.push(self.depth);
        payload.extend_from_slice(&self.parent_fingerprint);
        payload.extend_from_slice(&self.index.to_be_bytes());
        payload.extend_from_slice(&self.chaincode);
        payload.extend_from_slice(&self.key_data);

        let encoded = Base58::new(&magic, &payload).check_encode();
        zeroize::Zeroize::zeroize(&mut payload);
        encoded
    }

    fn decode(key: &str, magic: [u8; 4]) -> Result<Self, HDWError> {
        let bytes = zeroize::Zeroizing::new(Base58::check_decode(key)?);
        if bytes.len() != SERIALIZED_LEN {
            return Err(HDWError::BadKey)
        }

        let mut version = [0u8; 4];
        version.copy_from_slice(&bytes[0..4]);
        if version != magic {
            return Err(HDWError::BadPrefix(version))
        }

        let mut fields = Fields {
            depth: bytes[4],
            parent_fingerprint: [0u8; 4],
            index: u32::from_be_bytes([bytes[9], bytes[10], bytes[11], bytes[12]]),
            chaincode: [0u8; 32],
            key_data: [0u8; 33]
        };
        fields.parent_fingerprint.copy_from_slice(&bytes[5..9]);
        fields.chaincode.copy_from_slice(&bytes[13..45]);
        fields.key_data.copy_from_slice(&bytes[45..78]);

        //A master key has no parent
        if fields.depth == 0 && (fields.parent_fingerprint != [0u8; 4] || fields.index != 0) {
            return Err(HDWError::BadKey)
        }

        Ok(fields)
    }
}
