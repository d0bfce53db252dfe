/*
    This module implements child key deriveration
    from parent extended private and public keys
    under the BIP32 standard.

    Reference:
        https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki
*/

use zeroize::Zeroizing;

use crate::{
    Scalar,
    Secp256k1,
    hash::{
        hmac_sha512,
        hash160
    },
    hdwallet::{
        ExtendedKey, Xprv, Xpub,
        HDWError
    },
    key::{
        PubKey,
        PrivKey
    }
};

/// First hardened child index, 2^31.
pub const HARDENED_OFFSET: u32 = 1 << 31;

/**
    Enum to pattern match child key deriveration options.
    The wrapped value is the index below 2^31, without the hardened offset.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOptions {
    Normal(u32),
    Hardened(u32)
}

impl ChildOptions {
    /**
        Splits a raw BIP32 index: anything at or above 2^31 is hardened.
    */
    pub fn from_index(index: u32) -> Self {
        if index >= HARDENED_OFFSET {
            ChildOptions::Hardened(index - HARDENED_OFFSET)
        } else {
            ChildOptions::Normal(index)
        }
    }

    /**
        The raw index as serialized and hashed, hardened offset included.
    */
    pub fn index(&self) -> Result<u32, HDWError> {
        match *self {
            ChildOptions::Normal(x) if x < HARDENED_OFFSET => Ok(x),
            ChildOptions::Hardened(x) if x < HARDENED_OFFSET => Ok(x + HARDENED_OFFSET),
            ChildOptions::Normal(x) | ChildOptions::Hardened(x) => Err(HDWError::IndexTooLarge(x))
        }
    }

    pub fn is_hardened(&self) -> bool {
        matches!(self, ChildOptions::Hardened(_))
    }
}

/**
    Derives a child xprv from a parent xprv.

    Hardened:  HMAC-SHA512(chaincode, 0x00 | parent key | index)
    Normal:    HMAC-SHA512(chaincode, parent pubkey | index)

    Child key = (IL + parent key) mod n, child chaincode = IR.
    An IL at or above n, or a zero child key, fails with InvalidChildKey
    rather than moving on to the next index.
*/
pub fn derive_xprv(parent: &Xprv, options: ChildOptions) -> Result<Xprv, HDWError> {
    let index = options.index()?;
    let depth = parent.depth.checked_add(1).ok_or(HDWError::DepthExceeded)?;
    let parent_pub: PubKey = parent.get_pub();

    let mut data = Zeroizing::new(Vec::<u8>::with_capacity(37));
    if options.is_hardened() {
        data.push(0x00);
        data.extend_from_slice(&parent.get_prv().secret_bytes());
    } else {
        data.extend_from_slice(&parent_pub.as_bytes());
    }
    data.extend_from_slice(&index.to_be_bytes());

    let (tweak, child_chaincode) = split_hmac(&data, &parent.chaincode(), index)?;

    let child_key = parent.get_prv().inner()
        .add_tweak(&tweak)
        .map_err(|_| HDWError::InvalidChildKey(index))?;

    Ok(
        Xprv::construct(
            PrivKey::from_inner(child_key),
            child_chaincode,
            depth,
            fingerprint(&parent_pub),
            index
        )
    )
}

/**
    Derives a normal child xpub from a parent xpub.

    Child key = point(IL) + parent key. Hardened children need the
    private key, so they fail with CantHarden.
*/
pub fn derive_xpub(parent: &Xpub, options: ChildOptions) -> Result<Xpub, HDWError> {
    if options.is_hardened() {
        return Err(HDWError::CantHarden)
    }
    let index = options.index()?;
    let depth = parent.depth.checked_add(1).ok_or(HDWError::DepthExceeded)?;
    let parent_pub: PubKey = parent.get_pub();

    let mut data: Vec<u8> = Vec::with_capacity(37);
    data.extend_from_slice(&parent_pub.as_bytes());
    data.extend_from_slice(&index.to_be_bytes());

    let (tweak, child_chaincode) = split_hmac(&data, &parent.chaincode(), index)?;

    let child_key = parent_pub.inner()
        .add_exp_tweak(&Secp256k1::verification_only(), &tweak)
        .map_err(|_| HDWError::InvalidChildKey(index))?;

    Ok(
        Xpub::construct(
            PubKey::from_inner(child_key),
            child_chaincode,
            depth,
            fingerprint(&parent_pub),
            index
        )
    )
}

/**
    First 4 bytes of hash160 of the parent public key.
*/
pub fn fingerprint(parent: &PubKey) -> [u8; 4] {
    let hash = hash160(parent.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/*
    Hashes the data under the chaincode and splits the result into the
    scalar tweak IL and the child chaincode IR.
*/
fn split_hmac(data: &[u8], chaincode: &[u8; 32], index: u32) -> Result<(Scalar, [u8; 32]), HDWError> {
    let hash = Zeroizing::new(hmac_sha512(data, chaincode));

    let mut left = Zeroizing::new([0u8; 32]);
    let mut right = [0u8; 32];
    left.copy_from_slice(&hash[..32]);
    right.copy_from_slice(&hash[32..]);

    let tweak = Scalar::from_be_bytes(*left).map_err(|_| HDWError::InvalidChildKey(index))?;
    Ok((tweak, right))
}
