/*
    Hash module includes the hash functions needed to turn
    seeds into keys and public keys into addresses.
*/

use crate::{
    Hmac, Mac,
    Ripemd160, Sha256, Sha512, Digest
};

type HmacSha512 = Hmac<Sha512>;

/*
    Takes in a byte array and returns the ripemd160 hash of it
*/
pub fn ripemd160<T>(input: T) -> [u8; 20]
where T: AsRef<[u8]>
{
    let mut r = Ripemd160::new();
    r.update(input);
    r.finalize().into()
}

/*
    Takes in a byte array and returns the sha256 hash of it
*/
pub fn sha256<T>(input: T) -> [u8; 32]
where T: AsRef<[u8]>
{
    let mut r = Sha256::new();
    r.update(input);
    r.finalize().into()
}

/**
    Sha256(Sha256(input)), used for base58check checksums
*/
pub fn sha256d<T>(input: T) -> [u8; 32]
where T: AsRef<[u8]>
{
    sha256(sha256(input))
}

/**
    Ripemd160(Sha256(input)). Turns a compressed public key into a public key hash.
*/
pub fn hash160<T>(input: T) -> [u8; 20]
where T: AsRef<[u8]>
{
    ripemd160(sha256(input))
}

/**
    HMAC-SHA512 of data under the given key.
*/
pub fn hmac_sha512<T>(data: T, key: &[u8]) -> [u8; 64]
where T: AsRef<[u8]>
{
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data.as_ref());
    mac.finalize().into_bytes().into()
}
