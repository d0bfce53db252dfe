/*
    This module implements the BIP-39 standard
    for mnemonic phrases.

    Reference:
        https://github.com/bitcoin/bips/blob/master/bip-0039.mediawiki
*/

mod lang;
mod mnemonic;

pub use mnemonic::Mnemonic as Mnemonic;
pub use mnemonic::PhraseLength as PhraseLength;
pub use lang::Language as Language;

use thiserror::Error;
use zeroize::Zeroizing;

use crate::{
    pbkdf2_hmac,
    Sha512
};

/// PBKDF2 rounds for mnemonic -> seed stretching.
pub const PBKDF2_ROUNDS: u32 = 2048;

/// Seed length in bytes (512 bits).
pub const SEED_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum MnemonicErr {
    #[error("secure random source unavailable: {0}")]
    InvalidEntropySource(#[source] rand::Error),

    #[error("entropy must be 16, 20, 24, 28 or 32 bytes, found {0}")]
    InvalidEntropyLength(usize),

    #[error("mnemonic must have 12, 15, 18, 21 or 24 words, found {0}")]
    InvalidWordCount(usize),

    #[error("'{0}' is not in the word list")]
    InvalidWord(String),

    #[error("mnemonic checksum does not match")]
    BadChecksum
}

/**
    Stretches a mnemonic phrase into a 64 byte seed.

    PBKDF2-HMAC-SHA512, 2048 rounds, salt = "mnemonic" + passphrase.
    The phrase is used exactly as given, so callers should pass the
    single-space joined form (see `Mnemonic::phrase`).
*/
pub fn mnemonic_to_seed(phrase: &str, passphrase: &str) -> Zeroizing<[u8; SEED_LEN]> {
    let salt = Zeroizing::new(format!("mnemonic{}", passphrase));
    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    pbkdf2_hmac::<Sha512>(phrase.as_bytes(), salt.as_bytes(), PBKDF2_ROUNDS, &mut *seed);
    seed
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn seed_without_passphrase() {
        assert_eq!(
            hex::encode(*mnemonic_to_seed(ABANDON_ABOUT, "")),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn seed_with_passphrase() {
        //Trezor reference vector, passphrase "TREZOR"
        assert_eq!(
            hex::encode(*mnemonic_to_seed(ABANDON_ABOUT, "TREZOR")),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }
}
