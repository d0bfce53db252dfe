/*
    Library to create deterministic single address wallets for
    Kernelcoin and other Bitcoin derived networks.

    A wallet is a BIP-39 mnemonic walked down the BIP-32/44 path
    m/44'/2'/0'/0/0, with the leaf key exported as WIF plus a legacy
    base58check address and a bech32 segwit address. Every encoder takes
    a NetworkProfile, so chains are configuration rather than code.

    References:
        - BIP-32 (https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki)
        - BIP-39 (https://github.com/bitcoin/bips/blob/master/bip-0039.mediawiki)
        - BIP-44 (https://github.com/bitcoin/bips/blob/master/bip-0044.mediawiki)
        - BIP-173 (https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki)
*/

//Outward facing modules
pub mod key;
pub mod address;
pub mod bip39;
pub mod hdwallet;
pub mod encoding;
pub mod network;
pub mod wallet;
pub mod prelude;

//Modules for internal use
pub mod hash;
pub mod entropy;

//Dependencies
use rand::rngs::OsRng;
use secp256k1::{PublicKey, Scalar, Secp256k1, SecretKey};
use hmac::{Mac, Hmac};
use pbkdf2::pbkdf2_hmac;
use sha2::{Sha256, Sha512, Digest};
use ripemd::Ripemd160;
