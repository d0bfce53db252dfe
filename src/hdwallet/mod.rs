/*
    This module implements hierarchical deterministic keys
    under the BIP 32 standard.

    Reference:
        https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki
*/

pub mod ckd;
pub mod extended_keys;
pub mod path;

pub use ckd::ChildOptions;
pub use extended_keys::{
    ExtendedKey,
    Xprv,
    Xpub
};
pub use path::Path;

use thiserror::Error;

use crate::{
    encoding::base58::Base58Error,
    key::KeyError
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HDWError {
    #[error("seed must be 16 to 64 bytes, found {0}")]
    InvalidSeedLength(usize),

    #[error("seed produced an invalid master key")]
    InvalidMasterKey,

    #[error("derivation at index {0:#010x} produced an invalid key")]
    InvalidChildKey(u32),

    #[error("index {0} does not fit below 2^31")]
    IndexTooLarge(u32),

    #[error("cannot derive a hardened child from a public key")]
    CantHarden,

    #[error("maximum derivation depth reached")]
    DepthExceeded,

    #[error("bad derivation path: {0:?}")]
    BadPath(String),

    #[error("extended key is malformed")]
    BadKey,

    #[error("extended key version {0:02x?} does not match the network")]
    BadPrefix([u8; 4]),

    #[error(transparent)]
    Base58(#[from] Base58Error),

    #[error(transparent)]
    Key(#[from] KeyError)
}
