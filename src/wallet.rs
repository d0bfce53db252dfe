/*
    Single address wallets.

    Both entry points share one pipeline once a mnemonic is in hand:

        mnemonic -> seed ("" passphrase) -> master xprv -> m/44'/2'/0'/0/0
            -> { WIF, compressed public key, hash160, legacy and segwit addresses }

    The result either comes back complete or not at all.
*/

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    address::{Address, AddressErr},
    bip39::{Language, Mnemonic, MnemonicErr, PhraseLength},
    hdwallet::{ExtendedKey, HDWError, Path, Xprv},
    key::{Key, PubKey},
    network::NetworkProfile
};

/// Wallets never use a BIP-39 passphrase.
const PASSPHRASE: &str = "";

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(#[source] MnemonicErr),

    #[error("wallet generation failed: {0}")]
    GenerationFailed(#[from] GenerationErr)
}

/// The first failure hit while building a wallet.
#[derive(Debug, Error)]
pub enum GenerationErr {
    #[error("entropy source unavailable")]
    Entropy(#[source] MnemonicErr),

    #[error("key derivation failed")]
    Derivation(#[from] HDWError),

    #[error("address encoding failed")]
    Address(#[from] AddressErr)
}

/**
    Everything the caller needs to hand out or import one address.
    Immutable once built.
*/
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Wallet {
    pub mnemonic: String,
    pub private_key_hex: String,
    pub private_key_wif: String,
    pub public_key_hex: String,
    pub legacy_address: String,
    pub segwit_address: String,
    pub public_key_hash: String,
    pub derivation_path: String
}

//Addresses only, the rest is key material
impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("public_key_hex", &self.public_key_hex)
            .field("legacy_address", &self.legacy_address)
            .field("segwit_address", &self.segwit_address)
            .field("derivation_path", &self.derivation_path)
            .finish_non_exhaustive()
    }
}

/**
    Creates a wallet from 128 bits of fresh entropy (a 12 word mnemonic).
*/
pub fn generate_new_wallet(network: &NetworkProfile) -> Result<Wallet, WalletError> {
    let mnemonic = Mnemonic::new(PhraseLength::Twelve, Language::English)
        .map_err(GenerationErr::Entropy)?;
    debug!(network = %network.name, "drew entropy for a new mnemonic");

    wallet_from_mnemonic(&mnemonic, network)
}

/**
    Restores the wallet of an existing mnemonic. The phrase must pass the
    word list and checksum checks; whitespace between words is normalized.

    The same phrase and profile always give the same wallet.
*/
pub fn generate_wallet_from_mnemonic(phrase: &str, network: &NetworkProfile) -> Result<Wallet, WalletError> {
    let mnemonic = Mnemonic::from_phrase(phrase, Language::English)
        .map_err(WalletError::InvalidMnemonic)?;
    debug!(network = %network.name, "mnemonic validated");

    wallet_from_mnemonic(&mnemonic, network)
}

fn wallet_from_mnemonic(mnemonic: &Mnemonic, network: &NetworkProfile) -> Result<Wallet, WalletError> {
    let path = Path::fixed();

    let master = Xprv::from_mnemonic(mnemonic, PASSPHRASE).map_err(GenerationErr::Derivation)?;
    debug!("seed and master key derived");

    let leaf = master.derive_from_path(&path).map_err(GenerationErr::Derivation)?;
    debug!(path = %path, depth = leaf.depth, "leaf key derived");

    let private_key = leaf.get_prv();
    let public_key: PubKey = leaf.get_pub();
    let pubkey_hash = public_key.hash160();

    let legacy_address = Address::p2pkh(&pubkey_hash, network).map_err(GenerationErr::Address)?;
    let segwit_address = Address::p2wpkh(&pubkey_hash, network).map_err(GenerationErr::Address)?;
    info!(network = %network.name, address = %legacy_address, "wallet ready");

    Ok(Wallet {
        mnemonic: mnemonic.phrase(),
        private_key_hex: private_key.hex(),
        private_key_wif: private_key.export_as_wif(true, network),
        public_key_hex: public_key.hex(),
        legacy_address,
        segwit_address,
        public_key_hash: hex::encode(pubkey_hash),
        derivation_path: path.to_string()
    })
}
