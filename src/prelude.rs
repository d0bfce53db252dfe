/*
    This module contains the default imports for the library.

    Import the library using:
        use kcn_keyaddress::prelude::*;
    to quickly import the essential parts of the library.
*/

pub use crate::{

    key::{
        PubKey,
        PrivKey,
        Key,
        KeyError
    },

    address::{
        Address,
        AddressErr
    },

    bip39::{
        MnemonicErr,
        Language,
        Mnemonic,
        PhraseLength,
        mnemonic_to_seed
    },

    hdwallet::{
        ChildOptions,
        ExtendedKey,
        Xprv, Xpub,
        HDWError,
        Path
    },

    network::NetworkProfile,

    wallet::{
        Wallet,
        WalletError,
        generate_new_wallet,
        generate_wallet_from_mnemonic
    }

};
