/*
    Module that bundles together the encoding schemes used for keys and addresses
*/

pub mod base58;
pub mod bech32;
