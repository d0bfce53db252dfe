/*
    Network profiles: the version bytes, extended key magics and bech32
    prefix that identify one chain's key and address encodings.

    Every encoder takes a profile by reference; nothing here is global.
*/

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NetworkErr {
    #[error("bech32 prefix must be 1 to 83 characters, found {0}")]
    HrpLength(usize),

    #[error("bech32 prefix must be lowercase printable ASCII: {0:?}")]
    HrpCharset(String),

    #[error("private and public extended key magics are identical")]
    MagicCollision
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkProfile {
    pub name: String,

    /// Base58 version byte of P2PKH addresses.
    pub pubkey_hash: u8,
    /// Base58 version byte of P2SH addresses.
    pub script_hash: u8,
    /// Version byte of Wallet-Import-Format private keys.
    pub wif: u8,
    pub witness_pubkey_hash: u8,
    pub witness_script_hash: u8,

    #[serde(with = "hex_magic")]
    pub hd_private: [u8; 4],
    #[serde(with = "hex_magic")]
    pub hd_public: [u8; 4],

    /// Human readable part of segwit addresses.
    pub bech32_hrp: String
}

impl NetworkProfile {
    /**
        Kernelcoin mainnet, a Litecoin fork.
    */
    pub fn kernelcoin() -> Self {
        Self {
            name: "kernelcoin".to_string(),
            pubkey_hash: 45,
            script_hash: 23,
            wif: 28,
            witness_pubkey_hash: 0x06,
            witness_script_hash: 0x0A,
            hd_private: [0x77, 0x88, 0xAD, 0xE4],
            hd_public: [0x77, 0x88, 0xB2, 0x1E],
            bech32_hrp: "kcn".to_string()
        }
    }

    /**
        Bitcoin mainnet.
    */
    pub fn bitcoin() -> Self {
        Self {
            name: "bitcoin".to_string(),
            pubkey_hash: 0x00,
            script_hash: 0x05,
            wif: 0x80,
            witness_pubkey_hash: 0x06,
            witness_script_hash: 0x0A,
            hd_private: [0x04, 0x88, 0xAD, 0xE4],
            hd_public: [0x04, 0x88, 0xB2, 0x1E],
            bech32_hrp: "bc".to_string()
        }
    }

    /**
        Checks a profile loaded from configuration before it is used to encode anything.
    */
    pub fn validate(&self) -> Result<(), NetworkErr> {
        let hrp = &self.bech32_hrp;
        if hrp.is_empty() || hrp.len() > 83 {
            return Err(NetworkErr::HrpLength(hrp.len()))
        }
        if !hrp.bytes().all(|b| (33..=126).contains(&b) && !b.is_ascii_uppercase()) {
            return Err(NetworkErr::HrpCharset(hrp.clone()))
        }
        if self.hd_private == self.hd_public {
            return Err(NetworkErr::MagicCollision)
        }
        Ok(())
    }
}

/*
    Serde helpers writing 4 byte magics as 8 hex digits.
*/
mod hex_magic {
    use hex::FromHex;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(magic: &[u8; 4], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(magic))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 4], D::Error> {
        let s = String::deserialize(d)?;
        <[u8; 4]>::from_hex(s.trim_start_matches("0x")).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_profiles_are_valid() {
        assert_eq!(NetworkProfile::kernelcoin().validate(), Ok(()));
        assert_eq!(NetworkProfile::bitcoin().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_hrp() {
        let mut p = NetworkProfile::kernelcoin();
        p.bech32_hrp = "KCN".to_string();
        assert_eq!(p.validate(), Err(NetworkErr::HrpCharset("KCN".to_string())));

        p.bech32_hrp = String::new();
        assert_eq!(p.validate(), Err(NetworkErr::HrpLength(0)));

        p.bech32_hrp = "k n".to_string();
        assert!(p.validate().is_err());
    }

    #[test]
    fn rejects_magic_collision() {
        let mut p = NetworkProfile::kernelcoin();
        p.hd_public = p.hd_private;
        assert_eq!(p.validate(), Err(NetworkErr::MagicCollision));
    }

    #[test]
    fn json_round_trip_uses_hex_magics() {
        let json = serde_json::to_string(&NetworkProfile::kernelcoin()).unwrap();
        assert!(json.contains("\"hd_private\":\"7788ade4\""));
        assert!(json.contains("\"hd_public\":\"7788b21e\""));

        let parsed: NetworkProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, NetworkProfile::kernelcoin());
    }

    #[test]
    fn rejects_short_magic() {
        let json = r#"{"name":"x","pubkey_hash":0,"script_hash":5,"wif":128,
            "witness_pubkey_hash":6,"witness_script_hash":10,
            "hd_private":"0488ad","hd_public":"0488b21e","bech32_hrp":"bc"}"#;
        assert!(serde_json::from_str::<NetworkProfile>(json).is_err());
    }
}
