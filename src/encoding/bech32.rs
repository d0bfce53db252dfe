/*
    Module implements segwit address encoding (BIP-173, BIP-350 for v1+)
    on top of the bech32 crate.
*/
use thiserror::Error;

use ::bech32::{
    self as codec,
    u5,
    FromBase32,
    ToBase32,
    Variant
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Bech32Err {
    #[error("bech32: {0}")]
    Codec(#[from] codec::Error),

    #[error("witness version {0} is out of range")]
    InvalidVersion(u8),

    #[error("witness program of {0} bytes is invalid for its version")]
    InvalidProgramLength(usize),

    #[error("expected human readable part {expected:?}, found {found:?}")]
    WrongHrp { expected: String, found: String },

    #[error("checksum variant does not match witness version")]
    WrongVariant,

    #[error("address has no witness version")]
    MissingVersion
}

/**
    Encodes a witness program as a segwit address.

    The data is either a pubkey hash (p2wpkh) or script hash (p2wsh).
    Use witness version 0 for P2WPKH and P2WSH.
*/
pub fn encode(hrp: &str, witness_version: u8, program: &[u8]) -> Result<String, Bech32Err> {
    check_program(witness_version, program.len())?;

    let mut data: Vec<u5> = vec![u5::try_from_u8(witness_version)?];
    data.extend(program.to_base32());

    Ok(codec::encode(hrp, data, variant_for(witness_version))?)
}

/**
    Decodes a segwit address under the expected human readable part.
    Returns the witness version and program.
*/
pub fn decode(hrp: &str, address: &str) -> Result<(u8, Vec<u8>), Bech32Err> {
    let (found, data, variant) = codec::decode(address)?;
    if found != hrp {
        return Err(Bech32Err::WrongHrp { expected: hrp.to_string(), found })
    }

    let (version, program) = data.split_first().ok_or(Bech32Err::MissingVersion)?;
    let version = version.to_u8();
    if variant != variant_for(version) {
        return Err(Bech32Err::WrongVariant)
    }

    let program = Vec::<u8>::from_base32(program)?;
    check_program(version, program.len())?;

    Ok((version, program))
}

fn variant_for(witness_version: u8) -> Variant {
    if witness_version == 0 { Variant::Bech32 } else { Variant::Bech32m }
}

fn check_program(witness_version: u8, len: usize) -> Result<(), Bech32Err> {
    if witness_version > 16 {
        return Err(Bech32Err::InvalidVersion(witness_version))
    }
    //v0 programs are a 20 byte key hash or a 32 byte script hash
    let valid = match witness_version {
        0 => len == 20 || len == 32,
        _ => (2..=40).contains(&len)
    };
    if !valid {
        return Err(Bech32Err::InvalidProgramLength(len))
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bip173_p2wpkh_vector() -> Result<(), Bech32Err> {
        let program = hex::decode("751e76e8199196d454941c45d1b3a323f1433bd6").unwrap();
        assert_eq!(encode("bc", 0, &program)?, "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");

        //Uppercase addresses decode to the same program
        assert_eq!(decode("bc", "BC1QW508D6QEJXTDG4Y5R3ZARVARY0C5XW7KV8F3T4")?, (0, program));
        Ok(())
    }

    #[test]
    fn bip173_p2wsh_vector() -> Result<(), Bech32Err> {
        let address = "tb1qrp33g0q5c5txsp9arysrx4k6zdkfs4nce4xj0gdcccefvpysxf3q0sl5k7";
        let (version, program) = decode("tb", address)?;
        assert_eq!(version, 0);
        assert_eq!(hex::encode(&program), "1863143c14c5166804bd19203356da136c985678cd4d27a1b8c6329604903262");
        assert_eq!(encode("tb", 0, &program)?, address);
        Ok(())
    }

    #[test]
    fn custom_hrp() -> Result<(), Bech32Err> {
        let program = hex::decode("65d4f0444069f3881221e24bb6a99b1d53e008cf").unwrap();
        assert_eq!(encode("kcn", 0, &program)?, "kcn1qvh20q3zqd8ecsy3puf9md2vmr4f7qzx0lvt7d2");
        Ok(())
    }

    #[test]
    fn rejects_invalid_addresses() {
        //Wrong network
        assert_eq!(
            decode("bc", "tb1qrp33g0q5c5txsp9arysrx4k6zdkfs4nce4xj0gdcccefvpysxf3q0sl5k7"),
            Err(Bech32Err::WrongHrp { expected: "bc".to_string(), found: "tb".to_string() })
        );
        //Mixed case
        assert!(decode("tb", "tb1qrp33g0q5c5txsp9arysrx4k6zdkfs4nce4xj0gdcccefvpysxf3q0sL5k7").is_err());
        //Checksum broken
        assert!(matches!(decode("bc", "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t5"), Err(Bech32Err::Codec(_))));
    }

    #[test]
    fn rejects_bad_programs() {
        assert_eq!(encode("bc", 0, &[0u8; 21]), Err(Bech32Err::InvalidProgramLength(21)));
        assert_eq!(encode("bc", 17, &[0u8; 20]), Err(Bech32Err::InvalidVersion(17)));
        assert_eq!(encode("bc", 1, &[0u8; 41]), Err(Bech32Err::InvalidProgramLength(41)));
    }
}
