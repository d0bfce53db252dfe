/*
    This module parses and prints derivation paths such as m/44'/2'/0'/0/0
    as vectors of ChildOptions that can be used to derive a child key.
*/

use std::{
    fmt,
    str::FromStr
};

use crate::hdwallet::{
    ChildOptions,
    HDWError
};

/// BIP-44 purpose level.
pub const BIP44_PURPOSE: u32 = 44;

/// SLIP-44 coin type used by Kernelcoin wallets (Litecoin's, which it forks).
pub const KERNELCOIN_COIN_TYPE: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub children: Vec<ChildOptions>
}

impl Path {
    /**
        m / purpose' / coin_type' / account' / change / address_index
    */
    pub fn bip44(coin_type: u32, account: u32, change: u32, address_index: u32) -> Self {
        Self {
            children: vec![
                ChildOptions::Hardened(BIP44_PURPOSE),
                ChildOptions::Hardened(coin_type),
                ChildOptions::Hardened(account),
                ChildOptions::Normal(change),
                ChildOptions::Normal(address_index)
            ]
        }
    }

    /**
        The one path wallets are derived at: m/44'/2'/0'/0/0.
    */
    pub fn fixed() -> Self {
        Self::bip44(KERNELCOIN_COIN_TYPE, 0, 0, 0)
    }
}

impl FromStr for Path {
    type Err = HDWError;

    /**
        Parses "m/a/b'/c" paths. Hardened levels are marked with ' or h.
    */
    fn from_str(path: &str) -> Result<Self, HDWError> {
        let bad_path = || HDWError::BadPath(path.to_string());

        let mut levels = path.split('/');
        if levels.next() != Some("m") {
            return Err(bad_path())
        }

        let mut children: Vec<ChildOptions> = vec![];
        for level in levels {
            let (digits, hardened) = match level.strip_suffix(&['\'', 'h', 'H'][..]) {
                Some(x) => (x, true),
                None => (level, false)
            };
            //Reject signs and empty levels that u32::from_str would let through
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(bad_path())
            }

            let index: u32 = digits.parse().map_err(|_| bad_path())?;
            let option = if hardened { ChildOptions::Hardened(index) } else { ChildOptions::Normal(index) };
            //Range check now so a parsed path is always derivable
            option.index().map_err(|_| bad_path())?;

            children.push(option);
        }

        Ok(Self { children })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "m")?;
        for child in &self.children {
            match child {
                ChildOptions::Normal(x) => write!(f, "/{}", x)?,
                ChildOptions::Hardened(x) => write!(f, "/{}'", x)?
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ChildOptions,
        HDWError,
        Path
    };

    #[test]
    fn path_test() {
        let path_str = "m/84'/0'/0'/0/0";
        let path_struct = Path {
            children: vec![
                ChildOptions::Hardened(84),
                ChildOptions::Hardened(0),
                ChildOptions::Hardened(0),
                ChildOptions::Normal(0),
                ChildOptions::Normal(0)
            ]
        };

        assert_eq!(path_str, path_struct.to_string());
        assert_eq!(path_str.parse::<Path>().unwrap(), path_struct);
    }

    #[test]
    fn fixed_wallet_path() {
        assert_eq!(Path::fixed().to_string(), "m/44'/2'/0'/0/0");
        assert_eq!("m/44h/2h/0h/0/0".parse::<Path>().unwrap(), Path::fixed());
    }

    #[test]
    fn master_only_path() {
        let master = Path { children: vec![] };
        assert_eq!("m".parse::<Path>().unwrap(), master);
        assert_eq!(master.to_string(), "m");
    }

    #[test]
    fn bad_paths() {
        for bad in ["", "44'/0'", "m/", "m//0", "m/x", "m/-1", "m/+1", "m/2147483648", "m/2147483648'", "m/0''"] {
            assert_eq!(bad.parse::<Path>(), Err(HDWError::BadPath(bad.to_string())), "{}", bad);
        }
    }
}
