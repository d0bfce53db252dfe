use kcn_keyaddress::{
    encoding::base58::Base58,
    encoding::bech32,
    hash,
    prelude::*
};

const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

const KERNELCOIN_JSON: &str = r#"{
    "name": "kernelcoin",
    "pubkey_hash": 45,
    "script_hash": 23,
    "wif": 28,
    "witness_pubkey_hash": 6,
    "witness_script_hash": 10,
    "hd_private": "7788ade4",
    "hd_public": "7788b21e",
    "bech32_hrp": "kcn"
}"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn golden_vector_from_configured_profile() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let network: NetworkProfile = serde_json::from_str(KERNELCOIN_JSON)?;
    network.validate()?;
    assert_eq!(network, NetworkProfile::kernelcoin());

    let wallet = generate_wallet_from_mnemonic(ABANDON_ABOUT, &network)?;
    assert_eq!(wallet.private_key_wif, "5BmjoqBHxMvuvNbLjys1yYchE18GoXTgKsMEsaHGxJEsTjbyVKTr");
    assert_eq!(wallet.legacy_address, "KGVaeVTBugeBfG2S4MyVirwZvn11ryD7d1");
    assert_eq!(wallet.segwit_address, "kcn1qvh20q3zqd8ecsy3puf9md2vmr4f7qzx0lvt7d2");
    assert_eq!(wallet.derivation_path, "m/44'/2'/0'/0/0");
    Ok(())
}

#[test]
fn generated_addresses_are_well_formed() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let network = NetworkProfile::kernelcoin();

    for _i in 0..3 {
        let wallet = generate_new_wallet(&network)?;
        assert!(Mnemonic::validate(&wallet.mnemonic, Language::English));

        //version | 20 byte hash | checksum of sha256d(version | hash)
        let raw = Base58::decode(&wallet.legacy_address)?;
        assert_eq!(raw.len(), 1 + 20 + 4);
        assert_eq!(raw[0], network.pubkey_hash);
        assert_eq!(raw[21..], hash::sha256d(&raw[..21])[..4]);

        //Witness v0 carrying the same hash as the legacy address
        let (version, program) = bech32::decode(&network.bech32_hrp, &wallet.segwit_address)?;
        assert_eq!(version, 0);
        assert_eq!(program, raw[1..21]);
        assert_eq!(hex::encode(&program), wallet.public_key_hash);

        //The WIF imports back to the reported key
        let key = PrivKey::from_wif(&wallet.private_key_wif, &network)?;
        assert_eq!(key.hex(), wallet.private_key_hex);
        assert_eq!(PubKey::from_priv_key(&key).hex(), wallet.public_key_hex);
        assert!(wallet.private_key_wif.starts_with('5'));
    }
    Ok(())
}

#[test]
fn wallet_matches_manual_derivation() -> Result<(), Box<dyn std::error::Error>> {
    let network = NetworkProfile::kernelcoin();
    let mnemonic = Mnemonic::from_phrase(ABANDON_ABOUT, Language::English)?;

    let seed = mnemonic_to_seed(&mnemonic.phrase(), "");
    let leaf = Xprv::from_seed(&*seed)?.derive_from_path(&Path::fixed())?;
    let pubkey_hash = leaf.get_pub().hash160();

    let wallet = generate_wallet_from_mnemonic(ABANDON_ABOUT, &network)?;
    assert_eq!(Address::p2pkh(&pubkey_hash, &network)?, wallet.legacy_address);
    assert_eq!(Address::p2wpkh(&pubkey_hash, &network)?, wallet.segwit_address);
    assert_eq!(leaf.get_prv().export_as_wif(true, &network), wallet.private_key_wif);
    Ok(())
}

#[test]
fn profiles_change_every_encoding() -> Result<(), Box<dyn std::error::Error>> {
    let kcn = generate_wallet_from_mnemonic(ABANDON_ABOUT, &NetworkProfile::kernelcoin())?;
    let btc = generate_wallet_from_mnemonic(ABANDON_ABOUT, &NetworkProfile::bitcoin())?;

    //Same key, different encodings
    assert_eq!(kcn.private_key_hex, btc.private_key_hex);
    assert_eq!(kcn.public_key_hash, btc.public_key_hash);
    assert_ne!(kcn.private_key_wif, btc.private_key_wif);
    assert!(btc.legacy_address.starts_with('1'));
    assert!(btc.segwit_address.starts_with("bc1q"));
    Ok(())
}

#[test]
fn wallet_serializes_to_json() -> Result<(), Box<dyn std::error::Error>> {
    let wallet = generate_wallet_from_mnemonic(ABANDON_ABOUT, &NetworkProfile::kernelcoin())?;
    let json: serde_json::Value = serde_json::to_value(&wallet)?;

    assert_eq!(json["legacy_address"], "KGVaeVTBugeBfG2S4MyVirwZvn11ryD7d1");
    assert_eq!(json["public_key_hash"], "65d4f0444069f3881221e24bb6a99b1d53e008cf");
    assert_eq!(json["derivation_path"], "m/44'/2'/0'/0/0");
    assert_eq!(json.as_object().map(|o| o.len()), Some(8));
    Ok(())
}

#[test]
fn bad_profiles_are_rejected() {
    let mut network = NetworkProfile::kernelcoin();
    network.bech32_hrp = "KCN".to_string();
    assert!(network.validate().is_err());

    let mut network = NetworkProfile::kernelcoin();
    network.hd_public = network.hd_private;
    assert!(network.validate().is_err());
}
