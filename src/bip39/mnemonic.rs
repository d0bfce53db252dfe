use std::fmt;

use zeroize::{Zeroize, Zeroizing};

use crate::{
    hash,
    entropy
};
use super::{
    lang::Language,
    mnemonic_to_seed,
    MnemonicErr,
    SEED_LEN
};

/// Bits per word index.
const BITS_PER_WORD: usize = 11;

/**
    A checksummed BIP-39 phrase.

    Only constructed from entropy or from a phrase whose checksum has been
    verified, so holding a `Mnemonic` means the words are valid.
*/
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic {
    phrase: Vec<String>,
    lang: Language
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseLength {
    Twelve,
    Fifteen,
    Eighteen,
    TwentyOne,
    TwentyFour
}

impl PhraseLength {
    pub fn word_count(&self) -> usize {
        match self {
            PhraseLength::Twelve => 12,
            PhraseLength::Fifteen => 15,
            PhraseLength::Eighteen => 18,
            PhraseLength::TwentyOne => 21,
            PhraseLength::TwentyFour => 24
        }
    }

    /// Entropy size in bytes (128..=256 bits).
    pub fn entropy_len(&self) -> usize {
        self.word_count() * BITS_PER_WORD * 32 / 33 / 8
    }

    /// Checksum size in bits, one bit per 32 bits of entropy.
    pub fn checksum_bits(&self) -> usize {
        self.entropy_len() * 8 / 32
    }

    pub fn from_word_count(count: usize) -> Option<Self> {
        Some(match count {
            12 => PhraseLength::Twelve,
            15 => PhraseLength::Fifteen,
            18 => PhraseLength::Eighteen,
            21 => PhraseLength::TwentyOne,
            24 => PhraseLength::TwentyFour,
            _ => return None
        })
    }

    pub fn from_entropy_len(len: usize) -> Option<Self> {
        Some(match len {
            16 => PhraseLength::Twelve,
            20 => PhraseLength::Fifteen,
            24 => PhraseLength::Eighteen,
            28 => PhraseLength::TwentyOne,
            32 => PhraseLength::TwentyFour,
            _ => return None
        })
    }
}

impl Mnemonic {
    /**
        Generates a new phrase of the given length from OS randomness.
    */
    pub fn new(length: PhraseLength, lang: Language) -> Result<Self, MnemonicErr> {
        let entropy = Self::generate_entropy(length)?;
        Self::from_entropy(&entropy, lang)
    }

    /**
        Draws fresh entropy sized for the given phrase length.
    */
    pub fn generate_entropy(length: PhraseLength) -> Result<Zeroizing<Vec<u8>>, MnemonicErr> {
        entropy::random_bytes(length.entropy_len()).map_err(MnemonicErr::InvalidEntropySource)
    }

    /**
        Encodes entropy as words.

        entropy || first ENT/32 bits of sha256(entropy), read 11 bits at a time,
        each group indexing the word list.
    */
    pub fn from_entropy(entropy: &[u8], lang: Language) -> Result<Self, MnemonicErr> {
        let length = PhraseLength::from_entropy_len(entropy.len())
            .ok_or(MnemonicErr::InvalidEntropyLength(entropy.len()))?;

        //The checksum is at most 8 bits so the first hash byte covers it
        let mut bits = Zeroizing::new(entropy.to_vec());
        bits.push(hash::sha256(entropy)[0]);

        let words = lang.word_list();
        let phrase = (0..length.word_count())
            .map(|i| words[read_bits(&bits, i * BITS_PER_WORD, BITS_PER_WORD)].to_string())
            .collect();

        Ok(Self { phrase, lang })
    }

    /**
        Parses and checksum-validates a phrase.

        Words may be separated by any whitespace. Word matching is exact
        against the (lowercase) list.
    */
    pub fn from_phrase(phrase: &str, lang: Language) -> Result<Self, MnemonicErr> {
        let words: Vec<String> = phrase.split_whitespace().map(str::to_string).collect();
        let mnemonic = Self { phrase: words, lang };
        //Runs every check; the entropy itself is discarded
        mnemonic.decode()?;
        Ok(mnemonic)
    }

    /**
        True if the phrase has a valid length, only list words and a matching checksum.
    */
    pub fn validate(phrase: &str, lang: Language) -> bool {
        Self::from_phrase(phrase, lang).is_ok()
    }

    /**
        Recovers the entropy the phrase encodes.
    */
    pub fn to_entropy(&self) -> Result<Zeroizing<Vec<u8>>, MnemonicErr> {
        self.decode()
    }

    pub fn words(&self) -> &[String] {
        &self.phrase
    }

    pub fn lang(&self) -> Language {
        self.lang
    }

    /// The words joined by single spaces. This is the form fed to PBKDF2.
    pub fn phrase(&self) -> String {
        self.phrase.join(" ")
    }

    pub fn length(&self) -> Option<PhraseLength> {
        PhraseLength::from_word_count(self.phrase.len())
    }

    /**
        The 64 byte BIP-39 seed for this phrase and passphrase.
    */
    pub fn seed(&self, passphrase: &str) -> Zeroizing<[u8; SEED_LEN]> {
        let phrase = Zeroizing::new(self.phrase());
        mnemonic_to_seed(&phrase, passphrase)
    }

    fn decode(&self) -> Result<Zeroizing<Vec<u8>>, MnemonicErr> {
        let length = PhraseLength::from_word_count(self.phrase.len())
            .ok_or(MnemonicErr::InvalidWordCount(self.phrase.len()))?;

        //Pack the 11 bit indexes back into bytes. Spare bits at the end stay zero.
        let total_bits = length.word_count() * BITS_PER_WORD;
        let mut bits = Zeroizing::new(vec![0u8; (total_bits + 7) / 8]);
        for (i, word) in self.phrase.iter().enumerate() {
            let index = self.lang.index_of(word)
                .ok_or_else(|| MnemonicErr::InvalidWord(word.clone()))?;
            write_bits(&mut bits, i * BITS_PER_WORD, BITS_PER_WORD, index);
        }

        let entropy_len = length.entropy_len();
        let checksum_bits = length.checksum_bits();
        let entropy = Zeroizing::new(bits[..entropy_len].to_vec());

        let extracted = bits[entropy_len] >> (8 - checksum_bits);
        let expected = hash::sha256(&*entropy)[0] >> (8 - checksum_bits);
        if extracted != expected {
            return Err(MnemonicErr::BadChecksum)
        }

        Ok(entropy)
    }
}

/*
    Reads `count` bits (MSB first) starting at bit `offset`.
*/
fn read_bits(bytes: &[u8], offset: usize, count: usize) -> usize {
    (offset..offset + count).fold(0, |acc, i| {
        let bit = (bytes[i / 8] >> (7 - i % 8)) & 1;
        (acc << 1) | bit as usize
    })
}

/*
    Writes the low `count` bits of value (MSB first) starting at bit `offset`.
*/
fn write_bits(bytes: &mut [u8], offset: usize, count: usize, value: usize) {
    for j in 0..count {
        if (value >> (count - 1 - j)) & 1 == 1 {
            let i = offset + j;
            bytes[i / 8] |= 1 << (7 - i % 8);
        }
    }
}

impl Drop for Mnemonic {
    fn drop(&mut self) {
        self.phrase.zeroize();
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.phrase())
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Mnemonic")
         .field("words", &self.phrase.len())
         .field("lang", &self.lang)
         .finish()
    }
}
