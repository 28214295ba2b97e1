//! Secretlounge-ng tripcode hashes
//!
//! A tripcode is shown as `!` followed by 10 crypt-alphabet characters. The
//! 10 characters carry 60 bits of a DES output block; on the way in they are
//! unpacked into two little-endian words and run through the DES Initial
//! Permutation, which is the layout the cracking kernels compare against.
//!
//! Key functions:
//! - `decode`: hash line -> `Digest`
//! - `encode`: `Digest` -> `!XXXXXXXXXX`
//! - `normalize_plaintext`: high-bit folding applied to cracked candidates

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::Serialize;

use crate::des;
use crate::error::ParseError;
use crate::itoa64;

/// Significant characters in an encoded tripcode, not counting `!`.
pub const HASH_LENGTH: usize = 10;

/// Optional leading sentinel on a tripcode line.
pub const SENTINEL: u8 = b'!';

/// Digest size in 32-bit words. Only the first two carry data.
pub const DIGEST_WORDS: usize = 4;

/// Longest candidate a tripcode can depend on (one DES block).
pub const MAX_PLAINTEXT_LENGTH: usize = 8;

/// Tripcodes carry no external salt; it is derived from the password.
pub const SALT_MIN: usize = 0;
pub const SALT_MAX: usize = 0;

pub const SELF_TEST_PLAINTEXT: &str = "*Tp0tp8[";
pub const SELF_TEST_HASH: &str = "!LLLLLLLLL.";

/// Binary form of a tripcode as compared by the cracking kernels.
///
/// Words 2 and 3 are always zero, and equality/hashing only look at words 0
/// and 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct Digest([u32; DIGEST_WORDS]);

impl Digest {
    pub const fn new(w0: u32, w1: u32) -> Self {
        Self([w0, w1, 0, 0])
    }

    pub const fn words(&self) -> &[u32; DIGEST_WORDS] {
        &self.0
    }

    fn significant(&self) -> [u32; 2] {
        [self.0[0], self.0[1]]
    }
}

impl PartialEq for Digest {
    fn eq(&self, other: &Self) -> bool {
        self.significant() == other.significant()
    }
}

impl Eq for Digest {}

impl Hash for Digest {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant().hash(state);
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}{:08x}", self.0[0], self.0[1])
    }
}

impl FromStr for Digest {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        decode(line)
    }
}

/// Textual tripcode, always `!` plus [`HASH_LENGTH`] crypt characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedHash(String);

impl EncodedHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 10 significant characters, without the sentinel.
    pub fn trailer(&self) -> &str {
        &self.0[1..]
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EncodedHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<EncodedHash> for String {
    fn from(hash: EncodedHash) -> Self {
        hash.0
    }
}

/// Known-good plaintext / hash pair for validating an implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelfTest {
    pub plaintext: &'static str,
    pub hash: &'static str,
}

pub const SELF_TEST: SelfTest = SelfTest {
    plaintext: SELF_TEST_PLAINTEXT,
    hash: SELF_TEST_HASH,
};

/// Inclusive salt length bounds, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SaltBounds {
    pub min: usize,
    pub max: usize,
}

pub const SALT_BOUNDS: SaltBounds = SaltBounds {
    min: SALT_MIN,
    max: SALT_MAX,
};

/// Decode a tripcode line into its digest.
///
/// A leading `!` is skipped. The next 10 bytes must be crypt symbols;
/// anything after them (a newline, a pot-file separator) is ignored.
///
/// # Errors
/// [`ParseError::Length`] if fewer than 10 bytes follow the optional `!`,
/// [`ParseError::InvalidSymbol`] if one of them is outside the alphabet.
pub fn decode(line: &str) -> Result<Digest, ParseError> {
    decode_bytes(line.as_bytes()).inspect_err(|err| {
        tracing::debug!(%err, line, "rejecting tripcode hash");
    })
}

fn decode_bytes(line: &[u8]) -> Result<Digest, ParseError> {
    let hash = line.strip_prefix(&[SENTINEL]).unwrap_or(line);

    if hash.len() < HASH_LENGTH {
        return Err(ParseError::Length {
            expected: HASH_LENGTH,
            actual: hash.len(),
        });
    }

    let mut raw = [0u8; 8];
    itoa64::decode(&hash[..HASH_LENGTH], &mut raw)?;

    let w0 = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
    let w1 = u32::from_le_bytes([raw[4], raw[5], raw[6], raw[7]]);
    let (w0, w1) = des::initial_permutation(w0, w1);

    let digest = Digest::new(w0, w1);
    tracing::trace!(%digest, "decoded tripcode");
    Ok(digest)
}

/// Encode a digest back into `!` plus 10 crypt characters.
///
/// The Final Permutation is applied with the halves swapped, which makes it
/// the exact inverse of the IP done by [`decode`].
pub fn encode(digest: &Digest) -> EncodedHash {
    let [w0, w1] = digest.significant();
    let (w1, w0) = des::final_permutation(w1, w0);

    let mut raw = [0u8; 8];
    raw[..4].copy_from_slice(&w0.to_le_bytes());
    raw[4..].copy_from_slice(&w1.to_le_bytes());

    let mut line = [0u8; 1 + HASH_LENGTH];
    line[0] = SENTINEL;
    itoa64::encode(&raw, &mut line[1..]);

    // every byte written is ASCII from the crypt alphabet
    let hash = EncodedHash(line.iter().map(|&b| char::from(b)).collect());
    tracing::trace!(%digest, %hash, "encoded tripcode");
    hash
}

/// Fold one candidate byte the way the tripcode backend reads it.
///
/// A byte with the high bit set loses it if what remains is printable
/// (>= 0x20); control-range results keep the original byte.
#[inline]
pub const fn normalize_byte(v: u8) -> u8 {
    if v & 0x80 != 0 {
        let v2 = v & 0x7f;
        if v2 >= 0x20 {
            return v2;
        }
    }
    v
}

/// In-place form of [`normalize_plaintext`].
pub fn normalize_plaintext_in_place(plain: &mut [u8]) {
    for b in plain.iter_mut() {
        *b = normalize_byte(*b);
    }
}

/// Normalize a cracked candidate. Output length always equals input length.
pub fn normalize_plaintext(plain: &[u8]) -> Vec<u8> {
    plain.iter().map(|&b| normalize_byte(b)).collect()
}
