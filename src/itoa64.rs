//! Unix crypt "itoa64" alphabet and 6-bit packing.
//!
//! The alphabet is `./0-9A-Za-z`, in that order, so `.` is 0 and `z` is 63.
//! It is not the RFC 4648 base64 alphabet and the two must not be mixed.
//!
//! Packing is a plain bit stream: symbols contribute 6 bits each, most
//! significant first, and bytes are cut from the front of the stream. A final
//! partial group is padded with zero bits.

use crate::error::ParseError;

/// The 64 crypt symbols, indexed by value.
pub const ALPHABET: &[u8; 64] = b"./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const INVALID: u8 = 0xff;

/// Reverse lookup: byte -> symbol value, `INVALID` outside the alphabet.
const DECODE_TABLE: [u8; 256] = {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Value of a crypt symbol, or `None` if the byte is not in the alphabet.
#[inline]
pub const fn symbol_value(c: u8) -> Option<u8> {
    match DECODE_TABLE[c as usize] {
        INVALID => None,
        v => Some(v),
    }
}

/// Crypt symbol for the low 6 bits of `v`.
#[inline]
pub const fn symbol(v: u8) -> u8 {
    ALPHABET[(v & 0x3f) as usize]
}

/// Unpacks `symbols` into `out`, returning the number of bytes written.
///
/// Bytes that do not fit in `out` are dropped. Every symbol is validated even
/// if its bits end up dropped, and nothing is written to `out` unless all of
/// them are valid.
///
/// # Errors
/// Returns [`ParseError::InvalidSymbol`] for the first byte outside the
/// alphabet.
pub fn decode(symbols: &[u8], out: &mut [u8]) -> Result<usize, ParseError> {
    if let Some(position) = symbols.iter().position(|&c| symbol_value(c).is_none()) {
        return Err(ParseError::InvalidSymbol {
            position,
            byte: symbols[position],
        });
    }

    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut written = 0;

    for &c in symbols {
        let v = DECODE_TABLE[c as usize];
        acc = (acc << 6) | u32::from(v);
        bits += 6;

        if bits >= 8 {
            bits -= 8;
            if written == out.len() {
                return Ok(written);
            }
            out[written] = (acc >> bits) as u8;
            written += 1;
        }
        acc &= (1 << bits) - 1;
    }

    if bits > 0 && written < out.len() {
        out[written] = (acc << (8 - bits)) as u8;
        written += 1;
    }

    Ok(written)
}

/// Packs `bytes` into crypt symbols in `out`, returning the number of symbols
/// written. Output stops once `out` is full.
pub fn encode(bytes: &[u8], out: &mut [u8]) -> usize {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut written = 0;

    for &byte in bytes {
        acc = (acc << 8) | u32::from(byte);
        bits += 8;

        while bits >= 6 {
            bits -= 6;
            if written == out.len() {
                return written;
            }
            out[written] = symbol((acc >> bits) as u8);
            written += 1;
        }
        acc &= (1 << bits) - 1;
    }

    if bits > 0 && written < out.len() {
        out[written] = symbol((acc << (6 - bits)) as u8);
        written += 1;
    }

    written
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_order() {
        assert_eq!(symbol_value(b'.'), Some(0));
        assert_eq!(symbol_value(b'/'), Some(1));
        assert_eq!(symbol_value(b'0'), Some(2));
        assert_eq!(symbol_value(b'9'), Some(11));
        assert_eq!(symbol_value(b'A'), Some(12));
        assert_eq!(symbol_value(b'Z'), Some(37));
        assert_eq!(symbol_value(b'a'), Some(38));
        assert_eq!(symbol_value(b'z'), Some(63));
    }

    #[test]
    fn test_symbol_table_is_consistent() {
        for v in 0..64u8 {
            assert_eq!(symbol_value(symbol(v)), Some(v));
        }
        let valid = (0..=255u8).filter(|&c| symbol_value(c).is_some()).count();
        assert_eq!(valid, 64);
    }

    #[test]
    fn test_rejects_base64_only_symbols() {
        for c in [b'+', b'=', b'-', b'_', b'!', b'@', b' ', 0x80, 0xff] {
            assert_eq!(symbol_value(c), None, "{c:#04x} should not decode");
        }
    }

    #[test]
    fn test_decode_ten_symbols() {
        let mut out = [0u8; 8];
        assert_eq!(decode(b"LLLLLLLLL.", &mut out), Ok(8));
        assert_eq!(hex::encode(out), "5d75d75d75d75c00");

        assert_eq!(decode(b"0123456789", &mut out), Ok(8));
        assert_eq!(hex::encode(out), "08310518720928b0");

        assert_eq!(decode(b"zzzzzzzzzz", &mut out), Ok(8));
        assert_eq!(hex::encode(out), "fffffffffffffff0");
    }

    #[test]
    fn test_decode_pads_partial_group() {
        // 2 symbols = 12 bits -> one full byte plus a padded one
        let mut out = [0u8; 4];
        assert_eq!(decode(b"zz", &mut out), Ok(2));
        assert_eq!(out[..2], [0xff, 0xf0]);
    }

    #[test]
    fn test_decode_reports_first_bad_position() {
        let mut out = [0xaau8; 8];
        let err = decode(b"LLL@LL-LLL", &mut out).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidSymbol {
                position: 3,
                byte: b'@'
            }
        );
        assert_eq!(out, [0xaa; 8], "output touched on failure");
    }

    #[test]
    fn test_encode_eight_bytes() {
        let bytes = hex::decode("5d75d75d75d75c00").unwrap();
        let mut out = [0u8; 10];
        assert_eq!(encode(&bytes, &mut out), 10);
        assert_eq!(&out, b"LLLLLLLLL.");

        let bytes = hex::decode("52c2eba7e9695dc0").unwrap();
        assert_eq!(encode(&bytes, &mut out), 10);
        assert_eq!(&out, b"Ig9fdyZdLQ");
    }

    #[test]
    fn test_encode_emits_padded_tail() {
        // 64 bits -> 10 full symbols and a padded 11th
        let mut out = [0u8; 12];
        assert_eq!(encode(&[0xff; 8], &mut out), 11);
        assert_eq!(&out[..11], b"zzzzzzzzzzw");
    }
}
