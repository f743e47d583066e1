//! Encoding and decoding of raw data
//!
//! Each positional encoding (binary, octal, hexadecimal) renders every byte
//! independently in its base, left-padded with zeros to a fixed width (8, 3,
//! and 2 characters respectively) and concatenated with no separators. The
//! fixed widths keep decoding a pure inverse of encoding and let the
//! detector split strings by fixed-width grouping.
//!
//! Base64 uses the standard RFC 4648 alphabet with padding on encode;
//! decoding accepts both padded and unpadded input so that padding
//! differences never change the decoded bytes. Base64-crypt uses the
//! OpenBSD bcrypt alphabet without padding.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};

use crate::{
    encoding::Encoding,
    error::{Error, Result},
};

/// Standard alphabet, padded on encode, indifferent to padding on decode
const STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// OpenBSD bcrypt alphabet, never padded
const BCRYPT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::BCRYPT,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode raw bytes into text under a transformable encoding
///
/// # Arguments
/// * `data` - Source bytes to encode
/// * `encoding` - Target textual representation
///
/// # Errors
/// [`Error::UnsupportedEncoding`] if the encoding has no encode rule, or
/// [`Error::Utf8`] when the bytes are not valid UTF-8 and UTF-8 output was
/// requested.
pub fn encode(data: &[u8], encoding: Encoding) -> Result<String> {
    match encoding {
        Encoding::Binary | Encoding::Octal | Encoding::Hexadecimal => {
            Ok(encode_positional(data, encoding))
        }
        Encoding::Base64 => Ok(STANDARD.encode(data)),
        Encoding::Base64Crypt => Ok(BCRYPT.encode(data)),
        Encoding::Utf8 => Ok(String::from_utf8(data.to_vec())?),
        other => Err(Error::UnsupportedEncoding(other)),
    }
}

/// Decode text into raw bytes
///
/// Inverse of [`encode`] for transformable encodings, plus decode-only rules
/// for [`Encoding::Boolean`], [`Encoding::BigInt`], and [`Encoding::Uuid`].
///
/// # Errors
/// [`Error::UnsupportedEncoding`] if the encoding has no decode rule, or a
/// digit/length error describing the malformed input.
pub fn decode(text: &str, encoding: Encoding) -> Result<Vec<u8>> {
    match encoding {
        Encoding::Binary | Encoding::Octal | Encoding::Hexadecimal => {
            decode_positional(text, encoding)
        }
        Encoding::Base64 => Ok(STANDARD.decode(text)?),
        Encoding::Base64Crypt => Ok(BCRYPT.decode(text)?),
        Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
        Encoding::Boolean => decode_boolean(text),
        Encoding::BigInt => decode_bigint(text),
        Encoding::Uuid => decode_uuid(text),
        other => Err(Error::UnsupportedEncoding(other)),
    }
}

fn encode_positional(data: &[u8], encoding: Encoding) -> String {
    let width = encoding.group_width().expect("positional encoding");
    let mut out = String::with_capacity(data.len() * width);
    for byte in data {
        match encoding {
            Encoding::Binary => out.push_str(&format!("{byte:08b}")),
            Encoding::Octal => out.push_str(&format!("{byte:03o}")),
            Encoding::Hexadecimal => out.push_str(&format!("{byte:02x}")),
            _ => unreachable!(),
        }
    }
    out
}

fn decode_positional(text: &str, encoding: Encoding) -> Result<Vec<u8>> {
    let width = encoding.group_width().expect("positional encoding");
    let radix = encoding.radix().expect("positional encoding");

    if let Some(bad) = text.chars().find(|c| !c.is_ascii()) {
        return Err(Error::InvalidDigit {
            encoding,
            digit: bad,
        });
    }
    if text.len() % width != 0 {
        return Err(Error::InvalidLength {
            encoding,
            length: text.len(),
            width,
        });
    }

    text.as_bytes()
        .chunks(width)
        .map(|chunk| {
            let group = std::str::from_utf8(chunk).expect("ascii checked above");
            u8::from_str_radix(group, radix).map_err(|_| Error::InvalidDigit {
                encoding,
                digit: group
                    .chars()
                    .find(|c| c.to_digit(radix).is_none())
                    .unwrap_or_else(|| group.chars().next().unwrap_or('?')),
            })
        })
        .collect()
}

fn decode_boolean(text: &str) -> Result<Vec<u8>> {
    if text.eq_ignore_ascii_case("true") {
        Ok(vec![1])
    } else if text.eq_ignore_ascii_case("false") {
        Ok(vec![0])
    } else {
        Err(Error::Other(format!("{text:?} is not a boolean")))
    }
}

/// Decimal string to big-endian minimal bytes
///
/// Negative and signed inputs are rejected outright; the textual form
/// carries no sign convention we could honor losslessly.
fn decode_bigint(text: &str) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Err(Error::Other("Empty BigInt string".into()));
    }

    let mut out: Vec<u8> = Vec::new();
    for c in text.chars() {
        let digit = c.to_digit(10).ok_or(Error::InvalidDigit {
            encoding: Encoding::BigInt,
            digit: c,
        })?;

        // out = out * 10 + digit, big-endian
        let mut carry = digit as u16;
        for byte in out.iter_mut().rev() {
            let v = u16::from(*byte) * 10 + carry;
            *byte = (v & 0xff) as u8;
            carry = v >> 8;
        }
        while carry > 0 {
            out.insert(0, (carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    if out.is_empty() {
        out.push(0);
    }
    Ok(out)
}

fn decode_uuid(text: &str) -> Result<Vec<u8>> {
    let hex: String = text.chars().filter(|c| *c != '-').collect();
    if hex.len() != 32 {
        return Err(Error::InvalidLength {
            encoding: Encoding::Uuid,
            length: hex.len(),
            width: 32,
        });
    }
    decode_positional(&hex, Encoding::Hexadecimal).map_err(|e| match e {
        Error::InvalidDigit { digit, .. } => Error::InvalidDigit {
            encoding: Encoding::Uuid,
            digit,
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn test_positional_roundtrip() {
        let data = hex!("00 01 7f 80 ff");
        for encoding in [Encoding::Binary, Encoding::Octal, Encoding::Hexadecimal] {
            let text = encode(&data, encoding).unwrap();
            assert_eq!(decode(&text, encoding).unwrap(), data);
        }
    }

    #[test]
    fn test_fixed_widths() {
        assert_eq!(encode(&[5], Encoding::Binary).unwrap(), "00000101");
        assert_eq!(encode(&[5], Encoding::Octal).unwrap(), "005");
        assert_eq!(encode(&[5], Encoding::Hexadecimal).unwrap(), "05");
        assert_eq!(
            encode(&hex!("deadbeef"), Encoding::Hexadecimal).unwrap(),
            "deadbeef"
        );
    }

    #[test]
    fn test_base64_padding_indifferent() {
        // Padded and unpadded forms decode to the same bytes
        assert_eq!(decode("Zm8=", Encoding::Base64).unwrap(), b"fo");
        assert_eq!(decode("Zm8", Encoding::Base64).unwrap(), b"fo");
        assert_eq!(encode(b"fo", Encoding::Base64).unwrap(), "Zm8=");
    }

    #[test]
    fn test_base64_crypt_roundtrip() {
        let data = hex!("fa ec 20 55 00");
        let text = encode(&data, Encoding::Base64Crypt).unwrap();
        assert!(!text.contains('+'));
        assert!(!text.contains('='));
        assert_eq!(decode(&text, Encoding::Base64Crypt).unwrap(), data);
    }

    #[test]
    fn test_utf8_roundtrip() {
        let text = encode("héllo".as_bytes(), Encoding::Utf8).unwrap();
        assert_eq!(decode(&text, Encoding::Utf8).unwrap(), "héllo".as_bytes());
    }

    #[test]
    fn test_utf8_rejects_invalid_bytes() {
        assert!(encode(&[0xff, 0xfe], Encoding::Utf8).is_err());
    }

    #[test]
    fn test_boolean_decode() {
        assert_eq!(decode("true", Encoding::Boolean).unwrap(), vec![1]);
        assert_eq!(decode("False", Encoding::Boolean).unwrap(), vec![0]);
        assert!(decode("yes", Encoding::Boolean).is_err());
    }

    #[test]
    fn test_bigint_decode() {
        assert_eq!(decode("0", Encoding::BigInt).unwrap(), vec![0]);
        assert_eq!(decode("255", Encoding::BigInt).unwrap(), vec![0xff]);
        assert_eq!(decode("256", Encoding::BigInt).unwrap(), vec![1, 0]);
        assert_eq!(decode("12345", Encoding::BigInt).unwrap(), vec![0x30, 0x39]);
        // 2^64 needs nine bytes
        assert_eq!(
            decode("18446744073709551616", Encoding::BigInt).unwrap(),
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_bigint_rejects_signs() {
        assert!(decode("-5", Encoding::BigInt).is_err());
        assert!(decode("+5", Encoding::BigInt).is_err());
        assert!(decode("", Encoding::BigInt).is_err());
    }

    #[test]
    fn test_uuid_decode() {
        let bytes = decode("550e8400-e29b-41d4-a716-446655440000", Encoding::Uuid).unwrap();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[..4], &hex!("550e8400"));
    }

    #[test]
    fn test_unsupported_directions() {
        assert!(matches!(
            encode(b"x", Encoding::Json),
            Err(Error::UnsupportedEncoding(Encoding::Json))
        ));
        assert!(matches!(
            decode("{}", Encoding::Json),
            Err(Error::UnsupportedEncoding(Encoding::Json))
        ));
        assert!(decode("42", Encoding::Integer).is_err());
    }

    #[test]
    fn test_positional_rejects_bad_input() {
        assert!(decode("0000010", Encoding::Binary).is_err()); // 7 chars
        assert!(decode("00000102", Encoding::Binary).is_err()); // '2' digit
        assert!(decode("zz", Encoding::Hexadecimal).is_err());
    }
}
