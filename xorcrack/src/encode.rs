pub mod hex {
    use crate::error::ToolsResult;

    /// Converts from a given hex string to a byte vector. Surrounding whitespace is ignored,
    /// anything else that is not a pair of hex digits is a decoding error.
    pub fn from_hex(hex: &str) -> ToolsResult<Vec<u8>> {
        Ok(::hex::decode(hex.trim())?)
    }

    /// Converts bytes to a lowercase hex string.
    pub fn to_hex(bytes: &[u8]) -> String {
        ::hex::encode(bytes)
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(from_hex("ffff").unwrap(), vec![0xff, 0xff]);
        assert_eq!(from_hex(" 0fff\n").unwrap(), vec![0x0f, 0xff]);
        assert!(from_hex("fff").is_err());
        assert!(from_hex("123ABX").is_err());
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(&[0x0f, 0xff]), "0fff");
        assert_eq!(to_hex(&[0xff, 0xff]), "ffff");
    }
}

pub mod base64 {
    use ::base64::{engine::general_purpose::STANDARD, Engine};

    use crate::error::ToolsResult;

    /// Encodes a given byte-slice into padded standard base64.
    pub fn to_base64(bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }

    /// Decodes padded standard base64. Line breaks are stripped first, since ciphertext files
    /// usually wrap the encoding; every other invalid character is an error.
    pub fn from_base64(base64: &str) -> ToolsResult<Vec<u8>> {
        let joined: String = base64.split(['\r', '\n']).collect();
        Ok(STANDARD.decode(joined.trim())?)
    }

    #[test]
    fn test_to_base64() {
        assert_eq!(to_base64(b"Man"), "TWFu");
        assert_eq!(to_base64(b"Ma"), "TWE=");
        assert_eq!(to_base64(b"M"), "TQ==");
    }

    #[test]
    fn test_from_base64() {
        assert_eq!(from_base64("TWFu").unwrap(), b"Man");
        assert_eq!(from_base64("TWE=").unwrap(), b"Ma");
        assert_eq!(from_base64("TW\nFu\r\nTQ==\n").unwrap(), b"ManM");
        assert!(from_base64("TW?u").is_err());
    }

    #[test]
    fn test_hex_to_base64() {
        let bytes = super::hex::from_hex("49276d206b696c6c696e6720796f757220627261696e206c696b65206120706f69736f6e6f7573206d757368726f6f6d").unwrap();
        assert_eq!(
            to_base64(&bytes),
            "SSdtIGtpbGxpbmcgeW91ciBicmFpbiBsaWtlIGEgcG9pc29ub3VzIG11c2hyb29t"
        );
    }
}

pub mod ascii {

    /// Renders bytes as text, one char per byte, with an option to escape non-printable bytes.
    pub fn to_ascii(bytes: &[u8], escape: bool) -> String {
        if escape {
            bytes.escape_ascii().to_string()
        } else {
            bytes.iter().map(|&v| v as char).collect()
        }
    }

    #[test]
    fn test_ascii() {
        assert_eq!(to_ascii(&[b'a', b'b', b'c'], false), "abc");
        assert_eq!(to_ascii(&[b'a', b'b', b'c', b'\n'], true), "abc\\n");
    }
}
