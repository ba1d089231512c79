pub mod xor {
    use rand::RngCore;

    use crate::error::{ToolsError, ToolsResult};

    /// Basic XOR Encryption/Decryption. Every operation is its own inverse.
    pub struct XOREnc {}

    impl XOREnc {
        /// Encrypts two byte slices with the same length against each other.
        pub fn fixed_encrypt(bytes1: &[u8], bytes2: &[u8], output: &mut Vec<u8>) -> ToolsResult<()> {
            if bytes1.len() != bytes2.len() {
                return Err(ToolsError::LengthMismatch {
                    left: bytes1.len(),
                    right: bytes2.len(),
                });
            }
            output.extend(bytes1.iter().zip(bytes2.iter()).map(|(u, v)| u ^ v));
            Ok(())
        }

        /// Encrypts a byte slice with a single byte.
        pub fn single_key_encrypt(bytes: &[u8], key: u8, output: &mut Vec<u8>) {
            output.extend(bytes.iter().map(|&u| u ^ key))
        }

        /// Encrypts a byte slice with a repeating key. This is also called Vigenere Encryption.
        pub fn repeating_key_encrypt(bytes: &[u8], key: &[u8], output: &mut Vec<u8>) -> ToolsResult<()> {
            if key.is_empty() {
                return Err(ToolsError::EmptyKey);
            }
            output.extend(bytes.iter().zip(key.iter().cycle()).map(|(u, v)| u ^ v));
            Ok(())
        }

        /// Allocating shorthand for [`XOREnc::single_key_encrypt`].
        pub fn single(bytes: &[u8], key: u8) -> Vec<u8> {
            let mut output = Vec::with_capacity(bytes.len());
            Self::single_key_encrypt(bytes, key, &mut output);
            output
        }

        /// Allocating shorthand for [`XOREnc::repeating_key_encrypt`].
        pub fn repeating(bytes: &[u8], key: &[u8]) -> ToolsResult<Vec<u8>> {
            let mut output = Vec::with_capacity(bytes.len());
            Self::repeating_key_encrypt(bytes, key, &mut output)?;
            Ok(output)
        }
    }

    /// Draws a key of `len` bytes from the thread-local rng.
    pub fn random_key(len: usize) -> Vec<u8> {
        let mut key = vec![0; len];
        rand::thread_rng().fill_bytes(&mut key);
        key
    }

    #[test]
    fn test_fixed_encrypt() {
        use crate::encode::hex::{from_hex, to_hex};

        let bytes1 = from_hex("1c0111001f010100061a024b53535009181c").unwrap();
        let bytes2 = from_hex("686974207468652062756c6c277320657965").unwrap();
        let mut output = Vec::new();
        XOREnc::fixed_encrypt(&bytes1, &bytes2, &mut output).unwrap();
        assert_eq!(to_hex(&output), "746865206b696420646f6e277420706c6179");
    }

    #[test]
    fn test_fixed_encrypt_length_mismatch() {
        let mut output = Vec::new();
        let res = XOREnc::fixed_encrypt(&[0x80, 0x01], &[0x38], &mut output);
        assert!(matches!(
            res,
            Err(ToolsError::LengthMismatch { left: 2, right: 1 })
        ));
        assert!(output.is_empty());
    }

    #[test]
    fn test_single_key_encrypt() {
        let mut output = Vec::with_capacity(1);
        XOREnc::single_key_encrypt(&[0x80], 0x38, &mut output);
        assert_eq!(output, vec![0x80 ^ 0x38]);
        assert_eq!(XOREnc::single(&output, 0x38), vec![0x80]);
    }

    #[test]
    fn test_repeating_key_encrypt() {
        use crate::encode::hex::from_hex;

        let output = XOREnc::repeating(
            b"Burning 'em, if you ain't quick and nimble\nI go crazy when I hear a cymbal",
            b"ICE",
        )
        .unwrap();
        let res = from_hex("0b3637272a2b2e63622c2e69692a23693a2a3c6324202d623d63343c2a26226324272765272a282b2f20430a652e2c652a3124333a653e2b2027630c692b20283165286326302e27282f").unwrap();

        assert_eq!(res, output);
    }

    #[test]
    fn test_repeating_key_encrypt_empty_key() {
        assert!(matches!(
            XOREnc::repeating(b"abc", b""),
            Err(ToolsError::EmptyKey)
        ));
    }

    #[test]
    fn test_random_key() {
        assert_eq!(random_key(16).len(), 16);
        assert!(random_key(0).is_empty());
    }
}
