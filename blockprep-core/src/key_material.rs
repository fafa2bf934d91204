// File:    key_material.rs
// Author:  apezoo
// Date:    2026-10-19
//
// Description: Generates random keys and initialization vectors for DES, 3DES and AES.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Key and IV generation backed by the operating system's CSPRNG.
//!
//! Every function here returns raw random bytes of the length the target
//! cipher mandates. No parity bits are set and no weak-key checks are made.

use std::fmt;

use log::{debug, warn};
use rand::{TryRngCore, rngs::OsRng};

use crate::error::{Error, Result};

/// Key length of single DES in bytes (56 effective bits plus parity).
pub const DES_KEY_LEN: usize = 8;
/// Block size of DES and 3DES in bytes.
pub const DES_BLOCK_SIZE: usize = 8;
/// Block size of AES in bytes.
pub const AES_BLOCK_SIZE: usize = 16;
/// IV size used when the caller has no particular cipher in mind.
pub const DEFAULT_IV_SIZE: usize = DES_BLOCK_SIZE;

macro_rules! byte_material {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name(Vec<u8>);

        impl $name {
            /// Borrows the raw bytes.
            #[must_use]
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            /// Number of bytes held.
            #[must_use]
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Whether no bytes are held.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Lowercase hexadecimal rendering of the bytes.
            #[must_use]
            pub fn to_hex(&self) -> String {
                hex::encode(&self.0)
            }

            /// Hands the bytes over to the caller.
            #[must_use]
            pub fn into_vec(self) -> Vec<u8> {
                self.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        // Never print secret bytes through `{:?}`.
        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("len", &self.0.len())
                    .finish_non_exhaustive()
            }
        }
    };
}

byte_material!(
    /// Random key material for DES, 3DES or AES.
    KeyBytes
);

byte_material!(
    /// A random initialization vector, normally one cipher block long.
    IvBytes
);

/// Keying option for Triple DES.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripleDesKeyOption {
    /// Two independent keys, K3 = K1 (16 bytes).
    TwoKey,
    /// Three independent keys (24 bytes).
    ThreeKey,
}

impl TripleDesKeyOption {
    /// Total key length in bytes.
    #[must_use]
    pub const fn key_len(self) -> usize {
        match self {
            Self::TwoKey => 16,
            Self::ThreeKey => 24,
        }
    }
}

impl TryFrom<u8> for TripleDesKeyOption {
    type Error = Error;

    fn try_from(option: u8) -> Result<Self> {
        match option {
            2 => Ok(Self::TwoKey),
            3 => Ok(Self::ThreeKey),
            other => Err(Error::InvalidArgument(format!(
                "key_option must be 2 or 3, got {other}"
            ))),
        }
    }
}

/// AES key sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AesKeySize {
    /// AES-128.
    Aes128,
    /// AES-192.
    Aes192,
    /// AES-256.
    Aes256,
}

impl AesKeySize {
    /// Key size in bits.
    #[must_use]
    pub const fn bits(self) -> u16 {
        match self {
            Self::Aes128 => 128,
            Self::Aes192 => 192,
            Self::Aes256 => 256,
        }
    }

    /// Key length in bytes.
    #[must_use]
    pub const fn key_len(self) -> usize {
        self.bits() as usize / 8
    }
}

impl TryFrom<u16> for AesKeySize {
    type Error = Error;

    fn try_from(bits: u16) -> Result<Self> {
        match bits {
            128 => Ok(Self::Aes128),
            192 => Ok(Self::Aes192),
            256 => Ok(Self::Aes256),
            other => Err(Error::InvalidArgument(format!(
                "key_size must be 128, 192 or 256, got {other}"
            ))),
        }
    }
}

/// Fills a fresh buffer of `len` bytes from the OS random source.
fn random_bytes(len: usize) -> Result<Vec<u8>> {
    let mut rng = OsRng;
    let mut buffer = vec![0u8; len];
    rng.try_fill_bytes(&mut buffer)
        .map_err(|e| Error::Entropy(std::io::Error::other(e)))?;
    Ok(buffer)
}

/// Generates an 8-byte DES key.
///
/// # Errors
///
/// Returns [`Error::Entropy`] if the OS random source cannot be read.
pub fn generate_des_key() -> Result<KeyBytes> {
    debug!("Generating {DES_KEY_LEN}-byte DES key.");
    random_bytes(DES_KEY_LEN).map(KeyBytes)
}

/// Generates a Triple DES key for the given keying option.
///
/// # Errors
///
/// Returns [`Error::Entropy`] if the OS random source cannot be read.
pub fn generate_3des_key_with(option: TripleDesKeyOption) -> Result<KeyBytes> {
    debug!("Generating {}-byte 3DES key ({option:?}).", option.key_len());
    random_bytes(option.key_len()).map(KeyBytes)
}

/// Generates a Triple DES key: 16 bytes for `key_option = 2`, 24 bytes for `key_option = 3`.
///
/// Subkey independence is not enforced; see [`split_3des_key`].
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for any other option, or
/// [`Error::Entropy`] if the OS random source cannot be read.
pub fn generate_3des_key(key_option: u8) -> Result<KeyBytes> {
    generate_3des_key_with(TripleDesKeyOption::try_from(key_option)?)
}

/// Generates an AES key of the given size.
///
/// # Errors
///
/// Returns [`Error::Entropy`] if the OS random source cannot be read.
pub fn generate_aes_key_with(size: AesKeySize) -> Result<KeyBytes> {
    debug!("Generating AES-{} key.", size.bits());
    random_bytes(size.key_len()).map(KeyBytes)
}

/// Generates an AES key of `key_size / 8` bytes.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] unless `key_size` is 128, 192 or 256,
/// or [`Error::Entropy`] if the OS random source cannot be read.
pub fn generate_aes_key(key_size: u16) -> Result<KeyBytes> {
    generate_aes_key_with(AesKeySize::try_from(key_size)?)
}

/// Generates a random IV of `block_size` bytes.
///
/// Any size is accepted, including ones that match no real cipher; pass
/// [`DES_BLOCK_SIZE`] or [`AES_BLOCK_SIZE`].
///
/// # Errors
///
/// Returns [`Error::Entropy`] if the OS random source cannot be read.
pub fn generate_iv(block_size: usize) -> Result<IvBytes> {
    if block_size != DES_BLOCK_SIZE && block_size != AES_BLOCK_SIZE {
        warn!("Generating IV of {block_size} bytes, which matches neither DES nor AES.");
    }
    debug!("Generating {block_size}-byte IV.");
    random_bytes(block_size).map(IvBytes)
}

/// Slices a 3DES key into its K1, K2 and K3 subkeys.
///
/// A 16-byte key yields `K3 = K1`; a 24-byte key yields three distinct slices.
/// Parity and subkey uniqueness are left to the caller.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `key` is neither 16 nor 24 bytes.
pub fn split_3des_key(key: &[u8]) -> Result<[&[u8]; 3]> {
    match key.len() {
        16 => {
            let (k1, k2) = key.split_at(DES_KEY_LEN);
            Ok([k1, k2, k1])
        }
        24 => {
            let (k1, rest) = key.split_at(DES_KEY_LEN);
            let (k2, k3) = rest.split_at(DES_KEY_LEN);
            Ok([k1, k2, k3])
        }
        other => Err(Error::InvalidArgument(format!(
            "3DES key must be 16 or 24 bytes, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_option_conversion() {
        assert_eq!(TripleDesKeyOption::try_from(2u8).unwrap(), TripleDesKeyOption::TwoKey);
        assert_eq!(TripleDesKeyOption::try_from(3u8).unwrap(), TripleDesKeyOption::ThreeKey);
        for bad in [0u8, 1, 4, 255] {
            assert!(matches!(
                TripleDesKeyOption::try_from(bad),
                Err(Error::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_aes_size_conversion() {
        for size in [AesKeySize::Aes128, AesKeySize::Aes192, AesKeySize::Aes256] {
            assert_eq!(AesKeySize::try_from(size.bits()).unwrap(), size);
            assert_eq!(size.key_len() * 8, usize::from(size.bits()));
        }
        assert!(AesKeySize::try_from(64u16).is_err());
        assert!(AesKeySize::try_from(512u16).is_err());
    }

    #[test]
    fn test_debug_does_not_leak_bytes() {
        let key = KeyBytes(vec![0xab; 8]);
        let rendered = format!("{key:?}");
        assert!(rendered.contains("len: 8"));
        assert!(!rendered.contains("171"));
        assert!(!rendered.to_lowercase().contains("ab, "));
    }

    #[test]
    fn test_split_two_key_reuses_k1() {
        let key: Vec<u8> = (0..16).collect();
        let [k1, k2, k3] = split_3des_key(&key).unwrap();
        assert_eq!(k1, &key[..8]);
        assert_eq!(k2, &key[8..]);
        assert_eq!(k3, k1);
    }

    #[test]
    fn test_split_three_key() {
        let key: Vec<u8> = (0..24).collect();
        let [k1, k2, k3] = split_3des_key(&key).unwrap();
        assert_eq!(k1, &key[..8]);
        assert_eq!(k2, &key[8..16]);
        assert_eq!(k3, &key[16..]);
    }

    #[test]
    fn test_split_rejects_other_lengths() {
        assert!(split_3des_key(&[0u8; 8]).is_err());
        assert!(split_3des_key(&[0u8; 32]).is_err());
    }
}
