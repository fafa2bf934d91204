// File:    lib.rs
// Author:  apezoo
// Date:    2026-10-19
//
// Description: The main library crate for blockprep-core, providing key material generation and PKCS#7 padding.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! # Blockprep Core Library
//!
//! This library prepares input for block ciphers: it generates random keys
//! and IVs for DES, 3DES and AES from the OS CSPRNG, and applies or removes
//! PKCS#7 padding. No cipher is implemented here.

/// Error types shared by every module.
pub mod error;
/// Random keys and initialization vectors.
pub mod key_material;
/// PKCS#7 padding and unpadding.
pub mod padding;

pub use error::{Error, PaddingError, Result};
pub use key_material::{
    AesKeySize, IvBytes, KeyBytes, TripleDesKeyOption, generate_3des_key, generate_aes_key,
    generate_des_key, generate_iv, split_3des_key,
};
pub use padding::{pkcs7_pad, pkcs7_unpad, pkcs7_unpad_block};
