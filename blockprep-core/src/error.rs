// File:    error.rs
// Author:  apezoo
// Date:    2026-10-19
//
// Description: Error taxonomy shared by key material generation and PKCS#7 padding.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Errors returned by `blockprep-core`.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Every way an operation in this crate can fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An unsupported key size, key option or key length was supplied.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A padding block size outside `1..=255`.
    #[error("invalid block size {0}: must be between 1 and 255")]
    InvalidBlockSize(usize),

    /// The input does not carry well-formed PKCS#7 padding.
    #[error(transparent)]
    Padding(#[from] PaddingError),

    /// The operating system's random source could not be read.
    #[error("secure random source failed: {0}")]
    Entropy(#[source] std::io::Error),
}

/// Reasons a padded message is rejected on removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaddingError {
    /// There is no trailing byte to read the padding length from.
    #[error("cannot unpad an empty message")]
    Empty,

    /// The trailing byte is zero or larger than allowed.
    #[error("padding value {value} out of range 1..={max}")]
    InvalidValue {
        /// The trailing byte that was read.
        value: u8,
        /// Largest acceptable padding length for this input.
        max: usize,
    },

    /// One of the padding bytes differs from the padding length.
    #[error("padding byte at offset {position} does not equal {value}")]
    Mismatch {
        /// Expected padding byte.
        value: u8,
        /// Offset of the first offending byte.
        position: usize,
    },

    /// The message length is not a multiple of the block size.
    #[error("message length {len} is not a multiple of block size {block_size}")]
    Misaligned {
        /// Length of the rejected message.
        len: usize,
        /// Block size it was checked against.
        block_size: usize,
    },
}
