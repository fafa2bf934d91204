// File:    padding.rs
// Author:  apezoo
// Date:    2026-10-19
//
// Description: Manual PKCS#7 padding and validated unpadding for block ciphers.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! PKCS#7 padding (RFC 5652, section 6.3).
//!
//! If `N` bytes are missing to complete the last block, `N` bytes of value
//! `N` are appended. A message that is already block-aligned receives a
//! whole extra block, so there is always at least one padding byte.

use log::debug;

use crate::error::{Error, PaddingError, Result};

/// Block size used when the caller has no particular cipher in mind (DES).
pub const DEFAULT_BLOCK_SIZE: usize = 8;
/// Largest block size whose padding length still fits in one byte.
pub const MAX_BLOCK_SIZE: usize = u8::MAX as usize;

fn check_block_size(block_size: usize) -> Result<()> {
    if (1..=MAX_BLOCK_SIZE).contains(&block_size) {
        Ok(())
    } else {
        Err(Error::InvalidBlockSize(block_size))
    }
}

/// Number of padding bytes PKCS#7 appends to a message of `data_len` bytes.
///
/// Always in `1..=block_size`.
///
/// # Errors
///
/// Returns [`Error::InvalidBlockSize`] unless `block_size` is in `1..=255`.
pub fn padding_len(block_size: usize, data_len: usize) -> Result<u8> {
    check_block_size(block_size)?;
    let needed = block_size - data_len % block_size;
    u8::try_from(needed).map_err(|_| Error::InvalidBlockSize(block_size))
}

/// Pads `data` to a multiple of `block_size`.
///
/// ```
/// use blockprep_core::padding::pkcs7_pad;
///
/// let padded = pkcs7_pad(b"HOLA", 8).unwrap();
/// assert_eq!(padded, b"HOLA\x04\x04\x04\x04");
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidBlockSize`] unless `block_size` is in `1..=255`.
pub fn pkcs7_pad(data: &[u8], block_size: usize) -> Result<Vec<u8>> {
    let pad = padding_len(block_size, data.len())?;
    let mut padded = Vec::with_capacity(data.len() + usize::from(pad));
    padded.extend_from_slice(data);
    padded.resize(data.len() + usize::from(pad), pad);
    Ok(padded)
}

/// Checks the trailing padding of `data` against `max` and returns the
/// unpadded prefix.
fn strip(data: &[u8], max: usize) -> std::result::Result<&[u8], PaddingError> {
    let &value = data.last().ok_or(PaddingError::Empty)?;
    let pad = usize::from(value);
    if pad == 0 || pad > max {
        return Err(PaddingError::InvalidValue { value, max });
    }

    let body_len = data.len() - pad;
    if let Some(offset) = data[body_len..].iter().position(|&b| b != value) {
        return Err(PaddingError::Mismatch {
            value,
            position: body_len + offset,
        });
    }
    Ok(&data[..body_len])
}

/// Removes PKCS#7 padding from `data`.
///
/// The trailing byte gives the padding length; it must be between 1 and
/// the message length, and every padding byte must carry that same value.
///
/// # Errors
///
/// Returns [`Error::Padding`] if the input is empty or the padding is malformed.
pub fn pkcs7_unpad(data: &[u8]) -> Result<&[u8]> {
    strip(data, data.len()).map_err(|e| {
        debug!("Rejected padding on {}-byte message: {e}", data.len());
        Error::from(e)
    })
}

/// Removes PKCS#7 padding from a message produced with a known block size.
///
/// On top of the checks of [`pkcs7_unpad`], the message must be a whole
/// number of blocks and the padding no longer than one block.
///
/// # Errors
///
/// Returns [`Error::InvalidBlockSize`] for a block size outside `1..=255`
/// and [`Error::Padding`] for malformed input.
pub fn pkcs7_unpad_block(data: &[u8], block_size: usize) -> Result<&[u8]> {
    check_block_size(block_size)?;
    let checked = if data.len() % block_size == 0 {
        strip(data, block_size.min(data.len()))
    } else {
        Err(PaddingError::Misaligned {
            len: data.len(),
            block_size,
        })
    };
    checked.map_err(|e| {
        debug!("Rejected padding on {}-byte message: {e}", data.len());
        Error::from(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_len_range() {
        assert_eq!(padding_len(8, 0).unwrap(), 8);
        assert_eq!(padding_len(8, 7).unwrap(), 1);
        assert_eq!(padding_len(8, 8).unwrap(), 8);
        assert_eq!(padding_len(1, 5).unwrap(), 1);
        assert_eq!(padding_len(255, 0).unwrap(), 255);
    }

    #[test]
    fn test_invalid_block_sizes() {
        assert!(matches!(pkcs7_pad(b"x", 0), Err(Error::InvalidBlockSize(0))));
        assert!(matches!(pkcs7_pad(b"x", 256), Err(Error::InvalidBlockSize(256))));
        assert!(matches!(
            pkcs7_unpad_block(&[1u8; 8], 0),
            Err(Error::InvalidBlockSize(0))
        ));
    }

    #[test]
    fn test_empty_input_pads_to_full_block() {
        assert_eq!(pkcs7_pad(b"", 16).unwrap(), vec![16u8; 16]);
    }

    #[test]
    fn test_unpad_empty() {
        assert!(matches!(
            pkcs7_unpad(b""),
            Err(Error::Padding(PaddingError::Empty))
        ));
    }

    #[test]
    fn test_unpad_zero_value() {
        assert!(matches!(
            pkcs7_unpad(b"abc\x00"),
            Err(Error::Padding(PaddingError::InvalidValue { value: 0, max: 4 }))
        ));
    }

    #[test]
    fn test_unpad_value_longer_than_message() {
        assert!(matches!(
            pkcs7_unpad(b"a\x05"),
            Err(Error::Padding(PaddingError::InvalidValue { value: 5, max: 2 }))
        ));
    }

    #[test]
    fn test_unpad_mismatch_reports_position() {
        let err = pkcs7_unpad(b"HOLA\x04\x03\x04\x04").unwrap_err();
        assert!(matches!(
            err,
            Error::Padding(PaddingError::Mismatch { value: 4, position: 5 })
        ));
    }

    #[test]
    fn test_unpad_whole_message_of_padding() {
        assert_eq!(pkcs7_unpad(&[3u8; 3]).unwrap(), b"");
    }

    #[test]
    fn test_unpad_block_misaligned() {
        assert!(matches!(
            pkcs7_unpad_block(b"HOLA\x04\x04\x04", 8),
            Err(Error::Padding(PaddingError::Misaligned { len: 7, block_size: 8 }))
        ));
    }

    #[test]
    fn test_unpad_block_rejects_padding_longer_than_block() {
        // Valid for the permissive check, but 9 > block size 8.
        let data = [9u8; 16];
        assert!(pkcs7_unpad(&data).is_ok());
        assert!(matches!(
            pkcs7_unpad_block(&data, 8),
            Err(Error::Padding(PaddingError::InvalidValue { value: 9, max: 8 }))
        ));
    }

    #[test]
    fn test_unpad_block_empty() {
        assert!(matches!(
            pkcs7_unpad_block(b"", 8),
            Err(Error::Padding(PaddingError::Empty))
        ));
    }
}
