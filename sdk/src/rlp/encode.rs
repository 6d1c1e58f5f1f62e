//! Encoding side of the canonical format.

use super::{RlpError, RlpItem};
use crate::config::{RLP_LIST_OFFSET, RLP_MAX_LENGTH_BYTES, RLP_SHORT_LIMIT, RLP_STRING_OFFSET};

/// Encodes an item tree into its canonical bytes.
///
/// # Errors
///
/// [`RlpError::EncodingOverflow`] if any length needs more than eight
/// bytes. On 64-bit targets a `usize` always fits, so this is a guard for
/// wider platforms rather than a reachable path.
pub fn encode(item: &RlpItem) -> Result<Vec<u8>, RlpError> {
    let mut out = Vec::with_capacity(encoded_hint(item));
    encode_into(item, &mut out)?;
    Ok(out)
}

fn encode_into(item: &RlpItem, out: &mut Vec<u8>) -> Result<(), RlpError> {
    match item {
        RlpItem::Bytes(data) => {
            if data.len() == 1 && data[0] < RLP_STRING_OFFSET {
                out.push(data[0]);
                return Ok(());
            }
            write_header(data.len(), RLP_STRING_OFFSET, out)?;
            out.extend_from_slice(data);
        }
        RlpItem::List(items) => {
            let mut body = Vec::new();
            for child in items {
                encode_into(child, &mut body)?;
            }
            write_header(body.len(), RLP_LIST_OFFSET, out)?;
            out.extend_from_slice(&body);
        }
    }
    Ok(())
}

/// Writes the tag byte, plus the big-endian length for long payloads.
fn write_header(len: usize, offset: u8, out: &mut Vec<u8>) -> Result<(), RlpError> {
    if len <= RLP_SHORT_LIMIT {
        out.push(offset + len as u8);
        return Ok(());
    }
    let len_bytes = length_bytes(len)?;
    out.push(offset + RLP_SHORT_LIMIT as u8 + len_bytes.len() as u8);
    out.extend_from_slice(&len_bytes);
    Ok(())
}

fn length_bytes(len: usize) -> Result<Vec<u8>, RlpError> {
    let wide = u64::try_from(len).map_err(|_| RlpError::EncodingOverflow {
        length: len as u128,
    })?;
    let be = wide.to_be_bytes();
    let leading = be.iter().take_while(|&&b| b == 0).count();
    let significant = &be[leading..];
    if significant.len() > RLP_MAX_LENGTH_BYTES {
        return Err(RlpError::EncodingOverflow {
            length: len as u128,
        });
    }
    Ok(significant.to_vec())
}

// Rough capacity guess so the common case allocates once.
fn encoded_hint(item: &RlpItem) -> usize {
    match item {
        RlpItem::Bytes(b) => b.len() + 9,
        RlpItem::List(items) => items.iter().map(encoded_hint).sum::<usize>() + 9,
    }
}
