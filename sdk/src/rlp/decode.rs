//! Strict decoding of canonical bytes.
//!
//! Anything [`super::encode`] would not have produced is rejected, so a
//! decoded item re-encodes to exactly the input.

use super::{RlpError, RlpItem};
use crate::config::{RLP_LIST_OFFSET, RLP_MAX_DEPTH, RLP_SHORT_LIMIT, RLP_STRING_OFFSET};

/// Decodes a single top-level item. The whole input must be consumed, and
/// lists may nest at most [`RLP_MAX_DEPTH`] levels.
pub fn decode(input: &[u8]) -> Result<RlpItem, RlpError> {
    let (item, rest) = decode_item(input, 0)?;
    if !rest.is_empty() {
        return Err(RlpError::TrailingBytes { count: rest.len() });
    }
    Ok(item)
}

/// `depth` counts the lists enclosing `input`.
fn decode_item(input: &[u8], depth: usize) -> Result<(RlpItem, &[u8]), RlpError> {
    let tag = *input.first().ok_or(RlpError::UnexpectedEnd { needed: 1 })?;
    let rest = &input[1..];

    if tag < RLP_STRING_OFFSET {
        return Ok((RlpItem::Bytes(vec![tag]), rest));
    }

    if tag < RLP_LIST_OFFSET {
        let (len, rest) = read_length(tag - RLP_STRING_OFFSET, rest)?;
        let (body, rest) = split(rest, len)?;
        if len == 1 && body[0] < RLP_STRING_OFFSET {
            return Err(RlpError::NonCanonical("single low byte carries a prefix"));
        }
        return Ok((RlpItem::Bytes(body.to_vec()), rest));
    }

    if depth >= RLP_MAX_DEPTH {
        return Err(RlpError::TooDeep {
            limit: RLP_MAX_DEPTH,
        });
    }
    let (len, rest) = read_length(tag - RLP_LIST_OFFSET, rest)?;
    let (mut body, rest) = split(rest, len)?;
    let mut items = Vec::new();
    while !body.is_empty() {
        let (item, remaining) = decode_item(body, depth + 1)?;
        items.push(item);
        body = remaining;
    }
    Ok((RlpItem::List(items), rest))
}

/// Interprets the tag relative to its space (string or list) and returns
/// the payload length plus the remaining input.
fn read_length(relative: u8, input: &[u8]) -> Result<(usize, &[u8]), RlpError> {
    let relative = relative as usize;
    if relative <= RLP_SHORT_LIMIT {
        return Ok((relative, input));
    }

    let len_of_len = relative - RLP_SHORT_LIMIT;
    let (len_bytes, rest) = split(input, len_of_len)?;
    if len_bytes[0] == 0 {
        return Err(RlpError::NonCanonical("length has leading zero bytes"));
    }
    let len = len_bytes
        .iter()
        .try_fold(0usize, |acc, &b| acc.checked_mul(256).map(|v| v | b as usize))
        .ok_or(RlpError::EncodingOverflow {
            length: u128::MAX,
        })?;
    if len <= RLP_SHORT_LIMIT {
        return Err(RlpError::NonCanonical("long form used for a short payload"));
    }
    Ok((len, rest))
}

fn split(input: &[u8], len: usize) -> Result<(&[u8], &[u8]), RlpError> {
    if input.len() < len {
        return Err(RlpError::UnexpectedEnd {
            needed: len - input.len(),
        });
    }
    Ok(input.split_at(len))
}
