//! FTV wire codec
//!
//! # Binary Format (per series block, all little-endian)
//! ```text
//! [point_count:        u32]
//! [point_count_repeat: u32]   // duplicate of point_count
//! [timestamps:         point_count × f64]
//! [values:             point_count × f64]  // NaN marks a missing sample
//! ```
//!
//! Blocks are concatenated in series-index order with no separators,
//! padding or trailing metadata.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::errors::DecodeError;
use crate::shape::{block_len, SeriesBlock, Synthesized, BLOCK_HEADER_LEN};

/// Pack synthesized arrays into an FTV payload.
///
/// The timestamp sequence is written once per block; every block in one
/// payload carries the same timestamps.
pub fn encode(data: &Synthesized) -> Bytes {
    let num_points = data.num_points();
    let mut buf = BytesMut::with_capacity(data.series.len() * block_len(num_points));

    for values in &data.series {
        debug_assert_eq!(values.len(), num_points);
        buf.put_u32_le(num_points as u32);
        buf.put_u32_le(num_points as u32);
        for &t in &data.timestamps {
            buf.put_f64_le(t);
        }
        for &v in values {
            buf.put_f64_le(v);
        }
    }

    buf.freeze()
}

/// Read an FTV payload back into its blocks.
///
/// Fails on a truncated header or body and on a block whose duplicated
/// point counts disagree.
pub fn decode(payload: &[u8]) -> Result<Vec<SeriesBlock>, DecodeError> {
    let mut buf = payload;
    let mut blocks = Vec::new();

    while buf.has_remaining() {
        let offset = payload.len() - buf.remaining();

        if buf.remaining() < BLOCK_HEADER_LEN {
            return Err(DecodeError::TruncatedHeader { offset });
        }
        let point_count = buf.get_u32_le();
        let point_count_repeat = buf.get_u32_le();
        if point_count != point_count_repeat {
            return Err(DecodeError::CountMismatch {
                offset,
                first: point_count,
                second: point_count_repeat,
            });
        }

        let n = point_count as usize;
        let needed = block_len(n) - BLOCK_HEADER_LEN;
        if buf.remaining() < needed {
            return Err(DecodeError::TruncatedBlock {
                offset,
                needed,
                available: buf.remaining(),
            });
        }

        let timestamps = (0..n).map(|_| buf.get_f64_le()).collect();
        let values = (0..n).map(|_| buf.get_f64_le()).collect();

        blocks.push(SeriesBlock {
            point_count,
            point_count_repeat,
            timestamps,
            values,
        });
    }

    Ok(blocks)
}
