use std::ops::Deref;

use super::{galois::GaloisField, rs};
use crate::common::metadata::{ECLevel, Version};

// Blocks
//------------------------------------------------------------------------------

/// Splits the padded data codewords into RS blocks, group by group in table order.
pub fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<&[u8]> {
    let groups = version.block_groups(ec_level);
    let total_size = groups.iter().map(|g| g.data_codewords()).sum::<usize>();

    debug_assert!(
        total_size == data.len(),
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        total_size
    );

    let mut data_blocks = Vec::with_capacity(version.ec_info(ec_level).num_blocks());
    let mut rest = data;
    for g in groups {
        let (head, tail) = rest.split_at(g.data_codewords());
        data_blocks.extend(head.chunks(g.data_codewords_per_block));
        rest = tail;
    }
    data_blocks
}

/// Splits the data into blocks and computes the error correction codewords of each.
pub fn ecc(data: &[u8], version: Version, ec_level: ECLevel) -> (Vec<&[u8]>, Vec<Vec<u8>>) {
    let data_blocks = blockify(data, version, ec_level);

    let gf = GaloisField::get();
    let ecc_size_per_block = version.ecc_per_block(ec_level);
    let ecc_blocks =
        data_blocks.iter().map(|b| rs::encode(b, ecc_size_per_block, gf)).collect::<Vec<_>>();

    (data_blocks, ecc_blocks)
}

/// Reads blocks column by column, shorter blocks drop out once exhausted.
pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}
