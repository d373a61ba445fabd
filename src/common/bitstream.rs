use std::{fmt::Display, mem};

use log::warn;
use num_traits::PrimInt;

use super::error::{QRError, QRResult};

// Bit stream
//------------------------------------------------------------------------------

/// Append-only bit buffer. Bits are packed MSB first, so the first bit pushed lands in the
/// highest bit of `data[0]`. A trailing partial byte is always zero in its unused low bits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bit_capacity: usize) -> Self {
        Self { data: Vec::with_capacity(bit_capacity.div_ceil(8)), len: 0 }
    }

    pub fn from_bytes(inp: &[u8]) -> Self {
        Self { data: inp.to_vec(), len: inp.len() << 3 }
    }

    /// Creates a `size` bit field holding the low order bits of `value`. A value wider than
    /// `size` is truncated with a warning.
    pub fn from_int<T>(value: T, size: usize) -> Self
    where
        T: PrimInt + Display,
    {
        let mut bs = Self::with_capacity(size);
        bs.push_bits(value, size);
        bs
    }

    /// Strict counterpart of [`BitStream::from_int`]: rejects values wider than `size`.
    pub fn try_from_int<T>(value: T, size: usize) -> QRResult<Self>
    where
        T: PrimInt + Display,
    {
        if significant_bits(value) > size {
            let value = value.to_u64().unwrap_or(u64::MAX);
            return Err(QRError::InvalidBitWidth { value, size });
        }
        Ok(Self::from_int(value, size))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.data.clone()
    }

    pub fn bit(&self, index: usize) -> bool {
        assert!(index < self.len, "Bit index out of range: Index {index}, Length {}", self.len);
        (self.data[index >> 3] >> (7 - (index & 7))) & 1 == 1
    }

    pub fn align_to_byte(&self) -> usize {
        (8 - (self.len & 7)) & 7
    }

    pub fn iter(&self) -> BitIter<'_> {
        BitIter { bs: self, cursor: 0 }
    }
}

fn significant_bits<T: PrimInt>(value: T) -> usize {
    mem::size_of::<T>() * 8 - value.leading_zeros() as usize
}

// Push bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Display,
    {
        debug_assert!(size <= 64, "Bits wider than 64 can't be pushed: Size {size}");

        let mut value = bits.to_u64().unwrap_or(0);
        if significant_bits(bits) > size {
            warn!("Value {bits} doesn't fit in {size} bits, truncating");
            value &= if size >= 64 { u64::MAX } else { (1 << size) - 1 };
        }

        let mut remaining = size;
        while remaining > 0 {
            let offset = self.len & 7;
            if offset == 0 {
                self.data.push(0);
            }
            let free = 8 - offset;
            let take = free.min(remaining);
            let chunk = ((value >> (remaining - take)) & ((1 << take) - 1)) as u8;
            if let Some(last) = self.data.last_mut() {
                *last |= chunk << (free - take);
            }
            self.len += take;
            remaining -= take;
        }
    }

    pub fn push(&mut self, bit: bool) {
        self.push_bits(bit as u8, 1);
    }

    pub fn extend(&mut self, arr: &[u8]) {
        if self.len & 7 == 0 {
            self.data.extend_from_slice(arr);
            self.len += arr.len() << 3;
        } else {
            arr.iter().for_each(|b| self.push_bits(*b, 8));
        }
    }

    /// Concatenates `other` bit for bit. When `self` ends mid byte, every incoming byte is
    /// shifted into the gap left by the last partial byte.
    pub fn append(&mut self, other: &BitStream) {
        let full = other.len >> 3;
        self.extend(&other.data[..full]);
        let tail = other.len & 7;
        if tail > 0 {
            self.push_bits(other.data[full] >> (8 - tail), tail);
        }
    }
}


// Iterate bits of bit stream
//------------------------------------------------------------------------------

pub struct BitIter<'a> {
    bs: &'a BitStream,
    cursor: usize,
}

impl Iterator for BitIter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.bs.len {
            return None;
        }
        let bit = self.bs.bit(self.cursor);
        self.cursor += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.bs.len - self.cursor;
        (rem, Some(rem))
    }
}

impl ExactSizeIterator for BitIter<'_> {}

impl<'a> IntoIterator for &'a BitStream {
    type Item = bool;
    type IntoIter = BitIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod bit_stream_proptests {
    use proptest::prelude::*;

    use super::BitStream;

    fn stream_strategy() -> impl Strategy<Value = BitStream> {
        prop::collection::vec((any::<u16>(), 0usize..=16), 0..12).prop_map(|fields| {
            let mut bs = BitStream::new();
            for (v, sz) in fields {
                let v = if sz == 16 { v } else { v & ((1 << sz) - 1) };
                bs.push_bits(v, sz);
            }
            bs
        })
    }

    proptest! {
        #[test]
        fn proptest_append_associativity(
            a in stream_strategy(),
            b in stream_strategy(),
            c in stream_strategy(),
        ) {
            let mut left = a.clone();
            left.append(&b);
            left.append(&c);

            let mut bc = b.clone();
            bc.append(&c);
            let mut right = a.clone();
            right.append(&bc);

            prop_assert_eq!(left.len(), a.len() + b.len() + c.len());
            prop_assert_eq!(left.bytes(), right.bytes());
        }

        #[test]
        fn proptest_append_preserves_bits(a in stream_strategy(), b in stream_strategy()) {
            let mut ab = a.clone();
            ab.append(&b);
            let expected = a.iter().chain(b.iter()).collect::<Vec<_>>();
            prop_assert_eq!(ab.iter().collect::<Vec<_>>(), expected);
        }
    }
}
