pub use encode::*;

// Encoder
//------------------------------------------------------------------------------

pub mod encode {
    use log::debug;

    use crate::common::{
        bitstream::BitStream,
        codec::Mode,
        error::{QRError, QRResult},
        metadata::{ECLevel, Version},
    };

    use super::writer::{pad_remaining_capacity, push_header, push_terminator};

    /// Encodes `data` in the most compact single mode and picks the smallest version it fits.
    /// The returned stream fills the data capacity of that version exactly.
    pub fn encode(data: &[u8], ecl: ECLevel) -> QRResult<(BitStream, Version, Mode)> {
        if data.is_empty() {
            return Err(QRError::EmptyData);
        }
        let mode = select_mode(data);
        let payload = encode_payload(mode, data)?;
        let ver = resolve_version(mode, ecl, payload.len())?;
        debug!("Resolved version {ver} for {} bits of {mode:?} data", payload.len());
        let bs = assemble(mode, data.len(), &payload, ver, ecl)?;
        Ok((bs, ver, mode))
    }

    /// Same as [`encode`] with a caller chosen version. Fails with
    /// [`QRError::CapacityOverflow`] when the data doesn't fit.
    pub fn encode_with_version(
        data: &[u8],
        ver: Version,
        ecl: ECLevel,
    ) -> QRResult<(BitStream, Mode)> {
        if data.is_empty() {
            return Err(QRError::EmptyData);
        }
        let ver = ver.validate()?;
        let mode = select_mode(data);
        let payload = encode_payload(mode, data)?;
        check_capacity(ver, mode, ecl, payload.len())?;
        let bs = assemble(mode, data.len(), &payload, ver, ecl)?;
        Ok((bs, mode))
    }

    fn assemble(
        mode: Mode,
        char_cnt: usize,
        payload: &BitStream,
        ver: Version,
        ecl: ECLevel,
    ) -> QRResult<BitStream> {
        let bit_capacity = ver.data_bit_capacity(ecl);
        let mut bs = BitStream::with_capacity(bit_capacity);
        push_header(mode, char_cnt, ver, &mut bs)?;
        bs.append(payload);
        push_terminator(&mut bs, bit_capacity);
        pad_remaining_capacity(&mut bs, bit_capacity);
        Ok(bs)
    }

    /// Most compact mode able to represent every byte of `data`.
    pub fn select_mode(data: &[u8]) -> Mode {
        if data.iter().all(|b| Mode::Numeric.contains(*b)) {
            Mode::Numeric
        } else if data.iter().all(|b| Mode::Alphanumeric.contains(*b)) {
            Mode::Alphanumeric
        } else {
            Mode::Byte
        }
    }

    pub fn encode_payload(mode: Mode, data: &[u8]) -> QRResult<BitStream> {
        match mode {
            Mode::Numeric => encode_numeric(data),
            Mode::Alphanumeric => encode_alphanumeric(data),
            Mode::Byte => Ok(encode_byte(data)),
            Mode::Kanji | Mode::Eci | Mode::StructuredAppend => Err(QRError::UnsupportedMode),
        }
    }

    pub fn encode_numeric(data: &[u8]) -> QRResult<BitStream> {
        if !data.iter().all(|b| Mode::Numeric.contains(*b)) {
            return Err(QRError::InvalidChar);
        }
        let mut bs = BitStream::with_capacity(Mode::Numeric.encoded_len(data.len()));
        for chunk in data.chunks(3) {
            let len = Mode::Numeric.encoded_len(chunk.len());
            bs.push_bits(Mode::Numeric.encode_chunk(chunk), len);
        }
        Ok(bs)
    }

    pub fn encode_alphanumeric(data: &[u8]) -> QRResult<BitStream> {
        if !data.iter().all(|b| Mode::Alphanumeric.contains(*b)) {
            return Err(QRError::InvalidChar);
        }
        let mut bs = BitStream::with_capacity(Mode::Alphanumeric.encoded_len(data.len()));
        for chunk in data.chunks(2) {
            let len = Mode::Alphanumeric.encoded_len(chunk.len());
            bs.push_bits(Mode::Alphanumeric.encode_chunk(chunk), len);
        }
        Ok(bs)
    }

    pub fn encode_byte(data: &[u8]) -> BitStream {
        BitStream::from_bytes(data)
    }

    fn required_bits(ver: Version, mode: Mode, payload_bits: usize) -> QRResult<usize> {
        Ok(ver.mode_bits() + ver.char_cnt_bits(mode)? + payload_bits)
    }

    /// Smallest full size version whose data capacity holds the header and payload.
    pub fn resolve_version(mode: Mode, ecl: ECLevel, payload_bits: usize) -> QRResult<Version> {
        for v in 1..=40 {
            let ver = Version::Normal(v);
            if required_bits(ver, mode, payload_bits)? <= ver.data_bit_capacity(ecl) {
                return Ok(ver);
            }
        }
        Err(QRError::DataTooLong)
    }

    pub fn check_capacity(
        ver: Version,
        mode: Mode,
        ecl: ECLevel,
        payload_bits: usize,
    ) -> QRResult<()> {
        let required = required_bits(ver, mode, payload_bits)?;
        let available = ver.data_bit_capacity(ecl);
        if required > available {
            return Err(QRError::CapacityOverflow { required, available });
        }
        Ok(())
    }


}

// Writer for encoded data
//------------------------------------------------------------------------------

pub(super) mod writer {
    use crate::common::{
        bitstream::BitStream,
        codec::{Mode, PADDING_CODEWORDS},
        error::QRResult,
        metadata::Version,
    };

    pub fn push_header(
        mode: Mode,
        char_cnt: usize,
        ver: Version,
        out: &mut BitStream,
    ) -> QRResult<()> {
        let len_bits = ver.char_cnt_bits(mode)?;
        debug_assert!(
            char_cnt < (1 << len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {len_bits}"
        );
        out.push_bits(mode as u8, ver.mode_bits());
        out.push_bits(char_cnt, len_bits);
        Ok(())
    }

    pub fn push_terminator(out: &mut BitStream, bit_capacity: usize) {
        let bit_len = out.len();
        if bit_len < bit_capacity {
            let term_len = std::cmp::min(4, bit_capacity - bit_len);
            out.push_bits(0, term_len);
        }
    }

    pub fn pad_remaining_capacity(out: &mut BitStream, bit_capacity: usize) {
        push_padding_bits(out);
        push_padding_codewords(out, bit_capacity);
        debug_assert!(
            out.len() == bit_capacity,
            "Padded length doesn't match capacity: Length {}, Capacity {bit_capacity}",
            out.len()
        );
    }

    fn push_padding_bits(out: &mut BitStream) {
        let padding_bits_len = out.align_to_byte();
        if padding_bits_len > 0 {
            out.push_bits(0, padding_bits_len);
        }
    }

    fn push_padding_codewords(out: &mut BitStream, bit_capacity: usize) {
        debug_assert!(
            out.align_to_byte() == 0,
            "Bit offset should be zero before padding codewords: {}",
            out.len() & 7
        );

        let remain_byte_capacity = bit_capacity.saturating_sub(out.len()) >> 3;
        PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
            out.push_bits(pc, 8);
        });
    }

    #[cfg(test)]
    mod writer_tests {
        use super::{
            push_header, push_padding_bits, push_padding_codewords, push_terminator,
            PADDING_CODEWORDS,
        };
        use crate::common::{
            bitstream::BitStream,
            codec::Mode,
            metadata::{ECLevel, Version},
        };

        #[test]
        fn test_push_header_v1() {
            let ver = Version::Normal(1);
            let exp_vecs: Vec<Vec<u8>> = vec![
                vec![0b00011111, 0b11111100],
                vec![0b00101111, 0b11111000],
                vec![0b01001111, 0b11110000],
            ];
            let modes = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];
            let counts = [1023, 511, 255];
            for ((mode, cnt), exp_vec) in modes.iter().zip(counts.iter()).zip(exp_vecs.iter()) {
                let mut bs = BitStream::new();
                push_header(*mode, *cnt, ver, &mut bs).unwrap();
                assert_eq!(bs.data(), exp_vec);
            }
        }

        #[test]
        fn test_push_header_v10() {
            let ver = Version::Normal(10);
            let exp_vecs: Vec<Vec<u8>> = vec![
                vec![0b00011111, 0b11111111],
                vec![0b00101111, 0b11111110],
                vec![0b01001111, 0b11111111, 0b11110000],
            ];
            let modes = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];
            let counts = [4095, 2047, 65535];
            for ((mode, cnt), exp_vec) in modes.iter().zip(counts.iter()).zip(exp_vecs.iter()) {
                let mut bs = BitStream::new();
                push_header(*mode, *cnt, ver, &mut bs).unwrap();
                assert_eq!(bs.data(), exp_vec);
            }
        }

        #[test]
        fn test_push_header_v27() {
            let ver = Version::Normal(27);
            let exp_vecs: Vec<Vec<u8>> = vec![
                vec![0b00011111, 0b11111111, 0b11000000],
                vec![0b00101111, 0b11111111, 0b10000000],
                vec![0b01001111, 0b11111111, 0b11110000],
            ];
            let modes = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];
            let counts = [16383, 8191, 65535];
            for ((mode, cnt), exp_vec) in modes.iter().zip(counts.iter()).zip(exp_vecs.iter()) {
                let mut bs = BitStream::new();
                push_header(*mode, *cnt, ver, &mut bs).unwrap();
                assert_eq!(bs.data(), exp_vec);
            }
        }

        #[test]
        fn test_push_terminator() {
            let bit_capacity = Version::Normal(1).data_bit_capacity(ECLevel::L);
            let capacity = bit_capacity >> 3;
            let mut bs = BitStream::new();
            bs.push_bits(0b1, 1);
            push_terminator(&mut bs, bit_capacity);
            assert_eq!(bs.data(), vec![0b10000000]);
            assert_eq!(bs.len(), 5);
            let mut bs = BitStream::new();
            for _ in 0..capacity {
                bs.push_bits(0b11111111, 8);
            }
            push_terminator(&mut bs, bit_capacity);
            assert_eq!(bs.len(), bit_capacity);
        }

        #[test]
        fn test_short_terminator() {
            let bit_capacity = 16;
            let mut bs = BitStream::new();
            bs.push_bits(0b1111111111111u16, 14);
            push_terminator(&mut bs, bit_capacity);
            assert_eq!(bs.len(), 16);
        }

        #[test]
        fn test_push_padding_bits() {
            let mut bs = BitStream::new();
            bs.push_bits(0b1, 1);
            push_padding_bits(&mut bs);
            assert_eq!(bs.data(), vec![0b10000000]);
            assert_eq!(bs.len(), 8);
        }

        #[test]
        fn test_push_padding_codewords() {
            let bit_capacity = Version::Normal(1).data_bit_capacity(ECLevel::L);
            let mut bs = BitStream::new();
            bs.push_bits(0b1, 1);
            push_padding_bits(&mut bs);
            push_padding_codewords(&mut bs, bit_capacity);
            let mut output = vec![0b10000000];
            output.extend(PADDING_CODEWORDS.iter().cycle().take(18));
            assert_eq!(bs.data(), output);
        }
    }
}
