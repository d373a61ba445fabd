use super::{
    error::{QRError, QRResult},
    mask::MaskPattern,
    metadata::{ECLevel, Version},
};

// Format information
//------------------------------------------------------------------------------

pub const FORMAT_INFO_BIT_LEN: usize = 15;

/// Generator of the BCH(15,5) code, x^10 + x^8 + x^5 + x^4 + x^2 + x + 1.
pub const FORMAT_INFO_GENERATOR: u16 = 0b101_0011_0111;

pub const FORMAT_MASK: u16 = 0b101_0100_0001_0010;

/// Remainder of `data * x^10` divided by `poly` over GF(2), i.e. the 10 parity bits of a
/// 5 bit word.
pub fn encode_bch15_5(data: u16, poly: u16) -> u16 {
    debug_assert!(data < 1 << 5, "Format data wider than 5 bits: {data:#b}");

    let mut rem = data << 10;
    for i in (10..15).rev() {
        if rem & (1 << i) != 0 {
            rem ^= poly << (i - 10);
        }
    }
    rem
}

/// 15 bit format word for an EC level and mask, already XORed with the format mask.
pub fn format_info(ecl: ECLevel, mask: u8) -> QRResult<u16> {
    let mask = MaskPattern::new(mask)?;
    Ok(format_word(ecl, mask))
}

pub(crate) fn format_word(ecl: ECLevel, mask: MaskPattern) -> u16 {
    let data = (ecl.format_bits() << 3) | *mask as u16;
    let parity = encode_bch15_5(data, FORMAT_INFO_GENERATOR);
    ((data << 10) | parity) ^ FORMAT_MASK
}


// Version information
//------------------------------------------------------------------------------

pub const VERSION_INFO_BIT_LEN: usize = 18;

/// Generator of the Golay(18,6) code.
pub const VERSION_INFO_GENERATOR: u32 = 0b1_1111_0010_0101;

fn golay_remainder(mut word: u32) -> u32 {
    for i in (12..VERSION_INFO_BIT_LEN).rev() {
        if word & (1 << i) != 0 {
            word ^= VERSION_INFO_GENERATOR << (i - 12);
        }
    }
    word
}

/// 18 bit version word. Only versions 7 to 40 carry version information.
pub fn version_info(ver: Version) -> QRResult<u32> {
    match ver {
        Version::Normal(v @ 7..=40) => {
            let data = (v as u32) << 12;
            Ok(data | golay_remainder(data))
        }
        _ => Err(QRError::InvalidVersion),
    }
}

/// Zero for a valid version word.
pub fn version_info_syndrome(info: u32) -> u32 {
    golay_remainder(info & ((1 << VERSION_INFO_BIT_LEN) - 1))
}
