use std::{
    fmt::{Display, Formatter},
    ops::{Deref, Not},
    str::FromStr,
};

use super::{
    codec::Mode,
    error::{QRError, QRResult},
    mask::MaskPattern,
    version_db::{BlockGroup, ECInfo, VersionCapacity, ALIGNMENT_PATTERN_POSITIONS, VERSION_DB},
};

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Dark,
    Light,
}

impl Color {
    pub fn select<T>(self, light: T, dark: T) -> T {
        match self {
            Self::Dark => dark,
            Self::Light => light,
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl From<bool> for Color {
    fn from(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Version {
    Micro(usize),
    Normal(usize),
}

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        match self {
            Self::Micro(v) | Self::Normal(v) => v,
        }
    }
}

impl Version {
    /// Accepts full size versions 1 to 40. Micro versions are recognised but the encoder
    /// doesn't support them.
    pub fn validate(self) -> QRResult<Self> {
        match self {
            Self::Normal(1..=40) => Ok(self),
            Self::Micro(1..=4) => Err(QRError::UnsupportedVersion),
            _ => Err(QRError::InvalidVersion),
        }
    }

    pub const fn width(self) -> usize {
        match self {
            Self::Micro(v) => v * 2 + 9,
            Self::Normal(v) => v * 4 + 17,
        }
    }

    pub const fn quiet_zone(self) -> usize {
        match self {
            Self::Micro(_) => 2,
            Self::Normal(_) => 4,
        }
    }

    pub const fn mode_bits(self) -> usize {
        match self {
            Self::Micro(v) => v - 1,
            Self::Normal(_) => 4,
        }
    }

    /// Bit width of the character count indicator.
    pub fn char_cnt_bits(self, mode: Mode) -> QRResult<usize> {
        let bits = match (self, mode) {
            (_, Mode::Eci | Mode::StructuredAppend) => return Err(QRError::UnsupportedMode),
            (Self::Micro(1), Mode::Numeric) => 3,
            (Self::Micro(1), _) => return Err(QRError::UnsupportedMode),
            (Self::Micro(2), Mode::Numeric) => 4,
            (Self::Micro(2), Mode::Alphanumeric) => 3,
            (Self::Micro(2), _) => return Err(QRError::UnsupportedMode),
            (Self::Micro(3), Mode::Numeric) => 5,
            (Self::Micro(3), Mode::Alphanumeric | Mode::Byte) => 4,
            (Self::Micro(3), Mode::Kanji) => 3,
            (Self::Micro(_), Mode::Numeric) => 6,
            (Self::Micro(_), Mode::Alphanumeric | Mode::Byte) => 5,
            (Self::Micro(_), Mode::Kanji) => 4,
            (Self::Normal(1..=9), Mode::Numeric) => 10,
            (Self::Normal(1..=9), Mode::Alphanumeric) => 9,
            (Self::Normal(1..=9), Mode::Byte | Mode::Kanji) => 8,
            (Self::Normal(10..=26), Mode::Numeric) => 12,
            (Self::Normal(10..=26), Mode::Alphanumeric) => 11,
            (Self::Normal(10..=26), Mode::Byte) => 16,
            (Self::Normal(10..=26), Mode::Kanji) => 10,
            (Self::Normal(_), Mode::Numeric) => 14,
            (Self::Normal(_), Mode::Alphanumeric) => 13,
            (Self::Normal(_), Mode::Byte) => 16,
            (Self::Normal(_), Mode::Kanji) => 12,
        };
        Ok(bits)
    }

    fn capacity(self) -> &'static VersionCapacity {
        match self {
            Self::Normal(v @ 1..=40) => &VERSION_DB[v - 1],
            Self::Normal(v) => panic!("Invalid version: {v}"),
            Self::Micro(_) => unreachable!("Micro versions have no capacity table"),
        }
    }

    pub fn total_codewords(self) -> usize {
        self.capacity().total_codewords
    }

    pub fn remainder_bits(self) -> usize {
        self.capacity().remainder_bits
    }

    pub fn ec_info(self, ecl: ECLevel) -> &'static ECInfo {
        &self.capacity().ec_info[ecl as usize]
    }

    pub fn block_groups(self, ecl: ECLevel) -> &'static [BlockGroup] {
        self.ec_info(ecl).block_groups()
    }

    pub fn ecc_per_block(self, ecl: ECLevel) -> usize {
        self.block_groups(ecl)[0].ec_codewords_per_block()
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        self.total_codewords() - self.ec_info(ecl).total_ec_codewords
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        self.data_codewords(ecl) << 3
    }

    pub fn alignment_pattern(self) -> &'static [usize] {
        match self {
            Self::Normal(v @ 1..=40) => ALIGNMENT_PATTERN_POSITIONS[v - 1],
            _ => &[],
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Micro(v) => write!(f, "M{v}"),
            Self::Normal(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod version_tests {
    use test_case::test_case;

    use super::{ECLevel, Version};
    use crate::common::{codec::Mode, error::QRError};

    #[test_case(Version::Normal(1), 21)]
    #[test_case(Version::Normal(7), 45)]
    #[test_case(Version::Normal(40), 177)]
    #[test_case(Version::Micro(1), 11)]
    #[test_case(Version::Micro(4), 17)]
    fn test_width(ver: Version, w: usize) {
        assert_eq!(ver.width(), w);
    }

    #[test]
    fn test_validate() {
        assert_eq!(Version::Normal(1).validate(), Ok(Version::Normal(1)));
        assert_eq!(Version::Normal(40).validate(), Ok(Version::Normal(40)));
        assert_eq!(Version::Normal(0).validate(), Err(QRError::InvalidVersion));
        assert_eq!(Version::Normal(41).validate(), Err(QRError::InvalidVersion));
        assert_eq!(Version::Micro(2).validate(), Err(QRError::UnsupportedVersion));
        assert_eq!(Version::Micro(5).validate(), Err(QRError::InvalidVersion));
    }

    #[test_case(Version::Normal(1), Mode::Numeric, 10)]
    #[test_case(Version::Normal(9), Mode::Alphanumeric, 9)]
    #[test_case(Version::Normal(9), Mode::Byte, 8)]
    #[test_case(Version::Normal(10), Mode::Numeric, 12)]
    #[test_case(Version::Normal(26), Mode::Alphanumeric, 11)]
    #[test_case(Version::Normal(26), Mode::Byte, 16)]
    #[test_case(Version::Normal(27), Mode::Numeric, 14)]
    #[test_case(Version::Normal(40), Mode::Alphanumeric, 13)]
    #[test_case(Version::Normal(40), Mode::Kanji, 12)]
    #[test_case(Version::Micro(1), Mode::Numeric, 3)]
    #[test_case(Version::Micro(3), Mode::Byte, 4)]
    #[test_case(Version::Micro(4), Mode::Kanji, 4)]
    fn test_char_cnt_bits(ver: Version, mode: Mode, bits: usize) {
        assert_eq!(ver.char_cnt_bits(mode), Ok(bits));
    }

    #[test]
    fn test_char_cnt_bits_unsupported() {
        assert_eq!(Version::Micro(1).char_cnt_bits(Mode::Byte), Err(QRError::UnsupportedMode));
        assert_eq!(Version::Micro(2).char_cnt_bits(Mode::Kanji), Err(QRError::UnsupportedMode));
        assert_eq!(Version::Normal(5).char_cnt_bits(Mode::Eci), Err(QRError::UnsupportedMode));
    }

    #[test_case(Version::Normal(1), ECLevel::L, 19)]
    #[test_case(Version::Normal(1), ECLevel::M, 16)]
    #[test_case(Version::Normal(1), ECLevel::Q, 13)]
    #[test_case(Version::Normal(1), ECLevel::H, 9)]
    #[test_case(Version::Normal(5), ECLevel::Q, 62)]
    #[test_case(Version::Normal(40), ECLevel::L, 2956)]
    #[test_case(Version::Normal(40), ECLevel::H, 1276)]
    fn test_data_codewords(ver: Version, ecl: ECLevel, cap: usize) {
        assert_eq!(ver.data_codewords(ecl), cap);
        assert_eq!(ver.data_bit_capacity(ecl), cap * 8);
    }

    #[test_case(Version::Normal(1), ECLevel::M, 10)]
    #[test_case(Version::Normal(5), ECLevel::Q, 18)]
    #[test_case(Version::Normal(40), ECLevel::H, 30)]
    fn test_ecc_per_block(ver: Version, ecl: ECLevel, n: usize) {
        assert_eq!(ver.ecc_per_block(ecl), n);
    }

    #[test]
    fn test_mode_bits() {
        assert_eq!(Version::Normal(1).mode_bits(), 4);
        assert_eq!(Version::Micro(1).mode_bits(), 0);
        assert_eq!(Version::Micro(4).mode_bits(), 3);
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    /// Two bit indicator stored in the format information.
    pub const fn format_bits(self) -> u16 {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }
}

impl TryFrom<char> for ECLevel {
    type Error = QRError;
    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_uppercase() {
            'L' => Ok(Self::L),
            'M' => Ok(Self::M),
            'Q' => Ok(Self::Q),
            'H' => Ok(Self::H),
            _ => Err(QRError::InvalidECLevel),
        }
    }
}

impl FromStr for ECLevel {
    type Err = QRError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c),
            _ => Err(QRError::InvalidECLevel),
        }
    }
}

impl Display for ECLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}


// Metadata
//------------------------------------------------------------------------------

/// Parameters a symbol was generated with.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Metadata {
    pub version: Version,
    pub ec_level: ECLevel,
    pub mode: Mode,
    pub mask: MaskPattern,
}

impl Metadata {
    pub fn new(version: Version, ec_level: ECLevel, mode: Mode, mask: MaskPattern) -> Self {
        Self { version, ec_level, mode, mask }
    }
}

impl Display for Metadata {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ Version: {}, Ec level: {}, Mode: {:?}, Mask: {} }}",
            self.version, self.ec_level, self.mode, *self.mask
        )
    }
}
