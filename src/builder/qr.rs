use std::ops::Deref;

use super::QRCode;
use crate::common::{
    bitstream::BitStream,
    codec::Mode,
    info::{format_word, version_info, FORMAT_INFO_BIT_LEN, VERSION_INFO_BIT_LEN},
    iter::EncRegionIter,
    mask::MaskPattern,
    metadata::{Color, ECLevel, Version},
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Version(Color),
    Format(Color),
    Data(Color),
}

impl Module {
    /// True for every stamped module that isn't part of the encoding region.
    pub fn is_function(&self) -> bool {
        !matches!(self, Module::Empty | Module::Data(_))
    }
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(c) => c,
            Module::Version(c) => c,
            Module::Format(c) => c,
            Module::Data(c) => c,
        }
    }
}

/// Symbol under construction. Every stage of the builder draws into it in place.
#[derive(Debug, Clone)]
pub struct QR {
    grid: Vec<Module>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mode: Mode,
    mask: Option<MaskPattern>,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub fn new(ver: Version, ecl: ECLevel, mode: Mode) -> Self {
        debug_assert!(matches!(ver, Version::Normal(1..=40)), "Invalid version {ver:?}");

        let w = ver.width();
        Self { grid: vec![Module::Empty; w * w], w, ver, ecl, mode, mask: None }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w;
        let mut res = String::with_capacity(w * (w + 1) + 1);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Version(Color::Dark) => 'v',
                    Module::Version(Color::Light) => 'V',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: usize, c: usize) -> usize {
        assert!(r < self.w, "Row out of bounds: Row {r}, Width {}", self.w);
        assert!(c < self.w, "Column out of bounds: Column {c}, Width {}", self.w);
        r * self.w + c
    }

    pub fn get(&self, r: usize, c: usize) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    fn get_mut(&mut self, r: usize, c: usize) -> &mut Module {
        let index = self.coord_to_index(r, c);
        &mut self.grid[index]
    }

    pub fn set(&mut self, r: usize, c: usize, module: Module) {
        *self.get_mut(r, c) = module;
    }
}

#[cfg(test)]
mod qr_util_tests {
    use crate::builder::{Module, QR};
    use crate::common::{
        codec::Mode,
        metadata::{Color, ECLevel, Version},
    };

    #[test]
    fn test_set_get() {
        let mut qr = QR::new(Version::Normal(1), ECLevel::L, Mode::Byte);
        let w = qr.width();
        qr.set(w - 1, w - 1, Module::Func(Color::Dark));
        assert_eq!(qr.get(20, 20), Module::Func(Color::Dark));
        assert_eq!(qr.get(0, 0), Module::Empty);
        assert_eq!(qr.count_dark_modules(), 1);
    }

    #[test]
    fn test_is_function() {
        assert!(Module::Func(Color::Light).is_function());
        assert!(Module::Format(Color::Dark).is_function());
        assert!(Module::Version(Color::Light).is_function());
        assert!(!Module::Data(Color::Dark).is_function());
        assert!(!Module::Empty.is_function());
    }

    #[test]
    #[should_panic]
    fn test_row_out_of_bound() {
        let qr = QR::new(Version::Normal(1), ECLevel::L, Mode::Byte);
        let w = qr.width();
        qr.get(w, 0);
    }

    #[test]
    #[should_panic]
    fn test_col_out_of_bound() {
        let qr = QR::new(Version::Normal(1), ECLevel::L, Mode::Byte);
        let w = qr.width();
        qr.get(0, w);
    }
}

// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        let w = self.w;
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, w - 4);
        self.draw_finder_pattern_at(w - 4, 3);
    }

    fn draw_finder_pattern_at(&mut self, r: usize, c: usize) {
        for i in 0..7usize {
            for j in 0..7usize {
                let dist = i.abs_diff(3).max(j.abs_diff(3));
                let clr = if dist == 2 { Color::Light } else { Color::Dark };
                self.set(r + i - 3, c + j - 3, Module::Func(clr));
            }
        }
    }

    // Light border between each finder and the encoding region
    fn draw_separators(&mut self) {
        let w = self.w;
        for i in 0..8 {
            // Top left
            self.set(7, i, Module::Func(Color::Light));
            self.set(i, 7, Module::Func(Color::Light));
            // Top right
            self.set(7, w - 1 - i, Module::Func(Color::Light));
            self.set(i, w - 8, Module::Func(Color::Light));
            // Bottom left
            self.set(w - 8, i, Module::Func(Color::Light));
            self.set(w - 1 - i, 7, Module::Func(Color::Light));
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_timing_pattern(&mut self) {
        let last = self.w - 9;
        for i in 8..=last {
            let clr = if i & 1 == 0 { Color::Dark } else { Color::Light };
            self.set(6, i, Module::Func(clr));
            self.set(i, 6, Module::Func(clr));
        }
    }
}

#[cfg(test)]
mod timing_pattern_tests {
    use crate::builder::QR;
    use crate::common::{
        codec::Mode,
        metadata::{ECLevel, Version},
    };

    #[test]
    fn test_timing_pattern_1() {
        let mut qr = QR::new(Version::Normal(1), ECLevel::L, Mode::Byte);
        qr.draw_timing_pattern();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             ........fFfFf........\n\
             .....................\n\
             ......f..............\n\
             ......F..............\n\
             ......f..............\n\
             ......F..............\n\
             ......f..............\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n"
        );
    }
}

// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_pattern();
        for &r in poses {
            for &c in poses {
                if !self.overlaps_finder(r, c) {
                    self.draw_alignment_pattern_at(r, c)
                }
            }
        }
    }

    // Checks the 5x5 pattern against the 9x9 zone of each finder independently
    fn overlaps_finder(&self, r: usize, c: usize) -> bool {
        let w = self.w;
        let (top, left) = (r - 2 <= 8, c - 2 <= 8);
        let (bottom, right) = (r + 2 >= w - 9, c + 2 >= w - 9);
        (top && left) || (top && right) || (bottom && left)
    }

    fn draw_alignment_pattern_at(&mut self, r: usize, c: usize) {
        for i in 0..5usize {
            for j in 0..5usize {
                let dist = i.abs_diff(2).max(j.abs_diff(2));
                let clr = if dist == 1 { Color::Light } else { Color::Dark };
                self.set(r + i - 2, c + j - 2, Module::Func(clr));
            }
        }
    }
}


// All function patterns
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_separators();
        self.draw_timing_pattern();
        self.draw_alignment_patterns();
    }
}


// Format & version info
//------------------------------------------------------------------------------

impl QR {
    fn reserve_format_area(&mut self) {
        self.draw_format_info(0);
    }

    /// Writes both copies of the 15 bit format word plus the dark module.
    fn draw_format_info(&mut self, format_info: u16) {
        let w = self.w;
        for i in 0..FORMAT_INFO_BIT_LEN {
            let m = Module::Format(Color::from((format_info >> i) & 1 == 1));

            // Around the top left finder
            match i {
                0..=5 => self.set(i, 8, m),
                6 => self.set(7, 8, m),
                7 => self.set(8, 8, m),
                8 => self.set(8, 7, m),
                _ => self.set(8, 14 - i, m),
            }

            // Split between the top right and bottom left finders
            if i < 8 {
                self.set(8, w - 1 - i, m);
            } else {
                self.set(w - 15 + i, 8, m);
            }
        }
        self.set(w - 8, 8, Module::Format(Color::Dark));
    }

    fn draw_version_info(&mut self) {
        let Ok(info) = version_info(self.ver) else {
            return;
        };
        let w = self.w;
        for i in 0..VERSION_INFO_BIT_LEN {
            let m = Module::Version(Color::from((info >> i) & 1 == 1));
            let (a, b) = (w - 11 + i % 3, i / 3);
            self.set(b, a, m);
            self.set(a, b, m);
        }
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_encoding_region(&mut self, payload: &BitStream) {
        self.draw_version_info();
        self.reserve_format_area();
        self.draw_payload(payload);

        debug_assert!(!self.grid.contains(&Module::Empty), "Empty module found after payload");
    }

    fn draw_payload(&mut self, payload: &BitStream) {
        let mut coords = EncRegionIter::new(self.ver);
        for bit in payload {
            let module = Module::Data(Color::from(bit));
            for (r, c) in coords.by_ref() {
                if matches!(self.get(r, c), Module::Empty) {
                    self.set(r, c, module);
                    break;
                }
            }
        }
        self.fill_remainder_bits(coords);
    }

    // Cells left over once the codewords run out stay light
    fn fill_remainder_bits(&mut self, coords: impl Iterator<Item = (usize, usize)>) {
        let mut filled = 0;
        for (r, c) in coords {
            if matches!(self.get(r, c), Module::Empty) {
                self.set(r, c, Module::Data(Color::Light));
                filled += 1;
            }
        }
        debug_assert!(
            filled == self.ver.remainder_bits(),
            "Remainder bits mismatch: Filled {filled}, Expected {}",
            self.ver.remainder_bits()
        );
    }

    /// Records `pattern` in the format info without touching the data modules.
    pub fn set_mask_info(&mut self, pattern: MaskPattern) {
        self.mask = Some(pattern);
        self.draw_format_info(format_word(self.ecl, pattern));
    }

    pub fn apply_mask(&mut self, pattern: MaskPattern) {
        let mask_fn = pattern.mask_functions();
        let w = self.w;
        for r in 0..w {
            for c in 0..w {
                let module = self.get(r, c);
                if module.is_function() || !mask_fn(r, c) {
                    continue;
                }
                if let Module::Data(clr) = module {
                    self.set(r, c, Module::Data(!clr))
                }
            }
        }
        self.set_mask_info(pattern);
    }
}


// Quiet zone
//------------------------------------------------------------------------------

impl QR {
    /// Surrounds the symbol with a light quiet zone and freezes it into a [`QRCode`].
    pub fn finalize(self) -> QRCode {
        let qz = self.ver.quiet_zone();
        let full = self.w + 2 * qz;
        let mut colors = vec![Color::Light; full * full];
        for r in 0..self.w {
            for c in 0..self.w {
                let clr = match self.get(r, c) {
                    Module::Empty => panic!("Empty module found at: {r} {c}"),
                    m => *m,
                };
                colors[(r + qz) * full + c + qz] = clr;
            }
        }
        let mask = self.mask.unwrap_or(MaskPattern::from_index(0));
        QRCode::new(colors, self.w, qz, self.ver, self.ecl, self.mode, mask)
    }
}
