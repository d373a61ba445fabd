use std::{
    fmt::{Display, Formatter},
    ops::Deref,
};

use log::debug;
use rayon::prelude::*;

use super::{
    error::{QRError, QRResult},
    metadata::Color,
};
use crate::builder::QR;

// Mask pattern
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern > 7 {
            return Err(QRError::InvalidMaskingPattern);
        }
        Ok(Self(pattern))
    }

    pub(crate) const fn from_index(pattern: u8) -> Self {
        debug_assert!(pattern < 8, "Invalid masking pattern");
        Self(pattern)
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(Self)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for MaskPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for MaskPattern {
    type Error = QRError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

mod mask_functions {
    pub fn checkerboard(r: usize, c: usize) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: usize, _: usize) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: usize, c: usize) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: usize, c: usize) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: usize, c: usize) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: usize, c: usize) -> bool {
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: usize, c: usize) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: usize, c: usize) -> bool {
        (((r + c) & 1) + ((r * c) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    /// Predicate over (row, column); a module is flipped where it holds.
    pub fn mask_functions(self) -> fn(usize, usize) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Invalid pattern {}", self.0),
        }
    }
}

#[cfg(test)]
mod mask_pattern_tests {
    use test_case::test_case;

    use super::MaskPattern;
    use crate::common::error::QRError;

    #[test]
    fn test_new() {
        assert_eq!(MaskPattern::new(7).map(|m| *m), Ok(7));
        assert_eq!(MaskPattern::new(8), Err(QRError::InvalidMaskingPattern));
        assert_eq!(MaskPattern::try_from(255), Err(QRError::InvalidMaskingPattern));
        assert_eq!(MaskPattern::all().count(), 8);
    }

    #[test_case(0, &[(0, 0), (1, 1), (2, 4)], &[(0, 1), (3, 4)])]
    #[test_case(1, &[(0, 3), (2, 5)], &[(1, 0), (3, 3)])]
    #[test_case(2, &[(5, 0), (1, 3)], &[(0, 1), (0, 2)])]
    #[test_case(3, &[(0, 0), (1, 2)], &[(1, 1), (0, 4)])]
    #[test_case(4, &[(0, 0), (1, 2), (2, 3)], &[(0, 3), (2, 0)])]
    #[test_case(5, &[(0, 5), (6, 1), (2, 3)], &[(1, 1), (2, 2)])]
    #[test_case(6, &[(0, 0), (1, 1), (2, 3)], &[(1, 3), (2, 2)])]
    #[test_case(7, &[(0, 0), (1, 3), (2, 4)], &[(0, 1), (1, 1)])]
    fn test_mask_functions(pattern: u8, on: &[(usize, usize)], off: &[(usize, usize)]) {
        let f = MaskPattern::from_index(pattern).mask_functions();
        assert!(on.iter().all(|&(r, c)| f(r, c)));
        assert!(off.iter().all(|&(r, c)| !f(r, c)));
    }
}

// Mask selection
//------------------------------------------------------------------------------

/// Tries all 8 masks on clones of `qr` in parallel and keeps the clone with the lowest
/// penalty, ties resolved towards the lower pattern index.
pub fn apply_best_mask(qr: &mut QR) -> MaskPattern {
    let snapshot = &*qr;
    let best = (0..8u8)
        .into_par_iter()
        .map(|m| {
            let pattern = MaskPattern(m);
            let mut trial = snapshot.clone();
            trial.apply_mask(pattern);
            let penalty = compute_total_penalty(&trial);
            debug!("Mask {m} penalty {penalty}");
            (penalty, pattern, trial)
        })
        .min_by_key(|(penalty, pattern, _)| (*penalty, *pattern));

    match best {
        Some((_, pattern, trial)) => {
            *qr = trial;
            pattern
        }
        None => unreachable!("Mask candidates are never empty"),
    }
}

// Penalty
//------------------------------------------------------------------------------

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let adj_pen = compute_adjacent_penalty(qr);
    let blk_pen = compute_block_penalty(qr);
    let fp_pen_h = compute_finder_pattern_penalty(qr, true);
    let fp_pen_v = compute_finder_pattern_penalty(qr, false);
    let bal_pen = compute_balance_penalty(qr);
    adj_pen + blk_pen + fp_pen_h + fp_pen_v + bal_pen
}

// Rule 1: runs of 5 or more same colored modules score 3 plus 1 per extra module
fn compute_adjacent_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width();
    let mut cols = vec![(Color::Dark, 0u32); w];
    for r in 0..w {
        let mut last = Color::Dark;
        let mut row_run = 0u32;
        for (c, col) in cols.iter_mut().enumerate() {
            let clr = *qr.get(r, c);
            if c == 0 || last != clr {
                last = clr;
                row_run = 0;
            }
            row_run += 1;
            pen += run_penalty(row_run);

            if r == 0 || col.0 != clr {
                *col = (clr, 0);
            }
            col.1 += 1;
            pen += run_penalty(col.1);
        }
    }
    pen
}

#[inline]
fn run_penalty(run: u32) -> u32 {
    match run {
        5 => 3,
        6.. => 1,
        _ => 0,
    }
}

// Rule 2: each 2x2 block of one color
fn compute_block_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width();
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = *qr.get(r, c);
            if clr == *qr.get(r + 1, c) && clr == *qr.get(r, c + 1) && clr == *qr.get(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

// Rule 3: dark-light-dark-dark-dark-light-dark with 4 light modules on either side.
// Modules outside the symbol count as light.
fn compute_finder_pattern_penalty(qr: &QR, is_hor: bool) -> u32 {
    static PATTERN: [Color; 7] = [
        Color::Dark,
        Color::Light,
        Color::Dark,
        Color::Dark,
        Color::Dark,
        Color::Light,
        Color::Dark,
    ];

    let mut pen = 0;
    let w = qr.width();
    for i in 0..w {
        let get = |j: usize| if is_hor { *qr.get(i, j) } else { *qr.get(j, i) };
        let is_light = |j: isize| j < 0 || j >= w as isize || get(j as usize) == Color::Light;
        for j in 0..w.saturating_sub(6) {
            if (j..j + 7).map(get).ne(PATTERN.iter().copied()) {
                continue;
            }
            let j = j as isize;
            if (j - 4..j).all(is_light) || (j + 7..j + 11).all(is_light) {
                pen += 40;
            }
        }
    }
    pen
}

// Rule 4: 10 points per full 5% step away from an even dark/light balance
fn compute_balance_penalty(qr: &QR) -> u32 {
    let dark = qr.count_dark_modules() as isize;
    let w = qr.width() as isize;
    let total = w * w;
    let deviation = (dark * 100 - total * 50).unsigned_abs();
    (deviation / (5 * total as usize)) as u32 * 10
}
