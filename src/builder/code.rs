use crate::common::{
    codec::Mode,
    mask::MaskPattern,
    metadata::{Color, ECLevel, Metadata, Version},
};

/// Finished symbol, quiet zone included. Every module is either dark or light.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QRCode {
    grid: Vec<Color>,
    w: usize,
    qz: usize,
    ver: Version,
    ecl: ECLevel,
    mode: Mode,
    mask: MaskPattern,
}

impl QRCode {
    pub(crate) fn new(
        grid: Vec<Color>,
        symbol_width: usize,
        qz: usize,
        ver: Version,
        ecl: ECLevel,
        mode: Mode,
        mask: MaskPattern,
    ) -> Self {
        let w = symbol_width + 2 * qz;
        debug_assert!(grid.len() == w * w, "Grid len {} doesn't match width {w}", grid.len());

        Self { grid, w, qz, ver, ecl, mode, mask }
    }

    /// Side length in modules, quiet zone included.
    pub fn width(&self) -> usize {
        self.w
    }

    pub fn symbol_width(&self) -> usize {
        self.w - 2 * self.qz
    }

    pub fn quiet_zone(&self) -> usize {
        self.qz
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    pub fn metadata(&self) -> Metadata {
        Metadata::new(self.ver, self.ecl, self.mode, self.mask)
    }

    /// Color at row `r` and column `c`, both counted from the outer edge of the quiet zone.
    pub fn get(&self, r: usize, c: usize) -> Color {
        assert!(r < self.w, "Row out of bounds: Row {r}, Width {}", self.w);
        assert!(c < self.w, "Column out of bounds: Column {c}, Width {}", self.w);
        self.grid[r * self.w + c]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.grid.chunks_exact(self.w)
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&&c| c == Color::Dark).count()
    }
}
