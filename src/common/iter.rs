use super::metadata::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

/// Zigzag walk over the symbol: 2 column strips from the bottom right corner, alternating
/// upward and downward, right column before left. The vertical timing column is skipped.
/// Function modules are not filtered out, callers skip them.
pub struct EncRegionIter {
    r: usize,
    // Right column of the current strip
    c: usize,
    // Offset within the strip, 0 for right and 1 for left
    side: usize,
    upward: bool,
    width: usize,
    vert_timing_col: usize,
    done: bool,
}

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let w = version.width();
        let vert_timing_col = match version {
            Version::Micro(_) => 0,
            Version::Normal(_) => 6,
        };
        Self { r: w - 1, c: w - 1, side: 0, upward: true, width: w, vert_timing_col, done: false }
    }

    fn next_strip(&mut self) {
        if self.c < 2 {
            self.done = true;
            return;
        }
        self.c -= 2;
        if self.c == self.vert_timing_col {
            if self.c == 0 {
                self.done = true;
                return;
            }
            self.c -= 1;
        }
        self.upward = !self.upward;
    }
}

impl Iterator for EncRegionIter {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let res = (self.r, self.c - self.side);

        if self.side == 0 {
            self.side = 1;
            return Some(res);
        }
        self.side = 0;
        match self.upward {
            true if self.r > 0 => self.r -= 1,
            false if self.r < self.width - 1 => self.r += 1,
            _ => self.next_strip(),
        }
        Some(res)
    }
}

#[cfg(test)]
mod iter_tests {
    use std::collections::HashSet;

    use super::EncRegionIter;
    use crate::common::metadata::Version;

    #[test]
    fn test_start() {
        let coords = EncRegionIter::new(Version::Normal(1)).take(6).collect::<Vec<_>>();
        assert_eq!(coords, [(20, 20), (20, 19), (19, 20), (19, 19), (18, 20), (18, 19)]);
    }

    #[test]
    fn test_turn_at_top() {
        let coords = EncRegionIter::new(Version::Normal(1)).skip(40).take(4).collect::<Vec<_>>();
        assert_eq!(coords, [(0, 20), (0, 19), (0, 18), (0, 17)]);
    }

    #[test]
    fn test_covers_all_but_timing_column() {
        for v in [1, 2, 7, 14, 40] {
            let ver = Version::Normal(v);
            let w = ver.width();
            let coords = EncRegionIter::new(ver).collect::<Vec<_>>();
            assert_eq!(coords.len(), w * (w - 1));
            let unique = coords.iter().copied().collect::<HashSet<_>>();
            assert_eq!(unique.len(), coords.len());
            assert!(coords.iter().all(|&(_, c)| c != 6));
        }
    }

    #[test]
    fn test_strip_left_of_timing_column() {
        let ver = Version::Normal(1);
        let coords = EncRegionIter::new(ver).collect::<Vec<_>>();
        // Strips at columns 20, 18, 16, 14, 12, 10, 8, then 5, 3, 1
        let strip = &coords[7 * 42..8 * 42];
        assert_eq!(strip[0], (0, 5));
        assert_eq!(strip[1], (0, 4));
        assert_eq!(strip[41], (20, 4));
        assert_eq!(*coords.last().unwrap(), (20, 0));
    }
}
