// Block layout
//------------------------------------------------------------------------------

/// Run of equally sized Reed-Solomon blocks.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct BlockGroup {
    pub num_blocks: usize,
    pub total_codewords_per_block: usize,
    pub data_codewords_per_block: usize,
}

impl BlockGroup {
    pub fn ec_codewords_per_block(&self) -> usize {
        self.total_codewords_per_block - self.data_codewords_per_block
    }

    pub fn data_codewords(&self) -> usize {
        self.num_blocks * self.data_codewords_per_block
    }
}

/// Error correction layout of a single version and EC level. Holds one or two block groups,
/// the group with shorter blocks first.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct ECInfo {
    pub total_ec_codewords: usize,
    groups: [BlockGroup; 2],
    len: usize,
}

impl ECInfo {
    pub fn block_groups(&self) -> &[BlockGroup] {
        &self.groups[..self.len]
    }

    pub fn num_blocks(&self) -> usize {
        self.block_groups().iter().map(|g| g.num_blocks).sum()
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct VersionCapacity {
    pub total_codewords: usize,
    pub remainder_bits: usize,
    // Indexed by ECLevel
    pub ec_info: [ECInfo; 4],
}

const EMPTY_GROUP: BlockGroup =
    BlockGroup { num_blocks: 0, total_codewords_per_block: 0, data_codewords_per_block: 0 };

const fn bg(num_blocks: usize, total: usize, data: usize) -> BlockGroup {
    BlockGroup { num_blocks, total_codewords_per_block: total, data_codewords_per_block: data }
}

const fn ec1(total_ec_codewords: usize, g1: BlockGroup) -> ECInfo {
    ECInfo { total_ec_codewords, groups: [g1, EMPTY_GROUP], len: 1 }
}

const fn ec2(total_ec_codewords: usize, g1: BlockGroup, g2: BlockGroup) -> ECInfo {
    ECInfo { total_ec_codewords, groups: [g1, g2], len: 2 }
}

const fn cap(total_codewords: usize, remainder_bits: usize, ec_info: [ECInfo; 4]) -> VersionCapacity {
    VersionCapacity { total_codewords, remainder_bits, ec_info }
}

// Version database
//------------------------------------------------------------------------------

pub(crate) static VERSION_DB: [VersionCapacity; 40] = [
    // Version 1
    cap(26, 0, [
        ec1(7, bg(1, 26, 19)),
        ec1(10, bg(1, 26, 16)),
        ec1(13, bg(1, 26, 13)),
        ec1(17, bg(1, 26, 9)),
    ]),
    // Version 2
    cap(44, 7, [
        ec1(10, bg(1, 44, 34)),
        ec1(16, bg(1, 44, 28)),
        ec1(22, bg(1, 44, 22)),
        ec1(28, bg(1, 44, 16)),
    ]),
    // Version 3
    cap(70, 7, [
        ec1(15, bg(1, 70, 55)),
        ec1(26, bg(1, 70, 44)),
        ec1(36, bg(2, 35, 17)),
        ec1(44, bg(2, 35, 13)),
    ]),
    // Version 4
    cap(100, 7, [
        ec1(20, bg(1, 100, 80)),
        ec1(36, bg(2, 50, 32)),
        ec1(52, bg(2, 50, 24)),
        ec1(64, bg(4, 25, 9)),
    ]),
    // Version 5
    cap(134, 7, [
        ec1(26, bg(1, 134, 108)),
        ec1(48, bg(2, 67, 43)),
        ec2(72, bg(2, 33, 15), bg(2, 34, 16)),
        ec2(88, bg(2, 33, 11), bg(2, 34, 12)),
    ]),
    // Version 6
    cap(172, 7, [
        ec1(36, bg(2, 86, 68)),
        ec1(64, bg(4, 43, 27)),
        ec1(96, bg(4, 43, 19)),
        ec1(112, bg(4, 43, 15)),
    ]),
    // Version 7
    cap(196, 0, [
        ec1(40, bg(2, 98, 78)),
        ec1(72, bg(4, 49, 31)),
        ec2(108, bg(2, 32, 14), bg(4, 33, 15)),
        ec2(130, bg(4, 39, 13), bg(1, 40, 14)),
    ]),
    // Version 8
    cap(242, 0, [
        ec1(48, bg(2, 121, 97)),
        ec2(88, bg(2, 60, 38), bg(2, 61, 39)),
        ec2(132, bg(4, 40, 18), bg(2, 41, 19)),
        ec2(156, bg(4, 40, 14), bg(2, 41, 15)),
    ]),
    // Version 9
    cap(292, 0, [
        ec1(60, bg(2, 146, 116)),
        ec2(110, bg(3, 58, 36), bg(2, 59, 37)),
        ec2(160, bg(4, 36, 16), bg(4, 37, 17)),
        ec2(192, bg(4, 36, 12), bg(4, 37, 13)),
    ]),
    // Version 10
    cap(346, 0, [
        ec2(72, bg(2, 86, 68), bg(2, 87, 69)),
        ec2(130, bg(4, 69, 43), bg(1, 70, 44)),
        ec2(192, bg(6, 43, 19), bg(2, 44, 20)),
        ec2(224, bg(6, 43, 15), bg(2, 44, 16)),
    ]),
    // Version 11
    cap(404, 0, [
        ec1(80, bg(4, 101, 81)),
        ec2(150, bg(1, 80, 50), bg(4, 81, 51)),
        ec2(224, bg(4, 50, 22), bg(4, 51, 23)),
        ec2(264, bg(3, 36, 12), bg(8, 37, 13)),
    ]),
    // Version 12
    cap(466, 0, [
        ec2(96, bg(2, 116, 92), bg(2, 117, 93)),
        ec2(176, bg(6, 58, 36), bg(2, 59, 37)),
        ec2(260, bg(4, 46, 20), bg(6, 47, 21)),
        ec2(308, bg(7, 42, 14), bg(4, 43, 15)),
    ]),
    // Version 13
    cap(532, 0, [
        ec1(104, bg(4, 133, 107)),
        ec2(198, bg(8, 59, 37), bg(1, 60, 38)),
        ec2(288, bg(8, 44, 20), bg(4, 45, 21)),
        ec2(352, bg(12, 33, 11), bg(4, 34, 12)),
    ]),
    // Version 14
    cap(581, 3, [
        ec2(120, bg(3, 145, 115), bg(1, 146, 116)),
        ec2(216, bg(4, 64, 40), bg(5, 65, 41)),
        ec2(320, bg(11, 36, 16), bg(5, 37, 17)),
        ec2(384, bg(11, 36, 12), bg(5, 37, 13)),
    ]),
    // Version 15
    cap(655, 3, [
        ec2(132, bg(5, 109, 87), bg(1, 110, 88)),
        ec2(240, bg(5, 65, 41), bg(5, 66, 42)),
        ec2(360, bg(5, 54, 24), bg(7, 55, 25)),
        ec2(432, bg(11, 36, 12), bg(7, 37, 13)),
    ]),
    // Version 16
    cap(733, 3, [
        ec2(144, bg(5, 122, 98), bg(1, 123, 99)),
        ec2(280, bg(7, 73, 45), bg(3, 74, 46)),
        ec2(408, bg(15, 43, 19), bg(2, 44, 20)),
        ec2(480, bg(3, 45, 15), bg(13, 46, 16)),
    ]),
    // Version 17
    cap(815, 3, [
        ec2(168, bg(1, 135, 107), bg(5, 136, 108)),
        ec2(308, bg(10, 74, 46), bg(1, 75, 47)),
        ec2(448, bg(1, 50, 22), bg(15, 51, 23)),
        ec2(532, bg(2, 42, 14), bg(17, 43, 15)),
    ]),
    // Version 18
    cap(901, 3, [
        ec2(180, bg(5, 150, 120), bg(1, 151, 121)),
        ec2(338, bg(9, 69, 43), bg(4, 70, 44)),
        ec2(504, bg(17, 50, 22), bg(1, 51, 23)),
        ec2(588, bg(2, 42, 14), bg(19, 43, 15)),
    ]),
    // Version 19
    cap(991, 3, [
        ec2(196, bg(3, 141, 113), bg(4, 142, 114)),
        ec2(364, bg(3, 70, 44), bg(11, 71, 45)),
        ec2(546, bg(17, 47, 21), bg(4, 48, 22)),
        ec2(650, bg(9, 39, 13), bg(16, 40, 14)),
    ]),
    // Version 20
    cap(1085, 3, [
        ec2(224, bg(3, 135, 107), bg(5, 136, 108)),
        ec2(416, bg(3, 67, 41), bg(13, 68, 42)),
        ec2(600, bg(15, 54, 24), bg(5, 55, 25)),
        ec2(700, bg(15, 43, 15), bg(10, 44, 16)),
    ]),
    // Version 21
    cap(1156, 4, [
        ec2(224, bg(4, 144, 116), bg(4, 145, 117)),
        ec1(442, bg(17, 68, 42)),
        ec2(644, bg(17, 50, 22), bg(6, 51, 23)),
        ec2(750, bg(19, 46, 16), bg(6, 47, 17)),
    ]),
    // Version 22
    cap(1258, 4, [
        ec2(252, bg(2, 139, 111), bg(7, 140, 112)),
        ec1(476, bg(17, 74, 46)),
        ec2(690, bg(7, 54, 24), bg(16, 55, 25)),
        ec1(816, bg(34, 37, 13)),
    ]),
    // Version 23
    cap(1364, 4, [
        ec2(270, bg(4, 151, 121), bg(5, 152, 122)),
        ec2(504, bg(4, 75, 47), bg(14, 76, 48)),
        ec2(750, bg(11, 54, 24), bg(14, 55, 25)),
        ec2(900, bg(16, 45, 15), bg(14, 46, 16)),
    ]),
    // Version 24
    cap(1474, 4, [
        ec2(300, bg(6, 147, 117), bg(4, 148, 118)),
        ec2(560, bg(6, 73, 45), bg(14, 74, 46)),
        ec2(810, bg(11, 54, 24), bg(16, 55, 25)),
        ec2(960, bg(30, 46, 16), bg(2, 47, 17)),
    ]),
    // Version 25
    cap(1588, 4, [
        ec2(312, bg(8, 132, 106), bg(4, 133, 107)),
        ec2(588, bg(8, 75, 47), bg(13, 76, 48)),
        ec2(870, bg(7, 54, 24), bg(22, 55, 25)),
        ec2(1050, bg(22, 45, 15), bg(13, 46, 16)),
    ]),
    // Version 26
    cap(1706, 4, [
        ec2(336, bg(10, 142, 114), bg(2, 143, 115)),
        ec2(644, bg(19, 74, 46), bg(4, 75, 47)),
        ec2(952, bg(28, 50, 22), bg(6, 51, 23)),
        ec2(1110, bg(33, 46, 16), bg(4, 47, 17)),
    ]),
    // Version 27
    cap(1828, 4, [
        ec2(360, bg(8, 152, 122), bg(4, 153, 123)),
        ec2(700, bg(22, 73, 45), bg(3, 74, 46)),
        ec2(1020, bg(8, 53, 23), bg(26, 54, 24)),
        ec2(1200, bg(12, 45, 15), bg(28, 46, 16)),
    ]),
    // Version 28
    cap(1921, 3, [
        ec2(390, bg(3, 147, 117), bg(10, 148, 118)),
        ec2(728, bg(3, 73, 45), bg(23, 74, 46)),
        ec2(1050, bg(4, 54, 24), bg(31, 55, 25)),
        ec2(1260, bg(11, 45, 15), bg(31, 46, 16)),
    ]),
    // Version 29
    cap(2051, 3, [
        ec2(420, bg(7, 146, 116), bg(7, 147, 117)),
        ec2(784, bg(21, 73, 45), bg(7, 74, 46)),
        ec2(1140, bg(1, 53, 23), bg(37, 54, 24)),
        ec2(1350, bg(19, 45, 15), bg(26, 46, 16)),
    ]),
    // Version 30
    cap(2185, 3, [
        ec2(450, bg(5, 145, 115), bg(10, 146, 116)),
        ec2(812, bg(19, 75, 47), bg(10, 76, 48)),
        ec2(1200, bg(15, 54, 24), bg(25, 55, 25)),
        ec2(1440, bg(23, 45, 15), bg(25, 46, 16)),
    ]),
    // Version 31
    cap(2323, 3, [
        ec2(480, bg(13, 145, 115), bg(3, 146, 116)),
        ec2(868, bg(2, 74, 46), bg(29, 75, 47)),
        ec2(1290, bg(42, 54, 24), bg(1, 55, 25)),
        ec2(1530, bg(23, 45, 15), bg(28, 46, 16)),
    ]),
    // Version 32
    cap(2465, 3, [
        ec1(510, bg(17, 145, 115)),
        ec2(924, bg(10, 74, 46), bg(23, 75, 47)),
        ec2(1350, bg(10, 54, 24), bg(35, 55, 25)),
        ec2(1620, bg(19, 45, 15), bg(35, 46, 16)),
    ]),
    // Version 33
    cap(2611, 3, [
        ec2(540, bg(17, 145, 115), bg(1, 146, 116)),
        ec2(980, bg(14, 74, 46), bg(21, 75, 47)),
        ec2(1440, bg(29, 54, 24), bg(19, 55, 25)),
        ec2(1710, bg(11, 45, 15), bg(46, 46, 16)),
    ]),
    // Version 34
    cap(2761, 3, [
        ec2(570, bg(13, 145, 115), bg(6, 146, 116)),
        ec2(1036, bg(14, 74, 46), bg(23, 75, 47)),
        ec2(1530, bg(44, 54, 24), bg(7, 55, 25)),
        ec2(1800, bg(59, 46, 16), bg(1, 47, 17)),
    ]),
    // Version 35
    cap(2876, 0, [
        ec2(570, bg(12, 151, 121), bg(7, 152, 122)),
        ec2(1064, bg(12, 75, 47), bg(26, 76, 48)),
        ec2(1590, bg(39, 54, 24), bg(14, 55, 25)),
        ec2(1890, bg(22, 45, 15), bg(41, 46, 16)),
    ]),
    // Version 36
    cap(3034, 0, [
        ec2(600, bg(6, 151, 121), bg(14, 152, 122)),
        ec2(1120, bg(6, 75, 47), bg(34, 76, 48)),
        ec2(1680, bg(46, 54, 24), bg(10, 55, 25)),
        ec2(1980, bg(2, 45, 15), bg(64, 46, 16)),
    ]),
    // Version 37
    cap(3196, 0, [
        ec2(630, bg(17, 152, 122), bg(4, 153, 123)),
        ec2(1204, bg(29, 74, 46), bg(14, 75, 47)),
        ec2(1770, bg(49, 54, 24), bg(10, 55, 25)),
        ec2(2100, bg(24, 45, 15), bg(46, 46, 16)),
    ]),
    // Version 38
    cap(3362, 0, [
        ec2(660, bg(4, 152, 122), bg(18, 153, 123)),
        ec2(1260, bg(13, 74, 46), bg(32, 75, 47)),
        ec2(1860, bg(48, 54, 24), bg(14, 55, 25)),
        ec2(2220, bg(42, 45, 15), bg(32, 46, 16)),
    ]),
    // Version 39
    cap(3532, 0, [
        ec2(720, bg(20, 147, 117), bg(4, 148, 118)),
        ec2(1316, bg(40, 75, 47), bg(7, 76, 48)),
        ec2(1950, bg(43, 54, 24), bg(22, 55, 25)),
        ec2(2310, bg(10, 45, 15), bg(67, 46, 16)),
    ]),
    // Version 40
    cap(3706, 0, [
        ec2(750, bg(19, 148, 118), bg(6, 149, 119)),
        ec2(1372, bg(18, 75, 47), bg(31, 76, 48)),
        ec2(2040, bg(34, 54, 24), bg(34, 55, 25)),
        ec2(2430, bg(20, 45, 15), bg(61, 46, 16)),
    ]),
];

pub(crate) static ALIGNMENT_PATTERN_POSITIONS: [&[usize]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

#[cfg(test)]
mod version_db_tests {
    use test_case::test_case;

    use super::{ALIGNMENT_PATTERN_POSITIONS, VERSION_DB};

    #[test]
    fn test_block_groups_cover_codewords() {
        for (i, cap) in VERSION_DB.iter().enumerate() {
            for info in cap.ec_info.iter() {
                let total = info
                    .block_groups()
                    .iter()
                    .map(|g| g.num_blocks * g.total_codewords_per_block)
                    .sum::<usize>();
                assert_eq!(total, cap.total_codewords, "Version {}", i + 1);
                let ec = info
                    .block_groups()
                    .iter()
                    .map(|g| g.num_blocks * g.ec_codewords_per_block())
                    .sum::<usize>();
                assert_eq!(ec, info.total_ec_codewords, "Version {}", i + 1);
            }
        }
    }

    #[test]
    fn test_ec_per_block_is_uniform() {
        for cap in VERSION_DB.iter() {
            for info in cap.ec_info.iter() {
                let groups = info.block_groups();
                let first = groups[0].ec_codewords_per_block();
                assert!(groups.iter().all(|g| g.ec_codewords_per_block() == first));
                if groups.len() == 2 {
                    assert_eq!(
                        groups[0].total_codewords_per_block + 1,
                        groups[1].total_codewords_per_block
                    );
                }
            }
        }
    }

    #[test_case(1, 26, 0)]
    #[test_case(2, 44, 7)]
    #[test_case(7, 196, 0)]
    #[test_case(14, 581, 3)]
    #[test_case(21, 1156, 4)]
    #[test_case(28, 1921, 3)]
    #[test_case(40, 3706, 0)]
    fn test_total_codewords(ver: usize, total: usize, remainder: usize) {
        assert_eq!(VERSION_DB[ver - 1].total_codewords, total);
        assert_eq!(VERSION_DB[ver - 1].remainder_bits, remainder);
    }

    #[test]
    fn test_alignment_positions() {
        assert!(ALIGNMENT_PATTERN_POSITIONS[0].is_empty());
        for (i, pos) in ALIGNMENT_PATTERN_POSITIONS.iter().enumerate().skip(1) {
            let width = (i + 1) * 4 + 17;
            assert_eq!(pos[0], 6);
            assert_eq!(*pos.last().unwrap(), width - 7);
        }
    }
}
