//! Magic bitboard tables for sliding piece attack generation.
//!
//! Each square owns a slice of a shared attack table. A blocker set is
//! reduced to the square's relevant-occupancy mask, multiplied by the
//! square's magic number and shifted down to an index into that slice.
//! The magic, shift and offset values below are a fixed dataset; the table
//! contents are derived from the ray-cast reference at start-up.

use crate::Bitboard;
use chess_core::Square;

/// Total rook table length: the sum of `2^(64 - shift)` over all squares.
pub const ROOK_TABLE_SIZE: usize = 102_400;

/// Total bishop table length.
pub const BISHOP_TABLE_SIZE: usize = 5_248;

/// Magic entry for a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Magic {
    /// Mask of relevant blocker squares (excludes edges).
    pub mask: Bitboard,
    /// The magic number for this square.
    pub magic: u64,
    /// Right shift amount (64 - number of bits in mask).
    pub shift: u8,
    /// Offset of this square's slice in the attack table.
    pub offset: usize,
}

impl Magic {
    /// Table index for a blocker configuration. Bits outside the mask are ignored.
    #[inline]
    pub const fn index(&self, occupied: Bitboard) -> usize {
        let relevant = occupied.0 & self.mask.0;
        self.offset + (relevant.wrapping_mul(self.magic) >> self.shift) as usize
    }
}

/// The two sliding families that get magic tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slider {
    Rook,
    Bishop,
}

impl Slider {
    const fn directions(self) -> [(i8, i8); 4] {
        match self {
            Slider::Rook => [(1, 0), (-1, 0), (0, 1), (0, -1)],
            Slider::Bishop => [(1, 1), (1, -1), (-1, 1), (-1, -1)],
        }
    }

    fn table_size(self) -> usize {
        match self {
            Slider::Rook => ROOK_TABLE_SIZE,
            Slider::Bishop => BISHOP_TABLE_SIZE,
        }
    }

    fn magic(self, sq: Square) -> Magic {
        let i = sq.index() as usize;
        match self {
            Slider::Rook => Magic {
                mask: rook_mask(sq),
                magic: ROOK_MAGICS[i],
                shift: ROOK_SHIFTS[i],
                offset: ROOK_OFFSETS[i],
            },
            Slider::Bishop => Magic {
                mask: bishop_mask(sq),
                magic: BISHOP_MAGICS[i],
                shift: BISHOP_SHIFTS[i],
                offset: BISHOP_OFFSETS[i],
            },
        }
    }

    fn attacks_slow(self, sq: Square, blockers: Bitboard) -> Bitboard {
        ray_attacks(sq, blockers, self.directions())
    }
}

/// Magic entries plus the flat attack table for one slider family.
pub(crate) struct SliderTable {
    magics: [Magic; 64],
    attacks: Box<[Bitboard]>,
}

impl SliderTable {
    /// Fills every square's slice by walking all subsets of its mask.
    pub(crate) fn new(slider: Slider) -> Self {
        let mut magics = [Magic {
            mask: Bitboard::EMPTY,
            magic: 0,
            shift: 0,
            offset: 0,
        }; 64];
        let mut attacks = vec![Bitboard::EMPTY; slider.table_size()];

        for sq in Square::all() {
            let magic = slider.magic(sq);
            for blockers in magic.mask.subsets() {
                attacks[magic.index(blockers)] = slider.attacks_slow(sq, blockers);
            }
            magics[sq.index() as usize] = magic;
        }

        SliderTable {
            magics,
            attacks: attacks.into_boxed_slice(),
        }
    }

    #[inline]
    pub(crate) fn attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        let magic = &self.magics[sq.index() as usize];
        self.attacks[magic.index(occupied)]
    }

    #[inline]
    pub(crate) fn magic(&self, sq: Square) -> &Magic {
        &self.magics[sq.index() as usize]
    }

    pub(crate) fn len(&self) -> usize {
        self.attacks.len()
    }
}

/// Rook relevant-occupancy mask: the rank and file through `sq`, minus `sq`
/// itself and the last square of each ray.
pub fn rook_mask(sq: Square) -> Bitboard {
    let rank = sq.rank().index();
    let file = sq.file().index();
    let mut mask = 0u64;

    for f in 1..7 {
        if f != file {
            mask |= 1u64 << (rank * 8 + f);
        }
    }
    for r in 1..7 {
        if r != rank {
            mask |= 1u64 << (r * 8 + file);
        }
    }

    Bitboard(mask)
}

/// Bishop relevant-occupancy mask: both diagonals through `sq`, stopping
/// before the board edge.
pub fn bishop_mask(sq: Square) -> Bitboard {
    let rank = sq.rank().index() as i8;
    let file = sq.file().index() as i8;
    let mut mask = 0u64;

    for (dr, df) in Slider::Bishop.directions() {
        let mut r = rank + dr;
        let mut f = file + df;
        while r > 0 && r < 7 && f > 0 && f < 7 {
            mask |= 1u64 << (r * 8 + f);
            r += dr;
            f += df;
        }
    }

    Bitboard(mask)
}

/// Reference rook attacks by ray casting. Each ray includes the first blocker.
pub fn rook_attacks_slow(sq: Square, blockers: Bitboard) -> Bitboard {
    Slider::Rook.attacks_slow(sq, blockers)
}

/// Reference bishop attacks by ray casting.
pub fn bishop_attacks_slow(sq: Square, blockers: Bitboard) -> Bitboard {
    Slider::Bishop.attacks_slow(sq, blockers)
}

fn ray_attacks(sq: Square, blockers: Bitboard, directions: [(i8, i8); 4]) -> Bitboard {
    let rank = sq.rank().index() as i8;
    let file = sq.file().index() as i8;
    let mut attacks = 0u64;

    for (dr, df) in directions {
        let mut r = rank + dr;
        let mut f = file + df;
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let bit = 1u64 << (r * 8 + f);
            attacks |= bit;
            if blockers.0 & bit != 0 {
                break;
            }
            r += dr;
            f += df;
        }
    }

    Bitboard(attacks)
}

// Rook magic multipliers, one per square.
#[rustfmt::skip]
const ROOK_MAGICS: [u64; 64] = [
    0x0a8002c000108020, 0x06c00049b0002001, 0x0100200010090040, 0x2480041000800801,
    0x0280028004000800, 0x0900410008040022, 0x0280020001001080, 0x2880002041000080,
    0xa000800080400034, 0x0004808020004000, 0x2290802004801000, 0x0411000d00100020,
    0x0402800800040080, 0x000b000401004208, 0x2409000100040200, 0x0001002100004082,
    0x0022878001e24000, 0x1090810021004010, 0x0801030040200012, 0x0500808008001000,
    0x0a08018014000880, 0x8000808004000200, 0x0201008080010200, 0x0801020000441091,
    0x0000800080204005, 0x1040200040100048, 0x0000120200402082, 0x0d14880480100080,
    0x0012040280080080, 0x0100040080020080, 0x9020010080800200, 0x0813241200148449,
    0x0491604001800080, 0x0100401000402001, 0x4820010021001040, 0x0400402202000812,
    0x0209009005000802, 0x0810800601800400, 0x4301083214000150, 0x204026458e001401,
    0x0040204000808000, 0x8001008040010020, 0x8410820820420010, 0x1003001000090020,
    0x0804040008008080, 0x0012000810020004, 0x1000100200040208, 0x430000a044020001,
    0x0280009023410300, 0x00e0100040002240, 0x0000200100401700, 0x2244100408008080,
    0x0008000400801980, 0x0002000810040200, 0x8010100228810400, 0x2000009044210200,
    0x4080008040102101, 0x0040002080411d01, 0x2005524060000901, 0x0502001008400422,
    0x489a000810200402, 0x0001004400080a13, 0x4000011008020084, 0x0026002114058042,
];

// Bishop magic multipliers, one per square.
#[rustfmt::skip]
const BISHOP_MAGICS: [u64; 64] = [
    0x89a1121896040240, 0x2004844802002010, 0x2068080051921000, 0x62880a0220200808,
    0x0004042004000000, 0x0100822020200011, 0xc00444222012000a, 0x0028808801216001,
    0x0400492088408100, 0x0201c401040c0084, 0x00840800910a0010, 0x0000082080240060,
    0x2000840504006000, 0x30010c4108405004, 0x1008005410080802, 0x8144042209100900,
    0x0208081020014400, 0x004800201208ca00, 0x0f18140408012008, 0x1004002802102001,
    0x0841000820080811, 0x0040200200a42008, 0x0000800054042000, 0x88010400410c9000,
    0x0520040470104290, 0x1004040051500081, 0x2002081833080021, 0x000400c00c010142,
    0x941408200c002000, 0x0658810000806011, 0x0188071040440a00, 0x4800404002011c00,
    0x0104442040404200, 0x0c02180490200100, 0x0004022401120400, 0x80c0040400080120,
    0x8040010040820802, 0x0480810700020090, 0x0102008e00040242, 0x0809005202050100,
    0x8002024220104080, 0x0431008804142000, 0x0019001802081400, 0x0200014208040080,
    0x3308082008200100, 0x041010500040c020, 0x4012020c04210308, 0x208220a202004080,
    0x0111040120082000, 0x6803040141280a00, 0x2101004202410000, 0x8200000041108022,
    0x0000021082088000, 0x0002410204010040, 0x0040100400809000, 0x0822088220820214,
    0x0040808090012004, 0x00910224040218c9, 0x0402814422015008, 0x0090014004842410,
    0x0001000042304105, 0x0010008830412a00, 0x2520081090008908, 0x40102000a0a60140,
];

#[rustfmt::skip]
const ROOK_SHIFTS: [u8; 64] = [
    52, 53, 53, 53, 53, 53, 53, 52,
    53, 54, 54, 54, 54, 54, 54, 53,
    53, 54, 54, 54, 54, 54, 54, 53,
    53, 54, 54, 54, 54, 54, 54, 53,
    53, 54, 54, 54, 54, 54, 54, 53,
    53, 54, 54, 54, 54, 54, 54, 53,
    53, 54, 54, 54, 54, 54, 54, 53,
    52, 53, 53, 53, 53, 53, 53, 52,
];

#[rustfmt::skip]
const BISHOP_SHIFTS: [u8; 64] = [
    58, 59, 59, 59, 59, 59, 59, 58,
    59, 59, 59, 59, 59, 59, 59, 59,
    59, 59, 57, 57, 57, 57, 59, 59,
    59, 59, 57, 55, 55, 57, 59, 59,
    59, 59, 57, 55, 55, 57, 59, 59,
    59, 59, 57, 57, 57, 57, 59, 59,
    59, 59, 59, 59, 59, 59, 59, 59,
    58, 59, 59, 59, 59, 59, 59, 58,
];

#[rustfmt::skip]
const ROOK_OFFSETS: [usize; 64] = [
        0,  4096,  6144,  8192, 10240, 12288, 14336, 16384,
    20480, 22528, 23552, 24576, 25600, 26624, 27648, 28672,
    30720, 32768, 33792, 34816, 35840, 36864, 37888, 38912,
    40960, 43008, 44032, 45056, 46080, 47104, 48128, 49152,
    51200, 53248, 54272, 55296, 56320, 57344, 58368, 59392,
    61440, 63488, 64512, 65536, 66560, 67584, 68608, 69632,
    71680, 73728, 74752, 75776, 76800, 77824, 78848, 79872,
    81920, 86016, 88064, 90112, 92160, 94208, 96256, 98304,
];

#[rustfmt::skip]
const BISHOP_OFFSETS: [usize; 64] = [
       0,   64,   96,  128,  160,  192,  224,  256,
     320,  352,  384,  416,  448,  480,  512,  544,
     576,  608,  640,  768,  896, 1024, 1152, 1184,
    1216, 1248, 1280, 1408, 1920, 2432, 2560, 2592,
    2624, 2656, 2688, 2816, 3328, 3840, 3968, 4000,
    4032, 4064, 4096, 4224, 4352, 4480, 4608, 4640,
    4672, 4704, 4736, 4768, 4800, 4832, 4864, 4896,
    4928, 4992, 5024, 5056, 5088, 5120, 5152, 5184,
];
