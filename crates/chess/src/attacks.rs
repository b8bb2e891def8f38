//! Precomputed attack tables.
//!
//! Leapers (pawn, knight, king) use flat per-square lookups. Sliders use
//! magic bitboards: the occupancy is masked to the square's relevant
//! blockers, multiplied by a fixed magic, and shifted down to an index into
//! a single attack array shared by rooks and bishops.

use std::sync::OnceLock;

use log::debug;

use crate::{Bitboard, Color, Square};

/// A piece whose reach depends on occupancy
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Slider {
    Bishop,
    Rook,
}

impl Slider {
    const fn directions(self) -> &'static [(i8, i8); 4] {
        match self {
            Slider::Bishop => &[(1, 1), (-1, 1), (1, -1), (-1, -1)],
            Slider::Rook => &[(0, 1), (0, -1), (1, 0), (-1, 0)],
        }
    }

    const fn magics(self) -> &'static [u64; 64] {
        match self {
            Slider::Bishop => &BISHOP_MAGICS,
            Slider::Rook => &ROOK_MAGICS,
        }
    }

    const fn index(self) -> usize {
        match self {
            Slider::Bishop => 0,
            Slider::Rook => 1,
        }
    }
}

/// A piece with a fixed attack pattern
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Leaper {
    Knight,
    King,
}

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

// Found offline by randomized search. With shift = 64 - popcount(mask) every
// square hashes its blocker subsets without destructive collisions.
const ROOK_MAGICS: [u64; 64] = [
    0x0080001020400080, 0x0040001000200040, 0x0080081000200080, 0x0080040800100080,
    0x0080020400080080, 0x0080010200040080, 0x0080008001000200, 0x0080002040800100,
    0x0000800020400080, 0x0000400020005000, 0x0000801000200080, 0x0000800800100080,
    0x0000800400080080, 0x0000800200040080, 0x0000800100020080, 0x0000800040800100,
    0x0000208000400080, 0x0000404000201000, 0x0000808010002000, 0x0000808008001000,
    0x0000808004000800, 0x0000808002000400, 0x0000010100020004, 0x0000020000408104,
    0x0000208080004000, 0x0000200040005000, 0x0000100080200080, 0x0000080080100080,
    0x0000040080080080, 0x0000020080040080, 0x0000010080800200, 0x0000800080004100,
    0x0000204000800080, 0x0000200040401000, 0x0000100080802000, 0x0000080080801000,
    0x0000040080800800, 0x0000020080800400, 0x0000020001010004, 0x0000800040800100,
    0x0000204000808000, 0x0000200040008080, 0x0000100020008080, 0x0000080010008080,
    0x0000040008008080, 0x0000020004008080, 0x0000010002008080, 0x0000004081020004,
    0x0000204000800080, 0x0000200040008080, 0x0000100020008080, 0x0000080010008080,
    0x0000040008008080, 0x0000020004008080, 0x0000800100020080, 0x0000800041000080,
    0x00fffcddfced714a, 0x007ffcddfced714a, 0x003fffcdffd88096, 0x0000040810002101,
    0x0001000204080011, 0x0001000204000801, 0x0001000082000401, 0x0001fffaabfad1a2,
];

const BISHOP_MAGICS: [u64; 64] = [
    0x0002020202020200, 0x0002020202020000, 0x0004010202000000, 0x0004040080000000,
    0x0001104000000000, 0x0000821040000000, 0x0000410410400000, 0x0000104104104000,
    0x0000040404040400, 0x0000020202020200, 0x0000040102020000, 0x0000040400800000,
    0x0000011040000000, 0x0000008210400000, 0x0000004104104000, 0x0000002082082000,
    0x0004000808080800, 0x0002000404040400, 0x0001000202020200, 0x0000800802004000,
    0x0000800400a00000, 0x0000200100884000, 0x0000400082082000, 0x0000200041041000,
    0x0002080010101000, 0x0001040008080800, 0x0000208004010400, 0x0000404004010200,
    0x0000840000802000, 0x0000404002011000, 0x0000808001041000, 0x0000404000820800,
    0x0001041000202000, 0x0000820800101000, 0x0000104400080800, 0x0000020080080080,
    0x0000404040040100, 0x0000808100020100, 0x0001010100020800, 0x0000808080010400,
    0x0000820820004000, 0x0000410410002000, 0x0000082088001000, 0x0000002011000800,
    0x0000080100400400, 0x0001010101000200, 0x0002020202000400, 0x0001010101000200,
    0x0000410410400000, 0x0000208208200000, 0x0000002084100000, 0x0000000020880000,
    0x0000001002020000, 0x0000040408020000, 0x0004040404040000, 0x0002020202020000,
    0x0000104104104000, 0x0000002082082000, 0x0000000020841000, 0x0000000000208800,
    0x0000000010020200, 0x0000000404080200, 0x0000040404040400, 0x0002020202020200,
];

#[derive(Clone, Copy, Default)]
struct Magic {
    mask: Bitboard,
    magic: u64,
    shift: u32,
    offset: usize,
}

impl Magic {
    #[inline]
    fn index(&self, occupancy: Bitboard) -> usize {
        let blockers = (occupancy & self.mask).0;
        self.offset + (blockers.wrapping_mul(self.magic) >> self.shift) as usize
    }
}

/// Read-only attack lookups, built once per process; see [`attacks`]
pub struct AttackTables {
    pawn_attacks: [[Bitboard; 64]; 2],
    pawn_steps: [[Bitboard; 64]; 2],
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    magics: [[Magic; 64]; 2],
    sliding: Vec<Bitboard>,
}

impl AttackTables {
    fn build() -> Self {
        let mut pawn_attacks = [[Bitboard::EMPTY; 64]; 2];
        let mut pawn_steps = [[Bitboard::EMPTY; 64]; 2];
        let mut knight = [Bitboard::EMPTY; 64];
        let mut king = [Bitboard::EMPTY; 64];

        for sq in Square::all() {
            let bb = sq.bitboard();
            let i = sq.index();

            pawn_attacks[Color::White.index()][i] = bb.north_east() | bb.north_west();
            pawn_attacks[Color::Black.index()][i] = bb.south_east() | bb.south_west();
            pawn_steps[Color::White.index()][i] = bb.north();
            pawn_steps[Color::Black.index()][i] = bb.south();

            king[i] = bb.north()
                | bb.south()
                | bb.east()
                | bb.west()
                | bb.north_east()
                | bb.north_west()
                | bb.south_east()
                | bb.south_west();

            knight[i] = KNIGHT_STEPS
                .iter()
                .filter_map(|&(df, dr)| sq.offset(df, dr))
                .fold(Bitboard::EMPTY, |acc, to| acc | to.bitboard());
        }

        let mut sliding = Vec::new();
        let bishop = build_magics(Slider::Bishop, &mut sliding);
        let rook = build_magics(Slider::Rook, &mut sliding);

        debug!(
            "attack tables built: {} sliding entries ({} KiB)",
            sliding.len(),
            sliding.len() * std::mem::size_of::<Bitboard>() / 1024
        );

        AttackTables {
            pawn_attacks,
            pawn_steps,
            knight,
            king,
            magics: [bishop, rook],
            sliding,
        }
    }

    /// Squares attacked by a bishop or rook on `sq`, stopping at (and
    /// including) the first occupied square along each ray
    #[inline]
    pub fn sliding_attacks(&self, slider: Slider, sq: Square, occupied: Bitboard) -> Bitboard {
        let magic = &self.magics[slider.index()][sq.index()];
        self.sliding[magic.index(occupied)]
    }

    #[inline]
    pub fn queen_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.sliding_attacks(Slider::Bishop, sq, occupied)
            | self.sliding_attacks(Slider::Rook, sq, occupied)
    }

    #[inline]
    pub fn leaper_attacks(&self, leaper: Leaper, sq: Square) -> Bitboard {
        match leaper {
            Leaper::Knight => self.knight[sq.index()],
            Leaper::King => self.king[sq.index()],
        }
    }

    /// Diagonal capture squares of a `color` pawn on `sq`
    #[inline]
    pub fn pawn_attacks(&self, color: Color, sq: Square) -> Bitboard {
        self.pawn_attacks[color.index()][sq.index()]
    }

    /// Push destinations of a `color` pawn on `sq`. The double push is only
    /// offered from the start rank, and only when both squares are empty.
    #[inline]
    pub fn pawn_pushes(&self, color: Color, sq: Square, empty: Bitboard) -> Bitboard {
        let single = self.pawn_steps[color.index()][sq.index()] & empty;
        if single.is_empty() || sq.rank() != color.pawn_start_rank() {
            return single;
        }
        let double = match color {
            Color::White => single.north(),
            Color::Black => single.south(),
        };
        single | (double & empty)
    }
}

fn build_magics(slider: Slider, sliding: &mut Vec<Bitboard>) -> [Magic; 64] {
    std::array::from_fn(|i| {
        let sq = Square::from_index(i);
        let mask = relevancy_mask(sq, slider);
        let bits = mask.popcount();
        let magic = Magic {
            mask,
            magic: slider.magics()[i],
            shift: 64 - bits,
            offset: sliding.len(),
        };

        sliding.resize(magic.offset + (1 << bits), Bitboard::EMPTY);
        for index in 0..(1u64 << bits) {
            let occupancy = Bitboard::subset(mask, index);
            let attacks = ray_attacks(sq, slider, occupancy);
            let slot = &mut sliding[magic.index(occupancy)];
            // A slider always reaches at least one square, so EMPTY marks a free slot
            assert!(
                slot.is_empty() || *slot == attacks,
                "magic collision for {slider:?} on {sq}"
            );
            *slot = attacks;
        }
        magic
    })
}

/// Blockers that can change the attack set: each ray minus its edge square
fn relevancy_mask(sq: Square, slider: Slider) -> Bitboard {
    let mut mask = Bitboard::EMPTY;
    for &(df, dr) in slider.directions() {
        let mut cur = sq;
        while let Some(next) = cur.offset(df, dr) {
            if next.offset(df, dr).is_none() {
                break;
            }
            mask.set(next);
            cur = next;
        }
    }
    mask
}

/// Slow ray walk used to fill the tables
fn ray_attacks(sq: Square, slider: Slider, occupancy: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &(df, dr) in slider.directions() {
        let mut cur = sq;
        while let Some(next) = cur.offset(df, dr) {
            attacks.set(next);
            if occupancy.contains(next) {
                break;
            }
            cur = next;
        }
    }
    attacks
}

static ATTACKS: OnceLock<AttackTables> = OnceLock::new();

/// The process-wide attack tables, built on first use
pub fn attacks() -> &'static AttackTables {
    ATTACKS.get_or_init(AttackTables::build)
}
