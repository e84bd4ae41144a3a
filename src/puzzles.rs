//! Built-in puzzles, transcribed from the River Crossing booklet.

use crate::notation::PegNames;
use crate::{Board, Grid, Peg, Plank};

fn board(start: u8, finish: u8, pegs: &[u8], planks: &[(u8, u8)]) -> Board {
    Board::new(
        Grid::default(),
        Peg(start),
        Peg(finish),
        pegs.iter().copied().map(Peg),
        planks.iter().map(|&(a, b)| Plank::new(Peg(a), Peg(b))),
    )
    .expect("built-in puzzle data is valid")
}

/// Three pegs already bridged from start to finish; walking suffices.
pub fn simple() -> Board {
    board(1, 7, &[1, 6, 7], &[(1, 6), (6, 7)])
}

/// Like [`simple`], but the single plank must be carried into place.
pub fn easy_move() -> Board {
    board(1, 7, &[1, 6, 7], &[(1, 6)])
}

pub fn beginner_1() -> Board {
    board(32, 4, &[4, 14, 13, 23, 22, 32], &[(32, 22), (22, 23)])
}

pub fn intermediate_13() -> Board {
    board(
        27,
        15,
        &[7, 9, 15, 13, 11, 17, 27, 19, 24, 23, 21],
        &[(27, 17), (23, 13), (24, 19)],
    )
}

pub fn expert_31() -> Board {
    board(
        16,
        20,
        &[16, 20, 18, 1, 4, 7, 8, 14, 22, 28, 29, 34, 31, 32],
        &[(31, 16), (28, 29), (4, 14), (7, 22)],
    )
}

pub fn expert_39() -> Board {
    board(
        34,
        3,
        &[3, 7, 9, 11, 12, 15, 18, 20, 21, 24, 26, 28, 34],
        &[(34, 24), (24, 9), (9, 7), (7, 12)],
    )
}

pub fn expert_40() -> Board {
    board(
        30,
        1,
        &[1, 4, 8, 9, 12, 15, 16, 18, 19, 21, 22, 24, 26, 28, 30, 32, 33, 34],
        &[(30, 15), (24, 19), (26, 28), (22, 12), (8, 9)],
    )
}

pub const ALL: &[(&str, fn() -> Board)] = &[
    ("simple", simple),
    ("easy_move", easy_move),
    ("beginner_1", beginner_1),
    ("intermediate_13", intermediate_13),
    ("expert_31", expert_31),
    ("expert_39", expert_39),
    ("expert_40", expert_40),
];

pub fn by_name(name: &str) -> Option<Board> {
    ALL.iter()
        .find(|(entry, _)| *entry == name)
        .map(|(_, build)| build())
}

/// The booklet's peg characters for Expert #40.
pub fn expert_40_names() -> PegNames {
    PegNames::new([
        ('6', Peg(1)),
        ('9', Peg(4)),
        ('O', Peg(8)),
        ('T', Peg(9)),
        ('I', Peg(12)),
        ('X', Peg(15)),
        ('C', Peg(16)),
        ('M', Peg(18)),
        ('R', Peg(19)),
        ('B', Peg(21)),
        ('G', Peg(22)),
        ('Q', Peg(24)),
        ('A', Peg(26)),
        ('K', Peg(28)),
        ('U', Peg(30)),
        ('2', Peg(32)),
        ('3', Peg(33)),
        ('4', Peg(34)),
    ])
}

/// The booklet's solution to Expert #40.
pub const EXPERT_40_SOLUTION: &str = "UX-IX GI-GQ GQ-4Q QR-34 34-3K AK-KM 3K-MR KM-CM \
     MR-QR 4Q-GQ QR-BG GQ-2G BG-BC BC-MR CM-KM MR-3K KM-KU 3K-23 23-BG 2G-GI IX-UX \
     KU-KM KM-MO MO-RT OT-QR RT-GQ QR-AB GI-AK GQ-KU BG-BC UX-C6";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_builds() {
        for (name, build) in ALL {
            let board = build();
            assert!(by_name(name).is_some(), "{name} missing from lookup");
            assert!(board.pegs().contains(&board.person()));
            assert!(board.pegs().contains(&board.finish()));
        }
        assert!(by_name("expert_41").is_none());
    }

    #[test]
    fn expert_40_names_cover_its_pegs() {
        let names = expert_40_names();
        let board = expert_40();
        for &plank in board.planks() {
            assert!(names.plank_name(plank).is_ok());
        }
    }
}
