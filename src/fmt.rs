use std::fmt;

use crate::{Board, Move, MoveError, Peg, Plank};

impl fmt::Display for Peg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for Plank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = self.ends();
        write!(f, "{a}-{b}")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Walk(peg) => write!(f, "w{peg}"),
            Move::Grab(peg) => write!(f, "g{peg}"),
            Move::Place(peg) => write!(f, "p{peg}"),
        }
    }
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            MoveError::NoPlank => "no plank connects those pegs",
            MoveError::HandsFull => "already carrying a plank",
            MoveError::EmptyHanded => "no plank in hand",
            MoveError::Blocked => "the plank does not fit there",
        };
        msg.fmt(f)
    }
}

impl std::error::Error for MoveError {}

/// Canvas of (2H-1) x (2W-1) cells: grid cells on even/even positions
/// (`.` hole, `+` peg, `p` person, `F` finish), plank spans drawn with
/// `-` / `|` through everything strictly between the endpoints, and a
/// trailing `held: N` line for a carried plank.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.grid();
        let (width, height) = (grid.width as usize, grid.height as usize);
        let pos = |peg: Peg| (2 * grid.row(peg) as usize, 2 * grid.column(peg) as usize);

        let mut canvas = vec![vec![' '; 2 * width - 1]; 2 * height - 1];
        for row in canvas.iter_mut().step_by(2) {
            for cell in row.iter_mut().step_by(2) {
                *cell = '.';
            }
        }
        for &peg in self.pegs() {
            let (r, c) = pos(peg);
            canvas[r][c] = '+';
        }
        for &plank in self.planks() {
            let (a, b) = plank.ends();
            let ((ar, ac), (br, bc)) = (pos(a), pos(b));
            if ar == br {
                for x in (ac + 1)..bc {
                    canvas[ar][x] = '-';
                }
            } else {
                for y in (ar + 1)..br {
                    canvas[y][ac] = '|';
                }
            }
        }
        let (fr, fc) = pos(self.finish());
        canvas[fr][fc] = 'F';
        let (pr, pc) = pos(self.person());
        canvas[pr][pc] = 'p';

        for row in &canvas {
            let line: String = row.iter().collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        if let Some(len) = self.held() {
            writeln!(f, "held: {len}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Board, Grid, Move, Peg, Plank};

    fn board(start: u8, finish: u8, pegs: &[u8], planks: &[(u8, u8)]) -> Board {
        Board::new(
            Grid::default(),
            Peg(start),
            Peg(finish),
            pegs.iter().copied().map(Peg),
            planks.iter().map(|&(a, b)| Plank::new(Peg(a), Peg(b))),
        )
        .unwrap()
    }

    #[test]
    fn renders_pegs_planks_and_markers() {
        let board = board(1, 7, &[1, 6, 7], &[(1, 6), (6, 7)]);
        let expected = "\
p . . . .
|
+-F . . .

. . . . .

. . . . .

. . . . .

. . . . .

. . . . .
";
        assert_eq!(board.to_string(), expected);
    }

    #[test]
    fn renders_the_held_plank() {
        let mut board = board(1, 7, &[1, 6, 7], &[(1, 6)]);
        board.apply(Move::Grab(Peg(6))).unwrap();
        let rendered = board.to_string();
        assert!(rendered.ends_with("held: 1\n"));
        assert!(!rendered.contains('|'));
    }

    #[test]
    fn move_notation() {
        assert_eq!(Move::Walk(Peg(6)).to_string(), "w6");
        assert_eq!(Move::Grab(Peg(1)).to_string(), "g1");
        assert_eq!(Move::Place(Peg(7)).to_string(), "p7");
        assert_eq!(Plank::new(Peg(7), Peg(6)).to_string(), "6-7");
    }
}
