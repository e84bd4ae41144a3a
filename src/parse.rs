use std::str::FromStr;

use anyhow::{bail, ensure, Context, Result};

use crate::{Board, Grid, Peg, Plank};

impl FromStr for Board {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut held = None;
        let mut rows: Vec<Vec<char>> = Vec::new();
        for line in s.lines() {
            let line = line.trim_end();
            if let Some(value) = line.strip_prefix("held:") {
                ensure!(held.is_none(), "Duplicate held line");
                held = Some(value.trim().parse::<u8>().context("Invalid held length")?);
                continue;
            }
            rows.push(line.chars().collect());
        }
        while rows.last().map_or(false, |row| row.is_empty()) {
            rows.pop();
        }
        ensure!(
            rows.len() % 2 == 1 && !rows[0].is_empty() && rows[0].len() % 2 == 1,
            "Canvas must span 2*height-1 lines of 2*width-1 cells",
        );
        let height = (rows.len() + 1) / 2;
        let width = (rows[0].len() + 1) / 2;
        ensure!(
            width * height <= u8::MAX as usize,
            "Grid of {width}x{height} cells does not fit peg indices",
        );
        let grid = Grid::new(width as u8, height as u8);

        let at = |r: usize, c: usize| {
            rows.get(r)
                .and_then(|row| row.get(c))
                .copied()
                .unwrap_or(' ')
        };
        let peg_at = |r: usize, c: usize| Peg((r * width + c + 1) as u8);

        let mut pegs = Vec::new();
        let mut person = None;
        let mut finish = None;
        let mut planks = Vec::new();
        for r in 0..height {
            for c in 0..width {
                match at(2 * r, 2 * c) {
                    // Holes, blanks, and cells a plank passes over.
                    '.' | ' ' | '-' | '|' => continue,
                    '+' => {}
                    'p' => {
                        ensure!(person.is_none(), "Multiple persons");
                        person = Some(peg_at(r, c));
                    }
                    'F' => {
                        ensure!(finish.is_none(), "Multiple finish pegs");
                        finish = Some(peg_at(r, c));
                    }
                    ch => bail!("Invalid cell: {ch:?}"),
                }
                pegs.push(peg_at(r, c));

                // A span is read from its upper/left endpoint only; the far
                // endpoint sees no link beyond itself.
                if at(2 * r, 2 * c + 1) == '-' {
                    let mut end = c + 1;
                    loop {
                        match at(2 * r, 2 * end) {
                            '+' | 'p' | 'F' => break,
                            '-' => {
                                ensure!(at(2 * r, 2 * end + 1) == '-', "Dangling plank, row {r}");
                                end += 1;
                            }
                            ch => bail!("Broken plank at cell {ch:?}, row {r}"),
                        }
                    }
                    planks.push(Plank::new(peg_at(r, c), peg_at(r, end)));
                }
                if at(2 * r + 1, 2 * c) == '|' {
                    let mut end = r + 1;
                    loop {
                        match at(2 * end, 2 * c) {
                            '+' | 'p' | 'F' => break,
                            '|' => {
                                ensure!(
                                    at(2 * end + 1, 2 * c) == '|',
                                    "Dangling plank, column {c}",
                                );
                                end += 1;
                            }
                            ch => bail!("Broken plank at cell {ch:?}, column {c}"),
                        }
                    }
                    planks.push(Plank::new(peg_at(r, c), peg_at(end, c)));
                }
            }
        }

        let mut board = Board::new(
            grid,
            person.context("Missing person")?,
            finish.context("Missing finish peg")?,
            pegs,
            planks,
        )?;
        board.held = held;
        Ok(board)
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
    fn display_round_trips() {
        for board in [
            board(1, 7, &[1, 6, 7], &[(1, 6), (6, 7)]),
            board(32, 4, &[4, 13, 14, 22, 23, 32], &[(22, 32), (22, 23)]),
            crate::puzzles::by_name("expert_40").unwrap(),
        ] {
            let reparsed: Board = board.to_string().parse().unwrap();
            assert_eq!(reparsed, board);
        }
    }

    #[test]
    fn display_round_trips_with_held_plank() {
        let mut board = board(1, 7, &[1, 6, 7], &[(1, 6)]);
        board.apply(Move::Grab(Peg(6))).unwrap();
        let reparsed: Board = board.to_string().parse().unwrap();
        assert_eq!(reparsed, board);
    }

    #[test]
    fn rejects_malformed_maps() {
        // No finish marker.
        assert!("p-+".parse::<Board>().is_err());
        // Unknown cell.
        assert!("p-F x".parse::<Board>().is_err());
        // Plank running off into nothing.
        assert!("p-. F".parse::<Board>().is_err());
    }

    #[test]
    fn rejects_maps_too_large_for_peg_indices() {
        // A 256-cell row overflows the u8 peg index.
        let wide = format!("p{}F", "-".repeat(509));
        assert!(wide.parse::<Board>().is_err());
    }

    #[test]
    fn parses_a_minimal_map() {
        let board: Board = "p-+-F".parse().unwrap();
        assert_eq!(board.grid(), Grid::new(3, 1));
        assert_eq!(board.person(), Peg(1));
        assert_eq!(board.finish(), Peg(3));
        assert_eq!(
            board.planks().iter().copied().collect::<Vec<_>>(),
            [Plank::new(Peg(1), Peg(2)), Plank::new(Peg(2), Peg(3))],
        );
    }
}
