//! The booklet's letter-pair notation: each plank movement is written as
//! the two characters naming the grabbed plank's pegs, a `-`, and the two
//! characters naming where it is placed. Walks are implicit.

use anyhow::{bail, ensure, Context, Result};
use fxhash::FxHashMap;

use crate::{Board, Move, Peg, Plank};

/// Two-way mapping between pegs and the booklet's peg characters.
pub struct PegNames {
    chars: FxHashMap<Peg, char>,
    pegs: FxHashMap<char, Peg>,
}

impl PegNames {
    pub fn new(pairs: impl IntoIterator<Item = (char, Peg)>) -> Self {
        let mut chars = FxHashMap::default();
        let mut pegs = FxHashMap::default();
        for (ch, peg) in pairs {
            let ch = ch.to_ascii_uppercase();
            chars.insert(peg, ch);
            pegs.insert(ch, peg);
        }
        Self { chars, pegs }
    }

    fn chr(&self, peg: Peg) -> Result<char> {
        self.chars
            .get(&peg)
            .copied()
            .with_context(|| format!("Peg {peg} has no name"))
    }

    fn peg(&self, ch: char) -> Result<Peg> {
        self.pegs
            .get(&ch.to_ascii_uppercase())
            .copied()
            .with_context(|| format!("No peg is named {ch:?}"))
    }

    pub fn plank_name(&self, plank: Plank) -> Result<String> {
        let (a, b) = plank.ends();
        let mut chars = [self.chr(a)?, self.chr(b)?];
        chars.sort_unstable();
        Ok(chars.iter().collect())
    }
}

/// Renders a move sequence in booklet notation. Walk moves only advance the
/// implied person position; each grab/place pair names the moved plank.
pub fn encode(moves: &[Move], names: &PegNames, start: Peg) -> Result<String> {
    let mut out = String::new();
    let mut person = start;
    for &mv in moves {
        match mv {
            Move::Walk(peg) => person = peg,
            Move::Grab(peg) => {
                out.push_str(&names.plank_name(Plank::new(person, peg))?);
                out.push('-');
            }
            Move::Place(peg) => {
                out.push_str(&names.plank_name(Plank::new(person, peg))?);
                out.push(' ');
            }
        }
    }
    Ok(out.trim_end().to_owned())
}

/// Replays a notation string against a base board, pair by pair. Handy for
/// comparing a found solution against the booklet's.
pub struct Stepper {
    base: Board,
    moves: Vec<(Plank, Plank)>,
}

impl Stepper {
    pub fn new(base: Board, solution: &str, names: &PegNames) -> Result<Self> {
        let moves = solution
            .split_whitespace()
            .map(|pair| {
                let (grab, place) = pair
                    .split_once('-')
                    .with_context(|| format!("Pair {pair:?} has no grab/place separator"))?;
                Ok((parse_plank(grab, names)?, parse_plank(place, names)?))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { base, moves })
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// The board after the first `step` grab/place pairs, the person left
    /// on the placed plank's lower-numbered end. Errors on a step beyond
    /// the solution or a pair grabbing a plank that is not on the board.
    pub fn board_at(&self, step: usize) -> Result<Board> {
        ensure!(
            step <= self.moves.len(),
            "Step {step} is beyond the {} pairs of the solution",
            self.moves.len(),
        );
        let mut board = self.base.clone();
        for &(grab, place) in &self.moves[..step] {
            ensure!(board.remove_plank(grab), "Plank {grab} is not on the board");
            board.add_plank(place);
            board.set_person(place.ends().0);
        }
        Ok(board)
    }
}

fn parse_plank(s: &str, names: &PegNames) -> Result<Plank> {
    let mut chars = s.chars();
    let (Some(a), Some(b), None) = (chars.next(), chars.next(), chars.next()) else {
        bail!("Plank {s:?} must name exactly two pegs");
    };
    Ok(Plank::new(names.peg(a)?, names.peg(b)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzles;

    fn names() -> PegNames {
        PegNames::new([('A', Peg(1)), ('B', Peg(6)), ('C', Peg(7))])
    }

    #[test]
    fn encodes_plank_movements_only() {
        let moves = [
            Move::Walk(Peg(6)),
            Move::Grab(Peg(1)),
            Move::Place(Peg(7)),
            Move::Walk(Peg(7)),
        ];
        let encoded = encode(&moves, &names(), Peg(1)).unwrap();
        assert_eq!(encoded, "AB-BC");
    }

    #[test]
    fn stepper_replays_pairs() {
        let base = puzzles::by_name("easy_move").unwrap();
        let stepper = Stepper::new(base.clone(), "ab-bc", &names()).unwrap();
        assert_eq!(stepper.len(), 1);
        assert_eq!(stepper.board_at(0).unwrap(), base);

        let stepped = stepper.board_at(1).unwrap();
        assert_eq!(stepped.person(), Peg(6));
        assert_eq!(
            stepped.planks().iter().copied().collect::<Vec<_>>(),
            [Plank::new(Peg(6), Peg(7))],
        );
    }

    #[test]
    fn booklet_solution_to_expert_40_reaches_the_finish() {
        let base = puzzles::by_name("expert_40").unwrap();
        let names = puzzles::expert_40_names();
        let stepper = Stepper::new(base, puzzles::EXPERT_40_SOLUTION, &names).unwrap();
        let done = stepper.board_at(stepper.len()).unwrap();
        assert!(done.is_solved());
        assert_eq!(done.planks().len(), 5);
    }

    #[test]
    fn stepper_rejects_pairs_grabbing_absent_planks() {
        // The only plank on the board is A-B; grabbing A-C must not replay.
        let base = puzzles::by_name("easy_move").unwrap();
        let stepper = Stepper::new(base.clone(), "AC-BC", &names()).unwrap();
        assert!(stepper.board_at(1).is_err());
        assert_eq!(stepper.board_at(0).unwrap(), base);
    }

    #[test]
    fn stepper_rejects_steps_beyond_the_solution() {
        let base = puzzles::by_name("easy_move").unwrap();
        let stepper = Stepper::new(base, "AB-BC", &names()).unwrap();
        assert!(stepper.board_at(2).is_err());
    }

    #[test]
    fn rejects_malformed_notation() {
        let names = names();
        let base = puzzles::by_name("easy_move").unwrap();
        assert!(Stepper::new(base.clone(), "ABBC", &names).is_err());
        assert!(Stepper::new(base.clone(), "AB-BCD", &names).is_err());
        assert!(Stepper::new(base, "AB-BZ", &names).is_err());
    }
}
