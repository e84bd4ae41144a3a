use std::collections::BTreeSet;

use anyhow::{ensure, Result};
use arrayvec::ArrayVec;

mod fmt;
pub mod notation;
mod parse;
pub mod puzzles;
pub mod solve;

/// A grid cell, addressed by its 1-based row-major index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Peg(pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up = 0,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];
}

/// The peg lattice. Pegs count from 1 in row-major order, so the cell at
/// row `r`, column `c` is peg `r * width + c + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    pub width: u8,
    pub height: u8,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            width: 5,
            height: 7,
        }
    }
}

impl Grid {
    pub fn new(width: u8, height: u8) -> Self {
        assert!(
            width >= 1 && height >= 1 && (width as u16) * (height as u16) <= u8::MAX as u16,
            "peg indices must fit in u8",
        );
        Self { width, height }
    }

    fn row(self, peg: Peg) -> u8 {
        (peg.0 - 1) / self.width
    }

    fn column(self, peg: Peg) -> u8 {
        (peg.0 - 1) % self.width
    }

    pub fn contains(self, peg: Peg) -> bool {
        1 <= peg.0 && (peg.0 as u16) <= (self.width as u16) * (self.height as u16)
    }

    /// Walks `steps` cells from `peg`, one cell at a time. `None` as soon as
    /// any single step would cross the grid boundary.
    pub fn step(self, peg: Peg, dir: Direction, steps: u8) -> Option<Peg> {
        let mut cur = peg;
        for _ in 0..steps {
            let (row, col) = (self.row(cur), self.column(cur));
            cur = match dir {
                Direction::Up => (row > 0).then(|| Peg(cur.0 - self.width))?,
                Direction::Right => (col + 1 < self.width).then(|| Peg(cur.0 + 1))?,
                Direction::Down => (row + 1 < self.height).then(|| Peg(cur.0 + self.width))?,
                Direction::Left => (col > 0).then(|| Peg(cur.0 - 1))?,
            };
        }
        Some(cur)
    }

    /// Direction from `a` to `b` and the number of cells between them.
    /// `None` when the pegs share neither a row nor a column.
    pub fn offset(self, a: Peg, b: Peg) -> Option<(Direction, u8)> {
        let dist = a.0.abs_diff(b.0);
        if self.column(a) == self.column(b) {
            let dir = if b > a { Direction::Down } else { Direction::Up };
            Some((dir, dist / self.width))
        } else if self.row(a) == self.row(b) {
            let dir = if b > a { Direction::Right } else { Direction::Left };
            Some((dir, dist))
        } else {
            None
        }
    }

    pub fn distance(self, a: Peg, b: Peg) -> Option<u8> {
        Some(self.offset(a, b)?.1)
    }

    /// Pegs strictly between a plank's endpoints; empty for adjacent ends.
    pub fn waypoints(self, plank: Plank) -> impl Iterator<Item = Peg> {
        let Plank(a, b) = plank;
        let offset = self.offset(a, b);
        (1..).map_while(move |i| {
            let (dir, dist) = offset?;
            if i >= dist {
                return None;
            }
            self.step(a, dir, i)
        })
    }
}

/// An unordered pair of distinct pegs on one row or column. Endpoints are
/// kept sorted, so equality and hashing ignore orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Plank(Peg, Peg);

impl Plank {
    pub fn new(a: Peg, b: Peg) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn ends(self) -> (Peg, Peg) {
        (self.0, self.1)
    }

    /// The opposite endpoint, or `None` if `peg` is not an endpoint.
    pub fn other_end(self, peg: Peg) -> Option<Peg> {
        if self.0 == peg {
            Some(self.1)
        } else if self.1 == peg {
            Some(self.0)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Walk(Peg),
    Grab(Peg),
    Place(Peg),
}

impl Move {
    pub fn target(self) -> Peg {
        match self {
            Move::Walk(peg) | Move::Grab(peg) | Move::Place(peg) => peg,
        }
    }

    /// Whether this move relocates a plank rather than just the person.
    pub fn moves_plank(self) -> bool {
        matches!(self, Move::Grab(_) | Move::Place(_))
    }
}

/// The grab and place moves of a sequence, walks stripped.
pub fn plank_moves(moves: &[Move]) -> Vec<Move> {
    moves.iter().copied().filter(|mv| mv.moves_plank()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveError {
    /// No plank bridges the person's peg and the target peg.
    NoPlank,
    /// Grab while already carrying a plank.
    HandsFull,
    /// Place with nothing in hand.
    EmptyHanded,
    /// Place target is missing, misaligned, or the span is obstructed.
    Blocked,
}

/// One game state: the person on a peg lattice with planks bridging pegs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    grid: Grid,
    person: Peg,
    finish: Peg,
    pegs: BTreeSet<Peg>,
    planks: BTreeSet<Plank>,
    // Always the union of the waypoints of `planks`.
    covered: BTreeSet<Peg>,
    // A carried plank, tracked by length alone. Two grabbed planks of equal
    // length are the same state no matter which plank was picked up.
    held: Option<u8>,
}

impl Board {
    pub fn new(
        grid: Grid,
        start: Peg,
        finish: Peg,
        pegs: impl IntoIterator<Item = Peg>,
        planks: impl IntoIterator<Item = Plank>,
    ) -> Result<Self> {
        let pegs: BTreeSet<Peg> = pegs.into_iter().collect();
        for &peg in &pegs {
            ensure!(grid.contains(peg), "peg {peg} is outside the grid");
        }
        ensure!(pegs.contains(&start), "start peg {start} is not on the board");
        ensure!(
            pegs.contains(&finish),
            "finish peg {finish} is not on the board",
        );

        let mut board = Self {
            grid,
            person: start,
            finish,
            pegs,
            planks: BTreeSet::new(),
            covered: BTreeSet::new(),
            held: None,
        };
        for plank in planks {
            let (a, b) = plank.ends();
            ensure!(
                board.pegs.contains(&a) && board.pegs.contains(&b),
                "plank {plank} must rest on pegs",
            );
            ensure!(
                a != b && grid.offset(a, b).is_some(),
                "plank {plank} endpoints must be distinct and share a row or column",
            );
            board.add_plank(plank);
        }
        Ok(board)
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn person(&self) -> Peg {
        self.person
    }

    pub fn finish(&self) -> Peg {
        self.finish
    }

    pub fn pegs(&self) -> &BTreeSet<Peg> {
        &self.pegs
    }

    pub fn planks(&self) -> &BTreeSet<Plank> {
        &self.planks
    }

    pub fn held(&self) -> Option<u8> {
        self.held
    }

    pub fn is_solved(&self) -> bool {
        self.person == self.finish
    }

    /// Moves the person without walking a plank. Collaborators replaying a
    /// known solution use this; searches go through [`Board::apply`].
    pub fn set_person(&mut self, peg: Peg) {
        assert!(self.pegs.contains(&peg), "person must stand on a peg");
        self.person = peg;
    }

    pub fn add_plank(&mut self, plank: Plank) {
        self.planks.insert(plank);
        self.covered.extend(self.grid.waypoints(plank));
    }

    pub fn remove_plank(&mut self, plank: Plank) -> bool {
        if !self.planks.remove(&plank) {
            return false;
        }
        for waypoint in self.grid.waypoints(plank) {
            self.covered.remove(&waypoint);
        }
        true
    }

    /// All legal moves from this state, walks first. Grab targets coincide
    /// with walk targets: standing at a plank's end lets you cross it or
    /// pick it up.
    pub fn moves(&self) -> Vec<Move> {
        let mut moves: Vec<Move> = self.walk_targets().map(Move::Walk).collect();
        match self.held {
            None => moves.extend(self.walk_targets().map(Move::Grab)),
            Some(len) => moves.extend(self.place_targets(len).into_iter().map(Move::Place)),
        }
        moves
    }

    fn walk_targets(&self) -> impl Iterator<Item = Peg> + '_ {
        let person = self.person;
        self.planks.iter().filter_map(move |p| p.other_end(person))
    }

    /// Pegs where the held plank can come down: `len` cells away in a
    /// straight line, with every cell in between clear of pegs and planks.
    fn place_targets(&self, len: u8) -> ArrayVec<Peg, 4> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| {
                let to = self.grid.step(self.person, dir, len)?;
                (self.pegs.contains(&to) && self.span_is_clear(to)).then_some(to)
            })
            .collect()
    }

    fn span_is_clear(&self, to: Peg) -> bool {
        self.grid
            .waypoints(Plank::new(self.person, to))
            .all(|w| !self.covered.contains(&w) && !self.pegs.contains(&w))
    }

    fn plank_between(&self, a: Peg, b: Peg) -> Option<Plank> {
        let plank = Plank::new(a, b);
        self.planks.contains(&plank).then_some(plank)
    }

    /// Applies one move in place. Errors mean the move did not come from
    /// [`Board::moves`] on this very state; nothing is mutated on error.
    pub fn apply(&mut self, mv: Move) -> Result<(), MoveError> {
        match mv {
            Move::Walk(to) => {
                self.plank_between(self.person, to)
                    .ok_or(MoveError::NoPlank)?;
                self.person = to;
            }
            Move::Grab(to) => {
                if self.held.is_some() {
                    return Err(MoveError::HandsFull);
                }
                let plank = self
                    .plank_between(self.person, to)
                    .ok_or(MoveError::NoPlank)?;
                let (a, b) = plank.ends();
                let len = self.grid.distance(a, b).ok_or(MoveError::NoPlank)?;
                self.remove_plank(plank);
                self.held = Some(len);
            }
            Move::Place(to) => {
                let len = self.held.ok_or(MoveError::EmptyHanded)?;
                let aligned = matches!(self.grid.offset(self.person, to), Some((_, d)) if d == len);
                if !(aligned && self.pegs.contains(&to) && self.span_is_clear(to)) {
                    return Err(MoveError::Blocked);
                }
                self.add_plank(Plank::new(self.person, to));
                self.held = None;
            }
        }
        Ok(())
    }
}
