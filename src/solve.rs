use std::collections::BTreeSet;
use std::hash::Hash;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::{Board, Move, Peg, Plank};

type FxIndexMap<K, V> = indexmap::IndexMap<K, V, fxhash::FxBuildHasher>;

/// A problem whose states form an implicit directed graph with goal nodes.
///
/// `key` must identify a state: two states are the same node exactly when
/// their keys are equal. `step` hands back an independent successor, so
/// exploring one branch never touches another.
pub trait Space {
    type State;
    type Key: Hash + Eq;
    type Move: Copy;

    fn key(&self, state: &Self::State) -> Self::Key;
    fn is_goal(&self, state: &Self::State) -> bool;
    fn moves(&self, state: &Self::State) -> Vec<Self::Move>;
    fn step(&self, state: &Self::State, mv: Self::Move) -> Self::State;
}

/// Breadth-first search for a shortest move sequence to a goal state.
/// `on_step` fires once per expanded child. `None` means the goal is
/// unreachable, a normal outcome rather than an error.
pub fn bfs<S: Space>(
    space: &S,
    start: S::State,
    mut on_step: impl FnMut(),
) -> Option<Vec<S::Move>> {
    if space.is_goal(&start) {
        return Some(Vec::new());
    }

    // Insertion order doubles as the FIFO frontier, walked by `cursor`.
    // Each node records its parent index and the move taken from it.
    let mut visited = FxIndexMap::<S::Key, (S::State, usize, Option<S::Move>)>::default();
    visited.insert(space.key(&start), (start, !0usize, None)); // Sentinel parent.

    let mut cursor = 0;
    let (final_idx, final_move) = 'bfs: loop {
        if cursor >= visited.len() {
            return None;
        }

        for mv in space.moves(&visited[cursor].0) {
            on_step();
            let child = space.step(&visited[cursor].0, mv);
            // Goal-check on construction: first found is shortest, without
            // waiting for the child to be dequeued.
            if space.is_goal(&child) {
                break 'bfs (cursor, mv);
            }
            // First path to reach a key wins.
            visited
                .entry(space.key(&child))
                .or_insert((child, cursor, Some(mv)));
        }
        cursor += 1;
    };

    let mut path = std::iter::successors(Some(final_idx), |&i| {
        let parent = visited[i].1;
        (parent != !0usize).then_some(parent)
    })
    .filter_map(|i| visited[i].2)
    .collect::<Vec<_>>();
    path.reverse();
    path.push(final_move);
    Some(path)
}

/// Node identity for crossing searches. The finish peg and the peg layout
/// never change mid-search, so the key covers only the moving parts. The
/// held plank is its length alone, which deliberately conflates grabs of
/// equal-length planks, matching the board's own equality model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardKey {
    person: Peg,
    planks: Vec<Plank>,
    held: Option<u8>,
}

impl BoardKey {
    fn of(board: &Board) -> Self {
        Self {
            person: board.person(),
            planks: board.planks().iter().copied().collect(),
            held: board.held(),
        }
    }
}

fn follow(board: &Board, mv: Move) -> Board {
    let mut next = board.clone();
    next.apply(mv).expect("moves() only yields legal moves");
    next
}

/// The full game: reach the finish peg.
pub struct Crossing;

impl Space for Crossing {
    type State = Board;
    type Key = BoardKey;
    type Move = Move;

    fn key(&self, board: &Board) -> BoardKey {
        BoardKey::of(board)
    }

    fn is_goal(&self, board: &Board) -> bool {
        board.is_solved()
    }

    fn moves(&self, board: &Board) -> Vec<Move> {
        board.moves()
    }

    fn step(&self, board: &Board, mv: Move) -> Board {
        follow(board, mv)
    }
}

/// Goal variant that only cares where the planks end up, ignoring the
/// person's position.
pub struct PlankLayout {
    target: BTreeSet<Plank>,
}

impl PlankLayout {
    pub fn new(target: impl IntoIterator<Item = Plank>) -> Self {
        Self {
            target: target.into_iter().collect(),
        }
    }
}

impl Space for PlankLayout {
    type State = Board;
    type Key = BoardKey;
    type Move = Move;

    fn key(&self, board: &Board) -> BoardKey {
        BoardKey::of(board)
    }

    fn is_goal(&self, board: &Board) -> bool {
        *board.planks() == self.target
    }

    fn moves(&self, board: &Board) -> Vec<Move> {
        board.moves()
    }

    fn step(&self, board: &Board, mv: Move) -> Board {
        follow(board, mv)
    }
}

/// Shortest move sequence bringing the person to the finish peg.
pub fn solve(board: &Board, on_step: impl FnMut()) -> Option<Vec<Move>> {
    bfs(&Crossing, board.clone(), on_step)
}

/// Shortest move sequence rearranging the planks into `target`.
pub fn solve_layout(
    board: &Board,
    target: impl IntoIterator<Item = Plank>,
    on_step: impl FnMut(),
) -> Option<Vec<Move>> {
    bfs(&PlankLayout::new(target), board.clone(), on_step)
}

/// Random walk until the finish peg is reached. Returns `None` from a dead
/// end with no legal moves; on a solvable board this can wander for a long
/// time and the result is nowhere near shortest.
pub fn solve_random(board: &Board, rng: &mut impl Rng) -> Option<Vec<Move>> {
    let mut board = board.clone();
    let mut path = Vec::new();
    while !board.is_solved() {
        let moves = board.moves();
        let &mv = moves.choose(rng)?;
        board.apply(mv).expect("moves() only yields legal moves");
        path.push(mv);
    }
    Some(path)
}
