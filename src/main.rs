use anyhow::{bail, Context, Result};
use console::{Key, Term};
use indicatif::ProgressBar;
use river_crossing::{notation, plank_moves, puzzles, solve, Board, Move};

enum Action {
    Exit,
    Pick(usize),
    Undo,
    Reset,
}

impl TryFrom<Key> for Action {
    type Error = ();

    fn try_from(key: Key) -> Result<Self, Self::Error> {
        Ok(match key {
            Key::Char(ch @ '1'..='9') => Self::Pick(ch as usize - '1' as usize),
            Key::Escape | Key::Char('q') => Self::Exit,
            Key::Char('z') => Self::Undo,
            Key::Char('r') => Self::Reset,
            _ => return Err(()),
        })
    }
}

fn main() -> Result<()> {
    let mut interactive = false;
    let mut random = false;
    let mut target = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--play" => interactive = true,
            "--random" => random = true,
            _ if target.is_none() => target = Some(arg),
            _ => bail!("Unexpected argument: {arg}"),
        }
    }
    let target =
        target.context("Usage: river-crossing [--play|--random] <puzzle-name|map-file>")?;
    let board = load_board(&target)?;

    if interactive {
        return play(board);
    }
    if random {
        let moves = solve::solve_random(&board, &mut rand::thread_rng())
            .context("The random walk hit a dead end")?;
        println!("Reached the finish after {} random moves", moves.len());
        return Ok(());
    }

    let bar = ProgressBar::new_spinner();
    let mut expanded = 0u64;
    let solution = solve::solve(&board, || {
        expanded += 1;
        if expanded % 4096 == 0 {
            bar.set_message(format!("{expanded} states expanded"));
            bar.tick();
        }
    });
    bar.finish_and_clear();

    match solution {
        Some(moves) => {
            println!(
                "Solved in {} moves ({} moving planks): {}",
                moves.len(),
                plank_moves(&moves).len(),
                fmt_moves(&moves),
            );
            if target == "expert_40" {
                let names = puzzles::expert_40_names();
                let encoded = notation::encode(&moves, &names, board.person())?;
                println!("Booklet notation: {encoded}");
            }
        }
        None => println!("The finish peg is unreachable"),
    }
    Ok(())
}

fn load_board(target: &str) -> Result<Board> {
    if let Some(board) = puzzles::by_name(target) {
        return Ok(board);
    }
    let data = std::fs::read_to_string(target)
        .with_context(|| format!("No built-in puzzle or readable map file named {target:?}"))?;
    data.parse().context("Failed to parse the map")
}

fn fmt_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|mv| mv.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn play(init: Board) -> Result<()> {
    let term = Term::stderr();
    let mut board = init.clone();
    let mut history: Vec<Board> = Vec::new();
    loop {
        eprintln!("{board}");
        if board.is_solved() {
            eprintln!("Solved!");
            return Ok(());
        }
        let moves = board.moves();
        for (i, mv) in moves.iter().enumerate() {
            eprintln!("  {}: {mv}", i + 1);
        }

        let action = loop {
            if let Ok(action) = Action::try_from(term.read_key()?) {
                break action;
            }
        };

        match action {
            Action::Exit => return Ok(()),
            Action::Pick(i) => {
                if let Some(&mv) = moves.get(i) {
                    let mut next = board.clone();
                    if next.apply(mv).is_ok() {
                        history.push(board);
                        board = next;
                    }
                }
            }
            Action::Undo => {
                if let Some(last) = history.pop() {
                    board = last;
                }
            }
            Action::Reset => {
                history.push(board);
                board = init.clone();
            }
        }
    }
}
