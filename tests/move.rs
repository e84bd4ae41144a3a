use std::fmt::Write;

use anyhow::{ensure, Context};
use common::*;
use river_crossing::Board;

mod common;

fn main() {
    run_tests("move", |content| {
        let input = content
            .split_once(SEPARATOR)
            .map_or(content, |(input, _)| input)
            .trim();
        let (actions, map) = input.split_once('\n').context("No actions")?;
        ensure!(!actions.trim().is_empty(), "No actions");

        let mut board = map.parse::<Board>().context("Invalid map")?;
        let mut got = format!("{input}\n\n{SEPARATOR}");
        for (word, i) in actions.split_whitespace().zip(1..) {
            let mv = parse_move(word)?;
            board
                .apply(mv)
                .with_context(|| format!("Failed to perform step {i} {word}"))?;
            write!(got, "{board}{SEPARATOR}").unwrap();
        }

        Ok(got)
    });
}
