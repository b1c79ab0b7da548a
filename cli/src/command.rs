use std::str::FromStr;

use anyhow::{Context, anyhow, bail};
use gems_core::{Coord, Coord2};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Swap(Coord2, Coord2),
    Press(Coord2),
    DoublePress(Coord2),
    Bonus(Coord2),
    NewGame(Option<u64>),
    Json,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  s R1 C1 R2 C2   swap two adjacent cells
  p R C           press a cell (select, then press a neighbor to swap)
  d R C           double press a cell (fires its bonus)
  b R C           fire the bonus on a cell
  n [SEED]        start a new game
  j               print the board as JSON
  h               show this help
  q               quit";

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command");
        };
        let args: Vec<&str> = words.collect();

        let command = match (verb, args.as_slice()) {
            ("s" | "swap", &[r1, c1, r2, c2]) => {
                Self::Swap(coords(r1, c1)?, coords(r2, c2)?)
            }
            ("p" | "press", &[row, col]) => Self::Press(coords(row, col)?),
            ("d" | "double", &[row, col]) => Self::DoublePress(coords(row, col)?),
            ("b" | "bonus", &[row, col]) => Self::Bonus(coords(row, col)?),
            ("n" | "new", &[]) => Self::NewGame(None),
            ("n" | "new", &[seed]) => {
                Self::NewGame(Some(seed.parse().with_context(|| format!("bad seed {seed:?}"))?))
            }
            ("j" | "json", &[]) => Self::Json,
            ("h" | "help" | "?", &[]) => Self::Help,
            ("q" | "quit", &[]) => Self::Quit,
            _ => return Err(anyhow!("unrecognized command {line:?}, try `h`")),
        };
        Ok(command)
    }
}

fn coords(row: &str, col: &str) -> anyhow::Result<Coord2> {
    Ok((axis(row)?, axis(col)?))
}

fn axis(word: &str) -> anyhow::Result<Coord> {
    word.parse()
        .with_context(|| format!("bad coordinate {word:?}"))
}
