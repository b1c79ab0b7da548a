use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use gems_core::{BoardView, GameConfig, PlayEngine, PressKind};

use command::{Command, HELP};

mod command;
mod logger;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Tile-matching puzzle in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with a game configuration; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    rows: Option<u8>,

    #[arg(long)]
    cols: Option<u8>,

    /// Number of tile colors
    #[arg(long)]
    colors: Option<u8>,

    /// Leave recolored cells alone until the next move instead of cascading right away
    #[arg(long)]
    no_recolor_cascade: bool,
}

impl Args {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let base = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => GameConfig::default(),
        };

        let (rows, cols) = base.size;
        let config = GameConfig {
            size: (self.rows.unwrap_or(rows), self.cols.unwrap_or(cols)),
            colors: self.colors.unwrap_or(base.colors),
            recolor_cascade: base.recolor_cascade && !self.no_recolor_cascade,
            ..base
        };
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_with_level(args.verbose.log_level_filter())?;

    let config = args.game_config()?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {seed}, config: {config:?}");

    let mut engine = PlayEngine::new_game(config, seed)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{}\n{HELP}", render::board_text(&BoardView::from_engine(&engine)));
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err:#}");
                continue;
            }
        };

        if let Err(err) = run(&mut engine, command) {
            println!("{err}");
            continue;
        }
        match command {
            Command::Quit => break,
            Command::Help | Command::Json => {}
            _ => println!("{}", render::board_text(&BoardView::from_engine(&engine))),
        }
    }

    log::info!("final score {}", engine.score());
    Ok(())
}

fn run(engine: &mut PlayEngine, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Swap(a, b) => {
            let outcome = engine.try_swap(a, b)?;
            if outcome.applied {
                println!(
                    "+{} ({} passes, {} cleared)",
                    outcome.score_delta, outcome.cascade.passes, outcome.cascade.cleared
                );
            } else {
                println!("no match, swap undone");
            }
        }
        Command::Press(coords) => report_press(engine.press(coords, PressKind::Single)?),
        Command::DoublePress(coords) => report_press(engine.press(coords, PressKind::Double)?),
        Command::Bonus(coords) => {
            let outcome = engine.activate_bonus(coords)?;
            match outcome.activated {
                Some(bonus) => println!("{bonus:?} fired: +{}", outcome.score_delta),
                None => println!("no bonus there"),
            }
        }
        Command::NewGame(seed) => engine.restart(seed.unwrap_or_else(rand::random))?,
        Command::Json => {
            println!("{}", serde_json::to_string(&BoardView::from_engine(engine))?)
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
    Ok(())
}

fn report_press(outcome: gems_core::PressOutcome) {
    use gems_core::PressOutcome::*;

    match outcome {
        Selected(coords) => println!("selected {coords:?}"),
        SelectionCleared => println!("selection cleared"),
        Swapped(swap) if swap.applied => println!("+{}", swap.score_delta),
        Swapped(_) => println!("no match, swap undone"),
        BonusActivated(bonus) => println!("bonus fired: +{}", bonus.score_delta),
    }
}
