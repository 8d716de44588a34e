use std::path::PathBuf;

use cubeplay_core::{CubeState, apply_moves, validate_cube_str};
use cubeplay_notation::{MoveSequence, parse_moves};
use cubeplay_prefs::{PlaybackSpeed, Preferences};
use cubeplay_view::{MoveSequencePlayer, PlayerEvent};
use eyre::{Context, Result, bail};
use serde::Serialize;

/// Cube move validator and player
///
/// Cube strings are 54 symbols from `URFDLB`, listing the Up, Right, Front,
/// Down, Left, and Back faces in that order, each row by row.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Check a cube string and print the report as JSON.
    Validate {
        /// Cube string to check.
        cube: String,
    },
    /// Apply moves to a cube and print the result as JSON.
    Apply {
        /// Starting cube string.
        cube: CubeState,
        /// Moves (such as `R U R' U'`).
        #[arg(allow_hyphen_values = true, required = true)]
        moves: Vec<String>,
    },
    /// Print the inverse of a move sequence.
    Invert {
        /// Moves (such as `R U R' U'`).
        #[arg(allow_hyphen_values = true, required = true)]
        moves: Vec<String>,
    },
    /// Replay moves in real time, printing the cube after each one.
    Play {
        /// Starting cube string.
        cube: CubeState,
        /// Moves (such as `R U R' U'`).
        #[arg(allow_hyphen_values = true)]
        moves: Vec<String>,

        /// Playback speed (slow, normal, or fast).
        #[arg(short, long)]
        speed: Option<PlaybackSpeed>,
        /// Preferences file (YAML).
        #[arg(long)]
        prefs: Option<PathBuf>,
    },
}

#[derive(Serialize, Debug)]
struct ApplyOutput {
    cube: CubeState,
    moves: MoveSequence,
    solved: bool,
}

pub(crate) fn exec(subcommand: Subcommand) -> Result<()> {
    match subcommand {
        Subcommand::Validate { cube } => {
            let report = validate_cube_str(&cube);
            write_json_output(&report)?;
            if !report.valid {
                bail!("cube string is invalid");
            }
            Ok(())
        }

        Subcommand::Apply { cube, moves } => {
            let moves = parse_move_args(&moves)?;
            let cube = apply_moves(&cube, &moves);
            write_json_output(&ApplyOutput {
                cube,
                moves,
                solved: cube.is_solved(),
            })
        }

        Subcommand::Invert { moves } => {
            println!("{}", parse_move_args(&moves)?.inverse());
            Ok(())
        }

        Subcommand::Play {
            cube,
            moves,
            speed,
            prefs,
        } => {
            let moves = parse_move_args(&moves)?;
            let prefs = Preferences::load(prefs.as_deref());

            let mut player = MoveSequencePlayer::new(&prefs.playback);
            if let Some(speed) = speed {
                player.set_speed(speed);
            }
            player.add_listener(|event| {
                match event {
                    PlayerEvent::SessionStarted { cube, len } => {
                        println!("   0       {cube}  ({len} moves)");
                    }
                    PlayerEvent::Stepped { index, mv, cube } => {
                        println!("{index:>4}  {:<3}  {cube}", mv.to_string());
                    }
                    _ => (),
                }
                Ok(())
            });
            player.start_with(moves, cube)?;

            log::info!("playing at {} speed", player.speed());
            player.play();
            while player.update() {
                if let Some(delay) = player.time_until_tick() {
                    std::thread::sleep(delay);
                }
            }

            let result = match player.last_error() {
                Some(e) => Err(e.clone()).context("playback failed"),
                None => {
                    let cube = player.cube();
                    println!("solved: {}", cube.is_solved());
                    Ok(())
                }
            };
            player.close();
            result
        }
    }
}

/// Parses move arguments. Each argument may hold several moves separated by
/// whitespace.
fn parse_move_args(args: &[String]) -> Result<MoveSequence> {
    Ok(parse_moves(&args.join(" "))?)
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}
