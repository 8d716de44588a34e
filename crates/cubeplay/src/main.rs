//! Command-line front end for validating cube strings and replaying move
//! sequences.

mod cli;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    // Initialize logging.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    color_eyre::install().expect("error initializing panic handler");
    cli::exec(args.subcommand)
}
