mod compare;
mod score;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "alnq";
    pub const DEBUG_FLAG: &str = "debug";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Scores protein alignments against gold standard alignments.")
        .subcommand_required(true)
        .arg(
            Arg::new(consts::DEBUG_FLAG)
                .short('d')
                .long(consts::DEBUG_FLAG)
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug messages"),
        )
        .subcommand(score::cli::create_score_cli())
        .subcommand(compare::cli::create_compare_cli())
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(matches.get_flag(consts::DEBUG_FLAG));

    match matches.subcommand() {
        //
        // SCORE
        //
        Some((score::cli::SCORE_CMD, matches)) => {
            score::handlers::run_score(matches)?;
        }

        //
        // COMPARE
        //
        Some((compare::cli::COMPARE_CMD, matches)) => {
            compare::handlers::run_compare(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
