//! Curio CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use curio::cli::args::CurioArgs;
use curio::cli::commands::execute_command;

fn main() {
    let args = CurioArgs::parse();

    let log_level = match args.verbosity() {
        0 => LevelFilter::Error, // -q
        1 => LevelFilter::Warn,  // Default
        2 => LevelFilter::Info,  // -v
        _ => LevelFilter::Debug, // -vv and beyond
    };

    Builder::new()
        .filter_level(log_level)
        .parse_env("CURIO_LOG")
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
