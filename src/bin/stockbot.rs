//! Stockbot CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;

use stockbot::cli::args::*;
use stockbot::cli::commands::*;

fn main() {
    let args = StockbotArgs::parse();

    Builder::new()
        .filter_level(args.log_level())
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
