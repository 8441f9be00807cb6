use std::io;

use clap::Parser;
use csv_processor::cli::{self, Cli};

fn main() {
    env_logger::init();

    let args = Cli::parse();
    let mut stdout = io::stdout().lock();
    cli::run(&args, &mut stdout);
}
