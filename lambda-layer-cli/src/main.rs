#![doc = include_str!("../README.md")]
#![warn(clippy::pedantic)]
#![warn(unused_crate_dependencies)]
// This lint is too noisy and enforces a style that reduces readability in many cases.
#![allow(clippy::module_name_repetitions)]

mod build;
mod cli;
mod error;
mod exit_code;

use clap::Parser;
use log::error;

fn main() {
    setup_logging();
    cli::Cli::parse();

    if let Err(error) = build::execute() {
        error!("{error}");
        std::process::exit(exit_code::UNSPECIFIED_ERROR);
    }
}

fn setup_logging() {
    if let Err(error) = stderrlog::new()
        .verbosity(2) // LevelFilter::Info
        .init()
    {
        eprintln!("Unable to initialize logger: {error}");
        std::process::exit(exit_code::UNSPECIFIED_ERROR);
    }
}
