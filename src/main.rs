pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod inventory;
pub mod sheet;

use crate::{cli::execute, config::Config};
use env_logger::Env;
use std::{
    env,
    io::{stderr, stdout},
    process,
};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let code = execute(
        env::args_os(),
        Config::from_program_location,
        &mut stdout().lock(),
        &mut stderr().lock(),
    );
    process::exit(code);
}
