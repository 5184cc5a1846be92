//! Binary entry point for `renamepkg`.

use colored::Colorize;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = renamepkg::run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
