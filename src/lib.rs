#![doc = include_str!("../README.md")]

pub mod cli;
pub mod error;
pub mod format;
pub mod fs;
pub mod gomod;
pub mod report;
pub mod rewrite;
pub mod steps;
pub mod verify;

pub use error::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run() -> Result<()> {
    use clap::Parser;
    use cli::Mode;

    let cli = cli::Cli::parse();
    let mode = cli.mode()?;
    let ctx = cli.context();

    match mode {
        Mode::MovePackage(args) => steps::move_package::execute(&args, &ctx),
        Mode::RenameModule(args) => steps::rename_module::execute(&args, &ctx),
    }
}
