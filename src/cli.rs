use crate::error::{RenameError, Result};
use crate::format::{Gofmt, Passthrough, SourceFormatter};
use crate::steps::RunContext;
use crate::steps::move_package::MovePackageArgs;
use crate::steps::rename_module::RenameModuleArgs;
use clap::Parser;
use std::path::PathBuf;

const USAGE_MODULE: &str = "Usage: renamepkg --mod github.com/pillar/doaddon";
const USAGE_PACKAGE: &str = "Usage: renamepkg --from internal/server/di --to internal/server/difish";

/// Rename Go packages and modules.
///
/// Package move:   renamepkg --from internal/server/di --to internal/server/difish
/// Module rename:  renamepkg --mod github.com/pillar/doaddon
#[derive(Parser, Debug, Clone)]
#[command(name = "renamepkg", version, verbatim_doc_comment)]
pub struct Cli {
    /// New module path (e.g. github.com/pillar/doaddon); old one is read from go.mod
    #[arg(long = "mod", short = 'm', value_name = "MODULE")]
    pub new_module: Option<String>,

    /// Old package directory (e.g. internal/server/di)
    #[arg(long, short = 'f', value_name = "DIR")]
    pub from: Option<String>,

    /// New package directory (e.g. internal/server/difish)
    #[arg(long, short = 't', value_name = "DIR")]
    pub to: Option<String>,

    /// Module path in go.mod (read from go.mod if not provided)
    #[arg(long, value_name = "MODULE")]
    pub module: Option<String>,

    /// Delete the target directory if it exists
    #[arg(long, short = 'F')]
    pub force: bool,

    /// Project root containing go.mod
    #[arg(long = "dir", short = 'C', value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Preview changes without applying them
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Write rewritten files without running gofmt
    #[arg(long)]
    pub no_fmt: bool,

    /// Formatter binary
    #[arg(long, value_name = "PROGRAM", default_value = "gofmt")]
    pub gofmt: PathBuf,
}

/// What a single invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    MovePackage(MovePackageArgs),
    RenameModule(RenameModuleArgs),
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl Cli {
    /// Resolves the mode from the supplied flags.
    ///
    /// Exactly one mode is allowed per invocation.
    pub fn mode(&self) -> Result<Mode> {
        let from = non_empty(&self.from);
        let to = non_empty(&self.to);

        if let Some(new_module) = non_empty(&self.new_module) {
            if from.is_some() || to.is_some() {
                return Err(RenameError::Usage(format!(
                    "Cannot use --from/--to with --mod\n{USAGE_MODULE}"
                )));
            }

            return Ok(Mode::RenameModule(RenameModuleArgs {
                new_module: new_module.to_string(),
            }));
        }

        match (from, to) {
            (Some(from), Some(to)) => Ok(Mode::MovePackage(MovePackageArgs {
                from: from.to_string(),
                to: to.to_string(),
                module: non_empty(&self.module).map(str::to_string),
                force: self.force,
            })),
            _ => Err(RenameError::Usage(format!(
                "--from and --to are required\n{USAGE_PACKAGE}"
            ))),
        }
    }

    /// Builds the shared run settings.
    pub fn context(&self) -> RunContext {
        let formatter: Box<dyn SourceFormatter> = if self.no_fmt {
            Box::new(Passthrough)
        } else {
            Box::new(Gofmt::new(self.gofmt.clone()))
        };

        RunContext::new(self.root.clone(), self.dry_run, formatter)
    }
}
