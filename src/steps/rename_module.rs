//! Module rename: move every import under the old module root to the new one.

use crate::error::Result;
use crate::fs::walk::TreeWalker;
use crate::gomod::{self, GO_MOD};
use crate::report::Summary;
use crate::rewrite::PrefixImportRewriter;
use crate::steps::{RunContext, report_partial_failure};
use crate::verify::rules::validate_module_path;

use colored::Colorize;

/// Arguments of module-rename mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameModuleArgs {
    /// New module root; the old one is read from `go.mod`.
    pub new_module: String,
}

/// Executes a module rename.
///
/// Imports are rewritten first, `go.mod` last.
pub fn execute(args: &RenameModuleArgs, ctx: &RunContext) -> Result<()> {
    let new_module = args.new_module.replace('\\', "/");
    validate_module_path(&new_module)?;

    let go_mod = ctx.root.join(GO_MOD);
    let old_module = gomod::read_module_root(&go_mod)?;
    log::debug!("Current module root: {}", old_module);

    if old_module == new_module {
        println!(
            "{}",
            format!("No changes needed: module is already '{}'", new_module).yellow()
        );
        return Ok(());
    }

    println!("Rename module imports:");
    println!("   {} → {}", old_module.yellow(), new_module.green());

    let rewriter = PrefixImportRewriter::new(&old_module, &new_module)?;
    let walker = TreeWalker::new(&ctx.root, ctx.formatter(), ctx.dry_run);
    let report = walker
        .walk_and_rewrite(|_, content| rewriter.apply(content))
        .inspect_err(report_partial_failure)?;

    if ctx.dry_run {
        log::info!("Would update: {}", go_mod.display());
    } else {
        gomod::write_module_root(&go_mod, &new_module)?;
    }

    Summary {
        root: &ctx.root,
        dry_run: ctx.dry_run,
        moved: None,
        manifest: Some(go_mod),
        walk: &report,
    }
    .print();

    if !ctx.dry_run {
        println!(
            "\n{} {} → {}",
            "✓ Successfully renamed module".green().bold(),
            old_module.yellow(),
            new_module.green().bold()
        );
    }

    Ok(())
}
