//! Package move: relocate a package directory and rewrite its import path.
//!
//! ## Phases
//!
//! 1. Validate arguments and resolve the module root
//! 2. Pre-flight checks (source exists, target free)
//! 3. Move the directory
//! 4. Rewrite `"<module>/<from>"` imports across the tree, and the package
//!    clause of files that moved
//! 5. Print summary and alias hint

use crate::error::Result;
use crate::fs::dir::{clear_target, move_directory};
use crate::fs::walk::TreeWalker;
use crate::report::Summary;
use crate::rewrite::{AliasPolicy, ExactImportRewriter, PackageClauseRewriter};
use crate::steps::{RunContext, report_partial_failure};
use crate::verify::preflight::{check_package_move, resolve_module_root};
use crate::verify::rules::{base_name, is_go_identifier, to_import_suffix, validate_relative_dir};

use colored::Colorize;

/// Arguments of package-move mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePackageArgs {
    /// Old package directory, relative to the project root.
    pub from: String,
    /// New package directory, relative to the project root.
    pub to: String,
    /// Module root override; read from `go.mod` when absent.
    pub module: Option<String>,
    /// Remove an existing target directory.
    pub force: bool,
}

impl MovePackageArgs {
    pub fn validate(&self) -> Result<()> {
        validate_relative_dir(&self.from)?;
        validate_relative_dir(&self.to)
    }

    /// Returns true if the normalised directories differ.
    pub fn would_change_anything(&self) -> bool {
        to_import_suffix(&self.from) != to_import_suffix(&self.to)
    }
}

/// Import and package names derived from a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportMove {
    pub old_import: String,
    pub new_import: String,
    pub policy: AliasPolicy,
    /// `(old, new)` package clause names, when the clause must change.
    pub package_rename: Option<(String, String)>,
}

impl ImportMove {
    /// Derives import paths and naming from `module`, `from` and `to`.
    ///
    /// When the last path segment changes, every importer gets the old name
    /// as alias so that code referring to it keeps compiling.
    pub fn plan(module: &str, from: &str, to: &str) -> Self {
        let from = to_import_suffix(from);
        let to = to_import_suffix(to);
        let old_pkg = base_name(&from);
        let new_pkg = base_name(&to);

        let mut policy = AliasPolicy::Preserve;
        let mut package_rename = None;

        if old_pkg != new_pkg {
            if is_go_identifier(old_pkg) {
                policy = AliasPolicy::Force(old_pkg.to_string());
            } else {
                log::warn!("'{}' is not a valid Go identifier; no alias added", old_pkg);
            }

            if is_go_identifier(new_pkg) {
                package_rename = Some((old_pkg.to_string(), new_pkg.to_string()));
            } else {
                log::warn!(
                    "'{}' is not a valid Go identifier; package clauses left unchanged",
                    new_pkg
                );
            }
        }

        Self {
            old_import: format!("{module}/{from}"),
            new_import: format!("{module}/{to}"),
            policy,
            package_rename,
        }
    }
}

/// Executes a package move.
///
/// A fatal error after the directory move leaves already rewritten files in
/// place; there is no rollback.
pub fn execute(args: &MovePackageArgs, ctx: &RunContext) -> Result<()> {
    args.validate()?;

    if !args.would_change_anything() {
        println!(
            "{}",
            format!("No changes needed: '{}' is already at '{}'", args.from, args.to).yellow()
        );
        return Ok(());
    }

    let module = resolve_module_root(&ctx.root, args.module.as_deref())?;
    let from = to_import_suffix(&args.from);
    let to = to_import_suffix(&args.to);
    let plan = check_package_move(&ctx.root, &from, &to, args.force)?;
    let import_move = ImportMove::plan(&module, &from, &to);

    println!("Rename import:");
    match &import_move.policy {
        AliasPolicy::Force(alias) => println!(
            "  \"{}\" → {} \"{}\"",
            import_move.old_import.yellow(),
            alias,
            import_move.new_import.green()
        ),
        AliasPolicy::Preserve => println!(
            "  \"{}\" → \"{}\"",
            import_move.old_import.yellow(),
            import_move.new_import.green()
        ),
    }

    clear_target(&plan.new_dir, args.force, ctx.dry_run)?;
    if ctx.dry_run {
        log::info!(
            "Would move: {} → {}",
            plan.old_dir.display(),
            plan.new_dir.display()
        );
    } else {
        move_directory(&plan.old_dir, &plan.new_dir)?;
    }

    // In a dry run the files have not moved yet.
    let package_dir = if ctx.dry_run {
        &plan.old_dir
    } else {
        &plan.new_dir
    };

    let imports = ExactImportRewriter::new(
        &import_move.old_import,
        &import_move.new_import,
        import_move.policy.clone(),
    )?;
    let clause = match &import_move.package_rename {
        Some((old_pkg, new_pkg)) => Some(PackageClauseRewriter::new(old_pkg, new_pkg)?),
        None => None,
    };

    log::info!("Rewriting imports under {}", ctx.root.display());
    let walker = TreeWalker::new(&ctx.root, ctx.formatter(), ctx.dry_run);
    let report = walker
        .walk_and_rewrite(|path, content| {
            let mut text = imports.apply(content);

            if let Some(clause) = &clause {
                if path.starts_with(package_dir) {
                    let current = text.as_deref().unwrap_or(content);
                    if let Some(updated) = clause.apply(current) {
                        text = Some(updated);
                    }
                }
            }

            text
        })
        .inspect_err(report_partial_failure)?;

    Summary {
        root: &ctx.root,
        dry_run: ctx.dry_run,
        moved: Some((plan.old_dir.clone(), plan.new_dir.clone())),
        manifest: None,
        walk: &report,
    }
    .print();

    if let AliasPolicy::Force(alias) = &import_move.policy {
        println!(
            "\nPlease search for: {} \"{}\"",
            alias, import_move.new_import
        );
        println!("Then rename the alias '{}' with your editor's refactoring tool.", alias);
    }

    if !ctx.dry_run {
        println!(
            "\n{} {} → {}",
            "✓ Successfully moved".green().bold(),
            from.yellow(),
            to.green().bold()
        );
    }

    Ok(())
}
