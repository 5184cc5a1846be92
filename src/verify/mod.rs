//! Validation and pre-flight checks for rename operations.

pub mod preflight;
pub mod rules;

pub use preflight::{MovePlan, check_package_move, resolve_module_root};
pub use rules::{is_go_identifier, validate_module_path, validate_relative_dir};
