//! File system side of a rename: directory moves and the source tree walk.

pub mod dir;
pub mod walk;

pub use dir::{clear_target, move_directory};
pub use walk::{TreeWalker, WalkReport};
