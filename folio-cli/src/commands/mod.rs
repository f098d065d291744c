//! CLI command implementations

mod info;
mod toc;

pub use info::info;
pub use toc::toc;

use std::env;
use std::path::PathBuf;

/// Book root from the argument, the BOOK_ROOT environment variable, or the
/// current directory, in that order
pub(crate) fn book_root(arg: Option<&str>) -> anyhow::Result<PathBuf> {
    if let Some(root) = arg {
        return Ok(PathBuf::from(root));
    }
    if let Ok(root) = env::var("BOOK_ROOT") {
        if !root.is_empty() {
            return Ok(PathBuf::from(root));
        }
    }
    Ok(env::current_dir()?)
}
