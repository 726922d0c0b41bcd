//! CLI command handlers, one file per subcommand.

mod check;
mod completions;
mod fix;

pub use check::run_check;
pub use completions::run_completions;
pub use fix::run_fix;
