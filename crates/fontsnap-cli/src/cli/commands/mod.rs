//! CLI command handlers.

mod completions;
mod fetch;
mod resolve;
mod session;
mod strategies;

pub use completions::run_completions;
pub use fetch::run_fetch;
pub use resolve::run_resolve;
pub use strategies::run_strategies;
