//! `fontsnap completions SHELL` – print a completion script to stdout.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;

pub fn run_completions(shell: Shell) {
    clap_complete::generate(shell, &mut Cli::command(), "fontsnap", &mut std::io::stdout());
}
