//! Completions command implementation
//!
//! Handles the `limit-pack completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap::{Arg, ArgAction, Command};
use clap_complete::{generate, Shell};
use std::io::Write;

/// Binary name completions are generated for
pub const BIN_NAME: &str = "limit-pack";

fn completion_command() -> Command {
    let config = Command::new("config")
        .about("Generate bundler configs for every check")
        .arg(Arg::new("cwd").long("cwd").value_name("DIR"))
        .arg(Arg::new("out-dir").long("out-dir").value_name("DIR"))
        .arg(Arg::new("why").long("why").action(ArgAction::SetTrue))
        .arg(
            Arg::new("save-bundle")
                .long("save-bundle")
                .action(ArgAction::SetTrue),
        )
        .arg(Arg::new("json").long("json").action(ArgAction::SetTrue));

    Command::new(BIN_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Bundler configuration for bundle size checks")
        .arg(
            Arg::new("no-emoji")
                .long("no-emoji")
                .help("Disable emoji output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(config)
        .subcommand(Command::new("init").about("Create a starter .size-limit.toml"))
        .subcommand(Command::new("completions").about("Generate shell completions"))
}

/// Write the completion script for `shell` to `out`
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = completion_command();
    generate(shell, &mut cmd, BIN_NAME, out);
}

/// Generate shell completion scripts
///
/// Outputs completion script for the specified shell to stdout.
///
/// # Examples
///
/// ```bash
/// # Bash
/// limit-pack completions bash > /etc/bash_completion.d/limit-pack
///
/// # Zsh
/// limit-pack completions zsh > ~/.zfunc/_limit-pack
/// ```
pub fn cmd_completions(shell: Shell) {
    write_completions(shell, &mut std::io::stdout());
}
