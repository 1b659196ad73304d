//! Shell completion scripts.
//!
//! The shell is parsed by clap as a [`clap_complete::Shell`] value, so every
//! shell clap_complete knows (bash, zsh, fish, elvish, powershell) works.

use std::io::Write;

use clap::Command;
use clap_complete::{generate, Shell};

/// Write the completion script for `cmd` to `out`
pub fn generate_completions<W: Write>(cmd: &mut Command, shell: Shell, out: &mut W) {
    let bin_name = cmd.get_name().to_string();
    generate(shell, cmd, bin_name, out);
}
