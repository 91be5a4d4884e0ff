// ABOUTME: Shell completion generation using clap_complete for all supported shells
// ABOUTME: Provides static completions for bash, zsh, fish, and powershell

use clap::{Command, ValueEnum};
use clap_complete::{generate, shells};
use std::io::Write;

const BIN_NAME: &str = "gallery";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[allow(clippy::enum_variant_names)]
    #[value(name = "powershell", alias = "pwsh")]
    PowerShell,
}

/// Writes completion scripts for the `gallery` binary
pub fn generate_completions<W: Write>(shell: Shell, cmd: &mut Command, writer: &mut W) {
    match shell {
        Shell::Bash => generate(shells::Bash, cmd, BIN_NAME, writer),
        Shell::Zsh => generate(shells::Zsh, cmd, BIN_NAME, writer),
        Shell::Fish => generate(shells::Fish, cmd, BIN_NAME, writer),
        Shell::PowerShell => generate(shells::PowerShell, cmd, BIN_NAME, writer),
    }
}

pub fn installation_instructions() -> &'static str {
    r#"Shell Completion Installation

Bash:
  gallery completions bash > ~/.local/share/bash-completion/completions/gallery

Zsh:
  gallery completions zsh > ~/.zfunc/_gallery
  # fpath=(~/.zfunc $fpath) in ~/.zshrc

Fish:
  gallery completions fish > ~/.config/fish/completions/gallery.fish

PowerShell:
  gallery completions powershell > gallery_completions.ps1
"#
}
