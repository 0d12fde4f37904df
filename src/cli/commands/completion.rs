use crate::cli::Cli;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

/// Generate shell completion scripts
///
/// Only the script goes to stdout so it can be piped or eval'ed; the
/// installation hint goes to stderr.
pub fn execute(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = "smartwalk";

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    match shell {
        Shell::Bash => eprintln!("# eval \"$(smartwalk completion bash)\" in ~/.bashrc"),
        Shell::Zsh => eprintln!("# eval \"$(smartwalk completion zsh)\" in ~/.zshrc"),
        Shell::Fish => eprintln!(
            "# smartwalk completion fish > ~/.config/fish/completions/smartwalk.fish"
        ),
        Shell::PowerShell => {
            eprintln!("# Invoke-Expression (& smartwalk completion powershell) in $PROFILE")
        },
        _ => {},
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap_complete::Shell;

    #[test]
    fn test_completion_generation() {
        let shells = [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell];

        for shell in shells {
            let mut cmd = Cli::command();
            let mut output = Vec::new();
            generate(shell, &mut cmd, "smartwalk", &mut output);

            assert!(
                !output.is_empty(),
                "No completion script generated for {:?}",
                shell
            );
        }
    }
}
