use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    gitref completions bash > ~/.bash_completion.d/gitref\n\n\
                  Generate zsh completions:\n    gitref completions zsh > ~/.zfunc/_gitref\n\n\
                  Generate fish completions:\n    gitref completions fish > ~/.config/fish/completions/gitref.fish\n\n\
                  Generate PowerShell completions:\n    gitref completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
