use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    calmjs completions --shell bash > ~/.bash_completion.d/calmjs\n\n\
                  Generate zsh completions:\n    calmjs completions --shell zsh > ~/.zfunc/_calmjs\n\n\
                  Generate fish completions:\n    calmjs completions --shell fish > ~/.config/fish/completions/calmjs.fish\n\n\
                  Generate PowerShell completions:\n    calmjs completions --shell powershell")]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(long, value_enum, ignore_case = true)]
    pub shell: Shell,
}
