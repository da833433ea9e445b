use clap::Parser;
use miette::Result;
use spritecut::cli::{Cli, Commands};
use spritecut::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new().with_verbosity(cli.verbosity());

    match cli.command {
        Commands::Slice(args) => {
            spritecut::cli::slice::run(args, &printer)?;
        }
        Commands::Inspect(args) => {
            spritecut::cli::inspect::run(args, &printer)?;
        }
        Commands::Completions(args) => spritecut::cli::completions::run(args)?,
    }

    Ok(())
}
