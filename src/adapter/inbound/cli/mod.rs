//! CLI module graph and command dispatch.

pub mod command;
pub mod config;
pub mod output;
pub mod resolve;
pub mod run;
pub mod slate;

use command::{Cli, Commands, ConfigCommand};

use crate::error::Result;

/// Run the parsed command.
pub fn execute(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Run(args) => run::execute(args),
        Commands::Resolve(args) => resolve::execute(args),
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(&args.path, args.force),
        Commands::Config(ConfigCommand::Show(arg)) => config::execute_show(&arg.config),
        Commands::Config(ConfigCommand::Validate(arg)) => config::execute_validate(&arg.config),
    }
}
