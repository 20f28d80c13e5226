use clap::Parser;

use lineforge::adapter::inbound::cli::command::{Cli, ColorChoice};
use lineforge::adapter::inbound::cli::output::{self, OutputConfig};
use lineforge::adapter::inbound::cli::execute;

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));
    output::set_color(match cli.color {
        ColorChoice::Auto => None,
        ColorChoice::Always => Some(true),
        ColorChoice::Never => Some(false),
    });

    if let Err(e) = execute(&cli) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
