//! CLI entrypoint for `yaml-compose`.

use clap::Parser;

use yaml_compose_cli::cli::Args;
use yaml_compose_cli::error::CliError;
use yaml_compose_cli::{logging, run};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    execute().map_err(color_eyre::eyre::Report::from)
}

fn execute() -> Result<(), CliError> {
    let args = Args::parse();
    logging::init()?;
    let mut stdout = std::io::stdout().lock();
    run(&args, &mut stdout)
}
