#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! colourcat — dump files to the console with syntax highlighting.

mod cli;
mod commands;
mod config;
mod highlight;
mod input;
mod logging;
mod types;

use clap::Parser;

use cli::{Cli, OutputCtx, write_error};
use commands::Context;
use config::Settings;
use highlight::{Catalog, HighlightError};
use types::ErrorOutput;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            let error_output = ErrorOutput::from_error(&err);
            write_error(&error_output, cli.output, cli.json);
            std::process::exit(err.exit_code());
        }
    }
}

fn run(cli: &Cli) -> Result<i32, HighlightError> {
    let settings = Settings::resolve(cli)?;
    let output = OutputCtx::new(cli.output, cli.json, cli.no_header);

    let catalog = {
        let _t = output.timer("load_catalog");
        Catalog::load()
    };

    let cx = Context {
        cli,
        settings: &settings,
        catalog: &catalog,
        output: &output,
    };
    commands::dispatch(&cli.command(), &cx)
}
