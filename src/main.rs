//! CLI entry point for replaying canal level files

use canalbuilder::io::cli::{Cli, FileProcessor};
use canalbuilder::io::logging::init_logging;
use clap::Parser;

fn main() -> canalbuilder::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);
    let mut processor = FileProcessor::new(cli);
    processor.process().map(|_| ())
}
