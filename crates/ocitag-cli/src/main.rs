use clap::Parser;
use ocitag_core::logging;

mod cli;

fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging as early as possible.
    logging::init_logging(&cli.log_level);

    if let Err(err) = cli.run() {
        eprintln!("ocitag error: {err:#}");
        std::process::exit(1);
    }
}
