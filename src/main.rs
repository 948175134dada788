mod app;
mod cli;

use std::process;
use tracing::Level;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = app::run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
