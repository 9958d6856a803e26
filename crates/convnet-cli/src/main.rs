//! convnet - Build influence networks from party convention amendments.

use clap::Parser;
use convnet_cli::Cli;

fn main() {
    let cli = Cli::parse();
    convnet_cli::init_tracing(cli.verbose);

    if let Err(e) = convnet_cli::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
