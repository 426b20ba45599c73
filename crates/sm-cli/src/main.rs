mod cli;

use clap::Parser;

fn main() {
    let args = cli::Cli::parse();
    cli::init_logging(args.verbose);

    let stdout = std::io::stdout();
    if let Err(e) = cli::run(&args, stdout.lock()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
